use crate::segment::Segment;
use crate::splitter::Splitter;
use crate::vlq::{VlqDecoder, VlqEncoder};
use crate::{Error, Result, SegmentField};
use std::io;
use std::io::Write;
use std::ops::Deref;

/// `Frame` is the ordered segments of one generated line.
///
/// An empty frame stands for a generated line with no mappings; keeping it
/// in the frame list makes line access O(1).
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Frame(pub(crate) Vec<Segment>);

impl Deref for Frame {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Segment>> for Frame {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl Frame {
    pub const fn empty() -> Self {
        Self(Vec::new())
    }
}

/// `Mappings` is the decoded form of the `mappings` blob: a dense list of
/// [Frame]s indexed by `generated line - 1`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Mappings(pub(crate) Vec<Frame>);

impl Deref for Mappings {
    type Target = [Frame];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Mappings {
    /// Creates `Mappings` from explicit frames.
    ///
    /// Validates the per-frame invariants: every coordinate 1-based, each
    /// segment's generated line matching its frame, generated columns
    /// non-decreasing.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        let v = Self(frames);
        v.check_frames()?;
        Ok(v)
    }

    pub(crate) fn check_frames(&self) -> Result<()> {
        for (frame_idx, frame) in self.0.iter().enumerate() {
            let line = u32::try_from(frame_idx + 1).map_err(|_| Error::MappingOverflow)?;
            let mut prev_column = 0;

            for (segment_idx, segment) in frame.iter().enumerate() {
                let generated = segment.generated();
                if generated.line != line {
                    return Err(Error::InvalidSegmentField {
                        field: SegmentField::GeneratedLine,
                        received: generated.line as i64,
                    });
                }
                if generated.column == 0 {
                    return Err(Error::InvalidSegmentField {
                        field: SegmentField::GeneratedColumn,
                        received: 0,
                    });
                }
                if generated.column < prev_column {
                    return Err(Error::UnorderedSegments {
                        frame: frame_idx,
                        segment: segment_idx,
                    });
                }
                prev_column = generated.column;

                if let Some(span) = segment.source() {
                    if span.position.line == 0 {
                        return Err(Error::InvalidSegmentField {
                            field: SegmentField::Line,
                            received: 0,
                        });
                    }
                    if span.position.column == 0 {
                        return Err(Error::InvalidSegmentField {
                            field: SegmentField::Column,
                            received: 0,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct ItemsCount {
    pub(crate) sources: u32,
    pub(crate) names: u32,
}

impl ItemsCount {
    pub fn new(sources: u32, names: u32) -> Self {
        Self { sources, names }
    }
}

impl Mappings {
    pub(crate) fn validate(&self, items_count: ItemsCount) -> Result<()> {
        self.check_frames()?;

        for frame in self.0.iter() {
            for segment in frame.iter() {
                if let Some(span) = segment.source() {
                    if span.index >= items_count.sources {
                        return Err(Error::UnknownSourceReference(span.index));
                    }
                    if let Some(name) = span.name {
                        if name >= items_count.names {
                            return Err(Error::UnknownNameReference(name));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Mappings {
    /// Serializes the frames back to the `mappings` wire format.
    ///
    /// Generated columns restart on every line; source and name accumulators
    /// run through the whole blob. Unattributed segments are written back as
    /// single-field records.
    pub fn encode<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        let mut prev_generated_col = 0;
        let mut prev_source_id = 0;
        let mut prev_source_line = 0;
        let mut prev_source_col = 0;
        let mut prev_name_id = 0;

        for (frame_idx, frame) in self.0.iter().enumerate() {
            if frame_idx != 0 {
                writer.write_all(&[b';'])?;
            }
            prev_generated_col = 0;

            for (segment_idx, segment) in frame.iter().enumerate() {
                if segment_idx != 0 {
                    writer.write_all(&[b','])?;
                }

                let mut encoder = VlqEncoder::new(writer);

                let generated_col = segment.generated().column - 1;
                encoder.encode(prev_generated_col, generated_col)?;
                prev_generated_col = generated_col;

                if let Some(span) = segment.source() {
                    encoder.encode(prev_source_id, span.index)?;
                    prev_source_id = span.index;

                    let source_line = span.position.line - 1;
                    encoder.encode(prev_source_line, source_line)?;
                    prev_source_line = source_line;

                    let source_col = span.position.column - 1;
                    encoder.encode(prev_source_col, source_col)?;
                    prev_source_col = source_col;

                    if let Some(name_id) = span.name {
                        encoder.encode(prev_name_id, name_id)?;
                        prev_name_id = name_id;
                    }
                }
            }
        }

        Ok(())
    }

    /// Collects [encode](Self::encode) into a string.
    #[inline]
    pub fn encode_to_string(&self) -> io::Result<String> {
        let mut buf = Vec::with_capacity(self.0.len() * 8);
        self.encode(&mut buf)?;
        // SAFETY: the encoder only writes alphabet bytes and separators
        Ok(unsafe { String::from_utf8_unchecked(buf) })
    }
}

/// Running wire accumulators.
///
/// `source_id` and `name_id` may be seeded so a blob decodes against arrays
/// that were appended after existing entries; the original line and column
/// always start at zero.
#[derive(Debug, Default, Copy, Clone)]
struct DecodeState {
    generated_col: u32,
    source_id: u32,
    source_line: u32,
    source_col: u32,
    name_id: u32,
}

/// Decoder for the `mappings` blob.
///
/// ```
/// # use remap::MappingsDecoder;
/// let mappings = MappingsDecoder::new("AAAA;;CACA").decode().unwrap();
/// assert_eq!(mappings.len(), 3);
/// ```
#[derive(Debug)]
pub struct MappingsDecoder<'a> {
    source: &'a str,
    sources_base: u32,
    names_base: u32,
}

impl<'a> MappingsDecoder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            sources_base: 0,
            names_base: 0,
        }
    }

    /// Seeds the source and name accumulators, for blobs whose arrays were
    /// appended after `sources_base`/`names_base` existing entries.
    pub fn bases(mut self, sources_base: u32, names_base: u32) -> Self {
        self.sources_base = sources_base;
        self.names_base = names_base;
        self
    }

    pub fn decode(self) -> Result<Mappings> {
        let mut mappings = Mappings::default();
        self.decode_into(&mut mappings)?;
        Ok(mappings)
    }

    /// Decodes and appends after `target`'s existing frames, the first new
    /// frame landing on the next generated line. On error `target` is left
    /// untouched.
    pub fn decode_into(self, target: &mut Mappings) -> Result<()> {
        if self.source.is_empty() {
            return Ok(());
        }
        if !self.source.is_ascii() {
            return Err(Error::InvalidMappingsCharset);
        }

        let lines_base = target.0.len();
        let mut frames: Vec<Frame> = Vec::new();
        let mut decoder = VlqDecoder::new();
        let mut state = DecodeState {
            source_id: self.sources_base,
            name_id: self.names_base,
            ..DecodeState::default()
        };

        for (line_start, line) in Splitter::new(self.source, b';') {
            let frame_idx = frames.len();

            if line.is_empty() {
                frames.push(Frame::empty());
                continue;
            }

            let generated_line =
                u32::try_from(lines_base + frame_idx + 1).map_err(|_| Error::MappingOverflow)?;
            state.generated_col = 0;
            let mut segments = Vec::new();

            for (segment_idx, (segment_start, raw)) in Splitter::new(line, b',').enumerate() {
                let (nums, len) = decoder.decode(raw, line_start + segment_start)?;
                if !matches!(len, 1 | 4 | 5) {
                    return Err(Error::InvalidSegmentLen {
                        frame: frame_idx,
                        segment: segment_idx,
                        len,
                    });
                }

                let col = advance(
                    state.generated_col,
                    nums[0],
                    SegmentField::GeneratedColumn,
                    frame_idx,
                    segment_idx,
                )?;
                if col < state.generated_col {
                    return Err(Error::UnorderedSegments {
                        frame: frame_idx,
                        segment: segment_idx,
                    });
                }
                state.generated_col = col;

                let mut segment = Segment::new(generated_line, one_based(col)?);

                if len > 1 {
                    state.source_id = advance(
                        state.source_id,
                        nums[1],
                        SegmentField::SourceIndex,
                        frame_idx,
                        segment_idx,
                    )?;
                    state.source_line = advance(
                        state.source_line,
                        nums[2],
                        SegmentField::Line,
                        frame_idx,
                        segment_idx,
                    )?;
                    state.source_col = advance(
                        state.source_col,
                        nums[3],
                        SegmentField::Column,
                        frame_idx,
                        segment_idx,
                    )?;

                    segment = segment.with_source(
                        state.source_id,
                        one_based(state.source_line)?,
                        one_based(state.source_col)?,
                    );

                    if len == 5 {
                        state.name_id = advance(
                            state.name_id,
                            nums[4],
                            SegmentField::NameIndex,
                            frame_idx,
                            segment_idx,
                        )?;
                        segment = segment.with_name(state.name_id);
                    }
                }

                segments.push(segment);
            }

            frames.push(Frame(segments));
        }

        target.0.extend(frames);
        Ok(())
    }
}

/// Applies one signed delta to an accumulator, rejecting results outside
/// u32 range.
fn advance(
    acc: u32,
    delta: i64,
    field: SegmentField,
    frame: usize,
    segment: usize,
) -> Result<u32> {
    let next = (acc as i64)
        .checked_add(delta)
        .ok_or(Error::MappingOverflow)?;
    if next < 0 {
        return Err(Error::NegativeCoordinate {
            field,
            frame,
            segment,
        });
    }
    u32::try_from(next).map_err(|_| Error::MappingOverflow)
}

#[inline]
fn one_based(wire: u32) -> Result<u32> {
    wire.checked_add(1).ok_or(Error::MappingOverflow)
}
