use crate::lookup::Bias;
use crate::mappings::{Frame, ItemsCount, Mappings, MappingsDecoder};
use crate::segment::Segment;
use crate::sourcemap::location::{CodeFrame, Location, SnippetContext, SourceQuery};
use crate::sourcemap::raw::RawSourceMap;
use crate::{Error, Result};
use simd_json_derive::Serialize;
use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use std::io;
use std::io::Write;
use std::iter::repeat_with;

/// `BorrowedSourceMap` is a source map containing borrowed or owned strings.
///
/// For a source map that owns all its internal strings, see
/// [SourceMap](crate::SourceMap). This struct can be converted into it using
/// [into_owned](BorrowedSourceMap::into_owned).
///
/// # Methods
///
/// ## Parsing
///
/// You can create a `BorrowedSourceMap` using the following methods:
/// - [`BorrowedSourceMap::from_str`]
/// - [`BorrowedSourceMap::from_slice`]
///
/// These methods take mutable references as parameters because they may
/// modify the data in place. The envelope must carry `sources`, `names` and
/// `mappings`; `version` is checked against 3 when present.
///
/// ## Construction
///
/// [SourceMapBuilder](crate::SourceMapBuilder) assembles a map from explicit
/// parts, and [Mappings::from_frames](crate::Mappings::from_frames) builds
/// the frame list itself.
///
/// ## Queries
///
/// To resolve positions against the envelope arrays, use:
/// - [`position_by_generated`](BorrowedSourceMap::position_by_generated)
/// - [`position_by_original`](BorrowedSourceMap::position_by_original)
/// - [`position_with_content`](BorrowedSourceMap::position_with_content)
/// - [`position_with_snippet`](BorrowedSourceMap::position_with_snippet)
///
/// ## Concatenation
///
/// [`concat`](BorrowedSourceMap::concat) appends other maps behind this one,
/// shifting their frames and indices; [`concat_new`](BorrowedSourceMap::concat_new)
/// does the same on a fresh copy.
///
/// ## Output
///
/// You can serialize the source map to json using:
/// - [`write`](BorrowedSourceMap::write)
/// - [`to_vec`](BorrowedSourceMap::to_vec)
/// - [`to_string`](BorrowedSourceMap::to_string)
#[derive(Clone)]
pub struct BorrowedSourceMap<'a> {
    pub(crate) file: Option<Cow<'a, str>>,
    pub(crate) mappings: Mappings,
    pub(crate) names: Vec<Cow<'a, str>>,
    pub(crate) source_root: Option<Cow<'a, str>>,
    pub(crate) sources: Vec<Cow<'a, str>>,
    pub(crate) sources_content: Vec<Option<Cow<'a, str>>>,
}

impl Debug for BorrowedSourceMap<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SourceMap\n")?;
        f.write_str("  sources:\n")?;
        for (idx, source) in self.sources.iter().enumerate() {
            writeln!(f, "    {idx}: {source}")?;
        }
        f.write_str("  names:\n")?;
        for (idx, name) in self.names.iter().enumerate() {
            writeln!(f, "    {idx}: {name}")?;
        }
        f.write_str("  mappings:\n")?;
        for frame in self.mappings.iter().filter(|frame| !frame.is_empty()) {
            f.write_str("    ")?;
            for (idx, segment) in frame.iter().enumerate() {
                if idx != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{segment:?}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl<'a> BorrowedSourceMap<'a> {
    fn from_raw(raw: RawSourceMap<'a>) -> Result<Self> {
        if let Some(version) = raw.version {
            if version != 3 {
                return Err(Error::UnsupportedVersion(version));
            }
        }

        let raw_sources = raw.sources.ok_or(Error::MissingRequiredKey("sources"))?;
        let raw_names = raw.names.ok_or(Error::MissingRequiredKey("names"))?;
        let raw_mappings = raw.mappings.ok_or(Error::MissingRequiredKey("mappings"))?;

        let file = raw.file.map(Cow::Borrowed);
        let source_root = raw.source_root.map(Cow::Borrowed);

        // null entries are tolerated on read and normalized to empty paths
        let sources = Vec::from_iter(
            raw_sources
                .into_iter()
                .map(|source| Cow::Borrowed(source.unwrap_or(""))),
        );
        let sources_len = sources.len();

        let sources_content = if let Some(sources_content) = raw.sources_content {
            let sources_content_len = sources_content.len();
            if sources_content_len != sources_len {
                return Err(Error::mismatch_sources_content(
                    sources_len as u32,
                    sources_content_len as u32,
                ));
            }
            Vec::from_iter(sources_content.into_iter().map(|s| s.map(Cow::Borrowed)))
        } else {
            Vec::from_iter(repeat_with(|| None).take(sources_len))
        };

        let names = Vec::from_iter(raw_names.into_iter().map(Cow::Borrowed));

        let mappings = MappingsDecoder::new(raw_mappings).decode()?;
        mappings.validate(ItemsCount::new(sources_len as u32, names.len() as u32))?;

        Ok(Self {
            file,
            mappings,
            names,
            source_root,
            sources,
            sources_content,
        })
    }

    /// Creates a new `BorrowedSourceMap` from a JSON buffer slice.
    ///
    /// The slice is mutable to facilitate in-place replacement of escape
    /// characters in the JSON string, allowing maximum data borrowing.
    #[inline]
    pub fn from_slice(json: &'a mut [u8]) -> Result<Self> {
        Self::from_raw(RawSourceMap::from_slice(json)?)
    }

    /// Creates a new `BorrowedSourceMap` from a JSON string.
    ///
    /// The string is mutable to facilitate in-place replacement of escape
    /// characters in the JSON string, allowing maximum data borrowing.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &'a mut str) -> Result<Self> {
        Self::from_raw(RawSourceMap::from_str(json)?)
    }

    /// Validates the source map after manual modification.
    pub fn validate(&self) -> Result<()> {
        let sources_len = self.sources.len() as u32;
        let sources_content_len = self.sources_content.len() as u32;

        if sources_content_len != sources_len {
            return Err(Error::mismatch_sources_content(
                sources_len,
                sources_content_len,
            ));
        }

        self.mappings
            .validate(ItemsCount::new(sources_len, self.names.len() as u32))
    }
}

impl<'a> BorrowedSourceMap<'a> {
    #[inline]
    pub fn file(&self) -> &Option<Cow<'a, str>> {
        &self.file
    }

    #[inline]
    pub fn file_mut(&mut self) -> &mut Option<Cow<'a, str>> {
        &mut self.file
    }

    #[inline]
    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    #[inline]
    pub fn names(&self) -> &[Cow<'a, str>] {
        &self.names
    }

    #[inline]
    pub fn source_root(&self) -> &Option<Cow<'a, str>> {
        &self.source_root
    }

    #[inline]
    pub fn sources(&self) -> &[Cow<'a, str>] {
        &self.sources
    }

    #[inline]
    pub fn sources_content(&self) -> &[Option<Cow<'a, str>>] {
        &self.sources_content
    }
}

impl<'a> BorrowedSourceMap<'a> {
    /// Resolves the mapping at a generated position (1-based) against the
    /// envelope arrays.
    ///
    /// Returns `None` when nothing maps there under `bias`, or when the
    /// matched segment carries no source attribution.
    pub fn position_by_generated(&self, line: u32, column: u32, bias: Bias) -> Option<Location<'_>> {
        self.resolve(self.mappings.find_generated(line, column, bias)?)
    }

    /// Resolves a position of an original source back to the generated file.
    ///
    /// `source` picks the source by index or by the first path containing
    /// the query string; an unmatched query is an error, an unmapped
    /// position is `Ok(None)`.
    pub fn position_by_original<'q>(
        &self,
        line: u32,
        column: u32,
        source: impl Into<SourceQuery<'q>>,
        bias: Bias,
    ) -> Result<Option<Location<'_>>> {
        let index = self.resolve_source_query(source.into())?;
        Ok(self
            .mappings
            .find_original(index, line, column, bias)
            .and_then(|segment| self.resolve(segment)))
    }

    /// Like [position_by_generated](Self::position_by_generated), but also
    /// returns the full stored content of the resolved source. `None` when
    /// no content is stored for it.
    pub fn position_with_content(
        &self,
        line: u32,
        column: u32,
        bias: Bias,
    ) -> Option<(Location<'_>, &str)> {
        let location = self.position_by_generated(line, column, bias)?;
        let content = self
            .sources_content
            .get(location.source_index as usize)?
            .as_deref()?;
        Some((location, content))
    }

    /// Resolves a generated position and cuts a snippet of the original
    /// source around it. `None` when no content is stored for the source.
    pub fn position_with_snippet(
        &self,
        line: u32,
        column: u32,
        bias: Bias,
        context: SnippetContext,
    ) -> Option<CodeFrame<'_>> {
        let (location, content) = self.position_with_content(line, column, bias)?;
        Some(CodeFrame::cut(location, content, context))
    }

    fn resolve(&self, segment: &Segment) -> Option<Location<'_>> {
        let span = segment.source()?;
        let source = self.sources.get(span.index as usize)?;
        let name = span
            .name
            .and_then(|id| self.names.get(id as usize))
            .map(Cow::as_ref);

        Some(Location {
            name,
            source: source.as_ref(),
            source_root: self.source_root.as_deref(),
            source_index: span.index,
            original: span.position,
            generated: segment.generated(),
        })
    }

    fn resolve_source_query(&self, query: SourceQuery<'_>) -> Result<u32> {
        match query {
            SourceQuery::Index(index) => {
                if (index as usize) < self.sources.len() {
                    Ok(index)
                } else {
                    Err(Error::SourceNotFound(format!("#{index}")))
                }
            }
            SourceQuery::Contains(needle) => self
                .sources
                .iter()
                .position(|source| source.contains(needle))
                .map(|idx| idx as u32)
                .ok_or_else(|| Error::SourceNotFound(needle.to_owned())),
        }
    }
}

impl<'a> BorrowedSourceMap<'a> {
    /// Appends `others` to this map in call order.
    ///
    /// Each appended map contributes its names, sources and content arrays,
    /// and its frames shifted onto the lines after the current last frame
    /// and onto the appended array indices. On error `self` is unchanged.
    pub fn concat<I>(&mut self, others: I) -> Result<()>
    where
        I: IntoIterator<Item = BorrowedSourceMap<'a>>,
    {
        let others = Vec::from_iter(others);
        if others.is_empty() {
            return Err(Error::EmptyConcat);
        }

        let mut frames = Vec::new();
        let mut names = Vec::new();
        let mut sources = Vec::new();
        let mut sources_content = Vec::new();

        let mut lines_base = self.mappings.len();
        let mut sources_base = self.sources.len();
        let mut names_base = self.names.len();

        for other in others {
            let other_lines = other.mappings.len();
            for frame in other.mappings.0 {
                let segments = frame
                    .0
                    .into_iter()
                    .map(|segment| shift_segment(segment, lines_base, sources_base, names_base))
                    .collect::<Result<Vec<_>>>()?;
                frames.push(Frame(segments));
            }
            lines_base += other_lines;
            sources_base += other.sources.len();
            names_base += other.names.len();

            names.extend(other.names);
            sources.extend(other.sources);
            sources_content.extend(other.sources_content);
        }

        self.mappings.0.extend(frames);
        self.names.extend(names);
        self.sources.extend(sources);
        self.sources_content.extend(sources_content);
        Ok(())
    }

    /// Builds a new map from this one plus `others`, leaving this one
    /// untouched.
    pub fn concat_new<I>(&self, others: I) -> Result<Self>
    where
        I: IntoIterator<Item = BorrowedSourceMap<'a>>,
    {
        let mut map = self.clone();
        map.concat(others)?;
        Ok(map)
    }
}

fn shift_segment(
    segment: Segment,
    lines: usize,
    sources: usize,
    names: usize,
) -> Result<Segment> {
    let generated = segment.generated();
    let line = u32::try_from(generated.line as usize + lines).map_err(|_| Error::MappingOverflow)?;
    let mut shifted = Segment::new(line, generated.column);

    if let Some(span) = segment.source() {
        let index =
            u32::try_from(span.index as usize + sources).map_err(|_| Error::MappingOverflow)?;
        shifted = shifted.with_source(index, span.position.line, span.position.column);

        if let Some(name) = span.name {
            let name = u32::try_from(name as usize + names).map_err(|_| Error::MappingOverflow)?;
            shifted = shifted.with_name(name);
        }
    }

    Ok(shifted)
}

impl BorrowedSourceMap<'_> {
    /// Serializes to source map JSON with a stable key order:
    /// `version, file, names, sources, mappings, sourcesContent, sourceRoot`.
    pub fn write<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        w.write_all(br#"{"version":3"#)?;

        if let Some(file) = self.file.as_deref() {
            w.write_all(br#","file":"#)?;
            file.json_write(w)?;
        }

        w.write_all(br#","names":"#)?;
        self.names.json_write(w)?;

        w.write_all(br#","sources":"#)?;
        self.sources.json_write(w)?;

        w.write_all(br#","mappings":""#)?;
        self.mappings.encode(w)?;
        w.write_all(br#"""#)?;

        w.write_all(br#","sourcesContent":"#)?;
        self.sources_content.json_write(w)?;

        if let Some(source_root) = self.source_root.as_deref() {
            w.write_all(br#","sourceRoot":"#)?;
            source_root.json_write(w)?;
        }

        w.write_all(br#"}"#)
    }

    #[inline]
    pub fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut v = Vec::with_capacity(1024);
        self.write(&mut v)?;
        Ok(v)
    }

    #[inline]
    pub fn to_string(&self) -> io::Result<String> {
        self.to_vec()
            .map(|v| unsafe { String::from_utf8_unchecked(v) })
    }
}
