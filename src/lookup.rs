use crate::mappings::Mappings;
use crate::segment::Segment;

/// Tie-break policy for column lookups.
///
/// An exact column hit wins under every bias. On a miss, `Floor` falls back
/// to the closest mapped column below the query, `Ceiling` to the closest
/// above, and `Exact` gives up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Bias {
    #[default]
    Exact,
    Floor,
    Ceiling,
}

impl Mappings {
    /// Finds the segment mapped at a generated position (1-based).
    ///
    /// A line outside the map or without mappings yields `None`; otherwise
    /// the frame is binary searched by generated column and the bias decides
    /// which neighbour, if any, answers a miss.
    pub fn find_generated(&self, line: u32, column: u32, bias: Bias) -> Option<&Segment> {
        let frame = self.0.get(line.checked_sub(1)? as usize)?;
        if frame.is_empty() {
            return None;
        }

        match frame.binary_search_by_key(&column, |segment| segment.generated().column) {
            Ok(idx) => Some(&frame[idx]),
            Err(idx) => match bias {
                Bias::Exact => None,
                Bias::Floor => idx.checked_sub(1).map(|below| &frame[below]),
                Bias::Ceiling => frame.get(idx),
            },
        }
    }

    /// Finds the segment that maps a position of an original source.
    ///
    /// Only segments attributed to `source_index` on exactly `line`
    /// participate; the bias picks along the column axis. Frames are indexed
    /// by the generated axis, so this walks them in generated order: `Floor`
    /// resolves equal candidates towards the last one seen, `Ceiling`
    /// towards the first.
    pub fn find_original(
        &self,
        source_index: u32,
        line: u32,
        column: u32,
        bias: Bias,
    ) -> Option<&Segment> {
        let mut best: Option<(u32, &Segment)> = None;

        for frame in self.0.iter() {
            for segment in frame.iter() {
                let Some(span) = segment.source() else {
                    continue;
                };
                if span.index != source_index || span.position.line != line {
                    continue;
                }
                let col = span.position.column;

                match bias {
                    Bias::Exact => {
                        if col == column {
                            return Some(segment);
                        }
                    }
                    Bias::Floor => {
                        if col <= column && best.map_or(true, |(held, _)| col >= held) {
                            best = Some((col, segment));
                        }
                    }
                    Bias::Ceiling => {
                        if col >= column && best.map_or(true, |(held, _)| col < held) {
                            best = Some((col, segment));
                        }
                    }
                }
            }
        }

        best.map(|(_, segment)| segment)
    }
}
