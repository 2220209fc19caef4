use std::fmt::{Debug, Formatter};

/// `Position` is a one-based line and column in a file.
///
/// # Note
///
/// Coordinates in this crate are 1-based in memory and 0-based on the wire;
/// the codec converts at the boundary. Consumers of other libraries should
/// check their base before comparing positions: engine stack traces are
/// 1-based, npm tooling such as `babel` emits 1-based lines with 0-based
/// columns, and `esbuild` is 0-based throughout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<(u32, u32)> for Position {
    fn from((line, column): (u32, u32)) -> Self {
        Self::new(line, column)
    }
}

/// The source attribution of a segment: which original file it points into,
/// where, and optionally under which name.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SourceSpan {
    pub index: u32,
    pub position: Position,
    pub name: Option<u32>,
}

/// One mapping record: a generated position, optionally attributed to a
/// position in an original source.
///
/// Wire segments of length 1 decode to a segment without attribution; a
/// name can only exist on an attributed segment, so "length 5 with name 0"
/// and "length 4 without a name" stay distinct.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    generated: Position,
    source: Option<SourceSpan>,
}

impl Debug for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.generated.line, self.generated.column)?;
        if let Some(span) = self.source() {
            write!(
                f,
                " -> {}:{}:{}",
                span.index, span.position.line, span.position.column,
            )?;
            if let Some(name) = span.name {
                write!(f, " ({})", name)?;
            }
        }
        Ok(())
    }
}

impl Segment {
    #[inline(always)]
    pub const fn new(generated_line: u32, generated_column: u32) -> Self {
        Self {
            generated: Position {
                line: generated_line,
                column: generated_column,
            },
            source: None,
        }
    }

    #[inline(always)]
    pub const fn with_source(self, index: u32, line: u32, column: u32) -> Self {
        Self {
            source: Some(SourceSpan {
                index,
                position: Position { line, column },
                name: None,
            }),
            ..self
        }
    }

    /// Attaches a name to the source attribution. A segment without
    /// attribution cannot carry a name, so the call is a no-op there.
    #[inline(always)]
    pub const fn with_name(self, name: u32) -> Self {
        match self.source {
            Some(span) => Self {
                source: Some(SourceSpan {
                    name: Some(name),
                    ..span
                }),
                ..self
            },
            None => self,
        }
    }
}

impl Segment {
    /// Returns the generated position of the segment.
    #[inline]
    pub fn generated(&self) -> Position {
        self.generated
    }

    /// Returns the source attribution if available.
    #[inline]
    pub fn source(&self) -> Option<&SourceSpan> {
        self.source.as_ref()
    }

    /// Checks if the segment has source attribution.
    #[inline]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Returns the name id if available.
    #[inline]
    pub fn name(&self) -> Option<u32> {
        self.source.and_then(|span| span.name)
    }

    /// Checks if the segment carries a name.
    #[inline]
    pub fn has_name(&self) -> bool {
        self.name().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Segment;

    #[test]
    fn test_name_requires_source() {
        let bare = Segment::new(1, 1).with_name(7);
        assert!(!bare.has_name());

        let attributed = Segment::new(1, 1).with_source(0, 2, 3).with_name(7);
        assert_eq!(attributed.name(), Some(7));
    }

    #[test]
    fn test_debug_format() {
        let segment = Segment::new(4, 2).with_source(1, 3, 9).with_name(0);
        assert_eq!(format!("{segment:?}"), "4:2 -> 1:3:9 (0)");
    }
}
