use crate::segment::Position;

/// A fully resolved mapping: one segment joined with the envelope arrays.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Location<'m> {
    pub name: Option<&'m str>,
    pub source: &'m str,
    pub source_root: Option<&'m str>,
    pub source_index: u32,
    pub original: Position,
    pub generated: Position,
}

/// Picks a source for original-position queries: by id, or by the first
/// path containing the query string.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SourceQuery<'q> {
    Index(u32),
    Contains(&'q str),
}

impl From<u32> for SourceQuery<'_> {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl<'q> From<&'q str> for SourceQuery<'q> {
    fn from(needle: &'q str) -> Self {
        Self::Contains(needle)
    }
}

/// How many content lines to include around the resolved original line in
/// [position_with_snippet](crate::BorrowedSourceMap::position_with_snippet).
#[derive(Debug, Clone, Copy)]
pub struct SnippetContext {
    pub lines_before: u32,
    pub lines_after: u32,
}

impl Default for SnippetContext {
    fn default() -> Self {
        Self {
            lines_before: 3,
            lines_after: 4,
        }
    }
}

/// A resolved mapping plus the surrounding lines of the original source.
///
/// `start_line`/`end_line` are 0-based over the content's `\n`-split lines,
/// the end exclusive; `code` is the contiguous slice covering that window,
/// without the final line terminator.
#[derive(Debug, Clone, Copy)]
pub struct CodeFrame<'m> {
    pub location: Location<'m>,
    pub code: &'m str,
    pub start_line: u32,
    pub end_line: u32,
}

impl<'m> CodeFrame<'m> {
    pub(crate) fn cut(location: Location<'m>, content: &'m str, context: SnippetContext) -> Self {
        let mut starts = vec![0];
        for (idx, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(idx + 1);
            }
        }
        let line_count = starts.len();

        let line = location.original.line as usize;
        let end = line_count.min(line + context.lines_after as usize);
        let start = line.saturating_sub(context.lines_before as usize).min(end);

        let code_start = starts.get(start).copied().unwrap_or(content.len());
        let code_end = if end < line_count {
            // stop before the newline that ends the last included line
            starts[end] - 1
        } else {
            content.len()
        };
        let code = &content[code_start..code_end.max(code_start)];

        Self {
            location,
            code,
            start_line: start as u32,
            end_line: end as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CodeFrame, Location, SnippetContext};
    use crate::segment::Position;

    fn location_at(line: u32) -> Location<'static> {
        Location {
            name: None,
            source: "a.js",
            source_root: None,
            source_index: 0,
            original: Position::new(line, 1),
            generated: Position::new(1, 1),
        }
    }

    #[test]
    fn test_snippet_window() {
        let content = "function name(data) {\n  console.log('x');\n  throw new Error('e');\n}\n";
        let frame = CodeFrame::cut(
            location_at(3),
            content,
            SnippetContext {
                lines_before: 2,
                lines_after: 1,
            },
        );
        assert_eq!(frame.start_line, 1);
        assert_eq!(frame.end_line, 4);
        assert_eq!(
            frame.code,
            "  console.log('x');\n  throw new Error('e');\n}"
        );
    }

    #[test]
    fn test_snippet_clamps_to_content() {
        let content = "one\ntwo";
        let frame = CodeFrame::cut(location_at(1), content, SnippetContext::default());
        assert_eq!(frame.start_line, 0);
        assert_eq!(frame.end_line, 2);
        assert_eq!(frame.code, "one\ntwo");

        let past_end = CodeFrame::cut(location_at(40), content, SnippetContext::default());
        assert_eq!(past_end.code, "");
        assert_eq!(past_end.start_line, past_end.end_line);
    }
}
