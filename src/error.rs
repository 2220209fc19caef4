use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Names a coordinate field of a segment, so decode and validation errors
/// can point at the offending value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SegmentField {
    GeneratedLine,
    GeneratedColumn,
    SourceIndex,
    Line,
    Column,
    NameIndex,
}

impl fmt::Display for SegmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SegmentField::GeneratedLine => "generated line",
            SegmentField::GeneratedColumn => "generated column",
            SegmentField::SourceIndex => "source index",
            SegmentField::Line => "original line",
            SegmentField::Column => "original column",
            SegmentField::NameIndex => "name index",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source map syntax error: {0}")]
    Syntax(#[from] simd_json::Error),

    #[error("unsupported source map version {0}")]
    UnsupportedVersion(u32),

    #[error("source map is missing required key `{0}`")]
    MissingRequiredKey(&'static str),

    #[error("byte {byte:#04x} is not a valid vlq character (offset {offset})")]
    InvalidVlqChar { byte: u8, offset: usize },

    #[error("vlq sequence ends on a continuation bit at offset {0}")]
    TruncatedVlq(usize),

    #[error("vlq value at offset {0} overflows 64 bits")]
    VlqOverflow(usize),

    #[error("mappings contain bytes outside the base64 vlq character set")]
    InvalidMappingsCharset,

    #[error("segment {segment} of frame {frame} has {len} fields, expected 1, 4 or 5")]
    InvalidSegmentLen {
        frame: usize,
        segment: usize,
        len: usize,
    },

    #[error("{field} underflows below zero at segment {segment} of frame {frame}")]
    NegativeCoordinate {
        field: SegmentField,
        frame: usize,
        segment: usize,
    },

    #[error("generated columns move backwards at segment {segment} of frame {frame}")]
    UnorderedSegments { frame: usize, segment: usize },

    #[error("invalid {field} value {received} in segment")]
    InvalidSegmentField { field: SegmentField, received: i64 },

    #[error("a mapping coordinate overflows 32 bits")]
    MappingOverflow,

    #[error("a mapping references unknown source #{0}")]
    UnknownSourceReference(u32),

    #[error("a mapping references unknown name #{0}")]
    UnknownNameReference(u32),

    #[error(
        "source map has {sources_len} sources but {sources_content_len} sourcesContent entries"
    )]
    MismatchSourcesContent {
        sources_len: u32,
        sources_content_len: u32,
    },

    #[error("concat called without any maps")]
    EmptyConcat,

    #[error("no source matches query {0:?}")]
    SourceNotFound(String),
}

impl Error {
    #[inline]
    pub(crate) fn mismatch_sources_content(sources_len: u32, sources_content_len: u32) -> Self {
        Self::MismatchSourcesContent {
            sources_len,
            sources_content_len,
        }
    }
}
