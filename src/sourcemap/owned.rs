use crate::sourcemap::BorrowedSourceMap;
use crate::Result;
use std::borrow::Cow;

/// `SourceMap` is a type alias to [BorrowedSourceMap] but owns all its
/// internal strings, providing a more straightforward and safe API for
/// users who do not need to manage the lifetimes of the strings manually.
pub type SourceMap = BorrowedSourceMap<'static>;

impl SourceMap {
    /// Creates a new owned [SourceMap] from a JSON buffer.
    #[inline]
    pub fn from(mut source: Vec<u8>) -> Result<Self> {
        Ok(BorrowedSourceMap::from_slice(&mut source)?.into_owned())
    }
}

impl BorrowedSourceMap<'_> {
    /// Convert a [BorrowedSourceMap] into a [SourceMap] that owns all its
    /// internal strings.
    pub fn into_owned(self) -> SourceMap {
        fn own(i: Cow<'_, str>) -> Cow<'static, str> {
            Cow::Owned(i.into_owned())
        }

        SourceMap {
            file: self.file.map(own),
            mappings: self.mappings,
            names: self.names.into_iter().map(own).collect(),
            source_root: self.source_root.map(own),
            sources: self.sources.into_iter().map(own).collect(),
            sources_content: self
                .sources_content
                .into_iter()
                .map(|content| content.map(own))
                .collect(),
        }
    }
}
