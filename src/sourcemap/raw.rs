/// Borrowing image of the envelope JSON. Unknown keys are dropped by the
/// deserializer; presence checks happen in `BorrowedSourceMap::from_raw`.
#[derive(Debug, simd_json_derive::Deserialize)]
#[simd_json(rename_all = "camelCase")]
pub(crate) struct RawSourceMap<'a> {
    pub version: Option<u32>,
    pub file: Option<&'a str>,
    pub sources: Option<Vec<Option<&'a str>>>,
    pub source_root: Option<&'a str>,
    pub sources_content: Option<Vec<Option<&'a str>>>,
    pub names: Option<Vec<&'a str>>,
    pub mappings: Option<&'a str>,
}

impl<'a> RawSourceMap<'a> {
    #[inline]
    pub fn from_slice(json: &'a mut [u8]) -> simd_json::Result<Self> {
        simd_json_derive::Deserialize::from_slice(json)
    }

    #[inline]
    pub fn from_str(json: &'a mut str) -> simd_json::Result<Self> {
        // SAFETY: simd-json only writes valid utf-8 back into the buffer
        Self::from_slice(unsafe { json.as_bytes_mut() })
    }
}
