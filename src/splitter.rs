use memchr::Memchr;

/// Splits on a single delimiter byte, yielding each piece with its byte
/// offset. A trailing delimiter yields a final empty piece.
#[derive(Debug)]
pub(crate) struct Splitter<'a> {
    string: &'a str,
    cur_start: usize,
    memchr: Memchr<'a>,
}

impl<'a> Splitter<'a> {
    pub fn new(string: &'a str, delimiter: u8) -> Self {
        Self {
            string,
            memchr: memchr::memchr_iter(delimiter, string.as_bytes()),
            cur_start: 0,
        }
    }
}

impl<'a> Iterator for Splitter<'a> {
    // (byte offset, piece)
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let cur_end = match self.memchr.next() {
            None => {
                if self.cur_start > self.string.len() {
                    return None;
                }
                self.string.len()
            }
            Some(end) => end,
        };
        let start = self.cur_start;
        // SAFETY: both bounds sit on ascii delimiter positions or at the
        // string ends, which are char boundaries in any utf-8 string
        let piece = unsafe { self.string.get_unchecked(start..cur_end) };
        self.cur_start = cur_end + 1;
        Some((start, piece))
    }
}

#[cfg(test)]
mod tests {
    use super::Splitter;

    #[test]
    fn test_splitter() {
        let text = "AAAA;;CAAC,SAAI;";

        let result = Splitter::new(text, b';')
            .map(|(offset, piece)| format!("[{offset}:{piece}]"))
            .collect::<String>();
        insta::assert_snapshot!(result, @"[0:AAAA][5:][6:CAAC,SAAI][16:]");

        let result = Splitter::new("CAAC,SAAI", b',')
            .map(|(offset, piece)| format!("[{offset}:{piece}]"))
            .collect::<String>();
        insta::assert_snapshot!(result, @"[0:CAAC][5:SAAI]");
    }
}
