use crate::{Error, Result};
use std::io;
use std::io::Write;

pub(crate) const BASE64_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_VALUES: [i8; 256] = get_base64_map();

const fn get_base64_map() -> [i8; 256] {
    let mut res = [-1i8; 256];
    // `for in` is not allowed in const fn
    let mut idx = 0;
    while idx < 64 {
        res[BASE64_CHARS[idx] as usize] = idx as i8;
        idx += 1;
    }
    res
}

const CONTINUATION: u64 = 0b100000;
const DATA_MASK: u64 = 0b11111;

fn unpack(carrier: u64) -> i64 {
    let magnitude = (carrier >> 1) as i64;
    if carrier & 1 == 1 {
        -magnitude
    } else {
        magnitude
    }
}

/// Decodes a base64 vlq string into the signed integers it carries.
///
/// The input must consist solely of vlq alphabet characters; `,` and `;`
/// separators are not handled here. A negative-zero carrier decodes to `0`.
///
/// # Example
/// ```
/// # use remap::decode_vlq;
/// assert_eq!(decode_vlq("ACDlBkBlB").unwrap(), [0, 1, -1, -18, 18, -18]);
/// ```
pub fn decode_vlq(input: &str) -> Result<Vec<i64>> {
    let mut values = Vec::new();
    let mut carrier: u64 = 0;
    let mut shift: u32 = 0;

    for (offset, byte) in input.bytes().enumerate() {
        let digit = BASE64_VALUES[byte as usize];
        if digit < 0 {
            return Err(Error::InvalidVlqChar { byte, offset });
        }
        let digit = digit as u64;

        if shift >= u64::BITS {
            return Err(Error::VlqOverflow(offset));
        }
        let add = (digit & DATA_MASK)
            .checked_mul(1 << shift)
            .ok_or(Error::VlqOverflow(offset))?;
        carrier = carrier.checked_add(add).ok_or(Error::VlqOverflow(offset))?;
        shift += 5;

        if digit & CONTINUATION == 0 {
            values.push(unpack(carrier));
            carrier = 0;
            shift = 0;
        }
    }

    if shift != 0 {
        return Err(Error::TruncatedVlq(input.len()));
    }

    Ok(values)
}

/// Encodes one signed integer as base64 vlq.
///
/// The carrier keeps the sign in its low bit, so zero always encodes as `A`.
pub fn encode_vlq(value: i64) -> String {
    let mut buf = Vec::with_capacity(2);
    push_vlq(value, &mut buf);
    // SAFETY: the buffer only holds alphabet bytes
    unsafe { String::from_utf8_unchecked(buf) }
}

/// Encodes a sequence of integers as one concatenated vlq string.
pub fn encode_vlq_array(values: &[i64]) -> String {
    let mut buf = Vec::with_capacity(values.len() * 2);
    for &value in values {
        push_vlq(value, &mut buf);
    }
    // SAFETY: the buffer only holds alphabet bytes
    unsafe { String::from_utf8_unchecked(buf) }
}

fn push_vlq(value: i64, out: &mut Vec<u8>) {
    // u128 so `i64::MIN` survives the shift
    let mut carrier = ((value.unsigned_abs() as u128) << 1) | (value < 0) as u128;
    loop {
        let mut digit = (carrier & DATA_MASK as u128) as usize;
        carrier >>= 5;
        if carrier != 0 {
            digit |= CONTINUATION as usize;
        }
        out.push(BASE64_CHARS[digit]);
        if carrier == 0 {
            break;
        }
    }
}

/// Streaming decoder for one mapping segment.
///
/// A segment carries at most five fields, so the buffer is fixed; longer
/// segments are counted past the buffer so the caller can report the real
/// length.
#[derive(Debug)]
pub(crate) struct VlqDecoder {
    buf: [i64; 5],
}

impl VlqDecoder {
    pub fn new() -> Self {
        Self { buf: [0; 5] }
    }

    /// Decodes `segment`, reporting byte errors at `base` + local offset.
    /// Returns the stored fields and the total field count.
    pub fn decode(&mut self, segment: &str, base: usize) -> Result<(&[i64], usize)> {
        let mut len = 0;
        let mut carrier: u64 = 0;
        let mut shift: u32 = 0;

        for (idx, byte) in segment.bytes().enumerate() {
            let offset = base + idx;
            let digit = BASE64_VALUES[byte as usize];
            if digit < 0 {
                return Err(Error::InvalidVlqChar { byte, offset });
            }
            let digit = digit as u64;

            if shift >= u64::BITS {
                return Err(Error::VlqOverflow(offset));
            }
            let add = (digit & DATA_MASK)
                .checked_mul(1 << shift)
                .ok_or(Error::VlqOverflow(offset))?;
            carrier = carrier.checked_add(add).ok_or(Error::VlqOverflow(offset))?;
            shift += 5;

            if digit & CONTINUATION == 0 {
                if len < self.buf.len() {
                    self.buf[len] = unpack(carrier);
                }
                len += 1;
                carrier = 0;
                shift = 0;
            }
        }

        if shift != 0 {
            return Err(Error::TruncatedVlq(base + segment.len()));
        }

        let stored = len.min(self.buf.len());
        Ok((&self.buf[..stored], len))
    }
}

/// Delta writer for the mappings encoder.
#[derive(Debug)]
pub(crate) struct VlqEncoder<'a, W>
where
    W: Write,
{
    writer: &'a mut W,
}

impl<'a, W> VlqEncoder<'a, W>
where
    W: Write,
{
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// Writes `cur - prev` as one vlq value.
    pub fn encode(&mut self, prev: u32, cur: u32) -> io::Result<()> {
        let delta = cur as i64 - prev as i64;

        let mut carrier = if delta < 0 {
            (((-delta) as u64) << 1) | 1
        } else {
            (delta as u64) << 1
        };

        loop {
            let mut digit = (carrier & DATA_MASK) as usize;
            carrier >>= 5;
            if carrier != 0 {
                digit |= CONTINUATION as usize;
            }
            self.writer.write_all(&[BASE64_CHARS[digit]])?;
            if carrier == 0 {
                break;
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::{decode_vlq, encode_vlq, encode_vlq_array};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_roundtrip_i32(value in i32::MIN..=i32::MAX) {
            let encoded = encode_vlq(value as i64);
            prop_assert_eq!(decode_vlq(&encoded).unwrap(), vec![value as i64]);
        }

        #[test]
        fn test_roundtrip_array(values in prop::collection::vec(i32::MIN as i64..=i32::MAX as i64, 0..32)) {
            let encoded = encode_vlq_array(&values);
            prop_assert_eq!(decode_vlq(&encoded).unwrap(), values);
        }
    }
}
