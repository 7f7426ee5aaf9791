use crate::core::error::{Error, ErrorKind, Result};

/// Byte-aligned variable-length integer coding.
///
/// Each integer becomes its base-128 digits, most significant first, one
/// digit per byte. The final byte of every integer carries the high bit as a
/// terminator; all preceding bytes have it clear. Zero encodes as `0x80`.
pub struct Varbyte;

impl Varbyte {
    pub fn pack(values: &[u32]) -> Vec<u8> {
        let mut output = Vec::with_capacity(values.len());
        for &value in values {
            Self::encode_number(&mut output, value);
        }
        output
    }

    /// Append one integer; at most 5 digits for a u32.
    fn encode_number(output: &mut Vec<u8>, mut value: u32) {
        let mut digits = [0u8; 5];
        let mut start = digits.len();

        loop {
            start -= 1;
            digits[start] = (value % 128) as u8;
            value /= 128;
            if value == 0 {
                break;
            }
        }

        digits[4] |= 0x80; // terminator lives on the last digit
        output.extend_from_slice(&digits[start..]);
    }

    /// Decode a whole stream of packed integers.
    ///
    /// A stream that ends in the middle of an integer, or whose accumulated
    /// value does not fit in a u32, is corrupt and refused.
    pub fn unpack(packed: &[u8]) -> Result<Vec<u32>> {
        let mut numbers = Vec::new();
        let mut n: u32 = 0;
        let mut mid_number = false;

        for &byte in packed {
            n = n
                .checked_mul(128)
                .and_then(|v| v.checked_add((byte & 0x7F) as u32))
                .ok_or_else(|| {
                    Error::new(ErrorKind::Corrupt, "varbyte value overflows u32".to_string())
                })?;

            if byte & 0x80 != 0 {
                numbers.push(n);
                n = 0;
                mid_number = false;
            } else {
                mid_number = true;
            }
        }

        if mid_number {
            return Err(Error::new(
                ErrorKind::Corrupt,
                "truncated varbyte stream: missing terminator byte".to_string(),
            ));
        }

        Ok(numbers)
    }
}
