use crate::core::error::{Error, ErrorKind, Result};

/// Word-aligned packing of small integers.
///
/// Every output word is 32 bits little-endian: a 4-bit selector on top and
/// 28 payload bits below it, holding `values_per_word` integers of
/// `28 / values_per_word` bits each, value `i` at bit offset `i * width`.
pub struct Simple9;

/// (values per word, bits per value), indexed by selector.
const CONFIGS: [(usize, u32); 9] = [
    (28, 1),
    (14, 2),
    (9, 3),
    (7, 4),
    (5, 5),
    (4, 7),
    (3, 9),
    (2, 14),
    (1, 28),
];

/// Largest magnitude any configuration can hold.
pub const MAX_VALUE: u32 = (1 << 28) - 1;

impl Simple9 {
    pub fn pack(values: &[u32]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(values.len());
        let mut pos = 0;

        while pos < values.len() {
            let (selector, count) = Self::choose_config(&values[pos..])?;
            let chunk = &values[pos..pos + count];
            output.extend_from_slice(&Self::encode_chunk(selector, chunk).to_le_bytes());
            pos += count;
        }

        Ok(output)
    }

    /// Greedy choice: densest configuration whose full run is available and
    /// whose every value fits. The single-value configuration is the
    /// fallback and takes anything below 2^28.
    fn choose_config(remaining: &[u32]) -> Result<(usize, usize)> {
        for (selector, &(count, bits)) in CONFIGS.iter().enumerate() {
            if count > remaining.len() {
                continue;
            }
            let max = (1u32 << bits) - 1;
            if remaining[..count].iter().all(|&v| v <= max) {
                return Ok((selector, count));
            }
        }

        Err(Error::new(
            ErrorKind::OutOfRange,
            format!("value {} exceeds the 28-bit Simple9 limit", remaining[0]),
        ))
    }

    fn encode_chunk(selector: usize, chunk: &[u32]) -> u32 {
        let (count, bits) = CONFIGS[selector];
        debug_assert_eq!(chunk.len(), count);

        let mut word = (selector as u32) << 28;
        for (i, &value) in chunk.iter().enumerate() {
            word |= value << (bits * i as u32);
        }
        word
    }

    pub fn unpack(packed: &[u8]) -> Result<Vec<u32>> {
        if packed.len() % 4 != 0 {
            return Err(Error::new(
                ErrorKind::Corrupt,
                format!("Simple9 stream length {} is not word-aligned", packed.len()),
            ));
        }

        let mut numbers = Vec::with_capacity(packed.len());
        for word_bytes in packed.chunks_exact(4) {
            let word = u32::from_le_bytes([word_bytes[0], word_bytes[1], word_bytes[2], word_bytes[3]]);
            let selector = (word >> 28) as usize;
            let (count, bits) = *CONFIGS.get(selector).ok_or_else(|| {
                Error::new(
                    ErrorKind::Corrupt,
                    format!("invalid Simple9 selector {}", selector),
                )
            })?;

            let mask = (1u32 << bits) - 1;
            for i in 0..count {
                numbers.push((word >> (bits * i as u32)) & mask);
            }
        }

        Ok(numbers)
    }
}
