/// Gap transform for sorted doc-id sequences.
///
/// Posting lists are strictly increasing, so the first value plus successive
/// gaps carries the same information in much smaller magnitudes, which is
/// what makes the byte codecs effective.
pub fn encode_deltas(ids: &[u32]) -> Vec<u32> {
    if ids.is_empty() {
        return Vec::new();
    }

    let mut gaps = Vec::with_capacity(ids.len());
    gaps.push(ids[0]);
    for i in 1..ids.len() {
        gaps.push(ids[i].wrapping_sub(ids[i - 1]));
    }
    gaps
}

/// Inverse prefix sum of `encode_deltas`.
pub fn decode_deltas(gaps: &[u32]) -> Vec<u32> {
    let mut ids = Vec::with_capacity(gaps.len());
    let mut prev = 0u32;
    for (i, &gap) in gaps.iter().enumerate() {
        prev = if i == 0 { gap } else { prev.wrapping_add(gap) };
        ids.push(prev);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_increasing_sequences() {
        let cases: Vec<Vec<u32>> = vec![
            vec![],
            vec![0],
            vec![7],
            vec![0, 1, 2, 3],
            vec![3, 10, 11, 500, 100_000],
        ];
        for ids in cases {
            assert_eq!(decode_deltas(&encode_deltas(&ids)), ids);
        }
    }

    #[test]
    fn first_value_is_kept_verbatim() {
        assert_eq!(encode_deltas(&[5, 8, 20]), vec![5, 3, 12]);
    }
}
