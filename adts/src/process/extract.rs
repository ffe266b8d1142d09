/// Returns the first `i` in `start..end` with `data[i] == 0xFF` and the top
/// nibble of `data[i + 1]` set, i.e. the 12-bit ADTS syncword.
///
/// Any byte pair with that pattern is a candidate, so payload bytes that
/// happen to match will be reported too; the caller resyncs past them when
/// the header that follows does not hold up. `end` is clamped to the slice.
///
/// ```rust
/// use adts::process::extract::find_sync;
///
/// let data = [0x00, 0xFF, 0xE0, 0xFF, 0xF1];
/// assert_eq!(find_sync(&data, 0, data.len()), Some(3));
/// assert_eq!(find_sync(&data, 4, data.len()), None);
/// ```
pub fn find_sync(data: &[u8], start: usize, end: usize) -> Option<usize> {
    let end = end.min(data.len());
    if start >= end {
        return None;
    }

    data[start..end]
        .windows(2)
        .position(|pair| pair[0] == 0xFF && pair[1] & 0xF0 == 0xF0)
        .map(|i| start + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(data: &[u8], start: usize, end: usize) -> Option<usize> {
        (start..end).find(|&i| i + 1 < end && data[i] == 0xFF && data[i + 1] >> 4 == 0xF)
    }

    #[test]
    fn matches_naive_scan_on_noise() {
        // Deterministic noise biased towards 0xFF so candidates appear often.
        let mut state = 0x1234_5678u32;
        let data: Vec<u8> = (0..4096)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let byte = (state >> 24) as u8;
                if byte & 0x7 == 0 { 0xFF } else { byte }
            })
            .collect();

        for start in (0..data.len()).step_by(37) {
            for end in [start, start + 1, start + 2, start + 64, data.len()] {
                let end = end.min(data.len());
                assert_eq!(
                    find_sync(&data, start, end),
                    naive(&data, start, end),
                    "start={start} end={end}"
                );
            }
        }
    }

    #[test]
    fn pattern_needs_both_bytes_in_range() {
        let data = [0x12, 0xFF, 0xF0];
        assert_eq!(find_sync(&data, 0, 3), Some(1));
        assert_eq!(find_sync(&data, 0, 2), None);
        assert_eq!(find_sync(&data, 1, 100), Some(1));
        assert_eq!(find_sync(&data, 2, 3), None);
    }

    #[test]
    fn top_nibble_must_be_fully_set() {
        assert_eq!(find_sync(&[0xFF, 0xE0, 0xFF, 0x7F], 0, 4), None);
        assert_eq!(find_sync(&[0xFF, 0xFF, 0xFF], 0, 3), Some(0));
        assert_eq!(find_sync(&[0u8; 500], 0, 500), None);
    }
}
