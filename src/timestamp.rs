/// `HH:MM:SS.mmm` position of `samples` per-channel samples.
pub fn time_str(samples: u64, sample_rate: u32) -> String {
    if sample_rate == 0 {
        return "--:--:--.---".to_string();
    }

    let ms = samples * 1000 / sample_rate as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let milliseconds = ms % 1000;

    format!(
        "{hours:0width$}:{minutes:02}:{seconds:02}.{milliseconds:03}",
        width = if hours >= 100 { 0 } else { 2 }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sample_positions() {
        assert_eq!(time_str(0, 44100), "00:00:00.000");
        assert_eq!(time_str(44100 * 61 + 22050, 44100), "00:01:01.500");
        assert_eq!(time_str(48000 * 3600 * 100, 48000), "100:00:00.000");
        assert_eq!(time_str(1024, 0), "--:--:--.---");
    }
}
