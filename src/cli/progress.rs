use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Byte-position bar over the whole input; the stream is fully loaded so
/// its length is always known.
pub fn create_progress_bar(multi: &MultiProgress, stream_len: u64) -> Result<ProgressBar> {
    let pb = multi.add(ProgressBar::new(stream_len));
    pb.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {bytes}/{total_bytes} ({percent}%)\n{msg} | elapsed: {elapsed_precise} | ETA: {eta_precise}",
    )?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message("scanning");
    Ok(pb)
}
