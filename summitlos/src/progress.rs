use indicatif::{ProgressBar, ProgressStyle};

/// Returns a progress bar counting `total` items.
pub fn make_progress_bar(prefix: String, total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_prefix(prefix);
    pb.set_style(
        ProgressStyle::with_template("{prefix} [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
            .expect("incorrect progress bar format string")
            .progress_chars("#>-"),
    );
    pb
}
