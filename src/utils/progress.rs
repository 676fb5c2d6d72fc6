//! Download progress reporting.
//!
//! Progress bars are cosmetic: they are suppressed whenever
//! `ORBITUP_NO_PROGRESS` is set (the `--no-progress` flag exports it) so
//! scripts and CI logs stay clean. Only the fetcher draws one.

use indicatif::{ProgressBar, ProgressStyle};

/// Whether progress indicators are suppressed for this process.
pub fn progress_suppressed() -> bool {
    std::env::var_os("ORBITUP_NO_PROGRESS").is_some()
}

/// Create a progress bar for a download of `total` bytes.
///
/// With an unknown length the bar degrades to a byte-counting spinner.
/// Returns a hidden bar when progress is suppressed.
pub fn download_bar(total: Option<u64>) -> ProgressBar {
    if progress_suppressed() {
        return ProgressBar::hidden();
    }

    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.cyan} [{bar:30.cyan/dim}] {bytes}/{total_bytes} ({bytes_per_sec})",
                )
                .expect("static progress template is valid")
                .progress_chars("=> "),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {bytes} ({bytes_per_sec})")
                    .expect("static progress template is valid"),
            );
            bar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn suppression_follows_environment() {
        unsafe { std::env::remove_var("ORBITUP_NO_PROGRESS") };
        assert!(!progress_suppressed());
        unsafe { std::env::set_var("ORBITUP_NO_PROGRESS", "1") };
        assert!(progress_suppressed());
        assert!(download_bar(Some(100)).is_hidden());
        unsafe { std::env::remove_var("ORBITUP_NO_PROGRESS") };
    }
}
