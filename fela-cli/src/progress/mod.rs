//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Progress reporter for batch jobs
///
/// Shared by reference across worker threads.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    failed: AtomicUsize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            failed: AtomicUsize::new(0),
        }
    }

    /// Initialize progress bar for job processing
    pub fn init_jobs(&mut self, total_jobs: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} jobs {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let pb = ProgressBar::new(total_jobs);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Record a finished job
    pub fn job_completed(&self, name: &str, ok: bool) {
        if !ok {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(pb) = &self.progress_bar {
            let verb = if ok { "Aligned" } else { "Failed" };
            pb.set_message(format!("{verb}: {name}"));
            pb.inc(1);
        }
    }

    /// Number of failed jobs so far
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            match self.failed() {
                0 => pb.finish_with_message("Complete"),
                n => pb.finish_with_message(format!("Complete ({n} failed)")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_counts_failures() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_jobs(3);
        reporter.job_completed("a.json", true);
        reporter.job_completed("b.json", false);
        reporter.finish();
        assert_eq!(reporter.failed(), 1);
        assert!(reporter.progress_bar.is_none());
    }
}
