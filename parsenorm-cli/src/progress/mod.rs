//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} requests {msg}";

/// Progress reporter for request files
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Show a bar when more than one request is processed
    pub fn init_requests(&mut self, total: u64) {
        if self.quiet || total < 2 {
            return;
        }

        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Whether a bar is being drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Record a normalized request
    pub fn request_completed(&self, name: &str, tokens: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{name}: {tokens} tokens"));
            pb.inc(1);
        }
    }

    /// Record a request that failed as a whole
    pub fn request_failed(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{name}: failed"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_draws_nothing() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_requests(10);
        assert!(!reporter.is_active());
        reporter.request_completed("a.json", 3);
        reporter.finish();
    }

    #[test]
    fn test_single_request_has_no_bar() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_requests(1);
        assert!(!reporter.is_active());
        reporter.init_requests(3);
        assert!(reporter.is_active());
    }
}
