use indicatif::{ProgressBar, ProgressStyle};
use snapimg_core::{Alert, BatchObserver, Progress};

/// Drives a terminal progress bar from pipeline events.
pub struct TerminalObserver {
    pb: ProgressBar,
}

impl TerminalObserver {
    pub fn new(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        Self { pb }
    }

    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(message.to_string());
    }
}

impl BatchObserver for TerminalObserver {
    fn alert(&self, alert: &Alert) {
        self.pb.suspend(|| eprintln!("⚠ {alert}"));
    }

    fn item_started(&self, _index: usize, name: &str) {
        self.pb.set_message(format!("{name} …"));
    }

    fn item_finished(&self, _index: usize, name: &str, ok: bool) {
        if !ok {
            self.pb.println(format!("✗ {name}"));
        }
    }

    fn progress(&self, progress: Progress) {
        self.pb.set_length(progress.total as u64);
        self.pb.set_position(progress.done as u64);
        if progress.is_complete() {
            self.pb.set_message(progress.to_string());
        }
    }
}
