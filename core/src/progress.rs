use std::fmt;

/// Files handled so far in the current run, out of the run's total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { done: 0, total }
    }

    /// Whole-number percentage, rounded down. An empty run counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.done.min(self.total) * 100 / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% Completed", self.percent())
    }
}

/// Conditions the user should be told about directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    NoFiles,
    UnsupportedType { name: String },
    NoResults,
    NothingToDownload,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::NoFiles => f.write_str("No files selected. Please upload images first."),
            Alert::UnsupportedType { name } => write!(
                f,
                "Unsupported file type: {name}. Only PNG, WEBP, GIF, and JPEG allowed."
            ),
            Alert::NoResults => f.write_str("No valid images were processed."),
            Alert::NothingToDownload => {
                f.write_str("No processed files to download. Please process images first.")
            }
        }
    }
}

/// Receives events from a conversion run.
///
/// Calls may come from pool worker threads. `progress` calls are serialised
/// and arrive with a strictly increasing `done` count.
pub trait BatchObserver: Sync {
    fn alert(&self, _alert: &Alert) {}

    /// A file started converting (busy indicator on).
    fn item_started(&self, _index: usize, _name: &str) {}

    /// A file finished converting, successfully or not (busy indicator off).
    fn item_finished(&self, _index: usize, _name: &str, _ok: bool) {}

    fn progress(&self, _progress: Progress) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_down() {
        let p = Progress { done: 1, total: 3 };
        assert_eq!(p.percent(), 33);
        let p = Progress { done: 2, total: 3 };
        assert_eq!(p.percent(), 66);
        assert_eq!(Progress { done: 3, total: 3 }.percent(), 100);
        assert_eq!(Progress::new(5).to_string(), "0% Completed");
    }

    #[test]
    fn percent_only_hits_100_at_the_end() {
        let total = 201;
        for done in 0..total {
            assert!(Progress { done, total }.percent() < 100);
        }
        assert_eq!(Progress { done: total, total }.percent(), 100);
    }

    #[test]
    fn unsupported_alert_names_the_file() {
        let alert = Alert::UnsupportedType {
            name: "notes.txt".into(),
        };
        assert!(alert.to_string().contains("notes.txt"));
    }
}
