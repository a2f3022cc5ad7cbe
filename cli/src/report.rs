use snapimg_core::{BatchOutcome, Download};

/// Summary of one conversion run, printed after the download is written.
pub struct Report {
    pub total: usize,
    pub converted: usize,
    pub unsupported: usize,
    pub failed: usize,
    pub original_size: u64,
    pub converted_size: u64,
}

impl Report {
    pub fn new(outcome: &BatchOutcome, original_size: u64) -> Self {
        Self {
            total: outcome.total,
            converted: outcome.results.len(),
            unsupported: outcome.unsupported,
            failed: outcome.failed,
            original_size,
            converted_size: outcome.results.iter().map(|r| r.data.len() as u64).sum(),
        }
    }

    pub fn size_change_pct(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (self.converted_size as f64 / self.original_size as f64 - 1.0) * 100.0
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "Files converted: {} of {} | Unsupported: {} | Errors: {}",
            self.converted, self.total, self.unsupported, self.failed
        );
        if self.converted > 0 {
            out.push_str(&format!(
                "\nTotal: {} → {} ({:+.1}%)",
                format_size(self.original_size),
                format_size(self.converted_size),
                self.size_change_pct()
            ));
        }
        out
    }

    pub fn print_summary(&self, download: Option<&Download>) {
        println!("\n--- Summary ---");
        println!("{}", self.summary());
        if let Some(download) = download {
            println!("{}", saved_line(download));
        }
    }
}

fn saved_line(download: &Download) -> String {
    let size = format_size(download.data().len() as u64);
    match download {
        Download::Single { name, .. } => format!("Saved file {} ({})", name, size),
        Download::Archive { name, entries, .. } => {
            format!("Saved archive {} with {} files ({})", name, entries, size)
        }
    }
}

/// Human-readable size in decimal units.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1e3;
    const MB: f64 = 1e6;
    const GB: f64 = 1e9;
    const TB: f64 = 1e12;
    let b = bytes as f64;
    if b >= TB {
        format!("{:.2} TB", b / TB)
    } else if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapimg_core::ProcessedFile;

    #[test]
    fn formats_decimal_units() {
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1_500), "1.50 KB");
        assert_eq!(format_size(2_000_000), "2.00 MB");
        assert_eq!(format_size(18_640_000_000_000), "18.64 TB");
    }

    #[test]
    fn summary_counts_every_bucket() {
        let outcome = BatchOutcome {
            results: vec![ProcessedFile {
                index: 0,
                source_name: "a.png".into(),
                output_name: "a_converted.jpg".into(),
                data: vec![0; 500],
            }],
            total: 3,
            unsupported: 1,
            failed: 1,
        };
        let report = Report::new(&outcome, 1_000);
        assert_eq!(report.size_change_pct(), -50.0);
        let text = report.summary();
        assert!(text.contains("Files converted: 1 of 3 | Unsupported: 1 | Errors: 1"));
        assert!(text.contains("1.00 KB → 500 B (-50.0%)"));
    }

    #[test]
    fn saved_line_reports_archive_entries() {
        let archive = Download::Archive {
            name: "processed-images.zip".into(),
            entries: 4,
            data: vec![0; 2_000],
        };
        assert_eq!(
            saved_line(&archive),
            "Saved archive processed-images.zip with 4 files (2.00 KB)"
        );
        let single = Download::Single {
            name: "a_converted.jpg".into(),
            data: vec![0; 10],
        };
        assert_eq!(saved_line(&single), "Saved file a_converted.jpg (10 B)");
    }
}
