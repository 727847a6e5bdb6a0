// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for upload batches
// reference: uses indicatif for progress bars and tracks parsing metrics

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct UploadStats {
    pub files_parsed: usize,
    pub files_failed: usize,
    pub total_bytes_extracted: u64,
    pub duration_ms: u64,
}

impl UploadStats {
    pub fn success_rate(&self) -> f64 {
        let total = self.files_parsed + self.files_failed;
        if total == 0 {
            return 0.0;
        }
        (self.files_parsed as f64 / total as f64) * 100.0
    }
}

pub struct UploadProgress {
    bar: ProgressBar,
    files_parsed: AtomicUsize,
    files_failed: AtomicUsize,
    bytes_extracted: AtomicU64,
    start_time: Instant,
}

impl UploadProgress {
    pub fn new(total_files: usize, visible: bool) -> Self {
        let bar = if visible {
            create_progress_bar(total_files as u64)
        } else {
            ProgressBar::with_draw_target(Some(total_files as u64), ProgressDrawTarget::hidden())
        };

        Self {
            bar,
            files_parsed: AtomicUsize::new(0),
            files_failed: AtomicUsize::new(0),
            bytes_extracted: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn hidden(total_files: usize) -> Self {
        Self::new(total_files, false)
    }

    pub fn start_file(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    pub fn inc_parsed(&self, bytes: u64) {
        self.files_parsed.fetch_add(1, Ordering::SeqCst);
        self.bytes_extracted.fetch_add(bytes, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn inc_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> UploadStats {
        UploadStats {
            files_parsed: self.files_parsed.load(Ordering::SeqCst),
            files_failed: self.files_failed.load(Ordering::SeqCst),
            total_bytes_extracted: self.bytes_extracted.load(Ordering::SeqCst),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }
}

impl Drop for UploadProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => bar.set_style(style.progress_chars("█▓▒░")),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_stats_success_rate() {
        let stats = UploadStats {
            files_parsed: 3,
            files_failed: 1,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), 75.0);
        assert_eq!(UploadStats::default().success_rate(), 0.0);
    }

    #[test]
    fn test_progress_counts() {
        let progress = UploadProgress::hidden(3);

        progress.start_file("a.csv");
        progress.inc_parsed(120);
        progress.inc_parsed(30);
        progress.inc_failed();

        let stats = progress.get_stats();
        assert_eq!(stats.files_parsed, 2);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.total_bytes_extracted, 150);
    }
}
