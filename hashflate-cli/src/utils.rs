//! Utility functions for the CLI.

use hashflate::CodecStats;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Extension given to compressed files.
pub const COMPRESSED_EXTENSION: &str = "hfl";

/// Install a stderr subscriber. `--log-level` wins over `-v`.
pub fn init_logging(verbosity: u8, log_level: Option<&str>) {
    let level = match log_level.map(str::to_lowercase).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        },
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb
}

/// `<input>.hfl`.
pub fn default_compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

/// `<input>` without `.hfl`, or `<input>.out` when it has another extension.
pub fn default_decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == COMPRESSED_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

/// Machine-readable form of [`CodecStats`].
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub method: String,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub ratio: f64,
    pub space_savings: f64,
    pub compress_seconds: f64,
    pub decompress_seconds: f64,
}

impl From<&CodecStats> for StatsReport {
    fn from(stats: &CodecStats) -> Self {
        Self {
            method: stats.method.to_string(),
            input_bytes: stats.original_len,
            output_bytes: stats.compressed_len,
            ratio: stats.ratio(),
            space_savings: stats.space_savings(),
            compress_seconds: stats.compress_time.as_secs_f64(),
            decompress_seconds: stats.decompress_time.as_secs_f64(),
        }
    }
}

/// Human-readable statistics block for one method.
pub fn format_report(stats: &CodecStats) -> String {
    let rule = "-".repeat(40);
    format!(
        "{rule}\n\
         {} Statistics\n\
         \n\
         Input File Size:    {:.1} KB\n\
         Output File Size:   {:.1} KB\n\
         Compression Ratio:  {:.2}\n\
         Compression Time:   {:.3}s\n\
         Decompression Time: {:.3}s\n\
         {rule}",
        capitalize(stats.method),
        stats.original_len as f64 / 1000.0,
        stats.compressed_len as f64 / 1000.0,
        stats.ratio(),
        stats.compress_time.as_secs_f64(),
        stats.decompress_time.as_secs_f64(),
    )
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stats() -> CodecStats {
        CodecStats {
            method: "deflate",
            original_len: 12_345,
            compressed_len: 4_000,
            compress_time: Duration::from_millis(15),
            decompress_time: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_default_paths() {
        assert_eq!(
            default_compressed_path(Path::new("dir/book.txt")),
            PathBuf::from("dir/book.txt.hfl")
        );
        assert_eq!(
            default_decompressed_path(Path::new("dir/book.txt.hfl")),
            PathBuf::from("dir/book.txt")
        );
        assert_eq!(
            default_decompressed_path(Path::new("data.bin")),
            PathBuf::from("data.bin.out")
        );
    }

    #[test]
    fn test_format_report() {
        let report = format_report(&stats());
        assert!(report.contains("Deflate Statistics"));
        assert!(report.contains("Input File Size:    12.3 KB"));
        assert!(report.contains("Output File Size:   4.0 KB"));
        assert!(report.contains("Compression Ratio:  3.09"));
        assert!(report.contains("Compression Time:   0.015s"));
    }

    #[test]
    fn test_json_report() {
        let json = serde_json::to_value(StatsReport::from(&stats())).unwrap();
        assert_eq!(json["method"], "deflate");
        assert_eq!(json["input_bytes"], 12_345);
        assert_eq!(json["output_bytes"], 4_000);
    }
}
