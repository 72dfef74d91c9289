use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub trait LineSink {
    fn append_line(&self, line: &str) -> Result<(), String>;
}

/// Append-only file sink. The handle is opened and closed around each
/// single write, so nothing stays held between polls and existing content
/// is never truncated.
pub struct FileLineSink {
    path: PathBuf,
}

impl FileLineSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSink for FileLineSink {
    fn append_line(&self, line: &str) -> Result<(), String> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| {
                format!(
                    "Failed to open output file {}: {error}",
                    self.path.display()
                )
            })?;

        writeln!(file, "{line}").map_err(|error| {
            format!(
                "Failed to append to output file {}: {error}",
                self.path.display()
            )
        })
    }
}
