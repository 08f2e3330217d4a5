//! File-based fleet source.
//!
//! Reads a JSON array of nodes in the seed-data record shape.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{FleetSnapshot, FleetSource};

/// A source that reads the fleet from a JSON file on every load.
///
/// Each load re-reads the file, so reloading the dashboard picks up whatever
/// the backend wrote last (and discards local edits).
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FleetSource for FileSource {
    fn load(&mut self) -> Option<FleetSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read fleet file");
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        match serde_json::from_str::<FleetSnapshot>(&content) {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), nodes = snapshot.len(), "fleet file loaded");
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse fleet file");
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BUILTIN_FLEET_JSON;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/fleet.json");
        assert_eq!(source.path(), Path::new("/tmp/fleet.json"));
        assert_eq!(source.description(), "file: /tmp/fleet.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_loads_every_time() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", BUILTIN_FLEET_JSON).unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.load().unwrap();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot[0].id, "ibox2101");

        // unchanged file is still returned on reload
        assert!(source.load().is_some());
    }

    #[test]
    fn test_file_source_empty_fleet() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[]").unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.load().map(|s| s.len()), Some(0));
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/fleet.json");

        assert!(source.load().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.load().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_recovers_after_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{").unwrap();
        let mut source = FileSource::new(file.path());
        assert!(source.load().is_none());

        std::fs::write(file.path(), "[]").unwrap();
        assert!(source.load().is_some());
        assert!(source.error().is_none());
    }
}
