//! Output sinks for generated directories and headers.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated output.
///
/// The tree walker awaits each call before issuing the next one.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Creates a single directory.
    ///
    /// # Errors
    /// Returns an error of kind `AlreadyExists` if the directory is present;
    /// the walker treats that as success. Any other error is terminal.
    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Writes (or overwrites) a file.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

#[async_trait]
impl<T: OutputSink + ?Sized> OutputSink for &T {
    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir(path).await
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write_file(path, contents).await
    }
}

/// Sink writing to the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

#[async_trait]
impl OutputSink for FsSink {
    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir(path).await
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    directories: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    failing: BTreeSet<PathBuf>,
    order: Vec<PathBuf>,
}

/// In-memory sink for previews and tests.
///
/// Records directories and files, and fails any path registered with
/// [`MemorySink::fail_on`].
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later operation on `path` fail with `PermissionDenied`.
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.state.lock().failing.insert(path.into());
    }

    /// Returns the contents written to `path`.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.lock().files.get(path.as_ref()).cloned()
    }

    /// Returns every written file path, sorted.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.state.lock().files.keys().cloned().collect()
    }

    /// Returns every created directory, sorted.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        self.state.lock().directories.iter().cloned().collect()
    }

    /// Returns directories and files in the order they were created.
    #[must_use]
    pub fn write_order(&self) -> Vec<PathBuf> {
        self.state.lock().order.clone()
    }

    fn check(state: &MemoryState, path: &Path) -> io::Result<()> {
        if state.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {} refused", path.display()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock();
        Self::check(&state, path)?;
        if !state.directories.insert(path.to_path_buf()) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists", path.display()),
            ));
        }
        state.order.push(path.to_path_buf());
        Ok(())
    }

    async fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.state.lock();
        Self::check(&state, path)?;
        state.files.insert(path.to_path_buf(), contents.to_string());
        state.order.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_records_writes() {
        let sink = MemorySink::new();
        sink.create_dir(Path::new("out/A")).await.unwrap();
        sink.write_file(Path::new("out/A/B.h"), "x").await.unwrap();

        assert_eq!(sink.directories(), vec![PathBuf::from("out/A")]);
        assert_eq!(sink.file("out/A/B.h").as_deref(), Some("x"));
        assert_eq!(
            sink.write_order(),
            vec![PathBuf::from("out/A"), PathBuf::from("out/A/B.h")]
        );
    }

    #[tokio::test]
    async fn test_memory_sink_existing_directory() {
        let sink = MemorySink::new();
        sink.create_dir(Path::new("out")).await.unwrap();
        let err = sink.create_dir(Path::new("out")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_memory_sink_injected_failure() {
        let sink = MemorySink::new();
        sink.fail_on("out/A.h");
        let err = sink
            .write_file(Path::new("out/A.h"), "x")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(sink.files().is_empty());
    }

    #[tokio::test]
    async fn test_fs_sink_through_reference() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink;
        let by_ref: &dyn OutputSink = &sink;

        let sub = dir.path().join("Shapes");
        by_ref.create_dir(&sub).await.unwrap();
        let err = by_ref.create_dir(&sub).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        let borrowed: &FsSink = &sink;
        <&FsSink as OutputSink>::write_file(&borrowed, &sub.join("Circle.h"), "// c\n")
            .await
            .unwrap();
        let text = std::fs::read_to_string(sub.join("Circle.h")).unwrap();
        assert_eq!(text, "// c\n");
    }
}
