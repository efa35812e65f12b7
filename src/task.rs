//! Optimization tasks.
//!
//! A [`Task`] ties the input data of an optimization to the optimizer that
//! should search the parameter space. With the `serde` feature, tasks can
//! be saved to and restored from JSON files.

use std::path::{Path, PathBuf};

/// An optimization task: where the input data lives and which optimizer runs on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    input_path: PathBuf,
    optimizer: String,
}

impl Task {
    /// Creates a task reading its input from `input_path`.
    #[must_use]
    pub fn new(input_path: impl Into<PathBuf>, optimizer: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            optimizer: optimizer.into(),
        }
    }

    /// The location of the input data.
    #[must_use]
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// The name of the optimizer that runs this task.
    #[must_use]
    pub fn optimizer(&self) -> &str {
        &self.optimizer
    }
}

/// A serializable snapshot of a [`Task`].
///
/// # Schema versioning
///
/// The `version` field enables future schema evolution without breaking
/// existing files. The current version is `1`.
#[cfg(feature = "serde")]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TaskSnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The saved task.
    pub task: Task,
}

#[cfg(feature = "serde")]
impl Task {
    const SNAPSHOT_VERSION: u32 = 1;

    /// Save the task to a JSON file.
    ///
    /// The file is written next to `path` first and then renamed, so a
    /// crash mid-write never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`](crate::Error::Storage) if the file can't
    /// be written.
    pub fn save(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let path = path.as_ref();
        let snapshot = TaskSnapshot {
            version: Self::SNAPSHOT_VERSION,
            task: self.clone(),
        };

        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        let file = std::fs::File::create(&tmp_path).map_err(storage_error)?;
        serde_json::to_writer_pretty(file, &snapshot).map_err(storage_error)?;
        std::fs::rename(&tmp_path, path).map_err(storage_error)?;
        trace_info!(path = %path.display(), "task saved");
        Ok(())
    }

    /// Load a task from a JSON file written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`](crate::Error::Storage) if the file can't
    /// be read, isn't a task snapshot, or has an unknown schema version.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(storage_error)?;
        let snapshot: TaskSnapshot = serde_json::from_reader(file).map_err(storage_error)?;
        if snapshot.version != Self::SNAPSHOT_VERSION {
            return Err(crate::Error::Storage(format!(
                "unsupported task snapshot version {}",
                snapshot.version
            )));
        }
        Ok(snapshot.task)
    }
}

#[cfg(feature = "serde")]
#[allow(clippy::needless_pass_by_value)]
fn storage_error(err: impl core::fmt::Display) -> crate::Error {
    crate::Error::Storage(err.to_string())
}
