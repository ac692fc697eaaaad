//! Manual task store persisted as one JSON file.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::board::{
    domain::TaskDocument,
    ports::{ManualStoreError, ManualStoreResult, ManualTaskStore},
};

/// Manual task store writing `<key>.json` inside a capability-scoped
/// directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written entry.
#[derive(Debug)]
pub struct FileManualTaskStore {
    dir: Dir,
    key: String,
    file_name: String,
    temp_name: String,
}

impl FileManualTaskStore {
    /// Opens the store for `key` inside `directory`, creating the directory
    /// when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ManualStoreError::Persistence`] when the directory cannot be
    /// created or opened.
    pub fn open(directory: &Utf8Path, store_key: impl Into<String>) -> ManualStoreResult<Self> {
        let dir = open_or_create_dir(directory)?;
        let key: String = store_key.into();
        Ok(Self {
            dir,
            file_name: format!("{key}.json"),
            temp_name: format!(".{key}.json.tmp"),
            key,
        })
    }

    /// Returns the store key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the file name of the entry inside the store directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn open_or_create_dir(directory: &Utf8Path) -> ManualStoreResult<Dir> {
    match Dir::open_ambient_dir(directory, ambient_authority()) {
        Ok(dir) => return Ok(dir),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ManualStoreError::persistence(err)),
    }
    let name = directory.file_name().ok_or_else(|| {
        ManualStoreError::persistence(std::io::Error::other(format!(
            "store directory '{directory}' has no final component"
        )))
    })?;
    let parent = directory
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
    let parent_dir =
        Dir::open_ambient_dir(&parent, ambient_authority()).map_err(ManualStoreError::persistence)?;
    parent_dir
        .create_dir_all(name)
        .map_err(ManualStoreError::persistence)?;
    parent_dir.open_dir(name).map_err(ManualStoreError::persistence)
}

impl ManualTaskStore for FileManualTaskStore {
    fn load(&self) -> ManualStoreResult<Vec<TaskDocument>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(ManualStoreError::persistence(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|err| ManualStoreError::corrupt(&self.key, err))
    }

    fn save(&self, tasks: &[TaskDocument]) -> ManualStoreResult<()> {
        let payload = serde_json::to_vec_pretty(tasks).map_err(ManualStoreError::persistence)?;
        self.dir
            .write(&self.temp_name, payload)
            .map_err(ManualStoreError::persistence)?;
        self.dir
            .rename(&self.temp_name, &self.dir, &self.file_name)
            .map_err(ManualStoreError::persistence)?;
        tracing::debug!(key = %self.key, count = tasks.len(), "manual tasks saved");
        Ok(())
    }
}
