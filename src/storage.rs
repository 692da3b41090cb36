use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::WorkoutCatalog;
use crate::error::{FitError, Result};
use crate::ledger::ProgressLedger;
use crate::settings::Settings;

static DEFAULTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data");

pub const SETTINGS_FILE: &str = "settings.json";
pub const PROGRAMS_FILE: &str = "workout_programs.json";
pub const PROGRESS_FILE: &str = "progress.json";

/// Load/save one whole document
pub trait DocumentStore<T> {
    fn load(&self) -> Result<T>;
    fn save(&self, doc: &T) -> Result<()>;
}

/// A document stored as a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> DocumentStore<T> for JsonFileStore<T> {
    fn load(&self) -> Result<T> {
        let bytes = fs::read(&self.path).map_err(|source| FitError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| FitError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, doc: &T) -> Result<()> {
        let data = to_pretty_json(doc)?;
        let write_err = |source| FitError::FileWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, data).map_err(write_err)?;
        debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}

/// Serialize with four-space indentation
pub fn to_pretty_json<T: Serialize>(doc: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser)?;
    Ok(out)
}

/// Built-in copy of a document, as shipped with the binary
pub fn embedded_default(file_name: &str) -> Option<&'static str> {
    DEFAULTS_DIR.get_file(file_name)?.contents_utf8()
}

/// The directory holding the three application documents
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> JsonFileStore<Settings> {
        JsonFileStore::with_path(self.root.join(SETTINGS_FILE))
    }

    pub fn catalog(&self) -> JsonFileStore<WorkoutCatalog> {
        JsonFileStore::with_path(self.root.join(PROGRAMS_FILE))
    }

    pub fn progress(&self) -> JsonFileStore<ProgressLedger> {
        JsonFileStore::with_path(self.root.join(PROGRESS_FILE))
    }

    /// Write the built-in copy of every missing document. Returns the files written.
    pub fn seed_defaults(&self) -> Result<Vec<&'static str>> {
        let mut written = Vec::new();
        for name in [SETTINGS_FILE, PROGRAMS_FILE, PROGRESS_FILE] {
            if !self.root.join(name).exists() {
                self.restore_default(name)?;
                written.push(name);
            }
        }
        if !written.is_empty() {
            info!(dir = %self.root.display(), files = ?written, "seeded default documents");
        }
        Ok(written)
    }

    /// Overwrite `file_name` with its built-in copy
    pub fn restore_default(&self, file_name: &str) -> Result<()> {
        let path = self.root.join(file_name);
        let contents = embedded_default(file_name).ok_or_else(|| FitError::FileRead {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no built-in default"),
        })?;
        let write_err = |source| FitError::FileWrite {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(write_err)?;
        fs::write(&path, contents).map_err(write_err)
    }
}
