use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::Direction;
use crate::direction::Direction::{Down, Left, Right, Up};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("sequence library is empty")]
    Empty,
    #[error("library entry {index} has an empty sequence")]
    EmptySequence { index: usize },
    #[error("library has {sequences} sequences but {icons} icons")]
    LengthMismatch { sequences: usize, icons: usize },
    #[error("failed to read library file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse library file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Opaque handle to an icon. The core never resolves it; hosts map it to whatever
/// they can draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable label: the file stem of the reference.
    pub fn label(&self) -> &str {
        Path::new(&self.0)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    icon: IconRef,
    steps: Vec<Direction>,
}

impl LibraryEntry {
    pub fn new(icon: IconRef, steps: Vec<Direction>) -> Self {
        Self {
            name: None,
            icon,
            steps,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.icon.label())
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct LibraryFile {
    entries: Vec<LibraryEntry>,
}

/// Ordered, validated collection of sequences. Each sequence is paired with the icon
/// stored at the same position; lookups are always by position, never by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceLibrary {
    entries: Vec<LibraryEntry>,
}

impl SequenceLibrary {
    pub fn new(entries: Vec<LibraryEntry>) -> Result<Self, LibraryError> {
        if entries.is_empty() {
            return Err(LibraryError::Empty);
        }
        if let Some(index) = entries.iter().position(|e| e.steps.is_empty()) {
            return Err(LibraryError::EmptySequence { index });
        }
        Ok(Self { entries })
    }

    /// Builds a library from two parallel lists.
    pub fn from_parts(
        sequences: Vec<Vec<Direction>>,
        icons: Vec<IconRef>,
    ) -> Result<Self, LibraryError> {
        if sequences.len() != icons.len() {
            return Err(LibraryError::LengthMismatch {
                sequences: sequences.len(),
                icons: icons.len(),
            });
        }
        let entries = sequences
            .into_iter()
            .zip(icons)
            .map(|(steps, icon)| LibraryEntry::new(icon, steps))
            .collect();
        Self::new(entries)
    }

    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, LibraryError> {
        let file: LibraryFile =
            serde_json::from_str(text).map_err(|source| LibraryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(file.entries)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LibraryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&text, path)?;
        tracing::info!(path = %path.display(), entries = library.len(), "loaded sequence library");
        Ok(library)
    }

    /// Loads `path` when given, otherwise the built-in set.
    pub fn load_or_standard(path: Option<&Path>) -> Result<Self, LibraryError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&LibraryFile {
            entries: self.entries.clone(),
        })
    }

    /// The stratagem set shipped with the game.
    pub fn standard() -> Self {
        let entry = |icon: &str, steps: &[Direction]| {
            LibraryEntry::new(IconRef::new(icon), steps.to_vec())
        };
        Self {
            entries: vec![
                entry("Resupply.png", &[Down, Down, Up, Right]),
                entry("Reinforcement.png", &[Up, Down, Right, Left, Up]),
                entry("Eagle Airstrike.png", &[Up, Right, Down, Right]),
                entry("Orbital Precision Strike.png", &[Right, Right, Up]),
                entry("Orbital Smoke Strike.png", &[Right, Right, Down, Up]),
                entry("Eagle Cluster Bomb.png", &[Up, Right, Down, Down, Right]),
                entry("Eagle Rearm.png", &[Up, Up, Left, Up, Right]),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LibraryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }
}

impl Default for SequenceLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
