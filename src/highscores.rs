//! High score persistence
//!
//! A single integer. Native builds keep it in a plain-text file; web builds
//! keep it in LocalStorage under the same name.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Failure reading or writing persisted state (high score, settings, tuning)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistentStateError {
    /// Nothing stored yet
    Missing { path: PathBuf },
    /// Underlying read/write failed
    Io { path: PathBuf, reason: String },
    /// Stored contents could not be parsed
    Parse { path: PathBuf, reason: String },
    /// No storage backend (e.g. LocalStorage disabled)
    StorageUnavailable,
}

impl PersistentStateError {
    /// Map an I/O error, treating `NotFound` as `Missing`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::Missing {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::StorageUnavailable => "storage_unavailable",
        }
    }
}

impl fmt::Display for PersistentStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "no saved state at {}", path.display()),
            Self::Io { path, reason } => {
                write!(f, "failed to access {}: {}", path.display(), reason)
            }
            Self::Parse { path, reason } => {
                write!(f, "corrupt saved state in {}: {}", path.display(), reason)
            }
            Self::StorageUnavailable => write!(f, "persistent storage is unavailable"),
        }
    }
}

impl std::error::Error for PersistentStateError {}

/// Parse the stored representation: one non-negative integer, surrounding
/// whitespace allowed
pub fn parse_high_score(path: &Path, contents: &str) -> Result<u32, PersistentStateError> {
    contents
        .trim()
        .parse::<u32>()
        .map_err(|e| PersistentStateError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Where the high score lives
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    /// File path (native) or LocalStorage key (web)
    location: PathBuf,
}

impl HighScoreStore {
    /// Default file name / storage key
    pub const DEFAULT_NAME: &'static str = "flappy_highscore.txt";

    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Read the stored high score
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(&self) -> Result<u32, PersistentStateError> {
        let contents = std::fs::read_to_string(&self.location)
            .map_err(|e| PersistentStateError::from_io(&self.location, e))?;
        let score = parse_high_score(&self.location, &contents)?;
        log::info!("Loaded high score {} from {}", score, self.location.display());
        Ok(score)
    }

    /// Overwrite the stored high score
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, score: u32) -> Result<(), PersistentStateError> {
        if let Some(parent) = self.location.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PersistentStateError::from_io(parent, e))?;
            }
        }
        std::fs::write(&self.location, format!("{score}\n"))
            .map_err(|e| PersistentStateError::from_io(&self.location, e))?;
        log::info!("High score {} saved to {}", score, self.location.display());
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, PersistentStateError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistentStateError::StorageUnavailable)
    }

    #[cfg(target_arch = "wasm32")]
    fn key(&self) -> String {
        self.location.to_string_lossy().into_owned()
    }

    /// Read the stored high score from LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load(&self) -> Result<u32, PersistentStateError> {
        let storage = Self::storage()?;
        let value = storage
            .get_item(&self.key())
            .map_err(|_| PersistentStateError::StorageUnavailable)?
            .ok_or_else(|| PersistentStateError::Missing {
                path: self.location.clone(),
            })?;
        let score = parse_high_score(&self.location, &value)?;
        log::info!("Loaded high score {}", score);
        Ok(score)
    }

    /// Overwrite the stored high score in LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self, score: u32) -> Result<(), PersistentStateError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key(), &score.to_string())
            .map_err(|_| PersistentStateError::Io {
                path: self.location.clone(),
                reason: "LocalStorage rejected write".to_string(),
            })?;
        log::info!("High score {} saved", score);
        Ok(())
    }

    /// Load, falling back to 0 when nothing usable is stored
    pub fn load_or_zero(&self) -> u32 {
        match self.load() {
            Ok(score) => score,
            Err(PersistentStateError::Missing { .. }) => {
                log::info!("No high score yet, starting at 0");
                0
            }
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                0
            }
        }
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> HighScoreStore {
        let path = std::env::temp_dir()
            .join(format!("flappy_test_{}", std::process::id()))
            .join(name);
        let _ = std::fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store("round_trip.txt");
        for score in [0, 1, 9999] {
            store.save(score).expect("save should succeed");
            assert_eq!(store.load().expect("load should succeed"), score);
        }
        let _ = std::fs::remove_file(store.location());
    }

    #[test]
    fn test_missing_file_is_missing_error() {
        let store = temp_store("never_written.txt");
        let err = store.load().unwrap_err();
        assert_eq!(err.code(), "missing");
        assert_eq!(store.load_or_zero(), 0);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let store = temp_store("corrupt.txt");
        std::fs::create_dir_all(store.location().parent().unwrap()).unwrap();
        std::fs::write(store.location(), "not a number").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistentStateError::Parse { .. }));
        assert_eq!(store.load_or_zero(), 0);
        let _ = std::fs::remove_file(store.location());
    }

    #[test]
    fn test_parse_allows_whitespace() {
        let path = Path::new("x");
        assert_eq!(parse_high_score(path, " 42\n").unwrap(), 42);
        assert!(parse_high_score(path, "-1").is_err());
        assert!(parse_high_score(path, "").is_err());
    }

    #[test]
    fn test_error_display_names_path() {
        let err = PersistentStateError::Missing {
            path: PathBuf::from("scores.txt"),
        };
        assert!(err.to_string().contains("scores.txt"));
    }
}
