use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

/// File system errors surfaced to GUI tooling.
#[derive(Debug)]
pub enum ConfigIoError {
    Missing {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIoError::Missing { path } => {
                write!(f, "missing file: {}", path.display())
            }
            ConfigIoError::Io { path, source } => {
                write!(f, "I/O error for {}: {}", path.display(), source)
            }
            ConfigIoError::Corrupt { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            ConfigIoError::Serialize { path, source } => {
                write!(f, "failed to serialize {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigIoError::Missing { .. } => None,
            ConfigIoError::Io { source, .. } => Some(source),
            ConfigIoError::Corrupt { source, .. } => Some(source),
            ConfigIoError::Serialize { source, .. } => Some(source),
        }
    }
}

/// Read a JSON file and return the parsed payload.
pub fn read_json_file<T>(path: impl AsRef<Path>) -> Result<T, ConfigIoError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let data = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ConfigIoError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(err) => {
            return Err(ConfigIoError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    serde_json::from_str(&data).map_err(|source| ConfigIoError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a JSON file, creating parent directories when needed.
pub fn write_json_file<T>(path: impl AsRef<Path>, value: &T) -> Result<(), ConfigIoError>
where
    T: Serialize,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            return Err(ConfigIoError::Io {
                path: parent.to_path_buf(),
                source: err,
            });
        }
    }

    let payload = serde_json::to_string_pretty(value).map_err(|source| ConfigIoError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, payload).map_err(|source| ConfigIoError::Io {
        path: path.to_path_buf(),
        source,
    })
}
