use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::info;
use xmltree::{Element, EmitterConfig};

/// An in-memory COLLADA document bound to the file it was loaded from.
///
/// The root element's namespace URI is preserved so that every element the
/// editor creates carries the same namespace as the rest of the tree.
#[derive(Debug, Clone)]
pub struct DaeDocument {
    root: Element,
    path: PathBuf,
}

impl DaeDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DaeError> {
        let path = path.as_ref();
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(DaeError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => {
                return Err(DaeError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let root = Element::parse(raw.as_slice()).map_err(|source| DaeError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        if root.name != "COLLADA" {
            return Err(DaeError::NotCollada {
                path: path.to_path_buf(),
                root: root.name,
            });
        }

        info!("loaded {}", path.display());
        Ok(Self {
            root,
            path: path.to_path_buf(),
        })
    }

    /// Serialize the document back to the path it was loaded from.
    pub fn save(&self) -> Result<(), DaeError> {
        let file = fs::File::create(&self.path).map_err(|source| DaeError::Io {
            path: self.path.clone(),
            source,
        })?;

        let config = EmitterConfig::new().perform_indent(true);
        self.root
            .write_with_config(file, config)
            .map_err(|source| DaeError::Save {
                path: self.path.clone(),
                source,
            })?;

        info!("saved {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the model file; relative texture paths resolve
    /// against this.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Namespace URI declared on the `COLLADA` root, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.root.namespace.as_deref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }
}

/// Document-level failures surfaced to tooling.
#[derive(Debug)]
pub enum DaeError {
    Missing {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        source: xmltree::ParseError,
    },
    NotCollada {
        path: PathBuf,
        root: String,
    },
    Save {
        path: PathBuf,
        source: xmltree::Error,
    },
}

impl fmt::Display for DaeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaeError::Missing { path } => {
                write!(f, "missing file: {}", path.display())
            }
            DaeError::Io { path, source } => {
                write!(f, "I/O error for {}: {}", path.display(), source)
            }
            DaeError::Malformed { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            DaeError::NotCollada { path, root } => {
                write!(
                    f,
                    "{} is not a COLLADA document (root element <{}>)",
                    path.display(),
                    root
                )
            }
            DaeError::Save { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DaeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DaeError::Missing { .. } => None,
            DaeError::Io { source, .. } => Some(source),
            DaeError::Malformed { source, .. } => Some(source),
            DaeError::NotCollada { .. } => None,
            DaeError::Save { source, .. } => Some(source),
        }
    }
}
