use std::fmt;
use std::path::PathBuf;

/// Failure to load an asset from disk.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// The file does not exist or cannot be opened.
    Missing { path: PathBuf, message: String },
    /// The file exists but is not a decodable image.
    Decode { path: PathBuf, message: String },
    /// The image decoded to a zero-sized buffer.
    Empty { path: PathBuf },
}

impl AssetError {
    pub fn path(&self) -> &PathBuf {
        match self {
            AssetError::Missing { path, .. }
            | AssetError::Decode { path, .. }
            | AssetError::Empty { path } => path,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing { path, message } => {
                write!(f, "cannot open asset {}: {message}", path.display())
            }
            AssetError::Decode { path, message } => {
                write!(f, "cannot decode image {}: {message}", path.display())
            }
            AssetError::Empty { path } => write!(f, "image {} has no pixels", path.display()),
        }
    }
}

impl std::error::Error for AssetError {}
