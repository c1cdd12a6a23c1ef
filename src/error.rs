use std::fmt;

/// What kind of asset a load was attempting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Bitmap,
    Sound,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Bitmap => "bitmap",
            AssetKind::Sound => "sound",
        }
    }
}

/// Errors that can occur while setting up a game session
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The host could not resolve an asset path
    AssetNotFound { kind: AssetKind, path: String },

    /// Configuration failed to parse or holds unusable values
    InvalidConfig(String),
}

impl GameError {
    pub fn bitmap_not_found(path: impl Into<String>) -> Self {
        GameError::AssetNotFound {
            kind: AssetKind::Bitmap,
            path: path.into(),
        }
    }

    pub fn sound_not_found(path: impl Into<String>) -> Self {
        GameError::AssetNotFound {
            kind: AssetKind::Sound,
            path: path.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::AssetNotFound { kind, path } => {
                write!(f, "{} asset not found: {}", kind.as_str(), path)
            }
            GameError::InvalidConfig(reason) => {
                write!(f, "Invalid config: {}", reason)
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(error: serde_json::Error) -> Self {
        GameError::InvalidConfig(error.to_string())
    }
}
