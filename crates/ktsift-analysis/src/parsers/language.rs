//! Kotlin file classification by extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KotlinFileKind {
    /// `.kt`
    Source,
    /// `.kts`
    Script,
}

impl KotlinFileKind {
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext? {
            "kt" => Some(Self::Source),
            "kts" => Some(Self::Script),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }
}
