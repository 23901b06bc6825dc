//! Saving and loading editing sessions.
//!
//! A session file is pretty-printed JSON holding the shape document and the
//! material selection, stamped with a format version.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::editor::EditorSession;
use crate::material::MaterialSelection;
use crate::model::ShapeDocument;
use platekit_settings::Config;

/// Session file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete session file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    pub version: String,
    pub metadata: SessionMetadata,
    pub document: ShapeDocument,
    #[serde(default)]
    pub selection: MaterialSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl SessionFile {
    /// Snapshot a session for saving.
    pub fn from_session(session: &EditorSession, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: SessionMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            document: session.document().clone(),
            selection: session.selection().clone(),
        }
    }

    /// Save session to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        std::fs::write(path.as_ref(), json).context("Failed to write session file")?;
        info!("Saved session '{}' to {}", self.metadata.name, path.as_ref().display());
        Ok(())
    }

    /// Load session from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read session file")?;
        let mut session: SessionFile =
            serde_json::from_str(&content).context("Failed to parse session file")?;

        if major(&session.version) != major(FILE_FORMAT_VERSION) {
            bail!(
                "Unsupported session format version {} (expected {})",
                session.version,
                FILE_FORMAT_VERSION
            );
        }
        for (index, shape) in session.document.shapes.iter().enumerate() {
            if shape.len() < crate::model::MIN_VERTICES {
                bail!("Shape {} has only {} points", index + 1, shape.len());
            }
        }

        session.metadata.modified = Utc::now();
        Ok(session)
    }

    /// Open the saved state as a live session with fresh history.
    pub fn into_session(self, config: Config) -> EditorSession {
        EditorSession::from_document(self.document, self.selection, config)
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

impl EditorSession {
    /// Save this session to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>, name: &str) -> Result<()> {
        SessionFile::from_session(self, name).save_to_file(path)
    }

    /// Load a session file.
    pub fn load_from_file(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let file = SessionFile::load_from_file(&path)?;
        info!(
            "Loaded session '{}' from {}",
            file.metadata.name,
            path.as_ref().display()
        );
        Ok(file.into_session(config))
    }
}
