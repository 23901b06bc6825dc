//! Interactive edit controller
//!
//! [`EditorSession`] is the one aggregate that owns the shape document, its
//! edit history, the active tool and the material selection. Pointer and
//! keyboard gestures go in, document mutations and user [`Notice`]s come
//! out. Rejected gestures never escape as errors.

mod session;
mod tool;

pub use session::EditorSession;
pub use tool::{
    NudgeDirection, PointRef, RoundingClick, RoundingState, ShapeDrag, ToolMode, ToolState,
};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// A user-visible message produced by a gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level == NoticeLevel::Warning
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
