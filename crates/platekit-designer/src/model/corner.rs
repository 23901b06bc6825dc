use serde::{Deserialize, Serialize};

/// Radius given to a sharp corner when it is toggled to rounded (mm).
pub const DEFAULT_CORNER_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CornerKind {
    #[default]
    Sharp,
    Radius,
}

/// How a vertex is finished: a sharp joint or rounded with a radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CornerSetting {
    #[serde(rename = "type")]
    pub kind: CornerKind,
    #[serde(default)]
    pub radius: f64,
}

impl CornerSetting {
    pub fn sharp() -> Self {
        Self::default()
    }

    pub fn rounded(radius: f64) -> Self {
        Self {
            kind: CornerKind::Radius,
            radius,
        }
    }

    /// A rounded corner with a non-zero radius.
    pub fn is_rounded(&self) -> bool {
        self.kind == CornerKind::Radius && self.radius > 0.0
    }

    /// Sharp becomes rounded at [`DEFAULT_CORNER_RADIUS`], rounded becomes sharp.
    pub fn toggled(&self) -> Self {
        match self.kind {
            CornerKind::Sharp => Self::rounded(DEFAULT_CORNER_RADIUS),
            CornerKind::Radius => Self::sharp(),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.radius.is_finite() && self.radius >= 0.0
    }
}
