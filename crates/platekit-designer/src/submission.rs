//! Order submission
//!
//! Builds the order payload from a validated session and hands it to an
//! [`OrderSink`]. A failed submission leaves the session untouched so the
//! customer can simply retry.

use crate::editor::EditorSession;
use crate::model::CornerSetting;
use crate::preview::{render_preview_png, PREVIEW_SIZE};
use crate::pricing::PriceBreakdown;
use async_trait::async_trait;
use platekit_core::{MaterialCatalog, MaterialId, SubmissionError, VariantId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use uuid::Uuid;

/// Identifier returned by the sink for a created order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolePayload {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

/// The serialized order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// m²
    pub total_area: f64,
    /// m
    pub total_perimeter: f64,
    pub material: MaterialId,
    pub thickness: VariantId,
    pub color: String,
    pub total_drilling_holes: usize,
    pub total_price: f64,
    /// Points of every shape, in mm
    pub shape_points: Vec<Vec<[f64; 2]>>,
    /// Corner settings aligned with `shape_points`
    pub corner_settings: Vec<Vec<CornerSetting>>,
    pub drilling_holes: Vec<HolePayload>,
    pub unit: String,
    pub price_breakdown: PriceBreakdown,
}

/// A payload plus its optional preview image
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub payload: OrderPayload,
    /// PNG bytes
    pub preview_png: Option<Vec<u8>>,
}

/// Destination for finished orders
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// Hand the order over and return the created order's id.
    async fn submit(&self, order: &OrderSubmission) -> Result<OrderId, SubmissionError>;
}

/// Writes each order as `order-<uuid>.json` (and `order-<uuid>.png`) into a directory.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    dir: PathBuf,
}

impl JsonDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn order_path(&self, id: &OrderId) -> PathBuf {
        self.dir.join(format!("order-{}.json", id))
    }
}

#[async_trait]
impl OrderSink for JsonDirectorySink {
    async fn submit(&self, order: &OrderSubmission) -> Result<OrderId, SubmissionError> {
        if !self.dir.is_dir() {
            return Err(SubmissionError::Transport(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        let id = OrderId(Uuid::new_v4().to_string());
        let json = serde_json::to_string_pretty(&order.payload)?;
        std::fs::write(self.order_path(&id), json)?;
        if let Some(png) = &order.preview_png {
            std::fs::write(self.dir.join(format!("order-{}.png", id)), png)?;
        }
        Ok(id)
    }
}

impl EditorSession {
    /// Validate and assemble the order, including a rendered preview.
    pub fn build_order(&self, catalog: &MaterialCatalog) -> Result<OrderSubmission, SubmissionError> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(SubmissionError::InvalidOrder {
                issues: report.messages(),
            });
        }

        let selection = self.selection();
        let (Some(material), Some(thickness), Some(color)) =
            (selection.material, selection.thickness, selection.color_label())
        else {
            return Err(SubmissionError::InvalidOrder {
                issues: vec!["Material selection is incomplete".to_string()],
            });
        };

        let breakdown = self.quote(catalog).map_err(|e| SubmissionError::InvalidOrder {
            issues: vec![e.to_string()],
        })?;

        let document = self.document();
        let measurements = document.measurements();
        let payload = OrderPayload {
            total_area: measurements.area_m2,
            total_perimeter: measurements.perimeter_m,
            material,
            thickness,
            color,
            total_drilling_holes: document.holes.len(),
            total_price: breakdown.final_total,
            shape_points: document
                .shapes
                .iter()
                .map(|s| s.points().into_iter().map(<[f64; 2]>::from).collect())
                .collect(),
            corner_settings: document.shapes.iter().map(|s| s.corner_settings()).collect(),
            drilling_holes: document
                .holes
                .iter()
                .map(|h| HolePayload {
                    x: h.x,
                    y: h.y,
                    diameter: h.diameter,
                })
                .collect(),
            unit: "mm".to_string(),
            price_breakdown: breakdown,
        };

        let preview_png = render_preview_png(document, PREVIEW_SIZE.0, PREVIEW_SIZE.1)
            .map_err(|e| SubmissionError::Serialization(e.to_string()))?;

        Ok(OrderSubmission {
            payload,
            preview_png: Some(preview_png),
        })
    }

    /// Build the order and send it to `sink`.
    pub async fn submit_order(
        &self,
        sink: &dyn OrderSink,
        catalog: &MaterialCatalog,
    ) -> Result<OrderId, SubmissionError> {
        let order = self.build_order(catalog)?;
        match sink.submit(&order).await {
            Ok(id) => {
                info!(
                    "Order {} submitted: {:.4} m², total {:.2}",
                    id, order.payload.total_area, order.payload.total_price
                );
                Ok(id)
            }
            Err(err) => {
                error!("Order submission failed: {}", err);
                Err(err)
            }
        }
    }
}
