//! Editor session state and gesture handling.

use super::tool::{NudgeDirection, PointRef, RoundingClick, RoundingState, ShapeDrag, ToolMode, ToolState};
use super::Notice;
use crate::dimensions::{self, Axis, EdgeDimension};
use crate::geometry;
use crate::history::EditHistory;
use crate::material::MaterialSelection;
use crate::model::{
    CornerSetting, DocumentMeasurements, HoleClearances, HoleId, IdAllocator, Point, Shape,
    ShapeDocument, VertexId,
};
use crate::pricing::{calculate_price, PriceBreakdown, PriceInputs};
use crate::validation::{validate_order, ValidationReport};
use platekit_core::{CatalogError, EditError, MaterialCatalog, ShapeTemplate};
use platekit_settings::Config;
use tracing::{debug, info, warn};

/// One customer's editing session
///
/// Every successful edit replaces the document and records a history
/// snapshot in the same step, so the document, its corner settings, its
/// holes and the history can never disagree.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: ShapeDocument,
    history: EditHistory<ShapeDocument>,
    tool: ToolState,
    ids: IdAllocator,
    selection: MaterialSelection,
    config: Config,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl EditorSession {
    /// Creates a session with an empty document.
    pub fn new(config: Config) -> Self {
        Self::from_document(ShapeDocument::new(), MaterialSelection::default(), config)
    }

    /// Creates a session around an existing document with fresh history.
    pub fn from_document(
        document: ShapeDocument,
        selection: MaterialSelection,
        config: Config,
    ) -> Self {
        let history = EditHistory::with_initial(&document, config.editor.history_limit);
        Self {
            ids: IdAllocator::starting_after(&document),
            document,
            history,
            tool: ToolState::default(),
            selection,
            config,
        }
    }

    /// Replace the document with a catalog template.
    ///
    /// Holes and corner settings start over and history is reset.
    pub fn load_template(&mut self, template: &ShapeTemplate) -> platekit_core::Result<()> {
        template.validate()?;
        let shape = Shape::from_template(&mut self.ids, template)?;
        self.replace_document(ShapeDocument::with_shape(shape));
        info!(
            "Loaded template '{}' ({} points)",
            template.name,
            template.points.len()
        );
        Ok(())
    }

    /// Replace the whole document, starting a fresh history.
    ///
    /// Any drag in progress is discarded along with the old document.
    pub fn replace_document(&mut self, document: ShapeDocument) {
        let ids = IdAllocator::starting_after(&document);
        if ids.peek() > self.ids.peek() {
            self.ids = ids;
        }
        self.document = document;
        self.history.reset(&self.document);
        self.tool = ToolState::for_mode(self.tool.mode());
    }

    pub fn document(&self) -> &ShapeDocument {
        &self.document
    }

    pub fn history(&self) -> &EditHistory<ShapeDocument> {
        &self.history
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn mode(&self) -> ToolMode {
        self.tool.mode()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selection(&self) -> &MaterialSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: MaterialSelection) {
        self.selection = selection;
    }

    pub fn selection_mut(&mut self) -> &mut MaterialSelection {
        &mut self.selection
    }

    /// Switch tools, dropping the previous tool's transient state.
    ///
    /// A drag still in progress is committed first.
    pub fn set_tool(&mut self, mode: ToolMode) {
        self.end_drag();
        if mode != self.tool.mode() {
            debug!("Tool mode {} -> {}", self.tool.mode(), mode);
        }
        self.tool = ToolState::for_mode(mode);
    }

    /// Turn hole placement on, or back off to select mode.
    pub fn toggle_hole_placement(&mut self) -> Notice {
        if self.tool.is_placing_hole() {
            self.set_tool(ToolMode::Select);
            Notice::info("Hole placement cancelled")
        } else {
            self.set_tool(ToolMode::PlaceHole);
            Notice::info("Click inside the shape to place a drilling hole")
        }
    }

    /// Snap a position to the grid when snapping is on.
    pub fn snap(&self, p: Point) -> Point {
        let editor = &self.config.editor;
        if editor.snap_to_grid {
            geometry::snap_to_grid(p, editor.snap_step())
        } else {
            p
        }
    }

    // Single write path: mutate a copy, then swap it in and snapshot it.
    fn edit<T>(
        &mut self,
        operation: &str,
        f: impl FnOnce(&mut ShapeDocument, &mut IdAllocator) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        // A live drag gets its own history entry before this edit's.
        self.end_drag();
        let mut next = self.document.clone();
        let value = f(&mut next, &mut self.ids)?;
        self.document = next;
        self.history.commit(&self.document);
        debug!(
            "{}: {} shapes, {} vertices, {} holes",
            operation,
            self.document.shapes.len(),
            self.document.vertex_count(),
            self.document.holes.len()
        );
        Ok(value)
    }

    fn reject(&self, err: EditError) -> Notice {
        warn!("{}", err);
        Notice::warning(err.to_string())
    }

    fn notice_on_error<T>(&self, result: Result<T, EditError>) -> Option<Notice> {
        result.err().map(|err| self.reject(err))
    }

    fn ensure_unlocked(&self, shape: usize) -> Result<(), EditError> {
        if self.document.shape(shape)?.locked {
            Err(EditError::ShapeLocked { index: shape })
        } else {
            Ok(())
        }
    }

    // Commit whatever a live drag has already written to the document.
    fn commit_live(&mut self, operation: &str) {
        self.history.commit(&self.document);
        debug!("{}: committed drag", operation);
    }

    // Pointer gestures

    /// Click on a shape body (select mode).
    pub fn click_shape(&mut self, shape: usize) -> Option<Notice> {
        if self.tool.mode() != ToolMode::Select {
            return None;
        }
        if let Err(err) = self.ensure_unlocked(shape) {
            return Some(self.reject(err));
        }
        self.end_drag();
        self.tool = ToolState::Select {
            selected: Some(shape),
            drag: None,
        };
        None
    }

    /// Click on empty canvas: places a hole in place-hole mode, otherwise
    /// clears the shape selection.
    pub fn click_canvas(&mut self, position: Point) -> Option<Notice> {
        match self.tool {
            ToolState::PlaceHole => self.place_hole(position),
            ToolState::Select { .. } => {
                self.end_drag();
                self.tool = ToolState::for_mode(ToolMode::Select);
                None
            }
            _ => None,
        }
    }

    fn place_hole(&mut self, position: Point) -> Option<Notice> {
        if self.document.shape_containing(position).is_none() {
            return Some(self.reject(EditError::HoleOutsideShape {
                x: position.x,
                y: position.y,
            }));
        }
        let diameter = self.config.validation.hole_diameter;
        match self.edit("Add hole", |doc, _| doc.add_hole(position.x, position.y, diameter)) {
            Ok(_) => {
                self.set_tool(ToolMode::Select);
                Some(Notice::success("Drilling hole added"))
            }
            Err(err) => Some(self.reject(err)),
        }
    }

    /// Drag a whole shape by a delta (select mode); committed by [`end_drag`](Self::end_drag).
    pub fn drag_shape(&mut self, shape: usize, dx: f64, dy: f64) -> Option<Notice> {
        if self.tool.mode() != ToolMode::Select {
            return None;
        }
        if let Err(err) = self.ensure_unlocked(shape) {
            return Some(self.reject(err));
        }
        if let Err(err) = self.document.translate_shape(shape, dx, dy) {
            return Some(self.reject(err));
        }
        self.tool = ToolState::Select {
            selected: Some(shape),
            drag: Some(ShapeDrag { shape, moved: true }),
        };
        None
    }

    /// Click on a vertex; what happens depends on the tool.
    pub fn click_point(&mut self, shape: usize, index: usize) -> Option<Notice> {
        if let Err(err) = self.ensure_unlocked(shape) {
            return Some(self.reject(err));
        }
        if self.document.shape(shape).ok()?.point(index).is_none() {
            return Some(self.reject(EditError::PointNotFound { shape, index }));
        }
        let clicked = PointRef::new(shape, index);

        match &mut self.tool {
            ToolState::SelectPoint { selected, .. } => {
                *selected = if *selected == Some(clicked) {
                    None
                } else {
                    Some(clicked)
                };
                None
            }
            ToolState::DeletePoint => {
                let result = self.edit("Delete point", |doc, _| doc.delete_point(shape, index));
                self.notice_on_error(result)
            }
            ToolState::RoundByDrag(state) => {
                let outcome = match self.document.shapes.get(shape) {
                    Some(s) => state.click(clicked, s),
                    None => RoundingClick::Ignored,
                };
                match outcome {
                    RoundingClick::Ready => Some(Notice::info("Drag the midpoint to create a round")),
                    RoundingClick::Rejected(err) => Some(self.reject(err)),
                    RoundingClick::Selected | RoundingClick::Deselected | RoundingClick::Ignored => None,
                }
            }
            _ => None,
        }
    }

    /// Drag a vertex to a position (select-point mode); committed by [`end_drag`](Self::end_drag).
    pub fn drag_point(&mut self, shape: usize, index: usize, position: Point) -> Option<Notice> {
        if self.tool.mode() != ToolMode::SelectPoint {
            return None;
        }
        if let Err(err) = self.ensure_unlocked(shape) {
            return Some(self.reject(err));
        }
        let snapped = self.snap(position);
        if let Err(err) = self.document.set_point(shape, index, snapped) {
            return Some(self.reject(err));
        }
        self.tool = ToolState::SelectPoint {
            selected: Some(PointRef::new(shape, index)),
            dragging: true,
        };
        None
    }

    /// Finish a shape or vertex drag, recording one history entry.
    pub fn end_drag(&mut self) {
        match &mut self.tool {
            ToolState::Select { drag, .. } => {
                if let Some(ShapeDrag { moved: true, .. }) = drag.take() {
                    self.commit_live("Move shape");
                }
            }
            ToolState::SelectPoint { dragging, .. } => {
                if std::mem::take(dragging) {
                    self.commit_live("Move point");
                }
            }
            _ => {}
        }
    }

    /// Click on an edge (add-point mode) to insert a vertex there.
    pub fn click_segment(&mut self, shape: usize, segment: usize, position: Point) -> Option<Notice> {
        if self.tool.mode() != ToolMode::AddPoint {
            return None;
        }
        if let Err(err) = self.ensure_unlocked(shape) {
            return Some(self.reject(err));
        }
        let snapped = self.snap(position);
        let result = self.edit("Add point", |doc, ids| {
            doc.insert_point(ids, shape, segment, snapped)
        });
        self.notice_on_error(result)
    }

    /// Move the selected vertex one increment (select-point mode).
    pub fn nudge(&mut self, direction: NudgeDirection) -> Option<Notice> {
        let selected = self.tool.selected_point()?;
        if let Err(err) = self.ensure_unlocked(selected.shape) {
            return Some(self.reject(err));
        }
        let step = self.config.editor.nudge_step();
        let (ux, uy) = direction.delta();
        let result = self.edit("Nudge point", |doc, _| {
            doc.move_point(selected.shape, selected.index, ux * step, uy * step)
        });
        self.notice_on_error(result)
    }

    /// Start dragging the midpoint handle of the selected rounding pair.
    pub fn begin_round_drag(&mut self) -> Option<Notice> {
        let ToolState::RoundByDrag(state) = &mut self.tool else {
            return None;
        };
        let RoundingState::TwoSelected(first, second) = *state else {
            return Some(Notice::info("Select two adjacent points first"));
        };
        *state = RoundingState::Dragging {
            first,
            second,
            offset: 0.0,
            preview: Vec::new(),
        };
        None
    }

    /// Update the rounding preview for the handle at `position`.
    pub fn round_drag_to(&mut self, position: Point) {
        if !position.is_finite() {
            return;
        }
        let segments = self.config.editor.preview_arc_segments;
        let ToolState::RoundByDrag(RoundingState::Dragging {
            first,
            second,
            offset,
            preview,
        }) = &mut self.tool
        else {
            return;
        };
        let Some(shape) = self.document.shapes.get(first.shape) else {
            return;
        };
        let (Some(p1), Some(p2)) = (shape.point(first.index), shape.point(second.index)) else {
            return;
        };
        let Some(perp) = geometry::perpendicular_direction(p1, p2) else {
            return;
        };
        let mid = geometry::midpoint(p1, p2);
        *offset = (position.x - mid.x) * perp.x + (position.y - mid.y) * perp.y;
        *preview = geometry::arc_points(p1, p2, *offset, segments);
    }

    /// Current rounding preview, if a drag is in progress.
    pub fn rounding_preview(&self) -> Option<&[Point]> {
        self.tool.rounding().and_then(RoundingState::preview)
    }

    /// Release the midpoint handle: commit the round if the drag was long
    /// enough, otherwise re-arm the pair.
    pub fn end_round_drag(&mut self) -> Option<Notice> {
        let ToolState::RoundByDrag(RoundingState::Dragging {
            first,
            second,
            offset,
            ..
        }) = self.tool
        else {
            return None;
        };

        if offset.abs() < self.config.editor.round_drag_threshold {
            self.tool = ToolState::RoundByDrag(RoundingState::TwoSelected(first, second));
            return None;
        }

        let segments = self.config.editor.commit_arc_segments;
        let result = self.edit("Round edge", |doc, ids| {
            doc.apply_rounding(ids, first.shape, first.index, second.index, offset, segments)
        });
        match result {
            Ok(_) => {
                self.tool = ToolState::RoundByDrag(RoundingState::Idle);
                Some(Notice::success("Round applied successfully!"))
            }
            Err(err) => {
                self.tool = ToolState::RoundByDrag(RoundingState::TwoSelected(first, second));
                Some(self.reject(err))
            }
        }
    }

    // History

    pub fn undo(&mut self) -> Option<Notice> {
        self.end_drag();
        match self.history.undo() {
            Ok(snapshot) => {
                self.document = snapshot.clone();
                self.tool = ToolState::for_mode(self.tool.mode());
                debug!("Undo to step {}", self.history.cursor());
                None
            }
            Err(err) => Some(Notice::info(err.to_string())),
        }
    }

    pub fn redo(&mut self) -> Option<Notice> {
        self.end_drag();
        match self.history.redo() {
            Ok(snapshot) => {
                self.document = snapshot.clone();
                self.tool = ToolState::for_mode(self.tool.mode());
                debug!("Redo to step {}", self.history.cursor());
                None
            }
            Err(err) => Some(Notice::info(err.to_string())),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Direct edits; each is one undoable step

    pub fn insert_point(
        &mut self,
        shape: usize,
        after_segment: usize,
        position: Point,
    ) -> Result<VertexId, EditError> {
        let position = self.snap(position);
        self.edit("Add point", |doc, ids| {
            doc.insert_point(ids, shape, after_segment, position)
        })
    }

    pub fn delete_point(&mut self, shape: usize, index: usize) -> Result<(), EditError> {
        self.edit("Delete point", |doc, _| doc.delete_point(shape, index).map(|_| ()))
    }

    pub fn move_point(&mut self, shape: usize, index: usize, dx: f64, dy: f64) -> Result<(), EditError> {
        self.edit("Move point", |doc, _| doc.move_point(shape, index, dx, dy))
    }

    pub fn translate_shape(&mut self, shape: usize, dx: f64, dy: f64) -> Result<(), EditError> {
        self.edit("Move shape", |doc, _| doc.translate_shape(shape, dx, dy))
    }

    pub fn auto_square(&mut self, shape: usize) -> Result<(), EditError> {
        self.edit("Auto-square", |doc, ids| doc.auto_square(ids, shape))
    }

    /// Round the edge between two vertices with the commit segment count.
    pub fn apply_rounding(
        &mut self,
        shape: usize,
        first: usize,
        second: usize,
        offset: f64,
    ) -> Result<usize, EditError> {
        let segments = self.config.editor.commit_arc_segments;
        self.edit("Round edge", |doc, ids| {
            doc.apply_rounding(ids, shape, first, second, offset, segments)
        })
    }

    /// Add a hole at `position`, which must be inside a visible closed shape.
    pub fn add_hole(&mut self, position: Point) -> Result<HoleId, EditError> {
        if self.document.shape_containing(position).is_none() {
            return Err(EditError::HoleOutsideShape {
                x: position.x,
                y: position.y,
            });
        }
        let diameter = self.config.validation.hole_diameter;
        self.edit("Add hole", |doc, _| doc.add_hole(position.x, position.y, diameter))
    }

    pub fn remove_hole(&mut self, id: HoleId) -> Result<(), EditError> {
        self.edit("Remove hole", |doc, _| doc.remove_hole(id).map(|_| ()))
    }

    pub fn move_hole(&mut self, id: HoleId, position: Point) -> Result<(), EditError> {
        self.edit("Move hole", |doc, _| doc.move_hole(id, position.x, position.y))
    }

    pub fn set_corner(&mut self, shape: usize, index: usize, setting: CornerSetting) -> Result<(), EditError> {
        self.edit("Set corner", |doc, _| doc.set_corner(shape, index, setting))
    }

    pub fn set_all_corners(&mut self, shape: usize, setting: CornerSetting) -> Result<(), EditError> {
        self.edit("Set all corners", |doc, _| doc.set_all_corners(shape, setting))
    }

    pub fn toggle_corner(&mut self, shape: usize, index: usize) -> Result<CornerSetting, EditError> {
        self.edit("Toggle corner", |doc, _| doc.toggle_corner(shape, index))
    }

    pub fn set_edge_length(&mut self, shape: usize, edge: usize, length: f64) -> Result<(), EditError> {
        self.edit("Set edge length", |doc, _| {
            dimensions::set_edge_length(doc, shape, edge, length)
        })
    }

    pub fn set_overall_size(&mut self, shape: usize, axis: Axis, value: f64) -> Result<(), EditError> {
        self.edit("Set overall size", |doc, _| {
            dimensions::set_overall_size(doc, shape, axis, value)
        })
    }

    pub fn scale_shape(&mut self, shape: usize, factor: f64) -> Result<(), EditError> {
        self.edit("Scale shape", |doc, _| dimensions::scale_shape(doc, shape, factor))
    }

    // Derived values

    pub fn measurements(&self) -> DocumentMeasurements {
        self.document.measurements()
    }

    pub fn edge_dimensions(&self, shape: usize) -> Result<Vec<EdgeDimension>, EditError> {
        Ok(dimensions::edge_dimensions(self.document.shape(shape)?))
    }

    /// Clearances of a hole to the first shape's bounding box.
    pub fn hole_clearances(&self, id: HoleId) -> Result<HoleClearances, EditError> {
        let hole = self
            .document
            .hole(id)
            .ok_or_else(|| EditError::HoleNotFound { id: id.to_string() })?;
        let bounds = self
            .document
            .shape(0)?
            .bounding_box()
            .ok_or(EditError::ShapeNotFound { index: 0 })?;
        Ok(hole.clearances(&bounds))
    }

    pub fn validate(&self) -> ValidationReport {
        validate_order(&self.document, &self.selection, &self.config.validation)
    }

    pub fn price_inputs(&self, catalog: &MaterialCatalog) -> Result<PriceInputs, CatalogError> {
        PriceInputs::from_document(&self.document, &self.selection, catalog, &self.config.pricing)
    }

    /// Price breakdown for the current document and selection.
    pub fn quote(&self, catalog: &MaterialCatalog) -> Result<PriceBreakdown, CatalogError> {
        let inputs = self.price_inputs(catalog)?;
        Ok(calculate_price(&inputs, &self.config.pricing))
    }
}
