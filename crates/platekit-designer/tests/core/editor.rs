use platekit_core::ShapeTemplate;
use platekit_designer::{
    EditorSession, NoticeLevel, NudgeDirection, Point, PointRef, RoundingState, ToolMode,
    ToolState,
};
use platekit_settings::Config;

fn rectangle_session() -> EditorSession {
    let mut session = EditorSession::default();
    let template = ShapeTemplate::new(
        1,
        "Rectangle",
        vec![[0.0, 0.0], [300.0, 0.0], [300.0, 200.0], [0.0, 200.0]],
        true,
    );
    session.load_template(&template).unwrap();
    session
}

#[test]
fn test_load_template_resets_history() {
    let mut session = rectangle_session();
    assert_eq!(session.document().shapes.len(), 1);
    assert_eq!(session.history().len(), 1);
    assert!(!session.can_undo());

    let notice = session.undo().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Nothing to undo");
}

#[test]
fn test_invalid_template_rejected() {
    let mut session = EditorSession::default();
    let template = ShapeTemplate::new(2, "Line", vec![[0.0, 0.0], [1.0, 0.0]], false);
    assert!(session.load_template(&template).is_err());
    assert!(session.document().shapes.is_empty());
}

#[test]
fn test_switching_tools_clears_transient_state() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    session.click_point(0, 2);
    assert_eq!(session.tool().selected_point(), Some(PointRef::new(0, 2)));

    session.set_tool(ToolMode::RoundByDrag);
    assert_eq!(session.tool().selected_point(), None);
    session.click_point(0, 0);
    assert_eq!(
        session.tool().rounding(),
        Some(&RoundingState::OneSelected(PointRef::new(0, 0)))
    );

    session.set_tool(ToolMode::AddPoint);
    assert_eq!(*session.tool(), ToolState::AddPoint);
    session.set_tool(ToolMode::RoundByDrag);
    assert_eq!(session.tool().rounding(), Some(&RoundingState::Idle));
}

#[test]
fn test_add_point_snaps_to_grid() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::AddPoint);
    assert!(session.click_segment(0, 0, Point::new(152.0, 1.9)).is_none());

    let shape = &session.document().shapes[0];
    assert_eq!(shape.len(), 5);
    assert_eq!(shape.point(1), Some(Point::new(150.0, 0.0)));
    assert!(session.can_undo());
}

#[test]
fn test_add_point_without_snapping() {
    let mut config = Config::default();
    config.editor.snap_to_grid = false;
    let mut session = EditorSession::new(config);
    session
        .load_template(&ShapeTemplate::new(
            1,
            "Triangle",
            vec![[0.0, 0.0], [100.0, 0.0], [0.0, 100.0]],
            true,
        ))
        .unwrap();
    session.set_tool(ToolMode::AddPoint);
    session.click_segment(0, 1, Point::new(50.3, 49.7));
    assert_eq!(session.document().shapes[0].point(2), Some(Point::new(50.3, 49.7)));
}

#[test]
fn test_delete_point_below_minimum_is_a_warning() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::DeletePoint);
    assert!(session.click_point(0, 3).is_none());
    assert_eq!(session.document().shapes[0].len(), 3);

    let notice = session.click_point(0, 0).unwrap();
    assert!(notice.is_warning());
    assert_eq!(notice.message, "Cannot delete point - minimum 3 points required");
    assert_eq!(session.document().shapes[0].len(), 3);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_nudge_is_one_undoable_step_per_press() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    session.click_point(0, 1);

    session.nudge(NudgeDirection::Right);
    session.nudge(NudgeDirection::Right);
    session.nudge(NudgeDirection::Up);
    assert_eq!(session.document().shapes[0].point(1), Some(Point::new(312.0, -6.0)));
    assert_eq!(session.history().len(), 4);

    session.undo();
    assert_eq!(session.document().shapes[0].point(1), Some(Point::new(312.0, 0.0)));
}

#[test]
fn test_nudge_without_selection_does_nothing() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    assert!(session.nudge(NudgeDirection::Down).is_none());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_point_drag_commits_once() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    session.drag_point(0, 2, Point::new(310.0, 205.0));
    session.drag_point(0, 2, Point::new(320.0, 212.0));
    assert_eq!(session.history().len(), 1);
    session.end_drag();

    assert_eq!(session.document().shapes[0].point(2), Some(Point::new(318.0, 210.0)));
    assert_eq!(session.history().len(), 2);
    session.undo();
    assert_eq!(session.document().shapes[0].point(2), Some(Point::new(300.0, 200.0)));
}

#[test]
fn test_shape_drag_and_locked_shapes() {
    let mut session = rectangle_session();
    session.drag_shape(0, 10.0, 20.0);
    session.end_drag();
    assert_eq!(session.document().shapes[0].point(0), Some(Point::new(10.0, 20.0)));
    assert_eq!(session.history().len(), 2);

    let mut doc = session.document().clone();
    doc.shapes[0].locked = true;
    session.replace_document(doc);
    let notice = session.drag_shape(0, 5.0, 5.0).unwrap();
    assert!(notice.is_warning());
    assert_eq!(session.document().shapes[0].point(0), Some(Point::new(10.0, 20.0)));
}

#[test]
fn test_round_by_drag_commit() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::RoundByDrag);
    session.click_point(0, 0);
    let notice = session.click_point(0, 1).unwrap();
    assert_eq!(notice.message, "Drag the midpoint to create a round");

    session.begin_round_drag();
    // Perpendicular of (0,0)->(300,0) is +y; drag 30 below the edge.
    session.round_drag_to(Point::new(150.0, 30.0));
    let preview = session.rounding_preview().unwrap();
    assert_eq!(preview.len(), 21);
    assert_eq!(session.document().shapes[0].len(), 4);

    let notice = session.end_round_drag().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(session.document().shapes[0].len(), 4 + 15);
    assert_eq!(session.tool().rounding(), Some(&RoundingState::Idle));

    session.undo();
    assert_eq!(session.document().shapes[0].len(), 4);
}

#[test]
fn test_small_round_drag_rearms_handle() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::RoundByDrag);
    session.click_point(0, 1);
    session.click_point(0, 2);
    session.begin_round_drag();
    session.round_drag_to(Point::new(297.0, 100.0));

    assert!(session.end_round_drag().is_none());
    assert_eq!(
        session.tool().rounding(),
        Some(&RoundingState::TwoSelected(PointRef::new(0, 1), PointRef::new(0, 2)))
    );
    assert_eq!(session.document().shapes[0].len(), 4);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_round_drag_threshold_is_configurable() {
    let mut config = Config::default();
    config.editor.round_drag_threshold = 50.0;
    let mut session = EditorSession::new(config);
    session
        .load_template(&ShapeTemplate::new(
            1,
            "Rectangle",
            vec![[0.0, 0.0], [300.0, 0.0], [300.0, 200.0], [0.0, 200.0]],
            true,
        ))
        .unwrap();
    session.set_tool(ToolMode::RoundByDrag);
    session.click_point(0, 0);
    session.click_point(0, 1);
    session.begin_round_drag();
    session.round_drag_to(Point::new(150.0, 30.0));
    assert!(session.end_round_drag().is_none());
    assert_eq!(session.document().shapes[0].len(), 4);
}

#[test]
fn test_non_adjacent_rounding_pair_warns_and_resets() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::RoundByDrag);
    session.click_point(0, 0);
    let notice = session.click_point(0, 2).unwrap();
    assert!(notice.is_warning());
    assert_eq!(session.tool().rounding(), Some(&RoundingState::Idle));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_place_hole_exits_after_one_hole() {
    let mut session = rectangle_session();
    session.toggle_hole_placement();
    assert_eq!(session.mode(), ToolMode::PlaceHole);

    let notice = session.click_canvas(Point::new(400.0, 50.0)).unwrap();
    assert!(notice.is_warning());
    assert!(notice.message.starts_with("Drilling hole must be placed inside the shape"));
    assert_eq!(session.mode(), ToolMode::PlaceHole);
    assert!(session.document().holes.is_empty());

    let notice = session.click_canvas(Point::new(30.0, 30.0)).unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(session.mode(), ToolMode::Select);
    assert_eq!(session.document().holes.len(), 1);
    assert_eq!(session.document().holes[0].diameter, 6.0);
}

#[test]
fn test_hole_on_boundary_is_rejected() {
    let mut session = rectangle_session();
    assert!(session.add_hole(Point::new(0.0, 100.0)).is_err());
    assert!(session.add_hole(Point::new(1.0, 100.0)).is_ok());
}

#[test]
fn test_hole_clearances() {
    let mut session = rectangle_session();
    let id = session.add_hole(Point::new(40.0, 30.0)).unwrap();
    let clearances = session.hole_clearances(id).unwrap();
    assert_eq!(clearances.left, 40.0);
    assert_eq!(clearances.right, 260.0);
    assert_eq!(clearances.top, 30.0);
    assert_eq!(clearances.bottom, 170.0);
    assert_eq!(clearances.min(), 30.0);
}

#[test]
fn test_failed_edit_leaves_history_alone() {
    let mut session = rectangle_session();
    assert!(session.apply_rounding(0, 0, 2, 20.0).is_err());
    assert!(session.delete_point(5, 0).is_err());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_ids_survive_undo() {
    let mut session = rectangle_session();
    let first = session.insert_point(0, 0, Point::new(100.0, 0.0)).unwrap();
    session.undo();
    let second = session.insert_point(0, 0, Point::new(100.0, 0.0)).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_switching_tools_commits_live_point_drag() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    session.drag_point(0, 1, Point::new(360.0, 0.0));
    session.set_tool(ToolMode::AddPoint);

    assert_eq!(session.history().current(), Some(session.document()));
    assert!(session.can_undo());
    assert!(session.undo().is_none());
    assert_eq!(session.document().shapes[0].point(1), Some(Point::new(300.0, 0.0)));
}

#[test]
fn test_shape_drag_and_next_edit_undo_separately() {
    let mut session = rectangle_session();
    session.drag_shape(0, 48.0, 0.0);
    session.set_tool(ToolMode::PlaceHole);
    session.click_canvas(Point::new(100.0, 100.0));
    assert_eq!(session.history().len(), 3);

    session.undo();
    assert!(session.document().holes.is_empty());
    assert_eq!(session.document().shapes[0].point(0), Some(Point::new(48.0, 0.0)));

    session.undo();
    assert_eq!(session.document().shapes[0].point(0), Some(Point::new(0.0, 0.0)));
}

#[test]
fn test_undo_during_drag_reverts_the_drag() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    session.drag_point(0, 2, Point::new(330.0, 228.0));
    session.undo();

    assert_eq!(session.document().shapes[0].point(2), Some(Point::new(300.0, 200.0)));
    assert!(session.can_redo());
    session.redo();
    assert_eq!(session.document().shapes[0].point(2), Some(Point::new(330.0, 228.0)));
}

#[test]
fn test_direct_edit_during_drag_keeps_drag_as_own_step() {
    let mut session = rectangle_session();
    session.set_tool(ToolMode::SelectPoint);
    session.drag_point(0, 1, Point::new(306.0, 0.0));
    session.add_hole(Point::new(30.0, 30.0)).unwrap();
    assert_eq!(session.history().len(), 3);

    session.undo();
    assert_eq!(session.document().shapes[0].point(1), Some(Point::new(306.0, 0.0)));
}

#[test]
fn test_non_finite_rounding_offset_rejected() {
    let mut session = rectangle_session();
    assert!(session.apply_rounding(0, 0, 1, f64::NAN).is_err());
    assert_eq!(session.document().shapes[0].len(), 4);
    assert_eq!(session.history().len(), 1);

    session.set_tool(ToolMode::RoundByDrag);
    session.click_point(0, 0);
    session.click_point(0, 1);
    session.begin_round_drag();
    session.round_drag_to(Point::new(150.0, f64::NAN));
    assert!(session.end_round_drag().is_none());
    assert!(session.document().shapes[0].points().iter().all(|p| p.is_finite()));
    assert_eq!(session.history().len(), 1);
}
