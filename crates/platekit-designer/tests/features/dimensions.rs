use platekit_core::{EditError, ShapeTemplate};
use platekit_designer::dimensions::{
    edge_dimensions, overall_size, scale_shape, set_edge_length, set_overall_size,
};
use platekit_designer::{Axis, EditorSession, IdAllocator, Point, Shape, ShapeDocument};

fn rectangle() -> ShapeDocument {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(300.0, 0.0),
        Point::new(300.0, 200.0),
        Point::new(0.0, 200.0),
    ];
    ShapeDocument::with_shape(Shape::from_points(&mut IdAllocator::new(), "plate", &pts, true).unwrap())
}

#[test]
fn test_edge_dimensions_of_rectangle() {
    let doc = rectangle();
    let edges = edge_dimensions(&doc.shapes[0]);
    assert_eq!(edges.len(), 4);

    let lengths: Vec<f64> = edges.iter().map(|e| e.length).collect();
    assert_eq!(lengths, vec![300.0, 200.0, 300.0, 200.0]);
    assert_eq!(edges[0].angle, 0.0);
    assert!((edges[1].angle - 90.0).abs() < 1e-9);
    assert_eq!((edges[3].start_label, edges[3].end_label), (4, 1));
    assert_eq!(edges[2].side_label(), "Side 3");
}

#[test]
fn test_set_edge_length_moves_end_vertex() {
    let mut doc = rectangle();
    set_edge_length(&mut doc, 0, 0, 450.0).unwrap();
    assert_eq!(doc.shapes[0].point(0), Some(Point::new(0.0, 0.0)));
    assert_eq!(doc.shapes[0].point(1), Some(Point::new(450.0, 0.0)));

    // Closing edge wraps to vertex 0.
    set_edge_length(&mut doc, 0, 3, 100.0).unwrap();
    assert_eq!(doc.shapes[0].point(0), Some(Point::new(0.0, 100.0)));
}

#[test]
fn test_zero_length_edge_cannot_be_resized() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    let mut doc = ShapeDocument::with_shape(
        Shape::from_points(&mut IdAllocator::new(), "plate", &pts, true).unwrap(),
    );
    assert_eq!(
        set_edge_length(&mut doc, 0, 0, 5.0),
        Err(EditError::DegenerateEdge { index: 0 })
    );
}

#[test]
fn test_non_positive_values_rejected() {
    let mut doc = rectangle();
    let before = doc.clone();
    assert!(matches!(
        set_edge_length(&mut doc, 0, 0, 0.0),
        Err(EditError::NotApplicable { .. })
    ));
    assert!(matches!(
        set_overall_size(&mut doc, 0, Axis::Width, -5.0),
        Err(EditError::NotApplicable { .. })
    ));
    assert!(matches!(
        scale_shape(&mut doc, 0, f64::NAN),
        Err(EditError::NotApplicable { .. })
    ));
    assert_eq!(doc, before);
}

#[test]
fn test_overall_size_anchored_at_minimum() {
    let mut doc = rectangle();
    set_overall_size(&mut doc, 0, Axis::Width, 600.0).unwrap();
    set_overall_size(&mut doc, 0, Axis::Height, 100.0).unwrap();

    let size = overall_size(&doc.shapes[0]).unwrap();
    assert_eq!((size.width, size.height), (600.0, 100.0));
    assert_eq!(doc.shapes[0].point(0), Some(Point::new(0.0, 0.0)));
    assert_eq!(doc.shapes[0].point(2), Some(Point::new(600.0, 100.0)));
}

#[test]
fn test_scale_about_centre() {
    let mut doc = rectangle();
    scale_shape(&mut doc, 0, 0.5).unwrap();
    assert_eq!(doc.shapes[0].point(0), Some(Point::new(75.0, 50.0)));
    assert_eq!(doc.shapes[0].point(2), Some(Point::new(225.0, 150.0)));
    assert_eq!(doc.shapes[0].area(), 15_000.0);
}

#[test]
fn test_session_dimension_edits_are_undoable() {
    let mut session = EditorSession::default();
    session
        .load_template(&ShapeTemplate::new(
            1,
            "Rectangle",
            vec![[0.0, 0.0], [300.0, 0.0], [300.0, 200.0], [0.0, 200.0]],
            true,
        ))
        .unwrap();

    session.set_edge_length(0, 1, 250.0).unwrap();
    assert_eq!(session.edge_dimensions(0).unwrap()[1].length, 250.0);
    assert!(session.set_overall_size(0, Axis::Height, 0.0).is_err());

    session.undo();
    assert_eq!(session.edge_dimensions(0).unwrap()[1].length, 200.0);
    assert!(!session.can_undo());
}
