use async_trait::async_trait;
use platekit_core::{
    CatalogMaterial, MaterialCatalog, MaterialId, MaterialVariant, ShapeTemplate, SubmissionError,
    VariantId,
};
use platekit_designer::{
    EditorSession, JsonDirectorySink, MaterialSelection, OrderId, OrderSink, OrderSubmission, Point,
};
use tempfile::TempDir;

struct UnavailableSink;

#[async_trait]
impl OrderSink for UnavailableSink {
    async fn submit(&self, _order: &OrderSubmission) -> Result<OrderId, SubmissionError> {
        Err(SubmissionError::Transport("connection refused".to_string()))
    }
}

fn catalog() -> MaterialCatalog {
    MaterialCatalog::new(vec![CatalogMaterial {
        id: MaterialId(1),
        name: "Granite".to_string(),
        variants: vec![MaterialVariant {
            id: VariantId(10),
            name: "20mm".to_string(),
            price: 60.0,
            is_active: true,
        }],
    }])
}

fn ready_session() -> EditorSession {
    let mut session = EditorSession::default();
    session
        .load_template(&ShapeTemplate::new(
            1,
            "Rectangle",
            vec![[0.0, 0.0], [1000.0, 0.0], [1000.0, 500.0], [0.0, 500.0]],
            true,
        ))
        .unwrap();
    session.add_hole(Point::new(100.0, 100.0)).unwrap();
    session.add_hole(Point::new(900.0, 400.0)).unwrap();
    session.set_selection(MaterialSelection::new(MaterialId(1), VariantId(10), "white"));
    session
}

#[test]
fn test_build_order_payload() {
    let order = ready_session().build_order(&catalog()).unwrap();
    let payload = &order.payload;
    assert_eq!(payload.total_area, 0.5);
    assert_eq!(payload.total_perimeter, 3.0);
    assert_eq!(payload.total_drilling_holes, 2);
    assert_eq!(payload.total_price, 30.0 + 6.0);
    assert_eq!(payload.shape_points[0][1], [1000.0, 0.0]);
    assert_eq!(payload.corner_settings[0].len(), 4);
    assert_eq!(payload.unit, "mm");

    let json = serde_json::to_value(payload).unwrap();
    assert_eq!(json["totalDrillingHoles"], 2);
    assert_eq!(json["cornerSettings"][0][0]["type"], "sharp");
    assert!(order.preview_png.is_some());
}

#[tokio::test]
async fn test_directory_sink_writes_order() {
    let dir = TempDir::new().unwrap();
    let sink = JsonDirectorySink::new(dir.path());
    let session = ready_session();

    let id = session.submit_order(&sink, &catalog()).await.unwrap();
    let written = std::fs::read_to_string(sink.order_path(&id)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["material"], 1);
    assert_eq!(json["color"], "white");
    assert!(dir.path().join(format!("order-{}.png", id)).exists());
}

#[tokio::test]
async fn test_invalid_order_never_reaches_sink() {
    let dir = TempDir::new().unwrap();
    let sink = JsonDirectorySink::new(dir.path());
    let mut session = ready_session();
    session.set_selection(MaterialSelection::default());

    match session.submit_order(&sink, &catalog()).await {
        Err(SubmissionError::InvalidOrder { issues }) => assert_eq!(issues.len(), 3),
        other => panic!("expected InvalidOrder, got {:?}", other),
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_failed_submission_leaves_session_unchanged() {
    let session = ready_session();
    let before = session.document().clone();

    let err = session
        .submit_order(&UnavailableSink, &catalog())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Transport(_)));
    assert_eq!(session.document(), &before);
    assert_eq!(session.history().len(), 3);
}

#[tokio::test]
async fn test_missing_directory_is_a_transport_error() {
    let dir = TempDir::new().unwrap();
    let sink = JsonDirectorySink::new(dir.path().join("missing"));
    let err = ready_session()
        .submit_order(&sink, &catalog())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Transport(_)));
}
