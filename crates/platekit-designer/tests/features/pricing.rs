use platekit_core::{CatalogMaterial, MaterialCatalog, MaterialId, MaterialVariant, VariantId};
use platekit_designer::{
    calculate_price, CornerSetting, IdAllocator, MaterialSelection, Point, PriceInputs, Shape,
    ShapeDocument,
};
use platekit_settings::PricingSettings;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn catalog() -> MaterialCatalog {
    MaterialCatalog::new(vec![CatalogMaterial {
        id: MaterialId(1),
        name: "Granite".to_string(),
        variants: vec![
            MaterialVariant {
                id: VariantId(10),
                name: "20mm".to_string(),
                price: 60.0,
                is_active: true,
            },
            MaterialVariant {
                id: VariantId(11),
                name: "30mm".to_string(),
                price: 80.0,
                is_active: false,
            },
        ],
    }])
}

fn rectangle(width: f64, height: f64) -> ShapeDocument {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ];
    ShapeDocument::with_shape(Shape::from_points(&mut IdAllocator::new(), "plate", &pts, true).unwrap())
}

#[test]
fn test_base_price_above_minimum() {
    let inputs = PriceInputs {
        area: 12.0,
        rate: 60.0,
        material_name: Some("Granite".to_string()),
        ..Default::default()
    };
    let breakdown = calculate_price(&inputs, &PricingSettings::default());
    assert_eq!(breakdown.subtotal, 720.0);
    assert_eq!(breakdown.final_total, 720.0);
    assert!(!breakdown.minimum_applied);
    assert_eq!(breakdown.lines[0].label, "Base Material (Granite)");
}

#[test]
fn test_minimum_order_price_floor() {
    let inputs = PriceInputs {
        area: 0.1,
        rate: 60.0,
        ..Default::default()
    };
    let breakdown = calculate_price(&inputs, &PricingSettings::default());
    assert!(approx(breakdown.subtotal, 6.0));
    assert_eq!(breakdown.final_total, 10.0);
    assert!(breakdown.minimum_applied);
}

#[test]
fn test_adjustments_apply_in_order() {
    let inputs = PriceInputs {
        area: 1.0,
        rate: 100.0,
        material_name: Some("Granite".to_string()),
        thickness_name: Some("20mm".to_string()),
        color: Some("black".to_string()),
        vertex_count: 8,
        rounded_corners: 2,
        drilling_holes: 3,
        ..Default::default()
    };
    let breakdown = calculate_price(&inputs, &PricingSettings::default());

    let labels: Vec<&str> = breakdown.lines.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Base Material (Granite)",
            "Thickness (20mm)",
            "Color Premium (black)",
            "Complex Shape",
            "Rounded Corners",
            "Drilling Holes",
        ]
    );
    assert_eq!(breakdown.lines[1].amount, 0.0);
    assert!(approx(breakdown.lines[2].amount, 10.0));
    // Complex surcharge is taken on the colour-adjusted subtotal.
    assert!(approx(breakdown.lines[3].amount, 22.0));
    assert_eq!(breakdown.lines[4].amount, 10.0);
    assert_eq!(breakdown.lines[5].amount, 9.0);
    assert!(approx(breakdown.final_total, 151.0));
}

#[test]
fn test_threshold_vertex_count_is_not_complex() {
    let inputs = PriceInputs {
        area: 1.0,
        rate: 100.0,
        vertex_count: 6,
        ..Default::default()
    };
    let breakdown = calculate_price(&inputs, &PricingSettings::default());
    assert_eq!(breakdown.final_total, 100.0);
}

#[test]
fn test_special_color_surcharge() {
    let inputs = PriceInputs {
        area: 1.0,
        rate: 100.0,
        special_color: true,
        ..Default::default()
    };
    let breakdown = calculate_price(&inputs, &PricingSettings::default());
    assert_eq!(breakdown.lines.last().unwrap().label, "Special Color");
    assert_eq!(breakdown.final_total, 150.0);
}

#[test]
fn test_inputs_from_document() {
    let mut doc = rectangle(1000.0, 500.0);
    doc.set_corner(0, 0, CornerSetting::rounded(5.0)).unwrap();
    doc.add_hole(100.0, 100.0, 6.0).unwrap();
    let selection = MaterialSelection::new(MaterialId(1), VariantId(10), "white");

    let inputs =
        PriceInputs::from_document(&doc, &selection, &catalog(), &PricingSettings::default()).unwrap();
    assert!(approx(inputs.area, 0.5));
    assert_eq!(inputs.rate, 60.0);
    assert_eq!(inputs.thickness_name.as_deref(), Some("20mm"));
    assert_eq!(inputs.vertex_count, 4);
    assert_eq!(inputs.rounded_corners, 1);
    assert_eq!(inputs.drilling_holes, 1);

    let breakdown = calculate_price(&inputs, &PricingSettings::default());
    assert!(approx(breakdown.final_total, 30.0 + 5.0 + 3.0));
}

#[test]
fn test_partial_selection_prices_at_zero_rate() {
    let doc = rectangle(1000.0, 500.0);
    let selection = MaterialSelection {
        material: Some(MaterialId(1)),
        ..Default::default()
    };
    let inputs =
        PriceInputs::from_document(&doc, &selection, &catalog(), &PricingSettings::default()).unwrap();
    assert_eq!(inputs.rate, 0.0);
    assert_eq!(inputs.material_name.as_deref(), Some("Granite"));
}

#[test]
fn test_inactive_or_unknown_variant_is_an_error() {
    let doc = rectangle(100.0, 100.0);
    let rules = PricingSettings::default();
    let inactive = MaterialSelection::new(MaterialId(1), VariantId(11), "white");
    assert!(PriceInputs::from_document(&doc, &inactive, &catalog(), &rules).is_err());
    let unknown = MaterialSelection::new(MaterialId(9), VariantId(10), "white");
    assert!(PriceInputs::from_document(&doc, &unknown, &catalog(), &rules).is_err());
}

#[test]
fn test_hidden_shapes_add_no_surcharges() {
    let mut ids = IdAllocator::new();
    let octagon: Vec<Point> = (0..8)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / 4.0;
            Point::new(2000.0 + 100.0 * a.cos(), 100.0 * a.sin())
        })
        .collect();
    let mut hidden = Shape::from_points(&mut ids, "offcut", &octagon, true).unwrap();
    hidden.visible = false;

    let mut doc = ShapeDocument::with_shape(hidden);
    doc.set_all_corners(0, CornerSetting::rounded(5.0)).unwrap();
    let plate = [
        Point::new(0.0, 0.0),
        Point::new(1000.0, 0.0),
        Point::new(1000.0, 500.0),
        Point::new(0.0, 500.0),
    ];
    doc.add_shape(Shape::from_points(&mut ids, "plate", &plate, true).unwrap());

    let selection = MaterialSelection::new(MaterialId(1), VariantId(10), "white");
    let inputs =
        PriceInputs::from_document(&doc, &selection, &catalog(), &PricingSettings::default()).unwrap();
    assert!(approx(inputs.area, 0.5));
    assert_eq!(inputs.vertex_count, 4);
    assert_eq!(inputs.rounded_corners, 0);
}
