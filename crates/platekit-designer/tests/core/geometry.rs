use platekit_designer::geometry::{
    arc_points, distance, polygon_area, polygon_perimeter, point_in_polygon, vertex_centroid,
};
use platekit_designer::Point;
use proptest::prelude::*;

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]
}

fn regular_polygon(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let a = 2.0 * std::f64::consts::PI * i as f64 / sides as f64;
            Point::new(cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

#[test]
fn test_unit_square_area() {
    assert_eq!(polygon_area(&square()), 100.0);
}

#[test]
fn test_square_perimeter_open_and_closed() {
    assert_eq!(polygon_perimeter(&square(), true), 40.0);
    assert_eq!(polygon_perimeter(&square(), false), 30.0);
}

#[test]
fn test_zero_offset_arc_is_the_chord() {
    let p1 = Point::new(3.0, 4.0);
    let p2 = Point::new(40.0, -2.0);
    assert_eq!(arc_points(p1, p2, 0.0, 20), vec![p1, p2]);
}

#[test]
fn test_right_triangle_area() {
    let tri = vec![
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(0.0, 40.0),
    ];
    assert_eq!(polygon_area(&tri), 600.0);
    assert_eq!(polygon_perimeter(&tri, true), 120.0);
}

proptest! {
    #[test]
    fn prop_area_is_translation_invariant(
        dx in -1000.0f64..1000.0,
        dy in -1000.0f64..1000.0,
        sides in 3usize..12,
        radius in 1.0f64..500.0,
    ) {
        let poly = regular_polygon(0.0, 0.0, radius, sides);
        let moved: Vec<Point> = poly.iter().map(|p| p.offset(dx, dy)).collect();
        let a = polygon_area(&poly);
        let b = polygon_area(&moved);
        prop_assert!((a - b).abs() <= 1e-6 * a.max(1.0));
    }

    #[test]
    fn prop_centroid_inside_far_point_outside(
        cx in -500.0f64..500.0,
        cy in -500.0f64..500.0,
        radius in 1.0f64..300.0,
        sides in 3usize..16,
    ) {
        let poly = regular_polygon(cx, cy, radius, sides);
        let centroid = vertex_centroid(&poly).unwrap();
        prop_assert!(point_in_polygon(centroid, &poly));
        prop_assert!(!point_in_polygon(Point::new(cx + 10.0 * radius, cy - 10.0 * radius), &poly));
    }

    #[test]
    fn prop_arc_keeps_endpoints_and_stays_within_chord_circle(
        x in -200.0f64..200.0,
        y in -200.0f64..200.0,
        len in 10.0f64..300.0,
        offset in -200.0f64..200.0,
        segments in 1usize..32,
    ) {
        let p1 = Point::new(x, y);
        let p2 = Point::new(x + len, y);
        let arc = arc_points(p1, p2, offset, segments);
        prop_assert_eq!(arc[0], p1);
        prop_assert_eq!(*arc.last().unwrap(), p2);
        prop_assert!(arc.len() == 2 || arc.len() == segments + 1);

        // Clamped bulge below a semicircle: no point strays beyond half the chord.
        let mid = Point::new(x + len / 2.0, y);
        for p in &arc {
            prop_assert!(distance(*p, mid) <= len / 2.0 + 1e-6);
        }
    }
}
