use super::*;

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Position> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]
}

fn donut() -> LandPolygon {
    LandPolygon {
        rings: vec![square(0.0, 0.0, 10.0, 10.0), square(4.0, 4.0, 6.0, 6.0)],
    }
}

#[test]
fn ring_membership_inside_and_outside() {
    let ring = square(0.0, 0.0, 10.0, 10.0);
    assert!(point_in_ring([5.0, 5.0], &ring));
    assert!(!point_in_ring([15.0, 5.0], &ring));
    assert!(!point_in_ring([5.0, -1.0], &ring));
    assert!(!point_in_ring([1.0, 1.0], &[]));
}

#[test]
fn holes_invert_membership() {
    let poly = donut();
    assert!(point_in_polygon([2.0, 2.0], &poly));
    assert!(!point_in_polygon([5.0, 5.0], &poly));
    assert!(!point_in_polygon([12.0, 5.0], &poly));
}

#[test]
fn multipolygon_is_union_of_members() {
    let feature = LandFeature {
        polygons: vec![
            donut(),
            LandPolygon {
                rings: vec![square(20.0, 0.0, 30.0, 10.0)],
            },
        ],
    };
    assert!(point_in_feature([25.0, 5.0], &feature));
    assert!(point_in_feature([1.0, 1.0], &feature));
    assert!(!point_in_feature([5.0, 5.0], &feature));
    assert!(!point_in_feature([15.0, 5.0], &feature));
}

#[test]
fn bounds_cover_every_ring() {
    let feature = LandFeature {
        polygons: vec![
            donut(),
            LandPolygon {
                rings: vec![square(-3.0, 2.0, 1.0, 12.0)],
            },
        ],
    };
    let b = GeoBounds::of(&feature).unwrap();
    assert_eq!(b.min, [-3.0, 0.0]);
    assert_eq!(b.max, [10.0, 12.0]);
    assert!(GeoBounds::of(&LandFeature { polygons: vec![] }).is_none());
}

#[test]
fn sampled_points_are_members_on_the_grid() {
    let feature = LandFeature {
        polygons: vec![donut()],
    };
    let pts = sample_feature(&feature, 12.5);
    assert!(!pts.is_empty());
    for p in &pts {
        assert!(point_in_feature(*p, &feature));
        let steps = p[0] / 1.0;
        assert!((steps - steps.round()).abs() < 1e-6);
    }
    assert!(!pts.contains(&[5.0, 5.0]));
}

#[test]
fn dot_sampling_is_deterministic_for_a_seed() {
    let land = LandCollection {
        features: vec![
            LandFeature {
                polygons: vec![donut()],
            },
            LandFeature {
                polygons: vec![LandPolygon {
                    rings: vec![square(20.0, 0.0, 30.0, 10.0)],
                }],
            },
        ],
    };
    let a = sample_dots(&land, 16.0, &mut Rng64::new(9));
    let b = sample_dots(&land, 16.0, &mut Rng64::new(9));
    assert_eq!(a, b);
    assert!(a.iter().all(|d| (0.0..std::f64::consts::TAU).contains(&d.phase)));
    assert!(a.iter().any(|d| d.lng >= 20.0));
}
