use super::*;

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = Rng64::new(7);
    let mut b = Rng64::new(7);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_ranges_stay_in_bounds() {
    let mut rng = Rng64::new(42);
    for _ in 0..1000 {
        let v = rng.range(0.35, 1.0);
        assert!((0.35..1.0).contains(&v));
        let i = rng.index(5).unwrap();
        assert!(i < 5);
    }
    assert_eq!(rng.index(0), None);
}

#[test]
fn wrap_degrees_stays_in_half_open_range() {
    assert_eq!(wrap_degrees(180.0), 180.0);
    assert_eq!(wrap_degrees(-180.0), 180.0);
    assert_eq!(wrap_degrees(190.0), -170.0);
    assert_eq!(wrap_degrees(-190.0), 170.0);
    assert_eq!(wrap_degrees(720.0), 0.0);
    for i in -2000..2000 {
        let w = wrap_degrees(i as f64 * 0.37);
        assert!(w > -180.0 && w <= 180.0, "{w}");
    }
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(add_sat_u8(200, 100), 255);
}
