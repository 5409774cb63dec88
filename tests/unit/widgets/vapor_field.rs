use super::*;

#[test]
fn count_has_a_floor_of_eight() {
    assert_eq!(particle_count(4.0), 128);
    assert_eq!(particle_count(0.1), 8);
    assert_eq!(particle_count(0.0), 8);
    assert_eq!(particle_count(f64::NAN), 8);
}

#[test]
fn spawns_respect_direction_and_ranges() {
    let bounds = Rect::new(0.0, 0.0, 300.0, 60.0);
    let mut rng = Rng64::new(42);
    for _ in 0..500 {
        let p = spawn(&mut rng, bounds, Direction::LeftToRight, 5.0);
        assert_eq!(p.x, -10.0);
        assert!((0.0..=60.0).contains(&p.y));
        assert!(p.vx >= 0.4 * 5.0 && p.vx < 1.6 * 5.0);
        assert!(p.vy.abs() <= 0.75);
        assert!((200.0..400.0).contains(&p.life));
        assert!((0.15..0.40).contains(&p.alpha));
        assert!((1.5..4.0).contains(&p.radius));

        let q = spawn(&mut rng, bounds, Direction::RightToLeft, 5.0);
        assert_eq!(q.x, 310.0);
        assert!(q.vx < 0.0);
    }
}
