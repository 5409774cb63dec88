use super::*;

fn limits() -> EffectLimits {
    EffectLimits {
        max_bursts: 6,
        burst_cooldown: 0.9,
        max_routes: 8,
        route_cooldown: 1.4,
    }
}

fn dots() -> Vec<Dot> {
    (0..40)
        .map(|i| Dot {
            lng: -170.0 + f64::from(i) * 8.0,
            lat: f64::from(i % 7) * 5.0,
            phase: 0.0,
        })
        .collect()
}

#[test]
fn star_count_is_bounded() {
    assert_eq!(star_count(100.0, 100.0), 100);
    assert_eq!(star_count(900.0, 900.0), 150);
    assert_eq!(star_count(4000.0, 4000.0), 160);

    let mut rng = Rng64::new(3);
    let stars = spawn_stars(&mut rng, 900.0, 900.0);
    assert_eq!(stars.len(), 150);
    for s in &stars {
        assert!((0.6..2.4).contains(&s.radius));
        assert!((0.35..1.0).contains(&s.alpha));
        let tw = s.twinkle(12.3);
        assert!((0.5..=1.0).contains(&tw));
    }
}

#[test]
fn populations_never_exceed_caps() {
    let mut fx = Effects::new(limits());
    let mut rng = Rng64::new(11);
    let dots = dots();
    for frame in 0..30_000u32 {
        let t = f64::from(frame) / 30.0;
        fx.update_bursts(t, &dots, &mut rng);
        fx.update_routes(t, &dots, &mut rng);
        assert!(fx.bursts().len() <= 6, "bursts at {t}");
        assert!(fx.routes().len() <= 8, "routes at {t}");
    }
}

#[test]
fn cooldowns_gate_spawning() {
    let mut fx = Effects::new(limits());
    let mut rng = Rng64::new(1);
    let dots = dots();

    fx.update_bursts(0.5, &dots, &mut rng);
    assert!(fx.bursts().is_empty());
    fx.update_bursts(0.95, &dots, &mut rng);
    assert_eq!(fx.bursts().len(), 1);
    fx.update_bursts(1.5, &dots, &mut rng);
    assert_eq!(fx.bursts().len(), 1);

    fx.update_routes(1.4, &dots, &mut rng);
    assert!(fx.routes().is_empty());
    fx.update_routes(1.45, &dots, &mut rng);
    assert_eq!(fx.routes().len(), 1);
    let r = fx.routes()[0];
    assert!((10.0..16.0).contains(&r.life));
    assert!((0.18..0.34).contains(&r.speed));
}

#[test]
fn bursts_expire_after_their_life() {
    let mut fx = Effects::new(limits());
    let mut rng = Rng64::new(5);
    let dots = dots();
    fx.update_bursts(1.0, &dots, &mut rng);
    let b = fx.bursts()[0];
    assert!((0.0..300.0).contains(&b.hue));
    assert!((26.0..38.0).contains(&b.speed));

    fx.update_bursts(1.0 + b.life, &dots, &mut rng);
    assert!(fx.bursts().contains(&b));
    fx.update_bursts(1.0 + b.life + 0.01, &dots, &mut rng);
    assert!(!fx.bursts().contains(&b));
    assert!((b.progress(1.0 + b.life * 0.5) - 0.5).abs() < 1e-9);
    assert_eq!(b.progress(0.0), 0.0);
}

#[test]
fn nothing_spawns_without_dots() {
    let mut fx = Effects::new(limits());
    let mut rng = Rng64::new(9);
    for i in 0..100 {
        let t = f64::from(i);
        fx.update_bursts(t, &[], &mut rng);
        fx.update_routes(t, &[], &mut rng);
    }
    assert!(fx.bursts().is_empty());
    assert!(fx.routes().is_empty());
}
