use super::*;

fn still(x: f64, life: f64) -> Particle {
    Particle {
        x,
        y: 10.0,
        vx: 0.0,
        vy: 0.0,
        life,
        progress: 0.0,
        alpha: 0.4,
        radius: 2.0,
    }
}

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 100.0, 50.0)
}

#[test]
fn falloff_decreases_and_never_goes_negative() {
    let mut p = still(5.0, 4.0);
    assert_eq!(p.falloff(), 1.0);
    p.progress = 2.0;
    assert_eq!(p.falloff(), 0.5);
    p.progress = 9.0;
    assert_eq!(p.falloff(), 0.0);
    assert_eq!(p.visible_alpha(), 0.0);
}

#[test]
fn expired_particles_respawn_in_the_same_step() {
    let mut rng = Rng64::new(1);
    let mut pool = ParticlePool::populate(3, bounds(), &mut rng, |_, _| still(5.0, 2.0));
    let mut respawns = 0;
    for _ in 0..2 {
        pool.step(bounds(), 20.0, 0.016, &mut rng, |_, _| {
            respawns += 1;
            still(50.0, 100.0)
        });
    }
    assert_eq!(respawns, 3);
    assert_eq!(pool.len(), 3);
    for p in pool.particles() {
        assert_eq!(p.x, 50.0);
        assert_eq!(p.progress, 0.0);
    }
}

#[test]
fn particles_leaving_the_margin_are_replaced() {
    let mut rng = Rng64::new(2);
    let mut pool = ParticlePool::populate(1, bounds(), &mut rng, |_, _| Particle {
        vx: 2000.0,
        ..still(110.0, 1000.0)
    });
    pool.step(bounds(), 20.0, 0.016, &mut rng, |_, _| still(-10.0, 1000.0));
    assert_eq!(pool.particles()[0].x, -10.0);
}

#[test]
fn motion_is_velocity_times_dt() {
    let mut rng = Rng64::new(3);
    let mut pool = ParticlePool::populate(1, bounds(), &mut rng, |_, _| Particle {
        vx: 100.0,
        vy: -50.0,
        ..still(10.0, 1000.0)
    });
    pool.step(bounds(), 20.0, 0.01, &mut rng, |_, _| still(0.0, 1.0));
    let p = pool.particles()[0];
    assert!((p.x - 11.0).abs() < 1e-9);
    assert!((p.y - 9.5).abs() < 1e-9);
    assert_eq!(p.progress, 1.0);
}
