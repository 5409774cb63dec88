use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn cycle(len: usize) -> VaporCycle {
    VaporCycle::new(
        len,
        CycleTimings {
            wait: ms(800),
            vaporize: ms(2000),
            fade_in: ms(1000),
        },
        Ease::Linear,
        Duration::ZERO,
    )
}

#[test]
fn phases_follow_configured_durations() {
    let mut c = cycle(2);
    let expect = [
        (0, VaporPhase::Hold, 0),
        (799, VaporPhase::Hold, 0),
        (800, VaporPhase::Vapor, 0),
        (2799, VaporPhase::Vapor, 0),
        (2800, VaporPhase::Fade, 1),
        (3799, VaporPhase::Fade, 1),
        (3800, VaporPhase::Hold, 1),
        (4600, VaporPhase::Vapor, 1),
        (6600, VaporPhase::Fade, 0),
    ];
    for (t, phase, index) in expect {
        c.advance(ms(t));
        assert_eq!((c.phase(), c.index()), (phase, index), "at {t} ms");
    }
}

#[test]
fn vapor_progress_is_monotonic_and_saturates() {
    let mut c = cycle(2);
    c.advance(ms(800));
    let mut prev = -1.0;
    for t in (800..2800).step_by(50) {
        let (_, clip) = c.frame(ms(t)).outgoing.unwrap();
        assert!(clip >= prev);
        assert!(clip <= 1.0);
        prev = clip;
    }
    assert!((c.progress(ms(2799)) - 0.9995).abs() < 1e-9);
}

#[test]
fn vapor_frame_shows_next_text_through() {
    let mut c = cycle(3);
    c.advance(ms(1800));
    let f = c.frame(ms(1800));
    assert_eq!(f.outgoing, Some((0, 0.5)));
    assert_eq!(f.incoming.0, 1);
    assert!((f.incoming.1 - (0.15 + 0.85 * 0.5)).abs() < 1e-12);
}

#[test]
fn fade_ramps_the_new_text_in() {
    let mut c = cycle(2);
    c.advance(ms(3300));
    let f = c.frame(ms(3300));
    assert_eq!(f.outgoing, None);
    assert_eq!(f.incoming.0, 1);
    assert!((f.incoming.1 - 0.5).abs() < 1e-12);
}

#[test]
fn one_late_frame_crosses_several_phases_without_drift() {
    let mut stepped = cycle(3);
    for t in (0..=20_000).step_by(16) {
        stepped.advance(ms(t));
    }
    let mut jumped = cycle(3);
    jumped.advance(ms(20_000));
    assert_eq!(stepped.phase(), jumped.phase());
    assert_eq!(stepped.index(), jumped.index());
    assert_eq!(stepped.progress(ms(20_000)), jumped.progress(ms(20_000)));
}

#[test]
fn single_text_cycles_onto_itself() {
    let mut c = cycle(1);
    c.advance(ms(1000));
    assert_eq!(c.frame(ms(1000)).incoming.0, 0);
    c.advance(ms(2800));
    assert_eq!(c.index(), 0);
}
