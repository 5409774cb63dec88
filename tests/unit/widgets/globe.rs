use super::*;
use crate::foundation::core::Point;
use crate::foundation::error::FxError;
use crate::geo::land::{LandFeature, LandPolygon};

fn square(lng: f64, lat: f64, half: f64) -> LandFeature {
    LandFeature {
        polygons: vec![LandPolygon {
            rings: vec![vec![
                [lng - half, lat - half],
                [lng + half, lat - half],
                [lng + half, lat + half],
                [lng - half, lat + half],
                [lng - half, lat - half],
            ]],
        }],
    }
}

fn land() -> LandCollection {
    LandCollection {
        features: vec![square(-54.0, -14.0, 10.0), square(10.0, 45.0, 8.0)],
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn ready_globe() -> GlobeWidget {
    let mut g = GlobeWidget::new(GlobeConfig::default());
    g.resize(Layout::full(1200.0, 800.0, 1.0));
    g.receive(WidgetMessage::LandData(Ok(land())));
    g
}

#[test]
fn surface_is_the_smallest_side() {
    let mut g = GlobeWidget::new(GlobeConfig::default());
    g.resize(Layout::full(1200.0, 700.0, 2.0));
    let size = g.surface().unwrap();
    assert_eq!((size.css_width, size.css_height), (700.0, 700.0));
    assert_eq!(size.device_px(), (1400, 1400));
    assert!((g.radius - 700.0 / 2.1).abs() < 1e-9);
}

#[test]
fn loading_draws_ocean_and_rim_only() {
    let mut g = GlobeWidget::new(GlobeConfig::default());
    g.resize(Layout::full(900.0, 900.0, 1.0));
    let plan = g.tick(ms(0)).unwrap();
    assert_eq!(plan.layers.len(), 2);
    assert!(g.stars().is_empty());
    assert_eq!(g.view().hint.as_deref(), Some(DRAG_HINT));
}

#[test]
fn ready_globe_samples_dots_and_stars() {
    let mut g = ready_globe();
    assert!(matches!(g.load_state(), LoadState::Ready { .. }));
    assert!(!g.dots().is_empty());
    assert_eq!(g.stars().len(), 133);

    let plan = g.tick(ms(0)).unwrap();
    assert!(plan.layers.len() >= 5);
    assert!(plan.op_count() > g.stars().len());
}

#[test]
fn frames_are_throttled() {
    let mut g = ready_globe();
    assert!(g.tick(ms(0)).is_some());
    assert!(g.tick(ms(20)).is_none());
    assert!(g.tick(ms(34)).is_some());
}

#[test]
fn failed_load_shows_message_and_stops_drawing() {
    let mut g = GlobeWidget::new(GlobeConfig::default());
    g.resize(Layout::full(900.0, 900.0, 1.0));
    g.receive(WidgetMessage::LandData(Err(FxError::fetch("HTTP 500"))));
    assert_eq!(g.view().error_text(), Some(LOAD_FAILED_MESSAGE));
    for i in 0..10 {
        assert!(g.tick(ms(i * 100)).is_none());
    }
    assert_eq!(
        g.handle_input(&InputEvent::Wheel { delta_y: 1.0 }, ms(0)),
        EventDisposition::Ignored
    );
}

#[test]
fn land_after_teardown_is_dropped() {
    let mut g = GlobeWidget::new(GlobeConfig::default());
    g.resize(Layout::full(900.0, 900.0, 1.0));
    g.teardown();
    g.receive(WidgetMessage::LandData(Ok(land())));
    assert!(matches!(g.load_state(), LoadState::Loading));
    assert!(g.tick(ms(0)).is_none());
}

#[test]
fn wheel_is_suppressed() {
    let mut g = ready_globe();
    assert_eq!(
        g.handle_input(&InputEvent::Wheel { delta_y: -3.0 }, ms(0)),
        EventDisposition::PreventDefault
    );
}

#[test]
fn drag_overrides_auto_rotation() {
    let mut g = ready_globe();
    g.tick(ms(0));
    g.handle_input(&InputEvent::PointerDown { pos: Point::new(100.0, 100.0) }, ms(10));
    assert_eq!(
        g.handle_input(&InputEvent::PointerMove { pos: Point::new(110.0, 100.0) }, ms(20)),
        EventDisposition::Handled
    );
    assert_eq!(g.rotation().rotation()[0], 64.0);
    g.tick(ms(500));
    assert_eq!(g.rotation().rotation()[0], 64.0);

    g.handle_input(&InputEvent::PointerUp { pos: Point::new(110.0, 100.0) }, ms(600));
    g.tick(ms(1400));
    assert_eq!(g.rotation().mode(), RotationMode::Auto);
    g.tick(ms(2400));
    assert!(g.rotation().rotation()[0] > 64.0);
}

#[test]
fn effect_populations_respect_caps_over_a_long_run() {
    let mut g = ready_globe();
    for frame in 0..2000u64 {
        g.tick(ms(frame * 34));
        assert!(g.effects().bursts().len() <= 6);
        assert!(g.effects().routes().len() <= 8);
        let l = g.rotation().rotation()[0];
        assert!(l > -180.0 && l <= 180.0);
    }
}
