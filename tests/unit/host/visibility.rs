use super::*;

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 800.0)
}

#[test]
fn starts_visible() {
    assert!(ViewportGate::default().is_visible());
}

#[test]
fn margin_keeps_nearby_elements_alive() {
    let mut gate = ViewportGate::default();
    assert!(!gate.observe(Rect::new(0.0, 950.0, 1000.0, 1050.0), viewport()));
    assert!(gate.is_visible());
    assert!(gate.observe(Rect::new(0.0, 1001.0, 1000.0, 1100.0), viewport()));
    assert!(!gate.is_visible());
}

#[test]
fn margin_applies_above_too() {
    let mut gate = ViewportGate::default();
    gate.observe(Rect::new(0.0, -300.0, 1000.0, -150.0), viewport());
    assert!(gate.is_visible());
    gate.observe(Rect::new(0.0, -500.0, 1000.0, -201.0), viewport());
    assert!(!gate.is_visible());
}

#[test]
fn no_horizontal_margin() {
    let mut gate = ViewportGate::default();
    gate.observe(Rect::new(1001.0, 0.0, 1200.0, 100.0), viewport());
    assert!(!gate.is_visible());
}
