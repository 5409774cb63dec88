use super::*;
use serde_json::json;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba::parse_css("#ffffff").unwrap(), Rgba::WHITE);
    assert_eq!(Rgba::parse_css("#FFF").unwrap(), Rgba::WHITE);
    let c = Rgba::parse_css("#0000ff80").unwrap();
    assert!(close(c.b, 1.0));
    assert!(close(c.a, 128.0 / 255.0));
    assert!(Rgba::parse_css("#12345").is_err());
}

#[test]
fn parses_functional_forms() {
    let c = Rgba::parse_css("rgb(255,255,255)").unwrap();
    assert_eq!(c, Rgba::WHITE);

    let c = Rgba::parse_css("rgba(180, 236, 220, 0.35)").unwrap();
    assert!(close(c.r, 180.0 / 255.0));
    assert!(close(c.a, 0.35));

    let c = Rgba::parse_css("hsla(0, 100%, 50%, 0.5)").unwrap();
    assert!(close(c.r, 1.0));
    assert!(close(c.g, 0.0));
    assert!(close(c.a, 0.5));
}

#[test]
fn hue_wraps_modulo_360() {
    let a = Rgba::hsla(30.0, 0.8, 0.6, 1.0);
    let b = Rgba::hsla(390.0, 0.8, 0.6, 1.0);
    let c = Rgba::hsla(-330.0, 0.8, 0.6, 1.0);
    assert!(close(a.r, b.r) && close(a.g, b.g) && close(a.b, b.b));
    assert!(close(a.r, c.r) && close(a.g, c.g) && close(a.b, c.b));
}

#[test]
fn alpha_never_exceeds_one() {
    assert_eq!(Rgba::rgba(1.0, 1.0, 1.0, 3.0).a, 1.0);
    assert_eq!(Rgba::WHITE.mul_alpha(5.0).a, 1.0);
    assert_eq!(Rgba::WHITE.with_alpha(-1.0).a, 0.0);
    assert_eq!(Rgba::WHITE.with_alpha(f64::NAN).a, 0.0);
}

#[test]
fn unknown_color_falls_back_to_white() {
    assert_eq!(Rgba::parse_css_or_white("not-a-color"), Rgba::WHITE);
}

#[test]
fn deserializes_strings_objects_and_arrays() {
    let c: Rgba = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Rgba = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Rgba::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Rgba = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Rgba::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn mix_interpolates_channels() {
    let m = Rgba::TRANSPARENT.mix(Rgba::WHITE, 0.5);
    assert!(close(m.r, 0.5) && close(m.a, 0.5));
}
