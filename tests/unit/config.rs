use super::*;

#[test]
fn empty_document_yields_page_defaults() {
    let cfg = PageConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PageConfig::default());
    assert_eq!(cfg.vapor.animation.wait_duration, 0.8);
    assert_eq!(cfg.vapor.font.size_px, 48.0);
    assert_eq!(cfg.globe.dot_spacing, 16.0);
    assert_eq!(cfg.globe.fetch_timeout_secs, None);
    assert!((cfg.globe.rotation_deg_per_sec() - 3.9).abs() < 1e-9);
}

#[test]
fn css_style_font_options_are_accepted() {
    let cfg = PageConfig::from_json_str(
        r#"{"vapor": {"font": {"size_px": "64px", "letter_spacing_em": "0.1em", "line_height": "1.2"},
            "direction": "right-to-left", "alignment": "center", "tag": "h1",
            "color": "rgba(255, 0, 0, 0.5)"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.vapor.font.size_px, 64.0);
    assert_eq!(cfg.vapor.font.letter_spacing_em, 0.1);
    assert_eq!(cfg.vapor.font.line_height, 1.2);
    assert_eq!(cfg.vapor.direction, Direction::RightToLeft);
    assert_eq!(cfg.vapor.alignment, Alignment::Center);
    assert_eq!(cfg.vapor.tag, Tag::H1);
    assert_eq!(cfg.vapor.color.a, 0.5);
}

#[test]
fn text_lists_accept_arrays_and_raw_json() {
    let cfg = PageConfig::from_json_str(r#"{"vapor": {"texts": ["A", "B"]}}"#).unwrap();
    assert_eq!(cfg.vapor.texts.normalized(), vec!["A", "B"]);

    let cfg = PageConfig::from_json_str(r#"{"vapor": {"texts": "[\"X\",\"Y\"]"}}"#).unwrap();
    assert_eq!(cfg.vapor.texts.normalized(), vec!["X", "Y"]);

    assert_eq!(TextList::from_raw("not json").normalized(), vec!["not json"]);
    assert_eq!(TextList::default().normalized(), vec![PLACEHOLDER_TEXT]);
    assert_eq!(TextList::from_raw("[]").normalized(), vec![PLACEHOLDER_TEXT]);
}

#[test]
fn invalid_values_are_validation_errors() {
    for doc in [
        r#"{"vapor": {"animation": {"wait_duration": -1}}}"#,
        r#"{"globe": {"dot_spacing": 0}}"#,
        r#"{"globe": {"land_url": "  "}}"#,
        r#"{"heading": {"density": 0}}"#,
    ] {
        let err = PageConfig::from_json_str(doc).unwrap_err();
        assert!(matches!(err, FxError::Validation(_)), "{doc}: {err}");
    }
    let err = PageConfig::from_json_str("[1,2").unwrap_err();
    assert!(matches!(err, FxError::Parse(_)));
}

#[test]
fn land_url_override_ignores_blank_values() {
    let mut g = GlobeConfig::default();
    g.apply_land_url_override(Some(" ".to_owned()));
    assert_eq!(g.land_url, DEFAULT_LAND_URL);
    g.apply_land_url_override(None);
    assert_eq!(g.land_url, DEFAULT_LAND_URL);
    g.apply_land_url_override(Some("http://localhost/land.json".to_owned()));
    assert_eq!(g.land_url, "http://localhost/land.json");
}
