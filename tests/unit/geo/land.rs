use super::*;

const DOC: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
      "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]], [[4,4],[6,4],[6,6],[4,6],[4,4]]]}},
    {"type": "Feature", "properties": null, "geometry": {"type": "MultiPolygon",
      "coordinates": [[[[20,0,5],[30,0,5],[30,10,5],[20,0,5]]], [[[40,0],[50,0],[50,10],[40,0]]]]}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}},
    {"type": "Feature", "geometry": null}
  ]
}"#;

#[test]
fn polygons_and_multipolygons_are_kept_others_skipped() {
    let land = LandCollection::from_json_slice(DOC.as_bytes()).unwrap();
    assert_eq!(land.features.len(), 2);
    assert_eq!(land.features[0].polygons.len(), 1);
    assert_eq!(land.features[0].polygons[0].holes().len(), 1);
    assert_eq!(land.features[1].polygons.len(), 2);
}

#[test]
fn extra_ordinates_are_dropped() {
    let land = LandCollection::from_json_slice(DOC.as_bytes()).unwrap();
    assert_eq!(land.features[1].polygons[0].outer()[1], [30.0, 0.0]);
}

#[test]
fn malformed_documents_are_parse_errors() {
    for bad in [
        "not json",
        r#"{"type":"FeatureCollection"}"#,
        r#"{"features":[{"geometry":{"type":"Polygon","coordinates":[[[1]]]}}]}"#,
    ] {
        let err = LandCollection::from_json_slice(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, FxError::Parse(_)), "{bad}: {err}");
    }
}

#[test]
fn missing_file_is_reported() {
    let err = LandCollection::load_file(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("read land data"));
}
