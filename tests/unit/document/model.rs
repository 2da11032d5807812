use super::*;
use serde_json::json;

#[test]
fn title_falls_back_when_missing_or_falsy() {
    assert_eq!(Document::from_value(json!({"title": "T"})).title(), "T");
    assert_eq!(Document::from_value(json!({})).title(), FALLBACK_TITLE);
    assert_eq!(Document::from_value(json!({"title": ""})).title(), FALLBACK_TITLE);
    assert_eq!(Document::from_value(json!([1, 2])).title(), FALLBACK_TITLE);
    assert_eq!(Document::from_value(json!({"title": 42})).title(), "42");
}

#[test]
fn items_require_an_array() {
    assert!(Document::from_value(json!({"foo": "bar"})).items().is_none());
    assert!(Document::from_value(json!({"data": {"a": 1}})).items().is_none());
    let empty = Document::from_value(json!({"data": []}));
    assert_eq!(empty.items().map(|v| v.len()), Some(0));
    assert_eq!(empty.max_item_value(), None);
}

#[test]
fn item_labels_serialize_value_or_whole_entry() {
    let doc = Document::from_value(json!({
        "data": [
            {"name": "A", "value": 10},
            {"value": {"k": [1, 2]}},
            {"name": "Z", "value": 0},
            "loose",
            {"name": "F", "value": 2.0}
        ]
    }));
    let labels: Vec<String> = doc.items().unwrap().iter().map(Item::label).collect();
    assert_eq!(labels[0], "A: 10");
    assert_eq!(labels[1], r#"Item: {"k":[1,2]}"#);
    assert_eq!(labels[2], r#"Z: {"name":"Z","value":0}"#);
    assert_eq!(labels[3], r#"Item: "loose""#);
    assert_eq!(labels[4], "F: 2");
}

#[test]
fn bar_values_skip_zero_and_non_numbers() {
    let doc = Document::from_value(json!({
        "data": [
            {"value": 10},
            {"value": 0},
            {"value": "12"},
            {"name": "missing"},
            {"value": -3.5}
        ]
    }));
    let bars: Vec<Option<f64>> = doc.items().unwrap().iter().map(Item::bar_value).collect();
    assert_eq!(bars, vec![Some(10.0), None, None, None, Some(-3.5)]);
}

#[test]
fn max_item_value_treats_non_numbers_as_zero() {
    let doc = Document::from_value(json!({
        "data": [{"value": "x"}, {"value": -4}, {}]
    }));
    assert_eq!(doc.max_item_value(), Some(0.0));

    let doc = Document::from_value(json!({
        "data": [{"value": 10}, {"value": 20}]
    }));
    assert_eq!(doc.max_item_value(), Some(20.0));
}

#[test]
fn parse_reports_position() {
    let err = Document::parse("{\"a\": }").unwrap_err();
    assert!(matches!(err, ReelError::Parse(_)));
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn nested_integral_floats_print_like_integers() {
    let doc = Document::from_value(json!({
        "data": [
            {"name": "F", "value": [2.0, 2.5]},
            {"name": "G", "value": {"n": 100.0}}
        ]
    }));
    let labels: Vec<String> = doc.items().unwrap().iter().map(Item::label).collect();
    assert_eq!(labels, vec!["F: [2,2.5]", r#"G: {"n":100}"#]);
}
