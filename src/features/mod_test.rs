use super::*;
use serde_json::json;

#[test]
fn decode_list_accepts_bare_keyed_and_enveloped_arrays() {
    let bare: Vec<i64> = decode_list(&json!([1, 2]), "items").unwrap();
    let keyed: Vec<i64> = decode_list(&json!({ "items": [3] }), "items").unwrap();
    let data: Vec<i64> = decode_list(&json!({ "data": [4] }), "items").unwrap();
    let nested: Vec<i64> = decode_list(&json!({ "data": { "items": [5] } }), "items").unwrap();

    assert_eq!(bare, vec![1, 2]);
    assert_eq!(keyed, vec![3]);
    assert_eq!(data, vec![4]);
    assert_eq!(nested, vec![5]);
}

#[test]
fn decode_list_reports_missing_key() {
    let err = decode_list::<i64>(&json!({ "message": "ok" }), "items").unwrap_err();
    assert!(matches!(err, AuthError::Parse(_)));
}
