use super::*;
use serde_json::json;

fn profile_from(value: Value) -> Profile {
    serde_json::from_value(value).unwrap()
}

#[test]
fn profile_reads_camel_case_flags_and_keeps_unknown_fields() {
    let profile = profile_from(json!({
        "_id": "u1",
        "name": "Rahim",
        "phone": "01712345678",
        "isBanned": false,
        "isActive": true,
        "role": "student",
        "points": 120
    }));

    assert_eq!(profile.id, "u1");
    assert_eq!(profile.email, None);
    assert_eq!(profile.extra.get("role"), Some(&json!("student")));
    assert_eq!(profile.extra.get("points"), Some(&json!(120)));

    let back = serde_json::to_value(&profile).unwrap();
    assert_eq!(back["id"], "u1");
    assert_eq!(back["isBanned"], false);
    assert_eq!(back["role"], "student");
}

#[test]
fn missing_flags_default_to_active_standing() {
    let profile = profile_from(json!({ "id": "u1" }));
    assert!(!profile.is_banned);
    assert!(profile.is_active);
    assert_eq!(profile.status(), AccountStatus::Active);
}

#[test]
fn status_prefers_ban_and_carries_reason() {
    let profile = profile_from(json!({
        "id": "u1",
        "isBanned": true,
        "isActive": false,
        "banReason": "Payment fraud"
    }));
    assert_eq!(profile.status(), AccountStatus::Banned { reason: Some("Payment fraud".to_owned()) });
}

#[test]
fn status_reports_inactive() {
    let profile = profile_from(json!({ "id": "u1", "isActive": false }));
    assert_eq!(profile.status(), AccountStatus::Inactive);
}

#[test]
fn merged_overwrites_only_patched_keys() {
    let cached = profile_from(json!({ "id": "u1", "name": "Old", "phone": "x", "city": "Dhaka" }));
    let patch = json!({ "name": "New" });

    let merged = cached.merged(patch.as_object().unwrap()).unwrap();
    assert_eq!(merged.name, "New");
    assert_eq!(merged.phone, "x");
    assert_eq!(merged.extra.get("city"), Some(&json!("Dhaka")));
}

#[test]
fn merged_maps_underscore_id_and_adds_new_fields() {
    let cached = profile_from(json!({ "id": "u1", "name": "A" }));
    let patch = json!({ "_id": "u1", "photo": "https://cdn.test/a.png" });

    let merged = cached.merged(patch.as_object().unwrap()).unwrap();
    assert_eq!(merged.id, "u1");
    assert_eq!(merged.extra.get("photo"), Some(&json!("https://cdn.test/a.png")));
    assert!(!merged.extra.contains_key("_id"));
}

#[test]
fn merged_rejects_ill_typed_patch() {
    let cached = profile_from(json!({ "id": "u1" }));
    let patch = json!({ "isBanned": "yes" });
    assert!(cached.merged(patch.as_object().unwrap()).is_err());
}

#[test]
fn account_flags_read_partial_user_objects() {
    let flags: AccountFlags = serde_json::from_value(json!({ "isBanned": true })).unwrap();
    assert_eq!(flags.status(), AccountStatus::Banned { reason: None });

    let flags: AccountFlags = serde_json::from_value(json!({ "isActive": false })).unwrap();
    assert_eq!(flags.status(), AccountStatus::Inactive);

    let flags: AccountFlags = serde_json::from_value(json!({ "name": "x" })).unwrap();
    assert_eq!(flags.status(), AccountStatus::Active);
}

#[test]
fn register_request_omits_missing_email() {
    let req = RegisterRequest { name: "A".to_owned(), phone: "01712345678".to_owned(), email: None };
    assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "name": "A", "phone": "01712345678" }));
}

#[test]
fn account_flags_from_user_ignores_ill_typed_fields() {
    let flags = AccountFlags::from_user(&json!({ "isBanned": "yes", "isActive": false, "banReason": " " }));
    assert_eq!(flags.is_banned, None);
    assert_eq!(flags.ban_reason, None);
    assert_eq!(flags.status(), AccountStatus::Inactive);
}

#[test]
fn profile_accepts_both_id_keys_and_prefers_id() {
    let profile = profile_from(json!({ "_id": "mongo1", "id": "u1", "name": "Rahim" }));
    assert_eq!(profile.id, "u1");
    assert!(!profile.extra.contains_key("_id"));

    let profile = profile_from(json!({ "_id": "u1", "id": "" }));
    assert_eq!(profile.id, "u1");
}

#[test]
fn profile_requires_some_id() {
    let err = serde_json::from_value::<Profile>(json!({ "name": "Rahim" })).unwrap_err();
    assert!(err.to_string().contains("id"));
}

#[test]
fn null_fields_read_as_defaults() {
    let profile = profile_from(json!({
        "id": "u1",
        "name": null,
        "phone": null,
        "email": null,
        "isBanned": null,
        "isActive": null
    }));
    assert_eq!(profile.name, "");
    assert_eq!(profile.phone, "");
    assert_eq!(profile.email, None);
    assert_eq!(profile.status(), AccountStatus::Active);
}
