use super::*;

#[test]
fn display_name_prefers_names_then_email() {
    let me = UserProfile {
        id: 1,
        email: "ops@blaze.app".to_owned(),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Obame".to_owned()),
        user_type: Some("manager_staff".to_owned()),
    };
    assert_eq!(me.display_name(), "Ada Obame");

    let bare = UserProfile {
        id: 2,
        email: "bare@blaze.app".to_owned(),
        first_name: None,
        last_name: None,
        user_type: None,
    };
    assert_eq!(bare.display_name(), "bare@blaze.app");
}

#[test]
fn role_helpers_gate_on_user_type() {
    let mut me = UserProfile {
        id: 1,
        email: "x@blaze.app".to_owned(),
        first_name: None,
        last_name: None,
        user_type: Some("manager_staff".to_owned()),
    };
    assert!(me.is_manager());
    assert!(!me.is_employee());
    assert!(me.is_staff());

    me.user_type = Some("employee_staff".to_owned());
    assert!(me.is_employee());
    assert!(me.is_staff());

    me.user_type = Some("driver".to_owned());
    assert!(!me.is_staff());

    me.user_type = None;
    assert!(!me.is_staff());
}

#[test]
fn lenient_f64_accepts_strings_and_numbers() {
    let row: Rental = serde_json::from_value(serde_json::json!({
        "id": 1, "vehicle": 2, "user": 3,
        "start_date": "2026-08-01", "end_date": "2026-08-03",
        "status": "confirmed",
        "total_amount": "15000.50"
    }))
    .expect("rental");
    assert_eq!(row.total_amount, Some(15000.50));

    let row: Rental = serde_json::from_value(serde_json::json!({
        "id": 1, "vehicle": 2, "user": 3,
        "start_date": "2026-08-01", "end_date": "2026-08-03",
        "status": "confirmed",
        "total_amount": 9000
    }))
    .expect("rental");
    assert_eq!(row.total_amount, Some(9000.0));

    let row: Rental = serde_json::from_value(serde_json::json!({
        "id": 1, "vehicle": 2, "user": 3,
        "start_date": "2026-08-01", "end_date": "2026-08-03",
        "status": "confirmed"
    }))
    .expect("rental");
    assert_eq!(row.total_amount, None);
}

#[test]
fn rows_from_value_accepts_arrays_and_paginated_envelopes() {
    let plain = serde_json::json!([{"id": 1, "first_name": "A", "last_name": "B",
        "email": "a@b.c", "user_type": "manager_staff"}]);
    let rows: Vec<UserRow> = rows_from_value(plain).expect("plain rows");
    assert_eq!(rows.len(), 1);

    let paginated = serde_json::json!({"count": 1, "next": null, "results": [
        {"id": 1, "first_name": "A", "last_name": "B", "email": "a@b.c", "user_type": "staff"}]});
    let rows: Vec<UserRow> = rows_from_value(paginated).expect("paginated rows");
    assert_eq!(rows.len(), 1);
}

#[test]
fn rows_from_value_rejects_other_shapes() {
    assert!(rows_from_value::<UserRow>(serde_json::json!({"detail": "nope"})).is_err());
    assert!(rows_from_value::<UserRow>(serde_json::json!("text")).is_err());
}

#[test]
fn summary_tolerates_missing_fields() {
    let summary: Summary = serde_json::from_value(serde_json::json!({"rides_live": 4})).expect("summary");
    assert_eq!(summary.rides_live, 4);
    assert_eq!(summary.tickets_open, 0);
}

#[test]
fn live_row_maps_renamed_fields() {
    let row: LiveRow = serde_json::from_value(serde_json::json!({
        "id": 10, "type": "ride", "status": "picked_up", "city": "Libreville",
        "amount": "2500", "updatedAt": "2026-08-30T10:00:00Z"
    }))
    .expect("live row");
    assert_eq!(row.kind, "ride");
    assert_eq!(row.amount, Some(2500.0));
    assert_eq!(row.updated_at, "2026-08-30T10:00:00Z");
}
