//! End-to-end tests for the shift earnings engine.
//!
//! This test suite covers:
//! - The documented calculation scenarios (Sunday shift, travel legs, vacation)
//! - Shift lifecycle through the HTTP API (create, edit, delete)
//! - Monthly and yearly reports
//! - Catalog edits and recomputation
//! - Persistence of every edit to the state file
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use shiftcash_engine::api::{AppState, create_router};
use shiftcash_engine::calculation::{
    AutoVariableContext, assign_auto_variables, compute_earnings, compute_excess_minutes,
    compute_hours, dcp_target_count,
};
use shiftcash_engine::config::{Catalog, ConfigLoader};
use shiftcash_engine::ledger::{Ledger, StateStore};
use shiftcash_engine::models::{ShiftCategory, ShiftType, ShiftVariable, VariableKind};

// =============================================================================
// Test Helpers
// =============================================================================

fn catalog() -> Catalog {
    ConfigLoader::load("./config/default")
        .expect("Failed to load config")
        .into_catalog()
}

fn create_router_for_test() -> Router {
    create_router(AppState::in_memory(Ledger::new(catalog())))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Results carry decimals as strings, saved shifts as numbers; compare by value.
fn as_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn shift_body(date: &str, start: &str, end: &str, shift_type_id: &str) -> Value {
    json!({
        "startDate": date,
        "startTime": start,
        "endTime": end,
        "shiftTypeId": shift_type_id,
    })
}

fn variable_ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Documented scenarios
// =============================================================================

#[test]
fn test_sunday_scenario_core_functions() {
    let hours = compute_hours("2024-01-07", "09:00", "2024-01-07", "17:30");
    assert_eq!(hours, decimal("8.5"));

    let excess = compute_excess_minutes("2024-01-07", "09:00", "2024-01-07", "17:30");
    assert_eq!(excess, decimal("37.50"));

    let shift_type = ShiftType {
        id: "t_regular".to_string(),
        name: "TURNO".to_string(),
        daily_rate: decimal("15"),
        color: String::new(),
    };
    let bonus = ShiftVariable {
        id: "v_bonus".to_string(),
        name: "PLUS".to_string(),
        kind: VariableKind::HourlyBonus,
        amount: decimal("2"),
    };
    let earnings = compute_earnings("2024-01-07", hours, &shift_type, &[&bonus], decimal("92.25"));
    assert_eq!(earnings, decimal("109.25"));
}

#[test]
fn test_ten_hour_excess_scenario() {
    assert_eq!(
        compute_excess_minutes("2024-01-08", "07:00", "2024-01-08", "17:00"),
        decimal("150.00")
    );
}

#[test]
fn test_travel_leg_scenarios() {
    let ida = AutoVariableContext {
        category: ShiftCategory::Ida,
        is_sunday: false,
        hours: decimal("8"),
        start_time: "10:00",
        real_end_time: "18:00",
    };
    assert_eq!(dcp_target_count(&ida), 2);

    let vuelta = AutoVariableContext {
        category: ShiftCategory::Vuelta,
        is_sunday: false,
        hours: decimal("8"),
        start_time: "13:30",
        real_end_time: "21:30",
    };
    assert_eq!(dcp_target_count(&vuelta), 2);
}

#[test]
fn test_vacation_clears_variables() {
    let ctx = AutoVariableContext {
        category: ShiftCategory::Vacaciones,
        is_sunday: true,
        hours: decimal("10"),
        start_time: "07:00",
        real_end_time: "17:00",
    };
    let current = vec!["v_de".to_string(), "v_dcp".to_string(), "v_sun".to_string()];
    assert!(assign_auto_variables(&current, &ctx).is_empty());
}

// =============================================================================
// Shift lifecycle
// =============================================================================

#[tokio::test]
async fn test_vacation_shift_saved_with_zero_earnings() {
    let router = create_router_for_test();
    let mut body = shift_body("2024-01-07", "07:00", "17:00", "t_vacaciones");
    body["variableIds"] = json!(["v_de", "v_dcp"]);

    let (status, shift) = send(&router, "POST", "/shifts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(variable_ids(&shift["variableIds"]).is_empty());
    assert_eq!(as_decimal(&shift["totalEarnings"]), Decimal::ZERO);
    assert_eq!(as_decimal(&shift["hoursWorked"]), decimal("10"));
}

#[tokio::test]
async fn test_ida_shift_gets_two_dcp() {
    let router = create_router_for_test();
    let (status, shift) = send(
        &router,
        "POST",
        "/shifts",
        Some(shift_body("2024-01-09", "10:00", "18:00", "t_ida")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(variable_ids(&shift["variableIds"]), vec!["v_dcp", "v_dcp"]);
    // 15 + 2 × 12.50
    assert_eq!(as_decimal(&shift["totalEarnings"]), decimal("40"));
}

#[tokio::test]
async fn test_overnight_vuelta_uses_real_end() {
    let router = create_router_for_test();
    let body = json!({
        "startDate": "2024-01-09",
        "startTime": "14:00",
        "endTime": "21:00",
        "realEndTime": "21:30",
        "shiftTypeId": "t_vuelta",
    });
    let (status, shift) = send(&router, "POST", "/shifts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(shift["realEndTime"], "21:30");
    assert_eq!(variable_ids(&shift["variableIds"]), vec!["v_dcp", "v_dcp"]);
    assert_eq!(as_decimal(&shift["hoursWorked"]), decimal("7.5"));
}

#[tokio::test]
async fn test_edit_and_delete_shift() {
    let router = create_router_for_test();
    let (_, created) = send(
        &router,
        "POST",
        "/shifts",
        Some(shift_body("2024-01-08", "09:00", "17:00", "t_turno")),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("shift_"));

    let (status, edited) = send(
        &router,
        "PUT",
        &format!("/shifts/{}", id),
        Some(shift_body("2024-01-08", "07:00", "17:00", "t_turno")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["id"], id.as_str());
    assert_eq!(as_decimal(&edited["excessMinutes"]), decimal("150"));
    assert_eq!(variable_ids(&edited["variableIds"]), vec!["v_tl2", "v_pi"]);

    let (_, shifts) = send(&router, "GET", "/shifts", None).await;
    assert_eq!(shifts.as_array().unwrap().len(), 1);

    let (status, _) = send(&router, "DELETE", &format!("/shifts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = send(&router, "GET", &format!("/shifts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "SHIFT_NOT_FOUND");
}

#[tokio::test]
async fn test_edit_unknown_shift_returns_404() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "PUT",
        "/shifts/shift_missing",
        Some(shift_body("2024-01-08", "09:00", "17:00", "t_turno")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "SHIFT_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_shift_type_returns_400() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "POST",
        "/shifts",
        Some(shift_body("2024-01-08", "09:00", "17:00", "t_unknown")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "SHIFT_TYPE_NOT_FOUND");
}

#[tokio::test]
async fn test_preview_without_shift_type_reconciles_variables() {
    let router = create_router_for_test();
    let body = json!({
        "startDate": "2024-01-07",
        "startTime": "07:00",
        "endTime": "17:00",
        "variableIds": ["v_tl1", "v_dcp"],
    });
    let (status, preview) = send(&router, "POST", "/preview", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(variable_ids(&preview["variable_ids"]), vec!["v_sun", "v_tl2", "v_pi"]);
    assert_eq!(as_decimal(&preview["earnings"]), Decimal::ZERO);
    assert_eq!(as_decimal(&preview["hours"]), decimal("10"));
    assert!(preview["category"].is_null());
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_monthly_report() {
    let router = create_router_for_test();
    for body in [
        shift_body("2024-03-03", "09:00", "17:30", "t_turno"),
        shift_body("2024-03-04", "09:00", "17:00", "t_libre"),
        shift_body("2024-03-05", "09:00", "17:00", "t_reserva"),
        shift_body("2024-04-01", "09:00", "17:00", "t_turno"),
    ] {
        let (status, _) = send(&router, "POST", "/shifts", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = send(&router, "GET", "/reports?year=2024&month=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["shift_count"], 3);
    // Sunday 92.25 + v_tl1 4.50, LIBRE 0, RESERVA 10
    assert_eq!(as_decimal(&report["total_earnings"]), decimal("106.75"));
    assert_eq!(as_decimal(&report["total_excess"]), decimal("37.5"));
    assert_eq!(report["libre_count"], 1);
    assert_eq!(report["reserva_count"], 1);
    assert_eq!(report["period"]["kind"], "month");

    let counts = report["variable_counts"].as_array().unwrap();
    let count_of = |id: &str| {
        counts
            .iter()
            .find(|c| c["id"] == id)
            .and_then(|c| c["count"].as_u64())
            .unwrap()
    };
    assert_eq!(count_of("v_exc"), 1);
    assert_eq!(count_of("v_sun"), 1);
    assert_eq!(count_of("v_tl1"), 1);
    assert_eq!(count_of("v_dcp"), 0);

    let (_, yearly) = send(&router, "GET", "/reports?year=2024", None).await;
    assert_eq!(yearly["shift_count"], 4);
}

#[tokio::test]
async fn test_report_requires_year() {
    let router = create_router_for_test();
    let (status, error) = send(&router, "GET", "/reports?month=3", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_edit_and_recompute() {
    let router = create_router_for_test();
    send(
        &router,
        "POST",
        "/shifts",
        Some(shift_body("2024-01-08", "09:00", "17:00", "t_turno")),
    )
    .await;

    let (status, catalog) = send(
        &router,
        "PUT",
        "/catalog/shift-types",
        Some(json!({"id": "t_turno", "name": "TURNO", "dailyRate": 18, "color": "#000000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(catalog["shiftTypes"][0]["dailyRate"].is_number());
    assert_eq!(as_decimal(&catalog["shiftTypes"][0]["dailyRate"]), decimal("18"));

    let (status, result) = send(&router, "POST", "/recompute", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["changed"], 1);

    let (_, shifts) = send(&router, "GET", "/shifts", None).await;
    assert_eq!(as_decimal(&shifts[0]["totalEarnings"]), decimal("18"));
}

#[tokio::test]
async fn test_custom_variable_lifecycle() {
    let router = create_router_for_test();
    let (status, _) = send(
        &router,
        "PUT",
        "/catalog/variables",
        Some(json!({"id": "v_noche", "name": "NOCTURNIDAD", "type": "hourly_bonus", "amount": 1.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, "DELETE", "/catalog/variables/v_noche", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = send(&router, "DELETE", "/catalog/variables/v_noche", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "VARIABLE_NOT_FOUND");

    let (status, error) = send(&router, "DELETE", "/catalog/variables/v_dcp", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CORE_VARIABLE_PROTECTED");
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_edits_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = StateStore::new(&path);
    let router = create_router(AppState::new(store.load_or_default(&catalog()), store.clone()));

    let (status, created) = send(
        &router,
        "POST",
        "/shifts",
        Some(shift_body("2024-01-07", "09:00", "17:30", "t_turno")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let reloaded = store.load(&Catalog::default()).unwrap();
    assert_eq!(reloaded.shifts().len(), 1);
    assert_eq!(reloaded.shifts()[0].id, created["id"].as_str().unwrap());
    assert_eq!(reloaded.shifts()[0].total_earnings, decimal("96.75"));

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw["shiftTypes"].is_array());
    assert_eq!(raw["calendarThemeId"], "minimal");
    assert_eq!(raw["shifts"][0]["totalEarnings"], json!(96.75));
    assert_eq!(raw["shifts"][0]["hoursWorked"], json!(8.5));
    assert!(raw["shiftTypes"][0]["dailyRate"].is_number());
    assert!(raw["variables"][0]["amount"].is_number());
}
