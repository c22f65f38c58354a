//! Contract and determinism tests for all API endpoints.
//!
//! - Contract validation: field names (camelCase), types, required fields
//! - Determinism: same request twice = identical bytes

use axum::http::StatusCode;
use loopcalc::api::{self, AppState};
use loopcalc::config::{Config, OpenerMode};
use tower::util::ServiceExt;

// =============================================================================
// Test Infrastructure
// =============================================================================

const JSON_ENDPOINTS: &[&str] = &[
    "/ready",
    "/v1/open",
    "/v1/close",
    "/v1/thresholds",
    "/v1/sweep",
    "/v1/scenario",
    "/v1/share",
];

fn setup_test_app(opener_mode: OpenerMode) -> axum::Router {
    api::create_router(AppState::new(Config {
        opener_mode,
        ..Config::default()
    }))
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

/// Assert all keys in a JSON object are camelCase
fn assert_all_keys_camel_case(value: &serde_json::Value, path: &str) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                // camelCase: starts with lowercase, no underscores
                assert!(
                    key.chars().next().map_or(true, |c| c.is_lowercase()),
                    "Key '{}' at path '{}' should start with lowercase (camelCase)",
                    key,
                    path
                );
                assert!(
                    !key.contains('_'),
                    "Key '{}' at path '{}' should not contain underscores (camelCase)",
                    key,
                    path
                );
                assert_all_keys_camel_case(val, &format!("{}.{}", path, key));
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                assert_all_keys_camel_case(val, &format!("{}[{}]", path, i));
            }
        }
        _ => {}
    }
}

// =============================================================================
// Contract Tests
// =============================================================================

#[tokio::test]
async fn test_contract_all_endpoints_camel_case() {
    for mode in [OpenerMode::Simple, OpenerMode::Equilibrium] {
        for uri in JSON_ENDPOINTS {
            let (status, body) = request(setup_test_app(mode), uri).await;
            assert_eq!(status, StatusCode::OK, "{} ({})", uri, mode);

            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_all_keys_camel_case(&json, uri);
        }
    }
}

#[tokio::test]
async fn test_contract_open_required_fields() {
    let (status, body) = request(setup_test_app(OpenerMode::Simple), "/v1/open").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["mode"].is_string(), "mode must be string");
    for field in [
        "flashloanAmount",
        "owedRepayment",
        "soldOnDex",
        "receivedFromDex",
        "combinedPledge",
        "upfrontFeeAbs",
        "protocolFeeAbs",
        "finalPledge",
        "interest",
        "totalFees",
        "leverage",
    ] {
        assert!(json[field].is_f64(), "{} must be a number", field);
    }
}

#[tokio::test]
async fn test_contract_scenario_required_fields() {
    let (status, body) = request(setup_test_app(OpenerMode::Simple), "/v1/scenario").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["initialValueUsd"].is_f64());
    assert!(json["deepDive"]["close"]["rationalToRepay"].is_boolean());
    assert!(json["thresholds"]["breakEven"]["iterations"].is_u64());
    assert!(json["thresholds"]["totalLoss"]["multiplier"].is_f64());
    assert!(json["shareQuery"].is_string());

    let point = &json["sweep"][0];
    assert!(point["priceChangePct"].is_f64());
    assert!(point["roiPct"].is_f64());
    assert!(point["holdRoiPct"].is_f64());
    assert!(point["rationalToRepay"].is_boolean());

    let row = &json["openDetails"][0];
    assert!(row["description"].is_string());
    assert!(row["amount"].is_string(), "detail amounts are pre-formatted");

    let bar = &json["overview"][0];
    assert!(bar["label"].is_string());
    assert!(bar["valueUsd"].is_f64());
    assert!(bar["isDebt"].is_boolean());
}

#[tokio::test]
async fn test_contract_errors_have_error_field() {
    for uri in ["/v1/open?ltv=1.5", "/v1/close?loanPriceUsd=-1", "/v1/sweep?minPriceChangePct=-150"] {
        let (status, body) = request(setup_test_app(OpenerMode::Simple), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string(), "{} must report an error message", uri);
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[tokio::test]
async fn test_determinism_identical_bytes() {
    let uris = [
        "/v1/open?mode=equilibrium&upfrontFee=0.004",
        "/v1/close?collPriceChange=0.2&loanPriceChange=-0.01",
        "/v1/thresholds?ltv=0.66&apr=0.12&tenorDays=30",
        "/v1/sweep?minPriceChangePct=-30&maxPriceChangePct=60",
        "/v1/sweep.csv",
        "/v1/scenario?collAmount=2.5&collPriceUsd=3150&collateralToken=ETH",
        "/v1/share?ltv=0.75",
    ];

    for uri in uris {
        let (status1, body1) = request(setup_test_app(OpenerMode::Simple), uri).await;
        let (status2, body2) = request(setup_test_app(OpenerMode::Simple), uri).await;

        assert_eq!(status1, StatusCode::OK, "{}", uri);
        assert_eq!(status1, status2);
        assert_eq!(body1, body2, "{} must be byte-identical across requests", uri);
    }
}
