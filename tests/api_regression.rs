//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the form and JSON endpoints using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use transmissibility_predictor::api::{create_app, AppState};
use transmissibility_predictor::model::{FeatureVector, ModelSummary, PredictionError};
use transmissibility_predictor::PredictiveModel;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Fixed-output model that counts its calls.
#[derive(Debug)]
struct StubModel {
    value: f64,
    calls: AtomicUsize,
}

impl PredictiveModel for StubModel {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.value.is_finite() {
            Ok(self.value)
        } else {
            Err(PredictionError::NonFinite(self.value))
        }
    }

    fn kind(&self) -> &'static str {
        "stub"
    }
}

fn create_test_state(value: f64) -> (AppState, Arc<StubModel>) {
    let stub = Arc::new(StubModel {
        value,
        calls: AtomicUsize::new(0),
    });
    let summary = ModelSummary {
        kind: "stub",
        format_version: 1,
        features: vec!["PERMX".into(), "PERMY".into(), "PERMZ".into(), "PORO".into()],
        target: "TRANSMISSIBILITY".into(),
        description: None,
    };
    (AppState::new(stub.clone(), summary), stub)
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_form(state: AppState, body: &str) -> (StatusCode, String) {
    let resp = create_app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    (status, body_string(resp).await)
}

async fn post_json(state: AppState, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let resp = create_app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let v = serde_json::from_str(&body_string(resp).await).unwrap();
    (status, v)
}

// ============================================================================
// HTML form
// ============================================================================

#[tokio::test]
async fn test_get_endpoints_return_200() {
    for endpoint in ["/", "/about", "/health", "/api/v1/about", "/api/v1/model"] {
        let (state, _) = create_test_state(1.0);
        let resp = create_app(state)
            .oneshot(Request::builder().uri(endpoint).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "GET {endpoint}");
    }
}

#[tokio::test]
async fn test_scenario_a_zero_permx() {
    let (state, stub) = create_test_state(1.0);
    let (status, html) = post_form(state, "permx=0&permy=5&permz=5&poro=0.2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Permeability values must be greater than 0."));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_scenario_b_and_c_porosity_out_of_range() {
    for poro in ["0", "1.5"] {
        let (state, stub) = create_test_state(1.0);
        let (_, html) = post_form(state, &format!("permx=10&permy=10&permz=10&poro={poro}")).await;
        assert!(html.contains("Porosity must be between 0 and 1."), "poro={poro}");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_scenario_d_success() {
    let (state, stub) = create_test_state(42.567);
    let (status, html) = post_form(state, "permx=15&permy=20&permz=5&poro=0.25").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("The predicted Transmissibility is: 42.57"));
    assert!(html.contains("value=\"15.00\""));
    assert!(html.contains("value=\"0.25\""));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_scenario_e_about_ignores_form_state() {
    let (state, stub) = create_test_state(1.0);
    let resp = create_app(state)
        .oneshot(
            Request::builder()
                .uri("/about?permx=0&permy=-3&permz=abc&poro=9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains(
        "This app predicts the production of oil, gas, and water based on reservoir characteristics."
    ));
    assert!(html.contains("Built with Streamlit."));
    assert!(!html.contains("must be"));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_numeric_field_is_inline_error() {
    let (state, _) = create_test_state(1.0);
    let (status, html) = post_form(state, "permx=10&permy=lots&permz=10&poro=0.3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Permeability in Y direction (PERMY) must be a number."));
    assert!(html.contains("value=\"lots\""));
}

#[tokio::test]
async fn test_model_failure_is_generic_banner() {
    let (state, _) = create_test_state(f64::NAN);
    let (_, html) = post_form(state, "permx=1&permy=1&permz=1&poro=0.5").await;
    assert!(html.contains("Prediction failed: the model returned an unexpected result."));
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_json_predict_success_envelope() {
    let (state, _) = create_test_state(42.567);
    let (status, v) = post_json(
        state,
        serde_json::json!({
            "permeability_x": 15.0,
            "permeability_y": 20.0,
            "permeability_z": 5.0,
            "porosity": 0.25
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["display"], "42.57");
    assert_eq!(v["data"]["message"], "The predicted Transmissibility is: 42.57");
    assert!((v["data"]["transmissibility"].as_f64().unwrap() - 42.567).abs() < 1e-12);
    assert_eq!(v["meta"]["version"], "1");
}

#[tokio::test]
async fn test_json_predict_validation_codes() {
    let cases = [
        ((0.0, 5.0, 5.0, 0.2), "INVALID_PERMEABILITY"),
        ((10.0, 10.0, 10.0, 0.0), "INVALID_POROSITY"),
        ((10.0, 10.0, 10.0, 1.5), "INVALID_POROSITY"),
    ];
    for ((x, y, z, poro), code) in cases {
        let (state, _) = create_test_state(1.0);
        let (status, v) = post_json(
            state,
            serde_json::json!({
                "permeability_x": x,
                "permeability_y": y,
                "permeability_z": z,
                "porosity": poro
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(v["error"]["code"], code);
    }
}

#[tokio::test]
async fn test_json_predict_model_failure_is_500() {
    let (state, _) = create_test_state(f64::INFINITY);
    let (status, v) = post_json(
        state,
        serde_json::json!({
            "permeability_x": 1.0,
            "permeability_y": 1.0,
            "permeability_z": 1.0,
            "porosity": 0.5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_json_about_and_model() {
    let (state, _) = create_test_state(1.0);
    let resp = create_app(state.clone())
        .oneshot(Request::builder().uri("/api/v1/about").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["data"]["lines"].as_array().unwrap().len(), 2);

    let resp = create_app(state)
        .oneshot(Request::builder().uri("/api/v1/model").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["data"]["kind"], "stub");
    assert_eq!(v["data"]["features"][3], "PORO");
}

#[tokio::test]
async fn test_unknown_api_path_is_enveloped_404() {
    let (state, _) = create_test_state(1.0);
    let resp = create_app(state)
        .oneshot(Request::builder().uri("/api/v1/batch").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_json_predict_missing_field_is_enveloped() {
    let (state, stub) = create_test_state(1.0);
    let (status, v) = post_json(
        state,
        serde_json::json!({
            "permeability_x": 15.0,
            "permeability_y": 20.0,
            "permeability_z": 5.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"]["code"], "INVALID_BODY");
    assert!(v["error"]["message"].as_str().unwrap().contains("porosity"));
    assert!(v["meta"]["timestamp"].is_string());
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_json_predict_without_content_type_is_enveloped() {
    let (state, _) = create_test_state(1.0);
    let resp = create_app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/predict")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["error"]["code"], "INVALID_BODY");
}
