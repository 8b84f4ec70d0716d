//! End-to-end tests for the submit endpoint against a local webhook.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use vultures::{router, AppState, Config, WebhookConfig};

type Received = Arc<Mutex<Vec<Value>>>;

/// Start a webhook endpoint that records bodies and answers with `status`.
async fn spawn_hook(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::default();
    let app = Router::new()
        .route(
            "/hook",
            post(
                |State((status, seen)): State<(StatusCode, Received)>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    status
                },
            ),
        )
        .with_state((status, received.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind hook");
    let addr = listener.local_addr().expect("hook addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("hook server");
    });

    (format!("http://{addr}/hook"), received)
}

fn state_with(webhooks: WebhookConfig) -> AppState {
    let config = Config {
        port: 0,
        webhooks,
        webhook_timeout: None,
    };
    AppState::new(&config, reqwest::Client::new())
}

fn default_hook(url: &str) -> WebhookConfig {
    WebhookConfig {
        default: Some(url.to_string()),
        ..Default::default()
    }
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn read_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json")
}

fn content_of(received: &Received, index: usize) -> String {
    received.lock().unwrap()[index]["content"]
        .as_str()
        .expect("content string")
        .to_string()
}

const ESCORT_FORM: &str = "form=Convoy+Escort&client_psn=LoneWanderer&discord_name=wanderer\
    &value_escort=medium&duration_escort=2&operators_escort=3&notes=&pickup_location=Megaton";

#[tokio::test]
async fn test_contract_is_priced_delivered_and_redirected() {
    let (url, received) = spawn_hook(StatusCode::NO_CONTENT).await;
    let state = state_with(default_hook(&url));
    let app = router(state.clone());

    let res = app.oneshot(form_post(ESCORT_FORM)).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/submitted.html");

    let content = content_of(&received, 0);
    assert!(content.starts_with("**C-001 | Convoy Escort**"));
    assert!(content.contains("**Total:** 3000 caps"));
    assert!(content.contains("**Deposit:** 1500 caps"));
    assert!(content.contains("**Pickup Location:** Megaton"));
    assert!(!content.contains("Notes"));
    assert_eq!(state.relay.counters().contracts(), 1);
}

#[tokio::test]
async fn test_sequence_advances_per_category() {
    let (url, received) = spawn_hook(StatusCode::OK).await;
    let state = state_with(default_hook(&url));

    for _ in 0..2 {
        let res = router(state.clone()).oneshot(form_post(ESCORT_FORM)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }
    let res = router(state.clone())
        .oneshot(form_post("form=Recruitment&applicant_psn=Courier6"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    assert!(content_of(&received, 1).starts_with("**C-002 | Convoy Escort**"));
    assert!(content_of(&received, 2).starts_with("**R-001 | Recruitment**"));
    assert_eq!(state.relay.counters().contracts(), 2);
    assert_eq!(state.relay.counters().recruits(), 1);
}

#[tokio::test]
async fn test_webhook_failure_leaves_counter_unchanged() {
    let (url, received) = spawn_hook(StatusCode::INTERNAL_SERVER_ERROR).await;
    let state = state_with(default_hook(&url));

    let res = router(state.clone()).oneshot(form_post(ESCORT_FORM)).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(res).await["error"], "Internal Server Error");
    assert_eq!(received.lock().unwrap().len(), 1);
    assert_eq!(state.relay.counters().contracts(), 0);
}

#[tokio::test]
async fn test_non_post_is_rejected_before_delivery() {
    let (url, received) = spawn_hook(StatusCode::OK).await;
    let app = router(state_with(default_hook(&url)));

    let req = Request::builder()
        .method("GET")
        .uri("/api/submit")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(read_json(res).await["error"], "Method Not Allowed");
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_webhook_config_skips_parsing() {
    let app = router(state_with(WebhookConfig::default()));

    // Malformed JSON would be a 400 if it were parsed.
    let req = Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(res).await["error"], "Webhook URL not configured");
}

#[tokio::test]
async fn test_category_override_used() {
    let (default_url, default_seen) = spawn_hook(StatusCode::OK).await;
    let (recruits_url, recruits_seen) = spawn_hook(StatusCode::OK).await;
    let app = router(state_with(WebhookConfig {
        default: Some(default_url),
        recruits: Some(recruits_url),
        ..Default::default()
    }));

    let res = app
        .oneshot(form_post("form=Recruitment+Form&applicant_discord=courier"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(recruits_seen.lock().unwrap().len(), 1);
    assert!(default_seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_json_submission() {
    let (url, received) = spawn_hook(StatusCode::OK).await;
    let app = router(state_with(default_hook(&url)));

    let req = Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"form":"Raid","value_raid":"high","duration_raid":3,"operators_raid":"2","total":"5"}"#,
        ))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let content = content_of(&received, 0);
    assert!(content.contains("**Total:** 10800 caps"));
    assert!(content.contains("**Deposit:** 5400 caps"));
    assert!(!content.contains("**Total:** 5"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (url, received) = spawn_hook(StatusCode::OK).await;
    let state = state_with(default_hook(&url));

    let req = Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"form": ["nested"]}"#))
        .unwrap();
    let res = router(state.clone()).oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(state.relay.counters().contracts(), 0);
}

#[tokio::test]
async fn test_generic_submission_is_unnumbered() {
    let (url, received) = spawn_hook(StatusCode::OK).await;
    let app = router(state_with(default_hook(&url)));

    let res = app
        .oneshot(form_post("form=Feedback&rating=5&value_escort=high"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        content_of(&received, 0),
        "**Feedback**\n**Rating:** 5\n**Value Escort:** high"
    );
}

#[tokio::test]
async fn test_quote_endpoint() {
    let app = router(state_with(WebhookConfig::default()));

    let req = Request::builder()
        .uri("/api/quote?mission=escort&value=medium&duration=2&operators=3")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["mission"], "escort");
    assert_eq!(body["total"], 3000);
    assert_eq!(body["deposit"], 1500);

    let req = Request::builder()
        .uri("/api/quote?mission=heist")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pricing_table_endpoint() {
    let app = router(state_with(WebhookConfig::default()));

    let req = Request::builder()
        .uri("/api/pricing")
        .body(Body::empty())
        .unwrap();
    let body = read_json(app.oneshot(req).await.unwrap()).await;

    let missions = body["missions"].as_array().expect("missions");
    assert_eq!(missions.len(), 8);
    assert_eq!(missions[2]["mission"], "raid");
    assert_eq!(missions[2]["base_price"], 1200);
    assert_eq!(body["value_multipliers"][1]["multiplier"], 1.5);
    assert_eq!(body["operator_multipliers"][3]["operators"], 4);
}

#[tokio::test]
async fn test_health() {
    let app = router(state_with(WebhookConfig::default()));

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await["status"], "ok");
}
