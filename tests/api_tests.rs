use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use driver_app::config::EnvironmentConfig;
use driver_app::routes::create_api_router;
use driver_app::state::AppState;

struct TestResponse {
    status: StatusCode,
    body: Value,
}

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self {
            router: create_api_router(AppState::seeded(EnvironmentConfig::default())),
        }
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, body }
    }

    async fn login(&self) -> String {
        let response = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({
                    "cnpj": "12.345.678/0001-90",
                    "email": "joao@exemplo.com",
                    "password": "123456"
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["access_token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_login_returns_user_and_token() {
    let app = TestApp::new();
    let response = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({
                "cnpj": "12345678000190",
                "email": "joao@exemplo.com",
                "password": "123456"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["name"], "João Silva");
    assert_eq!(response.body["user"]["companyName"], "Express Delivery Ltda");
    assert!(response.body["access_token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new();

    let wrong_email = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({
                "cnpj": "12.345.678/0001-90",
                "email": "maria@exemplo.com",
                "password": "123456"
            })),
        )
        .await;
    assert_eq!(wrong_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_email.body["message"], "CNPJ, email ou senha incorretos");

    let short_cnpj = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "cnpj": "1234", "email": "joao@exemplo.com", "password": "123456" })),
        )
        .await;
    assert_eq!(short_cnpj.status, StatusCode::UNPROCESSABLE_ENTITY);

    let blank = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "cnpj": "", "email": "joao@exemplo.com", "password": "123456" })),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["message"], "Preencha todos os campos");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();
    let response = app.send(Method::GET, "/routes", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "UNAUTHORIZED");

    let forged = app.send(Method::GET, "/routes", Some("not-a-jwt"), None).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let token = app.login().await;

    let profile = app.send(Method::GET, "/auth/profile", Some(&token), None).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["email"], "joao@exemplo.com");

    let logout = app.send(Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app.send(Method::GET, "/auth/profile", Some(&token), None).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delivery_update_is_visible_from_route() {
    let app = TestApp::new();
    let token = app.login().await;

    let update = app
        .send(
            Method::PUT,
            "/deliveries/1",
            Some(&token),
            Some(json!({
                "status": "entregue",
                "driverNotes": "Entregue no balcão",
                "evidence": [{ "type": "photo", "base64": "aGVsbG8=" }]
            })),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["status"], "entregue");
    assert!(update.body["deliveredAt"].is_string());

    let route = app.send(Method::GET, "/routes/1", Some(&token), None).await;
    assert_eq!(route.status, StatusCode::OK);
    assert_eq!(route.body["deliveries"][0]["status"], "entregue");
    assert_eq!(route.body["deliveries"][0]["driverNotes"], "Entregue no balcão");
}

#[tokio::test]
async fn test_invalid_evidence_is_rejected_without_changes() {
    let app = TestApp::new();
    let token = app.login().await;

    let update = app
        .send(
            Method::PUT,
            "/deliveries/2",
            Some(&token),
            Some(json!({
                "status": "problema",
                "evidence": [{ "type": "photo", "base64": "%%%" }]
            })),
        )
        .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);

    let delivery = app.send(Method::GET, "/deliveries/2", Some(&token), None).await;
    assert_eq!(delivery.body["status"], "pendente");
}

#[tokio::test]
async fn test_route_lifecycle() {
    let app = TestApp::new();
    let token = app.login().await;

    let early = app.send(Method::PUT, "/routes/1/finish", Some(&token), None).await;
    assert_eq!(early.status, StatusCode::CONFLICT);

    for id in 1..=3 {
        let response = app
            .send(
                Method::PUT,
                &format!("/deliveries/{}", id),
                Some(&token),
                Some(json!({ "status": "entregue" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let finished = app.send(Method::PUT, "/routes/1/finish", Some(&token), None).await;
    assert_eq!(finished.status, StatusCode::OK);
    assert_eq!(finished.body["status"], "finalizado");

    let closed = app
        .send(
            Method::PUT,
            "/deliveries/1",
            Some(&token),
            Some(json!({ "status": "problema" })),
        )
        .await;
    assert_eq!(closed.status, StatusCode::CONFLICT);

    let missing = app.send(Method::GET, "/routes/99", Some(&token), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_earnings_and_notifications() {
    let app = TestApp::new();
    let token = app.login().await;

    let history = app
        .send(Method::GET, "/history?period=all", Some(&token), None)
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body.as_array().unwrap().len(), 1);
    assert_eq!(history.body[0]["id"], 2);

    let bad_period = app
        .send(Method::GET, "/history?period=year", Some(&token), None)
        .await;
    assert_eq!(bad_period.status, StatusCode::BAD_REQUEST);

    let earnings = app.send(Method::GET, "/earnings", Some(&token), None).await;
    assert_eq!(earnings.status, StatusCode::OK);
    assert_eq!(earnings.body["companyName"], "Express Delivery Ltda");

    let push = app
        .send(
            Method::POST,
            "/notifications/register",
            Some(&token),
            Some(json!({ "pushToken": "ExponentPushToken[abc]" })),
        )
        .await;
    assert_eq!(push.status, StatusCode::OK);
    assert_eq!(push.body["success"], true);

    let settings = app
        .send(
            Method::PUT,
            "/notifications/settings",
            Some(&token),
            Some(json!({
                "newRoutes": false,
                "deliveryReminders": true,
                "paymentUpdates": true,
                "systemMessages": true
            })),
        )
        .await;
    assert_eq!(settings.status, StatusCode::OK);
    assert_eq!(settings.body["newRoutes"], false);
    assert_eq!(settings.body["systemMessages"], true);
}
