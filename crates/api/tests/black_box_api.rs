use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{json, Value};
use workforce_auth::{JwtClaims, Role, TokenKind};
use workforce_core::UserId;
use workforce_infra::config::{AppConfig, DEV_JWT_SECRET};
use workforce_infra::mail::RecordingMailer;
use workforce_infra::services::Stores;

const PASSWORD: &str = "correct-horse-battery";

struct TestServer {
    base_url: String,
    mailer: Arc<RecordingMailer>,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory stores, on an ephemeral port.
        let mailer = Arc::new(RecordingMailer::new());
        let app = workforce_api::app::build_app_with(&AppConfig::default(), Stores::in_memory(), mailer.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            mailer,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> reqwest::Response {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await.unwrap()
    }

    async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client.get(self.url(path)).bearer_auth(token).send().await.unwrap()
    }

    /// Sign up, verify with the mailed code and log in; returns the login body.
    async fn register(&self, email: &str, extra: Value) -> Value {
        let mut body = json!({ "email": email, "password": PASSWORD });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        let res = self.post("/api/auth/signup", None, body).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let mail = self.mailer.last_to(email).expect("verification mail");
        let code = mail.body.split_whitespace().last().unwrap().to_string();
        let res = self
            .post("/api/auth/verify-email", None, json!({ "email": email, "code": code }))
            .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = self
            .post("/api/auth/login", None, json!({ "email": email, "password": PASSWORD }))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(role: Role, kind: TokenKind) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: UserId::new(),
        email: "minted@example.com".to_string(),
        role,
        kind,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(DEV_JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn health_is_public() {
    let server = TestServer::spawn().await;
    let res = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let server = TestServer::spawn().await;

    let res = reqwest::get(server.url("/api/whoami")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.get("/api/departments", "not-a-jwt").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn minted_access_token_is_accepted_but_refresh_token_is_not() {
    let server = TestServer::spawn().await;

    let access = mint_jwt(Role::Admin, TokenKind::Access);
    let res = server.get("/api/whoami", &access).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "Admin");

    let refresh = mint_jwt(Role::Admin, TokenKind::Refresh);
    let res = server.get("/api/whoami", &refresh).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_signup_verify_login_then_manage_departments() {
    let server = TestServer::spawn().await;

    let session = server
        .register(
            "boss@example.com",
            json!({ "role": "Admin", "admin_key": "admin-key-change-me" }),
        )
        .await;
    assert_eq!(session["type"], "Bearer");
    assert_eq!(session["role"], "Admin");
    let token = session["token"].as_str().unwrap().to_string();

    let res = server
        .post(
            "/api/departments",
            Some(&token),
            json!({ "name": "Engineering", "location": "Berlin" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let res = server.get(&format!("/api/departments/{id}"), &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["name"], "Engineering");

    let res = server
        .post("/api/departments", Some(&token), json!({ "name": "engineering" }))
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "conflict");

    let res = server.get("/api/departments", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = res.json().await.unwrap();
    assert_eq!(page["total_items"], 1);

    let res = server.get("/api/audit", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let entries: Value = res.json().await.unwrap();
    assert_eq!(entries.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn user_role_cannot_write_or_read_admin_views() {
    let server = TestServer::spawn().await;

    let session = server.register("staff@example.com", json!({})).await;
    assert_eq!(session["role"], "User");
    let token = session["token"].as_str().unwrap().to_string();

    let res = server
        .post("/api/departments", Some(&token), json!({ "name": "Shadow IT" }))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.get("/api/dashboard/admin/summary", &token).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.get("/api/departments", &token).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.get("/api/dashboard/user/summary", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let summary: Value = res.json().await.unwrap();
    assert_eq!(summary["linked_to_employee"], false);
}

#[tokio::test]
async fn admin_signup_with_wrong_key_is_forbidden() {
    let server = TestServer::spawn().await;
    let res = server
        .post(
            "/api/auth/signup",
            None,
            json!({
                "email": "sneaky@example.com",
                "password": PASSWORD,
                "role": "ADMIN",
                "admin_key": "guess",
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unverified_login_is_refused() {
    let server = TestServer::spawn().await;
    let res = server
        .post(
            "/api/auth/signup",
            None,
            json!({ "email": "new@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "new@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn linked_user_reaches_only_their_own_employee_records() {
    let server = TestServer::spawn().await;

    let admin = server
        .register(
            "hr@example.com",
            json!({ "role": "Admin", "admin_key": "admin-key-change-me" }),
        )
        .await;
    let admin_token = admin["token"].as_str().unwrap().to_string();

    let res = server
        .post("/api/departments", Some(&admin_token), json!({ "name": "Support" }))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let dept: Value = res.json().await.unwrap();

    let res = server
        .post(
            "/api/positions",
            Some(&admin_token),
            json!({ "department_id": dept["id"], "title": "Agent" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let pos: Value = res.json().await.unwrap();

    let mut employee_ids = Vec::new();
    for (first, email) in [("Lin", "lin@example.com"), ("Ola", "ola@example.com")] {
        let res = server
            .post(
                "/api/employees",
                Some(&admin_token),
                json!({
                    "department_id": dept["id"],
                    "position_id": pos["id"],
                    "first_name": first,
                    "last_name": "Agent",
                    "email": email,
                }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let employee: Value = res.json().await.unwrap();
        employee_ids.push(employee["id"].as_str().unwrap().to_string());
    }
    let (own, other) = (&employee_ids[0], &employee_ids[1]);

    let res = server
        .post(
            "/api/salaries",
            Some(&admin_token),
            json!({ "employee_id": own, "base_salary": 350_000 }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Signing up with the employee's email links the account to it.
    let user = server.register("lin@example.com", json!({})).await;
    let user_token = user["token"].as_str().unwrap().to_string();

    let res = server.get(&format!("/api/salaries/by-employee/{own}"), &user_token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let salaries: Value = res.json().await.unwrap();
    assert_eq!(salaries.as_array().map(Vec::len), Some(1));

    let res = server.get(&format!("/api/salaries/by-employee/{other}"), &user_token).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.get(&format!("/api/contracts/by-employee/{other}"), &user_token).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let leave = |employee_id: &str| {
        json!({
            "employee_id": employee_id,
            "start_date": "2025-03-03",
            "end_date": "2025-03-07",
        })
    };
    let res = server.post("/api/time-off", Some(&user_token), leave(other.as_str())).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.post("/api/time-off", Some(&user_token), leave(own.as_str())).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Admins are not limited to a linked employee.
    let res = server.get(&format!("/api/salaries/by-employee/{other}"), &admin_token).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let server = TestServer::spawn().await;

    let res = server
        .post("/api/auth/signup", None, json!({ "email": "half@example.com" }))
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "invalid_request");
    assert!(err["message"].as_str().is_some_and(|m| !m.is_empty()));

    let token = mint_jwt(Role::Admin, TokenKind::Access);
    let res = server.get("/api/departments?page=first", &token).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "invalid_request");
}
