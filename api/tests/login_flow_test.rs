//! End-to-end tests over the full routing and middleware stack,
//! backed by in-memory implementations of the repository and hasher.

use std::sync::Arc;

use actix_web::{http::header::AUTHORIZATION, test, web};
use once_cell::sync::Lazy;

use us_api::app::{create_app, AppState};
use us_core::repositories::MockUserRepository;
use us_core::services::auth::{AuthService, AuthServiceConfig};
use us_core::services::hasher::MockPasswordHasher;
use us_core::services::token::{KeyManager, TokenService};

const PHONE: &str = "+628232482440";
const PASSWORD: &str = "S3cret!pass";

static KEYS: Lazy<Arc<KeyManager>> =
    Lazy::new(|| Arc::new(KeyManager::generate().expect("keypair generation")));

struct TestHarness {
    state: web::Data<AppState<MockUserRepository, MockPasswordHasher>>,
    tokens: Arc<TokenService>,
}

fn harness() -> TestHarness {
    let tokens = Arc::new(TokenService::new(Arc::clone(&KEYS)));
    let auth_service = AuthService::new(
        MockUserRepository::new(),
        MockPasswordHasher,
        Arc::clone(&tokens),
        AuthServiceConfig::default(),
    );
    TestHarness {
        state: web::Data::new(AppState { auth_service }),
        tokens,
    }
}

fn register_body(full_name: &str, phone: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "fullName": full_name,
        "phoneNumber": phone,
        "password": password,
    })
}

#[actix_web::test]
async fn register_then_login_returns_user_id_and_token() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), Arc::clone(&h.tokens))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("Ada Lovelace", PHONE, PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let user_id = body["userID"].as_i64().expect("userID in body");

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "phoneNumber": PHONE, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["userID"].as_i64(), Some(user_id));

    let token = body["token"].as_str().expect("token in body");
    assert!(!token.is_empty());
    let claims = h.tokens.verify(token).expect("issued token verifies");
    assert_eq!(claims.user_id, user_id);
}

#[actix_web::test]
async fn login_with_wrong_password_is_a_400_with_generic_message() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), Arc::clone(&h.tokens))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("Ada Lovelace", PHONE, PASSWORD))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "phoneNumber": PHONE, "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_msg"], "password or phone number is incorrect.");

    // Unknown phone gets the identical message.
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "phoneNumber": "+620000000000", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_msg"], "password or phone number is incorrect.");
}

#[actix_web::test]
async fn duplicate_registration_reports_phone_already_used() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), Arc::clone(&h.tokens))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("Ada Lovelace", PHONE, PASSWORD))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("Someone Else", PHONE, "0therPass!"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error_msg"],
        format!("phone number {} already used.", PHONE)
    );
}

#[actix_web::test]
async fn profile_round_trip_with_issued_token() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), Arc::clone(&h.tokens))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("Ada Lovelace", PHONE, PASSWORD))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "phoneNumber": PHONE, "password": PASSWORD }))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fullName"], "Ada Lovelace");
    assert_eq!(body["phoneNumber"], PHONE);

    let req = test::TestRequest::put()
        .uri("/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "fullName": "Ada King" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fullName"], "Ada King");
    // The untouched field keeps its stored value.
    assert_eq!(body["phoneNumber"], PHONE);
}

#[actix_web::test]
async fn profile_without_token_is_forbidden() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), Arc::clone(&h.tokens))).await;

    let req = test::TestRequest::get().uri("/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_msg"], "forbidden access");
}

#[actix_web::test]
async fn profile_update_with_no_fields_is_a_400() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), Arc::clone(&h.tokens))).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body("Ada Lovelace", PHONE, PASSWORD))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "phoneNumber": PHONE, "password": PASSWORD }))
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri("/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
