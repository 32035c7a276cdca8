// tests/e2e_userpass_login.rs
mod support;

use axum::http::{StatusCode, header};
use serde_json::json;
use support::{
    StubAuthServer, TEST_AUTH_HOST, body_json, build_test_container, get_request, login_request,
    make_test_router, session_cookie,
};
use tower::ServiceExt;

#[tokio::test]
async fn login_sets_session_and_logincfg_sees_it() {
    let auth = StubAuthServer::accepting();
    let app = make_test_router(build_test_container(auth.clone()));

    let response = app
        .clone()
        .oneshot(login_request(&json!({
            "username": "alice",
            "password": "secret",
            "account": "root",
            "redirectTo": "/did/list"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("session cookie");
    assert!(cookie.starts_with("webui_session="));

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["rucioIdentity"], "alice");
    assert_eq!(body["rucioAccount"], "root");
    assert_eq!(body["rucioVO"], "def");
    assert_eq!(body["redirectTo"], "/did/list");

    let calls = auth.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].vo, "def");
    assert_eq!(calls[0].account, "root");

    let response = app
        .oneshot(get_request("/api/auth/logincfg", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["isLoggedIn"], true);
    assert_eq!(body["accountName"], "root");
    assert_eq!(body["rucioAuthHost"], TEST_AUTH_HOST);
}

#[tokio::test]
async fn rejected_credentials_answer_401_without_cookie() {
    let app = make_test_router(build_test_container(StubAuthServer::rejecting()));

    let response = app
        .oneshot(login_request(&json!({
            "username": "alice",
            "password": "wrong",
            "account": "root"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "invalid credentials");
}

#[tokio::test]
async fn missing_fields_are_rejected_before_the_auth_server() {
    let auth = StubAuthServer::accepting();
    let app = make_test_router(build_test_container(auth.clone()));

    let response = app
        .oneshot(login_request(&json!({ "username": "alice" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(auth.calls().is_empty());
}

#[tokio::test]
async fn unreachable_auth_server_is_a_bad_gateway() {
    let app = make_test_router(build_test_container(StubAuthServer::unreachable()));

    let response = app
        .oneshot(login_request(&json!({
            "username": "alice",
            "password": "secret",
            "account": "root",
            "vo": "atl"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn offsite_redirect_falls_back_to_dashboard() {
    let app = make_test_router(build_test_container(StubAuthServer::accepting()));

    let response = app
        .oneshot(login_request(&json!({
            "username": "alice",
            "password": "secret",
            "account": "root",
            "redirectTo": "//evil.example/phish"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["redirectTo"], "/dashboard");
}

#[tokio::test]
async fn concurrent_logins_get_separate_sessions() {
    let app = make_test_router(build_test_container(StubAuthServer::accepting()));

    let requests = ["alice", "bob"].map(|user| {
        let app = app.clone();
        tokio::spawn(async move {
            app.oneshot(login_request(&json!({
                "username": user,
                "password": "secret",
                "account": user
            })))
            .await
            .unwrap()
        })
    });

    let mut cookies = Vec::new();
    for request in requests {
        let response = request.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        cookies.push(session_cookie(&response).unwrap());
    }
    assert_ne!(cookies[0], cookies[1]);
}

#[tokio::test]
async fn login_issues_a_new_session_id_over_a_presented_cookie() {
    let app = make_test_router(build_test_container(StubAuthServer::accepting()));

    let response = app
        .clone()
        .oneshot(login_request(&json!({
            "username": "mallory",
            "password": "secret",
            "account": "mallory"
        })))
        .await
        .unwrap();
    let planted = session_cookie(&response).expect("first session cookie");

    let mut request = login_request(&json!({
        "username": "alice",
        "password": "secret",
        "account": "root"
    }));
    request
        .headers_mut()
        .insert(header::COOKIE, planted.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let issued = session_cookie(&response).expect("rotated session cookie");
    assert_ne!(issued, planted);

    let response = app
        .clone()
        .oneshot(get_request("/api/auth/logincfg", Some(&planted)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["isLoggedIn"], false);

    let response = app
        .oneshot(get_request("/api/auth/logincfg", Some(&issued)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["accountName"], "root");
}
