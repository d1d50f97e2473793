// Translation endpoint tests against a mock Baidu server

mod common;

use common::*;
use mockito::{Matcher, Server};
use serde_json::json;

fn signed_query(q: &str, from: &str, to: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("q".into(), q.into()),
        Matcher::UrlEncoded("from".into(), from.into()),
        Matcher::UrlEncoded("to".into(), to.into()),
        Matcher::UrlEncoded("appid".into(), "test-app".into()),
        Matcher::Regex("salt=[0-9]{13}".into()),
        Matcher::Regex("sign=[0-9a-f]{32}".into()),
    ])
}

#[tokio::test]
async fn test_translate_zh_joins_segments() {
    let mut server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(signed_query("Hello\nWorld", "en", "zh"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "from": "en",
                "to": "zh",
                "trans_result": [
                    { "src": "Hello", "dst": "你好" },
                    { "src": "World", "dst": "世界" }
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let app = router(fixture.config(&server.url()));
    let response = post_json(app, "/api/translate-zh", json!({ "text": "Hello\nWorld" })).await;

    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "result": "你好\n世界" }));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_translate_en_uses_reverse_direction() {
    let mut server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(signed_query("苹果", "zh", "en"))
        .with_status(200)
        .with_body(r#"{"from":"zh","to":"en","trans_result":[{"src":"苹果","dst":"apple"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let app = router(fixture.config(&server.url()));
    let response = post_json(app, "/api/translate-en", json!({ "text": "苹果" })).await;

    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await, json!({ "result": "apple" }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_error_code_becomes_error_body() {
    let mut server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let _mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#)
        .create_async()
        .await;

    let app = router(fixture.config(&server.url()));
    let response = post_json(app, "/api/translate-zh", json!({ "text": "hello" })).await;

    assert_eq!(response.status(), 500);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Baidu API Error: Invalid Sign" }));
}

#[tokio::test]
async fn test_empty_result_is_an_error() {
    let mut server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let _mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"from":"en","to":"zh","trans_result":[]}"#)
        .create_async()
        .await;

    let app = router(fixture.config(&server.url()));
    let response = post_json(app, "/api/translate-zh", json!({ "text": "hello" })).await;

    assert_eq!(response.status(), 500);
    let body = body_json(response).await;
    assert!(body.get("result").is_none());
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Baidu API returned no translation results"
    );
}

#[tokio::test]
async fn test_upstream_http_failure_is_an_error() {
    let mut server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let _mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let app = router(fixture.config(&server.url()));
    let response = post_json(app, "/api/translate-en", json!({ "text": "你好" })).await;

    assert_eq!(response.status(), 500);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_missing_text_never_reaches_provider() {
    let mut server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let bodies = [json!({}), json!({ "text": "" }), json!({ "text": "   " }), json!({ "text": null })];
    for path in ["/api/translate-zh", "/api/translate-en"] {
        for body in bodies.iter() {
            let app = router(fixture.config(&server.url()));
            let response = post_json(app, path, body.clone()).await;
            assert_eq!(response.status(), 400, "{} {}", path, body);

            let json = body_json(response).await;
            assert!(json.get("result").is_none());
            assert!(json["error"].as_str().unwrap().contains("No text provided"));
        }
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let server = Server::new_async().await;
    let fixture = Fixture::new().with_credentials();

    let app = router(fixture.config(&server.url()));
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/translate-zh")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), 400);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_missing_credentials_fail_before_network() {
    // The environment fallback would legitimately satisfy the lookup
    if std::env::var("BAIDU_APP_ID").is_ok() && std::env::var("BAIDU_SECRET_KEY").is_ok() {
        return;
    }

    let mut server = Server::new_async().await;
    let fixture = Fixture::new();

    let mock = server
        .mock("GET", BAIDU_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = router(fixture.config(&server.url()));
    let response = post_json(app, "/api/translate-zh", json!({ "text": "hello" })).await;

    assert_eq!(response.status(), 500);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("credentials missing or malformed"));

    mock.assert_async().await;
}
