use super::*;
use mockito::Server;

#[derive(Debug, serde::Deserialize)]
struct Payload {
    value: u32,
}

#[test]
fn test_networking_manager_creation() {
    let manager = NetworkingManager::new(NetworkingConfig::default());

    assert!(manager.is_ok(), "Should create networking manager");
    assert_eq!(manager.unwrap().max_jobs(), 4);
}

#[test]
fn test_zero_jobs_rejected() {
    let config = NetworkingConfig {
        max_jobs: 0,
        ..Default::default()
    };

    let result = NetworkingManager::new(config);
    assert!(matches!(
        result,
        Err(NetworkingError::InvalidJobCount { count: 0 })
    ));
}

#[test]
fn test_token_with_newline_rejected() {
    let config = NetworkingConfig {
        token: Some("bad\ntoken".to_string()),
        ..Default::default()
    };

    let result = NetworkingManager::new(config);
    assert!(matches!(result, Err(NetworkingError::InvalidHeader { .. })));
}

#[tokio::test]
async fn test_get_json_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/thing")
        .match_header("accept", GITHUB_MEDIA_TYPE)
        .with_status(200)
        .with_body(r#"{"value": 42}"#)
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let payload: Payload = manager
        .get_json(&format!("{}/thing", server.url()))
        .await
        .unwrap();

    assert_eq!(payload.value, 42);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_json_sends_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/thing")
        .match_header("authorization", "Bearer s3cret")
        .with_status(200)
        .with_body(r#"{"value": 1}"#)
        .create_async()
        .await;

    let config = NetworkingConfig {
        token: Some("s3cret".to_string()),
        ..Default::default()
    };
    let manager = NetworkingManager::new(config).unwrap();
    let _: Payload = manager
        .get_json(&format!("{}/thing", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_json_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/missing")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let result = manager
        .get_json::<Payload>(&format!("{}/missing", server.url()))
        .await;

    assert!(matches!(result, Err(NetworkingError::NotFound { .. })));
}

#[tokio::test]
async fn test_get_json_surfaces_api_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/limited")
        .with_status(403)
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let result = manager
        .get_json::<Payload>(&format!("{}/limited", server.url()))
        .await;

    match result {
        Err(NetworkingError::HttpStatus { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "API rate limit exceeded");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_json_invalid_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/garbled")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let result = manager
        .get_json::<Payload>(&format!("{}/garbled", server.url()))
        .await;

    assert!(matches!(result, Err(NetworkingError::JsonError { .. })));
}
