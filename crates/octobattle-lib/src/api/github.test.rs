// Tests for the GitHub provider

use super::*;
use crate::networking::NetworkingConfig;
use crate::testing::{profile, repo};
use mockito::{Matcher, Server};

fn live_client(server: &Server) -> LiveGithubClient {
    let networking = Arc::new(NetworkingManager::new(NetworkingConfig::default()).unwrap());
    LiveGithubClient::with_base_url(networking, server.url())
}

// ============================================================================
// Live Client Tests
// ============================================================================

#[tokio::test]
async fn test_live_popular_repos_for_language() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "stars:>1 language:Ruby".into()),
            Matcher::UrlEncoded("sort".into(), "stars".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{
                "total_count": 2,
                "items": [
                    {"id": 1, "name": "rails", "full_name": "rails/rails",
                     "html_url": "https://github.com/rails/rails",
                     "owner": {"login": "rails", "avatar_url": "https://a/rails.png"},
                     "stargazers_count": 55000, "forks": 21000, "open_issues": 800,
                     "updated_at": "2024-05-01T00:00:00Z"},
                    {"id": 2, "name": "jekyll", "full_name": "jekyll/jekyll",
                     "html_url": "https://github.com/jekyll/jekyll",
                     "owner": {"login": "jekyll"},
                     "stargazers_count": 48000}
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = live_client(&server);
    let repos = client
        .fetch_popular_repos(&Language::new("Ruby"))
        .await
        .unwrap();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "rails");
    assert_eq!(repos[0].owner.login, "rails");
    assert_eq!(repos[0].forks, 21000);
    // Provider order is kept and missing counters read as zero
    assert_eq!(repos[1].name, "jekyll");
    assert_eq!(repos[1].forks, 0);
    assert_eq!(repos[1].owner.avatar_url, "");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_live_popular_repos_all_has_no_language_filter() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::UrlEncoded("q".into(), "stars:>1".into()))
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let client = live_client(&server);
    let repos = client.fetch_popular_repos(&Language::all()).await.unwrap();

    assert!(repos.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_live_profile_success() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/sdras")
        .with_status(200)
        .with_body(
            r#"{"login": "sdras", "name": "Sarah Drasner", "location": null,
                "company": "Google", "followers": 100, "following": 5,
                "public_repos": 300, "avatar_url": "https://a/sdras.png",
                "html_url": "https://github.com/sdras"}"#,
        )
        .create_async()
        .await;

    let client = live_client(&server);
    let profile = client.fetch_profile(&Player::new("sdras")).await.unwrap();

    assert_eq!(profile.login, "sdras");
    assert_eq!(profile.name.as_deref(), Some("Sarah Drasner"));
    assert_eq!(profile.location, None);
    assert_eq!(profile.company.as_deref(), Some("Google"));
    assert_eq!(profile.followers, 100);
    assert_eq!(profile.public_repos, 300);
}

#[tokio::test]
async fn test_live_profile_null_counters_read_as_zero() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/ghost")
        .with_status(200)
        .with_body(r#"{"login": "ghost", "followers": null}"#)
        .create_async()
        .await;

    let client = live_client(&server);
    let profile = client.fetch_profile(&Player::new("ghost")).await.unwrap();

    assert_eq!(profile.followers, 0);
    assert_eq!(profile.following, 0);
    assert_eq!(profile.public_repos, 0);
}

#[tokio::test]
async fn test_live_profile_not_found_names_login() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/nobody-here")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let client = live_client(&server);
    let err = client
        .fetch_profile(&Player::new("nobody-here"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "nobody-here not found");
}

#[tokio::test]
async fn test_live_repos_requests_full_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/sdras/repos")
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(200)
        .with_body(
            r#"[{"name": "a", "owner": {"login": "sdras"}, "stargazers_count": 30},
                {"name": "b", "owner": {"login": "sdras"}, "stargazers_count": 20}]"#,
        )
        .create_async()
        .await;

    let client = live_client(&server);
    let repos = client.fetch_repos(&Player::new("sdras")).await.unwrap();

    assert_eq!(repos.iter().map(|r| r.stargazers_count).sum::<u64>(), 50);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_live_server_error_is_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/sdras")
        .with_status(500)
        .create_async()
        .await;

    let client = live_client(&server);
    let err = client.fetch_profile(&Player::new("sdras")).await.unwrap_err();

    assert!(matches!(
        err,
        GithubError::Network {
            source: NetworkingError::HttpStatus { status: 500, .. }
        }
    ));
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let networking = Arc::new(NetworkingManager::new(NetworkingConfig::default()).unwrap());
    let client = LiveGithubClient::with_base_url(networking, "http://localhost:1234/".to_string());

    assert_eq!(client.base_url(), "http://localhost:1234");
    assert_eq!(
        client.user_url(&Player::new("a b")),
        "http://localhost:1234/users/a%20b"
    );
}

// ============================================================================
// Mock Provider Tests
// ============================================================================

#[tokio::test]
async fn test_mock_popular_success_and_call_tracking() {
    let mock = MockGithubProvider::new()
        .with_popular("Ruby", Ok(vec![repo("rails", "rails", 10)]))
        .await;

    let repos = mock.fetch_popular_repos(&Language::new("Ruby")).await.unwrap();

    assert_eq!(repos.len(), 1);
    assert_eq!(mock.call_count("popular:Ruby").await, 1);
    assert_eq!(mock.calls().await, vec!["popular:Ruby".to_string()]);
}

#[tokio::test]
async fn test_mock_unknown_user_is_not_found() {
    let mock = MockGithubProvider::new()
        .with_user(profile("sdras", 100), vec![])
        .await;

    assert!(mock.fetch_profile(&Player::new("sdras")).await.is_ok());

    let err = mock.fetch_profile(&Player::new("nobody")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_mock_configured_error() {
    let mock = MockGithubProvider::new()
        .with_popular("CSS", Err("boom".to_string()))
        .await;

    let err = mock
        .fetch_popular_repos(&Language::new("CSS"))
        .await
        .unwrap_err();
    assert!(matches!(err, GithubError::Provider { message } if message == "boom"));
}

#[tokio::test]
async fn test_mock_gate_holds_lookup_until_notified() {
    let gate = Arc::new(Notify::new());
    let mock = MockGithubProvider::new()
        .with_popular("Java", Ok(vec![]))
        .await
        .with_gate("popular:Java", gate.clone())
        .await;

    let java = Language::new("Java");
    let pending = mock.fetch_popular_repos(&java);
    tokio::pin!(pending);

    let early = tokio::time::timeout(std::time::Duration::from_millis(20), &mut pending).await;
    assert!(early.is_err(), "gated lookup should still be pending");

    gate.notify_one();
    assert!(pending.await.is_ok());
}
