use super::*;
use crate::api::github::MockGithubProvider;
use crate::testing::repo;
use tokio::sync::Notify;

#[tokio::test]
async fn test_first_request_fetches_and_stores() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("Ruby", Ok(vec![repo("rails", "rails", 55000)]))
            .await,
    );
    let loader = PopularLoader::new(provider.clone());
    let ruby = Language::new("Ruby");

    assert!(loader.store().is_loading(&ruby));

    let outcome = loader.request(&ruby).await;

    assert_eq!(outcome, RequestOutcome::Fetched { count: 1 });
    assert!(!loader.store().is_loading(&ruby));
    assert_eq!(loader.store().state().results(&ruby).unwrap()[0].name, "rails");
    assert!(loader.has_requested(&ruby).await);
}

#[tokio::test]
async fn test_repeat_request_is_cache_hit() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("Ruby", Ok(vec![repo("rails", "rails", 1)]))
            .await,
    );
    let loader = PopularLoader::new(provider.clone());
    let ruby = Language::new("Ruby");

    loader.request(&ruby).await;
    let outcome = loader.request(&ruby).await;

    assert_eq!(outcome, RequestOutcome::Cached);
    assert_eq!(provider.call_count("popular:Ruby").await, 1);
}

#[tokio::test]
async fn test_concurrent_requests_issue_one_fetch() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("Python", Ok(vec![repo("django", "django", 1)]))
            .await
            .with_gate("popular:Python", gate.clone())
            .await,
    );
    let loader = PopularLoader::new(provider.clone());
    let python = Language::new("Python");

    // The first request is parked inside the provider while the second arrives
    let (first, second) = tokio::join!(loader.request(&python), async {
        let outcome = loader.request(&python).await;
        gate.notify_one();
        outcome
    });

    assert_eq!(first, RequestOutcome::Fetched { count: 1 });
    assert_eq!(second, RequestOutcome::Cached);
    assert_eq!(provider.call_count("popular:Python").await, 1);
}

#[tokio::test]
async fn test_in_flight_language_is_recorded_before_completion() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("Java", Ok(vec![]))
            .await
            .with_gate("popular:Java", gate.clone())
            .await,
    );
    let loader = PopularLoader::new(provider);
    let java = Language::new("Java");

    let pending = loader.request(&java);
    tokio::pin!(pending);
    let early = tokio::time::timeout(std::time::Duration::from_millis(20), &mut pending).await;
    assert!(early.is_err());

    assert!(loader.has_requested(&java).await);
    assert!(loader.store().is_loading(&java));

    gate.notify_one();
    assert_eq!(pending.await, RequestOutcome::Fetched { count: 0 });
}

#[tokio::test]
async fn test_failed_language_is_not_retried() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("CSS", Err("secondary rate limit".to_string()))
            .await,
    );
    let loader = PopularLoader::new(provider.clone());
    let css = Language::new("CSS");

    let outcome = loader.request(&css).await;
    let RequestOutcome::Failed { message } = outcome.clone() else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.contains("CSS"));
    assert!(message.contains("secondary rate limit"));
    assert_eq!(loader.store().state().error(), Some(message.as_str()));

    assert_eq!(loader.request(&css).await, RequestOutcome::Cached);
    assert_eq!(provider.call_count("popular:CSS").await, 1);
}

#[tokio::test]
async fn test_failure_keeps_earlier_results() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("All", Ok(vec![repo("r1", "a", 1)]))
            .await
            .with_popular("Java", Err("boom".to_string()))
            .await,
    );
    let loader = PopularLoader::new(provider);

    loader.request(&Language::all()).await;
    loader.request(&Language::new("Java")).await;

    let state = loader.store().state();
    assert!(state.error().is_some());
    assert_eq!(state.results(&Language::all()).unwrap()[0].name, "r1");
}

#[tokio::test]
async fn test_all_then_ruby_scenario() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("All", Ok(vec![repo("r1", "a", 1)]))
            .await
            .with_popular("Ruby", Ok(vec![repo("r2", "b", 1)]))
            .await,
    );
    let loader = PopularLoader::new(provider.clone());

    for language in ["All", "Ruby"] {
        loader.request(&Language::new(language)).await;
    }

    let state = loader.store().state();
    assert_eq!(state.results(&Language::all()).unwrap()[0].name, "r1");
    assert_eq!(state.results(&Language::new("Ruby")).unwrap()[0].name, "r2");
    assert_eq!(state.error(), None);
    assert_eq!(state.languages().len(), 2);
    assert_eq!(
        provider.calls().await,
        vec!["popular:All".to_string(), "popular:Ruby".to_string()]
    );
    assert_eq!(
        loader.requested().await,
        vec![Language::all(), Language::new("Ruby")]
    );
}

#[tokio::test]
async fn test_subscriber_sees_completion() {
    let provider = Arc::new(
        MockGithubProvider::new()
            .with_popular("All", Ok(vec![repo("r1", "a", 1)]))
            .await,
    );
    let loader = PopularLoader::new(provider);
    let mut receiver = loader.store().subscribe();

    loader.request(&Language::all()).await;

    assert!(receiver.has_changed().unwrap());
    assert!(!receiver.borrow_and_update().is_loading(&Language::all()));
}

#[tokio::test]
async fn test_blank_language_is_rejected_without_fetch() {
    let provider = Arc::new(MockGithubProvider::new());
    let loader = PopularLoader::new(provider.clone());

    assert_eq!(loader.request(&Language::new("")).await, RequestOutcome::Rejected);
    assert_eq!(loader.request(&Language::new("  ")).await, RequestOutcome::Rejected);

    assert!(provider.calls().await.is_empty());
    assert!(loader.requested().await.is_empty());
    assert_eq!(loader.store().state().error(), None);
}
