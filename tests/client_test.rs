use reddit_get::{
    reddit::{RATELIMIT, Reddit, RedditClient, RedditError, Subreddit},
    types::{Credentials, TimeFilterOption},
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

fn app_credentials() -> Credentials {
    Credentials {
        client_id: "testid".into(),
        client_secret: "testsecret".into(),
        user_agent: "testuseragent".into(),
        username: None,
        password: None,
    }
}

fn client(server: &MockServer, credentials: Credentials) -> RedditClient {
    RedditClient::with_base_urls(credentials, server.uri(), server.uri()).unwrap()
}

fn listing(titles: &[&str]) -> Value {
    let children: Vec<Value> = titles
        .iter()
        .map(|title| json!({"kind": "t3", "data": {"title": title, "author": "testauthor", "score": 1}}))
        .collect();
    json!({"kind": "Listing", "data": {"after": null, "children": children}})
}

async fn mock_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test_access_token",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "*",
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_top_listing() {
    let server = MockServer::start().await;
    mock_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/r/test/top"))
        .and(query_param("t", "week"))
        .and(query_param("limit", "2"))
        .and(header("authorization", "Bearer test_access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["first", "second"])))
        .expect(1)
        .mount(&server)
        .await;

    let reddit = client(&server, app_credentials());
    let subreddit = reddit.subreddit("test").unwrap();
    let posts = subreddit.top(TimeFilterOption::Week, 2).await.unwrap();

    let titles: Vec<String> = posts.iter().filter_map(|p| p.title()).collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(posts[0].field("author").as_deref(), Some("testauthor"));
    assert_eq!(posts[0].field("score").as_deref(), Some("1"));
}

#[tokio::test]
async fn test_token_is_reused() {
    let server = MockServer::start().await;
    mock_token(&server).await;
    for sort in ["hot", "new", "randomrising"] {
        Mock::given(method("GET"))
            .and(path(format!("/r/test/{sort}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[sort])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let reddit = client(&server, app_credentials());
    let subreddit = reddit.subreddit("r/test").unwrap();
    assert_eq!(subreddit.display_name(), "test");

    assert_eq!(subreddit.hot(1).await.unwrap()[0].title().as_deref(), Some("hot"));
    assert_eq!(subreddit.new(1).await.unwrap()[0].title().as_deref(), Some("new"));
    assert_eq!(
        subreddit.random_rising(1).await.unwrap()[0].title().as_deref(),
        Some("randomrising")
    );
}

#[tokio::test]
async fn test_empty_subreddit_name() {
    let server = MockServer::start().await;
    let reddit = client(&server, app_credentials());

    match reddit.subreddit("  ") {
        Err(err) => assert!(err.is_subreddit_missing()),
        Ok(_) => panic!("empty name should not resolve"),
    }
}

#[tokio::test]
async fn test_rate_limited_status() {
    let server = MockServer::start().await;
    mock_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/r/test/hot"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let reddit = client(&server, app_credentials());
    let err = reddit.subreddit("test").unwrap().hot(10).await.unwrap_err();
    assert!(err.is_rate_limited());
    assert!(err.details().starts_with(RATELIMIT));
}

#[tokio::test]
async fn test_missing_subreddit_statuses() {
    for response in [
        ResponseTemplate::new(404),
        ResponseTemplate::new(403),
        ResponseTemplate::new(302).insert_header("location", "/subreddits/search?q=nothere"),
    ] {
        let server = MockServer::start().await;
        mock_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/r/nothere/new"))
            .respond_with(response)
            .mount(&server)
            .await;

        let reddit = client(&server, app_credentials());
        let err = reddit
            .subreddit("nothere")
            .unwrap()
            .new(10)
            .await
            .unwrap_err();
        assert!(err.is_subreddit_missing(), "unexpected error: {err}");
    }
}

#[tokio::test]
async fn test_embedded_api_errors() {
    let server = MockServer::start().await;
    mock_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/r/test/rising"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [["BAD_SR_NAME", "that name isn't going to work", "sr"]]}
        })))
        .mount(&server)
        .await;

    let reddit = client(&server, app_credentials());
    let err = reddit
        .subreddit("test")
        .unwrap()
        .rising(10)
        .await
        .unwrap_err();

    match err {
        RedditError::Api(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].error_type, "BAD_SR_NAME");
            assert_eq!(items[0].field, "sr");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    mock_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/r/test/gilded"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let reddit = client(&server, app_credentials());
    let err = reddit
        .subreddit("test")
        .unwrap()
        .gilded(10)
        .await
        .unwrap_err();

    assert!(!err.is_rate_limited());
    assert!(err.details().starts_with("HTTP_500"));
}

#[tokio::test]
async fn test_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let reddit = client(&server, app_credentials());
    let err = reddit
        .subreddit("test")
        .unwrap()
        .controversial(TimeFilterOption::All, 10)
        .await
        .unwrap_err();
    assert!(err.details().starts_with("INVALID_GRANT"));
}

#[tokio::test]
async fn test_password_grant_and_me() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=testusername"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user_token",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .and(header("authorization", "Bearer user_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "testusername"})))
        .mount(&server)
        .await;

    let credentials = Credentials {
        username: Some("testusername".into()),
        password: Some("testpassword".into()),
        ..app_credentials()
    };
    let reddit = client(&server, credentials);

    let me = reddit.me().await.unwrap();
    assert_eq!(me.name, "testusername");
}

#[tokio::test]
async fn test_unreachable_host() {
    let reddit =
        RedditClient::with_base_urls(app_credentials(), "http://127.0.0.1:1", "http://127.0.0.1:1")
            .unwrap();

    let err = reddit.subreddit("test").unwrap().hot(1).await.unwrap_err();
    assert!(matches!(err, RedditError::Transport(_)));
}

#[tokio::test]
async fn test_huge_token_lifetime() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test_access_token",
            "expires_in": u64::MAX,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/test/hot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["first"])))
        .expect(2)
        .mount(&server)
        .await;

    let reddit = client(&server, app_credentials());
    let subreddit = reddit.subreddit("test").unwrap();

    assert_eq!(subreddit.hot(1).await.unwrap().len(), 1);
    assert_eq!(subreddit.hot(1).await.unwrap().len(), 1);
}
