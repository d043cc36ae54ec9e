//! Integration tests for the feed operation
//!
//! These tests use wiremock to stand in for the remote feed and drive the
//! whole pipeline through the real HTTP transport.

use feedrelay::config::Config;
use feedrelay::fetch::{Fetcher, HttpTransport, Transport};
use feedrelay::output::{missing_source_message, TIMEOUT_MESSAGE, UNREACHABLE_MESSAGE};
use feedrelay::{FeedError, FeedResult, FeedService};
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Example Blog</title>
    <item>
      <title>Older post</title>
      <link>https://blog.example.com/older</link>
      <pubDate>Mon, 01 Jan 2024 08:00:00 GMT</pubDate>
      <description><![CDATA[<p>First &amp; <b>foremost</b></p>]]></description>
      <guid isPermaLink="false">post-1</guid>
    </item>
    <item>
      <title>Newer post</title>
      <link>https://blog.example.com/newer</link>
      <pubDate>Tue, 02 Jan 2024 08:00:00 GMT</pubDate>
      <content:encoded><![CDATA[<p>Body only in content</p>]]></content:encoded>
    </item>
  </channel>
</rss>"#;

const SINGLE_ITEM: &str = r#"<rss><channel>
  <item>
    <title>Only post</title>
    <link>https://blog.example.com/only</link>
    <pubDate>Mon, 01 Jan 2024 08:00:00 GMT</pubDate>
    <description>Just one</description>
  </item>
</channel></rss>"#;

/// Wraps the HTTP transport and counts outgoing requests
struct CountingTransport {
    inner: HttpTransport,
    calls: AtomicUsize,
}

impl CountingTransport {
    fn new(config: &Config) -> Self {
        Self {
            inner: HttpTransport::new(&config.fetch, &config.user_agent).unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for CountingTransport {
    async fn get(&self, url: &str) -> Result<String, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(url).await
    }
}

/// Creates a test configuration pointing at `url`
fn create_test_config(url: Option<String>, timeout_ms: u64, retries: u32) -> Config {
    let mut config = Config::default();
    config.source.url = url;
    config.fetch.timeout_ms = timeout_ms;
    config.fetch.retries = retries;
    config
}

fn counting_service(config: &Config) -> FeedService<CountingTransport> {
    FeedService::new(Fetcher::from_config(CountingTransport::new(config), config))
}

async fn serve_feed(mock_server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_full_feed_newest_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .and(header_exists("accept"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(FEED),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 2);
    let service = FeedService::from_config(&config).unwrap();

    let result = service.load().await;

    assert_eq!(result.error, None);
    assert_eq!(result.total, 2);
    assert_eq!(result.items.len(), 2);

    let newer = &result.items[0];
    assert_eq!(newer.title, "Newer post");
    assert_eq!(newer.link, "https://blog.example.com/newer");
    assert_eq!(newer.description, "Body only in content");
    assert_eq!(newer.guid.as_deref(), Some("https://blog.example.com/newer"));

    let older = &result.items[1];
    assert_eq!(older.title, "Older post");
    assert_eq!(older.description, "First & foremost");
    assert_eq!(older.guid.as_deref(), Some("post-1"));
}

#[tokio::test]
async fn test_envelope_json_shape() {
    let mock_server = MockServer::start().await;
    serve_feed(&mock_server, 200, FEED).await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 0);
    let result = FeedService::from_config(&config).unwrap().load().await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total"], 2);
    assert!(json.get("error").is_none());

    let item = &json["items"][0];
    assert_eq!(item["pubDate"], "Tue, 02 Jan 2024 08:00:00 GMT");
    for key in ["title", "link", "pubDate", "description"] {
        assert!(item[key].is_string(), "missing {}", key);
    }
}

#[tokio::test]
async fn test_single_item_behaves_like_list() {
    let mock_server = MockServer::start().await;
    serve_feed(&mock_server, 200, SINGLE_ITEM).await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 0);
    let result = FeedService::from_config(&config).unwrap().load().await;

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].title, "Only post");
    assert_eq!(result.items[0].description, "Just one");
}

#[tokio::test]
async fn test_transient_status_retried_then_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 2);
    let service = counting_service(&config);

    let result = service.load().await;

    assert!(result.items.is_empty());
    assert_eq!(result.total, 0);
    let message = result.error.unwrap();
    assert!(message.starts_with("Failed to fetch feed: "));
    assert!(message.contains("503"));
    assert_eq!(service.fetcher().transport().calls(), 3);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 2);
    let service = counting_service(&config);

    let result = service.load().await;

    assert!(result.error.unwrap().contains("404"));
    assert_eq!(service.fetcher().transport().calls(), 1);
}

#[tokio::test]
async fn test_timeout_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(FEED)
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 200, 0);
    let result = FeedService::from_config(&config).unwrap().load().await;

    assert_eq!(result, FeedResult::failure(TIMEOUT_MESSAGE));
}

#[tokio::test]
async fn test_malformed_document() {
    let mock_server = MockServer::start().await;
    serve_feed(&mock_server, 200, "<rss><channel><item><title>cut off").await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 2);
    let service = counting_service(&config);

    let result = service.load().await;

    assert!(result.items.is_empty());
    let message = result.error.unwrap();
    assert!(message.starts_with("Failed to fetch feed: XML parse error"));
    assert_eq!(service.fetcher().transport().calls(), 1);
}

#[tokio::test]
async fn test_document_without_items() {
    let mock_server = MockServer::start().await;
    serve_feed(&mock_server, 200, "<rss><channel><title>Empty</title></channel></rss>").await;

    let config = create_test_config(Some(format!("{}/rss.xml", mock_server.uri())), 5_000, 0);
    let result = FeedService::from_config(&config).unwrap().load().await;

    assert_eq!(result, FeedResult::success(Vec::new()));
}

#[tokio::test]
async fn test_missing_source_makes_no_request() {
    let config = create_test_config(None, 5_000, 2);
    let service = counting_service(&config);

    let result = service.load().await;

    assert_eq!(result, FeedResult::failure(missing_source_message()));
    assert_eq!(service.fetcher().transport().calls(), 0);
}

#[tokio::test]
async fn test_unreachable_source() {
    let config = create_test_config(Some("http://127.0.0.1:1/rss.xml".to_string()), 2_000, 2);
    let service = counting_service(&config);

    let result = service.load().await;

    assert_eq!(result, FeedResult::failure(UNREACHABLE_MESSAGE));
    assert_eq!(service.fetcher().transport().calls(), 3);
}
