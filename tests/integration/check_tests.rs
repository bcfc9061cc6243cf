//! Integration tests for the checker
//!
//! These tests use wiremock as a stand-in search engine and run the real
//! reqwest query function end-to-end.

use index_sentinel::checker::{CheckerEngine, HttpSearchQuery, Outcome, QueryResult, SearchQuery};
use index_sentinel::config::{Config, ProxyEntry};
use index_sentinel::proxy::{ProxyCredential, ProxyPool};
use index_sentinel::storage::{SqliteStorage, Storage};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<html><body><div id="search">
    <div class="g"><div class="tF2Cxc"><a href="https://example.com/">Example Domain</a></div></div>
</div></body></html>"#;

const NO_RESULTS_PAGE: &str = r#"<html><body><div id="search">
    <p>Your search did not match any documents.</p>
</div></body></html>"#;

/// Proxy address nothing listens on
const DEAD_PROXY: &str = "127.0.0.1:1";

fn engine_for(server: &MockServer, timeout: Duration) -> CheckerEngine<HttpSearchQuery> {
    let query = HttpSearchQuery::new(&server.uri(), timeout).expect("Failed to build query");
    CheckerEngine::new(query)
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_site_query_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:example.com"))
        .and(header("user-agent", "TestAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:missing.org"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NO_RESULTS_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server, Duration::from_secs(5));
    let result = engine
        .run(
            "TestAgent/1.0",
            &urls(&["example.com", "missing.org"]),
            &ProxyPool::empty(),
        )
        .await;

    assert_eq!(result.get("example.com"), Some(&Outcome::Indexed));
    assert_eq!(result.get("missing.org"), Some(&Outcome::NotIndexed));
}

#[tokio::test]
async fn test_error_status_is_other_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server, Duration::from_secs(5));
    let result = engine
        .run("ua", &urls(&["example.com"]), &ProxyPool::empty())
        .await;

    match result.get("example.com") {
        Some(Outcome::OtherError(message)) => {
            assert!(message.contains("429"), "unexpected message: {}", message)
        }
        other => panic!("expected OtherError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(RESULTS_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server, Duration::from_millis(300));
    let result = engine
        .run("ua", &urls(&["slow.com"]), &ProxyPool::empty())
        .await;

    assert_eq!(result.get("slow.com"), Some(&Outcome::Timeout));
}

#[tokio::test]
async fn test_dead_proxy_exhausts_pool_for_whole_batch() {
    let mock_server = MockServer::start().await;

    // Nothing may reach the search engine: the only proxy is dead.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pool = ProxyPool::new(vec![
        ProxyCredential::new(DEAD_PROXY, "user", "pw").expect("valid proxy")
    ]);

    let engine = engine_for(&mock_server, Duration::from_secs(5));
    let result = engine
        .run("ua", &urls(&["a.com", "b.com"]), &pool)
        .await;

    assert_eq!(result.get("a.com"), Some(&Outcome::AllProxiesFailed));
    assert_eq!(result.get("b.com"), Some(&Outcome::AllProxiesFailed));
}

/// Starts a proxy that refuses every tunnel with 407 and returns its address
async fn start_rejecting_proxy() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind proxy");
    let address = listener.local_addr().expect("No local address").to_string();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 407 Proxy Authentication Required\r\n\
                      Proxy-Authenticate: Basic realm=\"proxy\"\r\n\
                      Content-Length: 0\r\n\r\n",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    address
}

#[tokio::test]
async fn test_rejected_tunnel_is_proxy_failure() {
    let proxy_address = start_rejecting_proxy().await;
    let proxy = ProxyCredential::new(proxy_address, "user", "wrong").expect("valid proxy");

    let query = HttpSearchQuery::new("https://search.invalid", Duration::from_secs(5))
        .expect("Failed to build query");
    let result = query.query("a.com", "ua", Some(&proxy)).await;

    assert!(
        matches!(result, QueryResult::ProxyFailure(_)),
        "expected ProxyFailure, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_failover_to_live_proxy_keeps_it_for_later_urls() {
    let live_proxy = MockServer::start().await;

    // The live proxy answers every forwarded search with a results page.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(2)
        .mount(&live_proxy)
        .await;

    let pool = ProxyPool::new(vec![
        ProxyCredential::new(DEAD_PROXY, "user", "pw").expect("valid proxy"),
        ProxyCredential::new(live_proxy.address().to_string(), "user", "pw")
            .expect("valid proxy"),
    ]);

    let query = HttpSearchQuery::new("http://search.invalid", Duration::from_secs(5))
        .expect("Failed to build query");
    let engine = CheckerEngine::new(query);
    let result = engine
        .run("ua", &urls(&["a.com", "b.com"]), &pool)
        .await;

    assert_eq!(
        result.labelled(),
        vec![
            ("a.com".to_string(), "Indexed".to_string()),
            ("b.com".to_string(), "Indexed".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_direct_connection_failure_is_other_error() {
    // Connection errors without a proxy are not proxy failures
    let query = HttpSearchQuery::new(&format!("http://{}", DEAD_PROXY), Duration::from_secs(5))
        .expect("Failed to build query");
    let engine = CheckerEngine::new(query);

    let result = engine
        .run("ua", &urls(&["a.com"]), &ProxyPool::empty())
        .await;

    assert!(matches!(
        result.get("a.com"),
        Some(Outcome::OtherError(_))
    ));
}

#[tokio::test]
async fn test_full_check_writes_report_and_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:missing.org"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NO_RESULTS_PAGE))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let summary_path = dir.path().join("results.md");
    let database_path = dir.path().join("history.db");

    let mut config = Config::default();
    config.checker.user_agent = "TestAgent/1.0".to_string();
    config.checker.search_base_url = mock_server.uri();
    config.checker.timeout_secs = 5;
    config.targets.urls = urls(&["example.com", "missing.org"]);
    config.output.summary_path = summary_path.display().to_string();
    config.output.database_path = database_path.display().to_string();

    let batch = index_sentinel::check_indexation(&config)
        .await
        .expect("Check failed");

    assert_eq!(
        batch.labelled(),
        vec![
            ("example.com".to_string(), "Indexed".to_string()),
            ("missing.org".to_string(), "Not Indexed".to_string()),
        ]
    );

    let storage = SqliteStorage::new(&database_path).expect("Failed to open DB");
    let mut sinks: Vec<Box<dyn index_sentinel::output::ResultSink>> = vec![
        Box::new(index_sentinel::output::MarkdownReport::new(&summary_path)),
        Box::new(index_sentinel::output::HistorySink::new(storage, "hash", 0)),
    ];
    index_sentinel::output::export_batch(&batch, &mut sinks).expect("Export failed");

    let report = std::fs::read_to_string(&summary_path).expect("Report missing");
    assert!(report.contains("| example.com | Indexed |"));
    assert!(report.contains("| missing.org | Not Indexed |"));

    let storage = SqliteStorage::new(&database_path).expect("Failed to reopen DB");
    let run = storage
        .get_latest_run()
        .expect("Failed to query runs")
        .expect("No run recorded");
    let results = storage.get_results(run.id).expect("Failed to load results");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "example.com");
    assert_eq!(results[1].kind, "not_indexed");
}

#[tokio::test]
async fn test_malformed_proxy_aborts_before_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.checker.search_base_url = mock_server.uri();
    config.targets.urls = urls(&["a.com"]);
    config.proxies = vec![ProxyEntry {
        ip: "10.0.0.1/not-an-authority".to_string(),
        login: "user".to_string(),
        password: "pw".to_string(),
    }];

    let result = index_sentinel::check_indexation(&config).await;
    assert!(matches!(result, Err(index_sentinel::IndexError::Proxy(_))));
}
