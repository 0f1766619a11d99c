//! Offline tests for the fetch path.
//!
//! Each test starts a throwaway HTTP/1.1 server on `127.0.0.1:0` that answers
//! with canned responses, points `base_url` at it, and records every request
//! head so key placement can be checked.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::timeout;

use coinscope::prelude::*;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);
const MINUTE: i64 = 60_000;
const HOUR: i64 = 60 * MINUTE;

#[derive(Clone)]
struct Canned {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl Canned {
    fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Request heads received so far, lower-cased.
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.contains(path)).count()
    }
}

/// Serves `routes` until the test ends. The first route whose path fragment
/// appears in the request line wins; anything else gets a 404.
async fn serve(routes: Vec<(&'static str, Canned)>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 16 * 1024];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let head = String::from_utf8_lossy(&buf[..read]).to_lowercase();
                let request_line = head.lines().next().unwrap_or_default().to_string();
                log.lock().unwrap().push(head);

                let canned = routes
                    .iter()
                    .find(|(path, _)| request_line.contains(path))
                    .map(|(_, c)| c.clone())
                    .unwrap_or_else(|| Canned::json(404, r#"{"error":"not found"}"#));

                let mut resp = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
                    canned.status,
                    canned.body.len()
                );
                for (name, value) in &canned.headers {
                    resp.push_str(&format!("{}: {}\r\n", name, value));
                }
                resp.push_str("\r\n");
                resp.push_str(&canned.body);
                let _ = socket.write_all(resp.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockServer {
        base_url: format!("http://{}", addr),
        requests,
    }
}

fn client_for(server: &MockServer) -> MarketDataClient {
    MarketDataClient::builder()
        .base_url(&server.base_url)
        .build()
        .unwrap()
}

const OHLC_BODY: &str = "[[0, 10.0, 12.0, 9.0, 11.0], [14400000, 11.0, 11.5, 10.0, 10.5]]";

fn market_chart_body() -> String {
    format!(
        r#"{{"prices": [[0, 10.0], [{t1}, 10.5]],
            "market_caps": [[0, 1e9], [{t1}, 1.1e9]],
            "total_volumes": [[{v0}, 42.0], [{v1}, 42.0]]}}"#,
        t1 = 4 * HOUR,
        v0 = 10 * MINUTE,
        v1 = 4 * HOUR + 10 * MINUTE
    )
}

fn ohlc_mode() -> ChartMode {
    ChartMode::new(DataType::Prices, ChartType::Ohlc)
}

async fn series(client: &MarketDataClient, mode: ChartMode) -> Result<Vec<TimeSeriesPoint>, SdkError> {
    timeout(
        TEST_TIMEOUT,
        client
            .charts()
            .series(&CoinId::new("bitcoin"), &Currency::usd(), Timeframe::Week1, mode),
    )
    .await
    .expect("request should not hang")
}

/// Error returned by `/ping` when the server answers with `resp`.
async fn ping_error(resp: Canned) -> SdkError {
    let server = serve(vec![("/ping", resp)]).await;
    timeout(TEST_TIMEOUT, client_for(&server).ping())
        .await
        .expect("request should not hang")
        .unwrap_err()
}

// =============================================================================
// Dual fetch
// =============================================================================

#[tokio::test]
async fn test_ohlc_series_joins_candles_with_volume() {
    let server = serve(vec![
        ("/ohlc", Canned::json(200, OHLC_BODY)),
        ("/market_chart", Canned::json(200, &market_chart_body())),
    ])
    .await;

    let points = series(&client_for(&server), ohlc_mode()).await.unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].high, 12.0);
    assert_eq!(points[1].low, 10.0);
    assert_eq!(
        points.iter().map(|p| p.volume).collect::<Vec<_>>(),
        vec![42.0, 42.0]
    );
    assert_eq!(server.count("/ohlc"), 1);
    assert_eq!(server.count("/market_chart"), 1);
}

#[tokio::test]
async fn test_ohlc_series_fails_when_volume_request_fails() {
    let server = serve(vec![
        ("/ohlc", Canned::json(200, OHLC_BODY)),
        ("/market_chart", Canned::json(500, "boom")),
    ])
    .await;

    let err = series(&client_for(&server), ohlc_mode()).await.unwrap_err();
    assert!(
        matches!(err, SdkError::Http(HttpError::ServerError { status: 500, .. })),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_ohlc_series_fails_when_candle_request_fails() {
    let server = serve(vec![
        ("/ohlc", Canned::json(401, r#"{"error":"bad key"}"#)),
        ("/market_chart", Canned::json(200, &market_chart_body())),
    ])
    .await;

    let err = series(&client_for(&server), ohlc_mode()).await.unwrap_err();
    assert!(err.is_unauthorized(), "got {err:?}");
}

#[tokio::test]
async fn test_line_series_issues_single_request() {
    let server = serve(vec![("/market_chart", Canned::json(200, &market_chart_body()))]).await;

    let points = series(&client_for(&server), ChartMode::default()).await.unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].open, 10.0);
    assert_eq!(server.count("/ohlc"), 0);
    assert_eq!(server.count("/market_chart"), 1);
}

// =============================================================================
// Status mapping
// =============================================================================

#[tokio::test]
async fn test_auth_statuses_map_to_unauthorized() {
    for status in [401, 403] {
        let err = ping_error(Canned::json(status, "{}")).await;
        assert!(err.is_unauthorized(), "{status} gave {err:?}");
    }
}

#[tokio::test]
async fn test_429_maps_to_rate_limited_with_retry_after() {
    let err = ping_error(Canned::json(429, "{}").with_header("retry-after", "7")).await;
    assert!(
        matches!(
            err,
            SdkError::Http(HttpError::RateLimited {
                retry_after_ms: Some(7_000)
            })
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_other_statuses() {
    let err = ping_error(Canned::json(404, "missing")).await;
    assert!(matches!(err, SdkError::Http(HttpError::NotFound(ref body)) if body == "missing"));

    let err = ping_error(Canned::json(400, "bad days")).await;
    assert!(matches!(err, SdkError::Http(HttpError::BadRequest(_))));

    let err = ping_error(Canned::json(502, "gateway")).await;
    assert!(matches!(
        err,
        SdkError::Http(HttpError::ServerError { status: 502, .. })
    ));
}

#[tokio::test]
async fn test_huge_retry_after_maps_to_rate_limited() {
    let server = serve(vec![(
        "/market_chart",
        Canned::json(429, "{}").with_header("retry-after", "99999999999999999"),
    )])
    .await;

    let err = series(&client_for(&server), ChartMode::default()).await.unwrap_err();
    assert!(err.is_rate_limited(), "got {err:?}");
}

// =============================================================================
// Retry
// =============================================================================

#[tokio::test]
async fn test_no_retry_policy_does_not_wait_for_retry_after() {
    let server = serve(vec![(
        "/ping",
        Canned::json(429, "{}").with_header("retry-after", "30"),
    )])
    .await;

    let err = ping_error_from(&client_for(&server)).await;
    assert!(err.is_rate_limited());
    assert_eq!(server.count("/ping"), 1);
}

#[tokio::test]
async fn test_retry_after_beyond_max_delay_is_not_retried() {
    let server = serve(vec![(
        "/ping",
        Canned::json(429, "{}").with_header("retry-after", "30"),
    )])
    .await;
    let client = MarketDataClient::builder()
        .base_url(&server.base_url)
        .retry_policy(RetryPolicy::Idempotent)
        .build()
        .unwrap();

    let err = ping_error_from(&client).await;
    assert!(err.is_rate_limited());
    assert_eq!(server.count("/ping"), 1);
}

#[tokio::test]
async fn test_rate_limited_request_is_retried_when_opted_in() {
    let server = serve(vec![(
        "/ping",
        Canned::json(429, "{}").with_header("retry-after", "0"),
    )])
    .await;
    let client = MarketDataClient::builder()
        .base_url(&server.base_url)
        .retry_policy(RetryPolicy::Idempotent)
        .build()
        .unwrap();

    let err = ping_error_from(&client).await;
    assert!(err.is_rate_limited());
    assert_eq!(server.count("/ping"), 1 + RetryConfig::idempotent().max_retries as usize);
}

async fn ping_error_from(client: &MarketDataClient) -> SdkError {
    timeout(TEST_TIMEOUT, client.ping())
        .await
        .expect("request should not wait out retry-after")
        .unwrap_err()
}

// =============================================================================
// API key placement
// =============================================================================

const PONG: &str = r#"{"gecko_says": "(V3) To the Moon!"}"#;

#[tokio::test]
async fn test_demo_key_sent_as_header() {
    let server = serve(vec![("/ping", Canned::json(200, PONG))]).await;
    let client = MarketDataClient::builder()
        .plan(ApiPlan::Demo)
        .api_key("CG-demo")
        .base_url(&server.base_url)
        .build()
        .unwrap();

    let pong = client.ping().await.unwrap();
    assert_eq!(pong.gecko_says, "(V3) To the Moon!");

    let requests = server.requests();
    let head = &requests[0];
    assert!(head.contains("x-cg-demo-api-key: cg-demo"), "{head}");
    assert!(!head.contains("x_cg_demo_api_key="));
}

#[tokio::test]
async fn test_pro_key_sent_as_query_param() {
    let server = serve(vec![("/ping", Canned::json(200, PONG))]).await;
    let client = MarketDataClient::builder()
        .plan(ApiPlan::Pro)
        .api_key("CG-pro")
        .key_placement(KeyPlacement::Query)
        .base_url(&server.base_url)
        .build()
        .unwrap();

    client.ping().await.unwrap();

    let requests = server.requests();
    let head = &requests[0];
    let request_line = head.lines().next().unwrap();
    assert!(request_line.contains("/ping?x_cg_pro_api_key=cg-pro"), "{request_line}");
    assert!(!head.contains("x-cg-pro-api-key:"));
}

#[tokio::test]
async fn test_public_plan_sends_no_key() {
    let server = serve(vec![("/ping", Canned::json(200, PONG))]).await;
    let client = MarketDataClient::builder()
        .api_key("CG-ignored")
        .base_url(&server.base_url)
        .build()
        .unwrap();

    client.ping().await.unwrap();
    assert!(!server.requests()[0].contains("cg-ignored"));
}

#[tokio::test]
async fn test_rotated_key_used_on_next_request() {
    let server = serve(vec![("/ping", Canned::json(200, PONG))]).await;
    let client = MarketDataClient::builder()
        .plan(ApiPlan::Demo)
        .api_key("CG-old")
        .base_url(&server.base_url)
        .build()
        .unwrap();

    client.ping().await.unwrap();
    client.set_api_key(Some("CG-new".to_string())).await;
    client.ping().await.unwrap();

    let requests = server.requests();
    assert!(requests[0].contains("x-cg-demo-api-key: cg-old"));
    assert!(requests[1].contains("x-cg-demo-api-key: cg-new"));
}

// =============================================================================
// Controller refresh
// =============================================================================

#[tokio::test]
async fn test_refresh_uses_client_tuning_for_zoom() {
    let server = serve(vec![("/market_chart", Canned::json(200, &market_chart_body()))]).await;
    let client = MarketDataClient::builder()
        .base_url(&server.base_url)
        .tuning(ChartTuning {
            zoom_factor: 0.5,
            ..ChartTuning::default()
        })
        .build()
        .unwrap();

    let mut chart = ChartController::new(ChartSelection::new("bitcoin"));
    assert!(timeout(TEST_TIMEOUT, chart.refresh(&client.charts())).await.unwrap());
    assert_eq!(chart.tuning().zoom_factor, 0.5);

    let full = chart.visible_bounds().unwrap();
    chart.gesture(GestureEvent::PointerEnter);
    assert!(chart.gesture(GestureEvent::Wheel { delta_y: -1.0 }));
    let zoomed = chart.visible_bounds().unwrap();
    assert!((zoomed.span() - full.span() * 0.5).abs() < 1e-3);
}
