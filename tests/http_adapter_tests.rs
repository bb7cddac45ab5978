//! Rate source and notifier adapters against a canned HTTP server.

mod support;

use std::time::Duration;

use fxwatch::adapter::outbound::notifier::line::LineNotifier;
use fxwatch::adapter::outbound::yahoo::YahooRateSource;
use fxwatch::domain::{AlertMessage, CurrencyPair, Rate};
use fxwatch::error::{DeliveryError, FetchError};
use fxwatch::port::{Notifier, RateSource};
use fxwatch::testkit::config;

use support::{serve_once, serve_once_after};

const CHART_OK: &str = r#"{"chart":{"result":[{"meta":{"symbol":"USDJPY=X","regularMarketPrice":151.234},"indicators":{"quote":[{"close":[150.9,null]}]}}],"error":null}}"#;

const CHART_CLOSE_ONLY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"USDJPY=X"},"indicators":{"quote":[{"close":[150.9,151.1,null]}]}}],"error":null}}"#;

const CHART_NOT_FOUND: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

const CHART_NEGATIVE: &str = r#"{"chart":{"result":[{"meta":{"regularMarketPrice":-1.0}}],"error":null}}"#;

fn yahoo(base_url: &str) -> YahooRateSource {
    YahooRateSource::from_config(&config::source(base_url), "USDJPY=X".to_string()).unwrap()
}

fn alert() -> AlertMessage {
    AlertMessage::threshold_reached(
        &CurrencyPair::default(),
        110.0,
        Rate::try_new(112.456).unwrap(),
    )
}

#[tokio::test]
async fn yahoo_reads_market_price() {
    let (url, request) = serve_once(200, CHART_OK).await;

    let rate = yahoo(&url).fetch().await.unwrap();

    assert!((rate.value() - 151.234).abs() < f64::EPSILON);
    let request = request.await.unwrap();
    let line = request.request_line();
    assert!(line.starts_with("GET /v8/finance/chart/USDJPY=X?"), "{line}");
    assert!(line.contains("range=1d"));
    assert!(line.contains("interval=1d"));
}

#[tokio::test]
async fn yahoo_falls_back_to_last_close() {
    let (url, _request) = serve_once(200, CHART_CLOSE_ONLY).await;

    let rate = yahoo(&url).fetch().await.unwrap();

    assert!((rate.value() - 151.1).abs() < f64::EPSILON);
}

#[tokio::test]
async fn yahoo_error_payload_has_no_price() {
    let (url, _request) = serve_once(200, CHART_NOT_FOUND).await;

    let result = yahoo(&url).fetch().await;

    assert!(matches!(result, Err(FetchError::NoPrice { ref symbol }) if symbol == "USDJPY=X"));
}

#[tokio::test]
async fn yahoo_server_error_is_status() {
    let (url, _request) = serve_once(500, "{}").await;

    let result = yahoo(&url).fetch().await;

    assert!(matches!(result, Err(FetchError::Status { status: 500 })));
}

#[tokio::test]
async fn yahoo_garbage_is_malformed() {
    let (url, _request) = serve_once(200, "<html>rate limited</html>").await;

    let result = yahoo(&url).fetch().await;

    assert!(matches!(result, Err(FetchError::Malformed(_))));
}

#[tokio::test]
async fn yahoo_negative_price_is_invalid() {
    let (url, _request) = serve_once(200, CHART_NEGATIVE).await;

    let result = yahoo(&url).fetch().await;

    assert!(matches!(result, Err(FetchError::InvalidRate(_))));
}

#[tokio::test]
async fn yahoo_slow_server_times_out() {
    let (url, _request) = serve_once_after(200, CHART_OK, Duration::from_secs(3)).await;

    let result = yahoo(&url).fetch().await;

    match result {
        Err(FetchError::Http(e)) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn line_posts_bearer_token_and_message() {
    let (url, request) = serve_once(200, r#"{"status":200,"message":"ok"}"#).await;
    let notifier =
        LineNotifier::from_config(&config::notifier(&format!("{url}/api/notify"), Some("tok")))
            .unwrap();

    notifier.send(&alert()).await.unwrap();

    let request = request.await.unwrap();
    assert_eq!(request.request_line(), "POST /api/notify HTTP/1.1");
    assert_eq!(request.header("authorization"), Some("Bearer tok"));
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert!(request.body.starts_with("message="), "{}", request.body);
    assert!(request.body.contains("110.00"));
    assert!(request.body.contains("112.46"));
}

#[tokio::test]
async fn line_rejection_keeps_status_and_body() {
    let (url, _request) = serve_once(401, r#"{"status":401,"message":"Invalid access token"}"#).await;
    let notifier =
        LineNotifier::from_config(&config::notifier(&url, Some("expired"))).unwrap();

    let result = notifier.send(&alert()).await;

    match result {
        Err(DeliveryError::Rejected { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid access token"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn line_unreachable_endpoint_is_http_error() {
    let notifier =
        LineNotifier::from_config(&config::notifier("http://127.0.0.1:1/notify", Some("tok")))
            .unwrap();

    let result = notifier.send(&alert()).await;

    assert!(matches!(result, Err(DeliveryError::Http(_))));
}
