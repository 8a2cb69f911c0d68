//! Contract tests for public-address detection.

use driftdns_client::EchoClient;
use driftdns_core::{DetectorConfig, DriftError};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn detector_for(server: &MockServer) -> DetectorConfig {
    DetectorConfig {
        ipv4_url: format!("{}/v4", server.uri()),
        ipv6_url: format!("{}/v6", server.uri()),
    }
}

#[tokio::test]
async fn test_v4_body_is_trimmed_and_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.9\n"))
        .expect(1)
        .mount(&server)
        .await;

    let echo = EchoClient::new(&detector_for(&server)).unwrap();
    let addr = echo.lookup_v4().await.unwrap();
    assert_eq!(addr, Ipv4Addr::new(203, 0, 113, 9));
}

#[tokio::test]
async fn test_v6_body_is_trimmed_and_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v6"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  2001:db8::7\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let echo = EchoClient::new(&detector_for(&server)).unwrap();
    let addr = echo.lookup_v6().await.unwrap();
    assert_eq!(addr, "2001:db8::7".parse::<Ipv6Addr>().unwrap());
}

#[tokio::test]
async fn test_detection_requests_carry_product_user_agent() {
    let server = MockServer::start().await;

    let agent = format!("driftdns/{}", env!("CARGO_PKG_VERSION"));
    Mock::given(method("GET"))
        .and(path("/v4"))
        .and(header("user-agent", agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.9"))
        .expect(1)
        .mount(&server)
        .await;

    let echo = EchoClient::new(&detector_for(&server)).unwrap();
    echo.lookup_v4().await.unwrap();
}

#[tokio::test]
async fn test_garbage_body_is_an_invalid_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>captive portal</body></html>"),
        )
        .mount(&server)
        .await;

    let echo = EchoClient::new(&detector_for(&server)).unwrap();
    let err = echo.lookup_v4().await.unwrap_err();
    assert!(matches!(err, DriftError::InvalidAddress(_)));
}

#[tokio::test]
async fn test_wrong_family_answer_is_rejected() {
    let server = MockServer::start().await;

    // A v6 answer on the v4 lookup must not be accepted as a candidate.
    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2001:db8::7"))
        .mount(&server)
        .await;

    let echo = EchoClient::new(&detector_for(&server)).unwrap();
    assert!(matches!(
        echo.lookup_v4().await.unwrap_err(),
        DriftError::InvalidAddress(_)
    ));
}

#[tokio::test]
async fn test_error_status_fails_detection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let echo = EchoClient::new(&detector_for(&server)).unwrap();
    assert!(matches!(
        echo.lookup_v4().await.unwrap_err(),
        DriftError::Http(_)
    ));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("203.0.113.9")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let echo = EchoClient::with_timeout(&detector_for(&server), Duration::from_secs(1)).unwrap();
    let err = echo.lookup_v4().await.unwrap_err();
    assert!(matches!(err, DriftError::Timeout(1)));
    assert!(err.is_retryable());
}

#[test]
fn test_malformed_detector_url_is_a_config_error() {
    let config = DetectorConfig {
        ipv4_url: String::from("not a url"),
        ipv6_url: String::from("https://ipv6.icanhazip.com"),
    };
    assert!(matches!(
        EchoClient::new(&config).unwrap_err(),
        DriftError::Config(_)
    ));
}
