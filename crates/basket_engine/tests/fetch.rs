use std::time::Duration;

use basket_engine::{
    CatalogProduct, FailureKind, FetchSettings, ProductFetcher, ReqwestProductFetcher,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, route: &str) -> FetchSettings {
    FetchSettings {
        endpoint: format!("{}{}", server.uri(), route),
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn fetcher_returns_products_in_payload_order() {
    basket_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "name": "Bread", "price": 2.00 },
            { "id": 1, "name": "Milk", "price": 1.50 },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestProductFetcher::new(settings_for(&server, "/products"));
    let products = fetcher.fetch_products().await.expect("fetch ok");

    assert_eq!(
        products,
        vec![
            CatalogProduct {
                id: 2,
                name: "Bread".to_string(),
                price_cents: 200,
            },
            CatalogProduct {
                id: 1,
                name: "Milk".to_string(),
                price_cents: 150,
            },
        ]
    );
}

#[tokio::test]
async fn fetcher_accepts_wrapped_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{ "id": 5, "name": "Eggs", "price": 3.29 }]
        })))
        .mount(&server)
        .await;

    let fetcher = ReqwestProductFetcher::new(settings_for(&server, "/catalog"));
    let products = fetcher.fetch_products().await.expect("fetch ok");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price_cents, 329);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestProductFetcher::new(settings_for(&server, "/missing"));
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_rejects_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestProductFetcher::new(settings_for(&server, "/products"));
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn fetcher_rejects_unexpected_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestProductFetcher::new(settings_for(&server, "/products"));
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server, "/slow")
    };
    let fetcher = ReqwestProductFetcher::new(settings);
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .insert_header("Content-Length", "11")
                .set_body_string("[         ]"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server, "/large")
    };
    let fetcher = ReqwestProductFetcher::new(settings);
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_invalid_endpoint() {
    let settings = FetchSettings {
        endpoint: "not a url".to_string(),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestProductFetcher::new(settings);
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn fetcher_stops_after_redirect_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/second"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/third"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 1,
        ..settings_for(&server, "/first")
    };
    let fetcher = ReqwestProductFetcher::new(settings);
    let err = fetcher.fetch_products().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn fetcher_follows_redirects_within_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/products"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Milk", "price": 1.50 },
        ])))
        .mount(&server)
        .await;

    let fetcher = ReqwestProductFetcher::new(settings_for(&server, "/old"));
    let products = fetcher.fetch_products().await.expect("fetch ok");

    assert_eq!(products.len(), 1);
}

/// Serves one chunked response without a Content-Length header.
async fn serve_chunked_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Transfer-Encoding: chunked\r\n\
             Connection: close\r\n\r\n\
             {:x}\r\n{}\r\n0\r\n\r\n",
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/products")
}

#[tokio::test]
async fn fetcher_caps_streamed_body_without_content_length() {
    let endpoint = serve_chunked_once(r#"[{"id":1,"name":"Milk","price":1.5}]"#).await;
    let settings = FetchSettings {
        endpoint,
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestProductFetcher::new(settings);
    let err = fetcher.fetch_products().await.unwrap_err();

    match err.kind {
        FailureKind::TooLarge { max_bytes, actual } => {
            assert_eq!(max_bytes, 10);
            assert!(actual.is_some_and(|actual| actual > 10));
        }
        other => panic!("unexpected failure {other:?}"),
    }
}

#[tokio::test]
async fn fetcher_reads_chunked_body_within_limit() {
    let endpoint = serve_chunked_once(r#"[{"id":1,"name":"Milk","price":1.5}]"#).await;
    let settings = FetchSettings {
        endpoint,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestProductFetcher::new(settings);
    let products = fetcher.fetch_products().await.expect("fetch ok");

    assert_eq!(products[0].price_cents, 150);
}
