use gnews_api::{Client, Error, Locale, NewsQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn hidaka_query() -> NewsQuery {
    NewsQuery::default()
        .with_phrases(["ハイデイ日高", "日高屋"])
        .with_recency_days(30)
}

#[tokio::test]
async fn search_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("google_news_rss.xml");

    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", r#"("ハイデイ日高" OR "日高屋") when:30d"#))
        .and(query_param("hl", "ja"))
        .and(query_param("gl", "JP"))
        .and(query_param("ceid", "JP:ja"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let entries = client.search(&hidaka_query(), 24).await.unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].title, "日高屋、来月から一部メニュー値上げ - 日本経済新聞");
    assert_eq!(entries[0].link, "https://news.google.com/rss/articles/CBMiAAA?oc=5");
    assert_eq!(entries[2].published, "Mon, 06 Oct 2025 06:30:00 GMT");
}

#[tokio::test]
async fn search_truncates_to_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("google_news_rss.xml")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let entries = client.search(&hidaka_query(), 2).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[1].title.starts_with("スプラトゥーン3"));
}

#[tokio::test]
async fn search_uses_configured_locale() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("hl", "en-US"))
        .and(query_param("gl", "US"))
        .and(query_param("ceid", "US:en"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<rss><channel></channel></rss>"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_locale(Locale {
        language: "en-US".to_string(),
        country: "US".to_string(),
        content_language: "US:en".to_string(),
    });
    let entries = client.search(&hidaka_query(), 10).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn search_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.search(&hidaka_query(), 10).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn search_malformed_feed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<rss><channel><item><title>broken</link></item>"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.search(&hidaka_query(), 10).await;
    assert!(matches!(result, Err(Error::InvalidFeed(_))));
}

#[tokio::test]
async fn search_connection_refused() {
    let client = Client::with_base_url("http://127.0.0.1:9");
    let result = client.search(&hidaka_query(), 10).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
