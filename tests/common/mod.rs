//! Test helpers for integration tests.
//!
//! Provides feed bodies and configurations pointing at a mock feed server.

#![allow(dead_code)]

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use showcase::config::Config;
use showcase::feed::{BodyFormat, FeedTransport, HttpTransport, SourceDescriptor};

/// RSS feed with media thumbnails and note prices.
pub const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/" xmlns:note="https://note.com">
<channel>
  <title>MUKAI COFFEE</title>
  <item>
    <title>【エチオピア】モカ ゲイシャ G1 Natural 150g ¥1,720</title>
    <link>https://shop.example/items/124050080</link>
    <media:thumbnail url="https://img.example/geisha.jpg"/>
    <note:price>1,720円</note:price>
  </item>
  <item>
    <title><![CDATA[お試しセット タンザニア & ブラジル]]></title>
    <link>https://shop.example/items/200</link>
    <media:thumbnail url="https://img.example/set.jpg"/>
    <note:price>2,400円</note:price>
  </item>
  <item>
    <title>グアテマラ ウエウエテナンゴ 150g</title>
    <link>https://shop.example/items/300</link>
  </item>
  <item>
    <title>ペルー 200g</title>
    <link>https://shop.example/items/400</link>
  </item>
</channel>
</rss>"#;

/// RSS with an unclosed item: a parse failure, not a partial result.
pub const MALFORMED_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item><title>ペルー</title><link>https://shop.example/1</link></item>
  <item><title>タンザニア</title>
</channel></rss>"#;

/// RSS-to-JSON envelope with one product.
pub const JSON_FEED: &str = r#"{
  "status": "ok",
  "items": [
    {
      "title": "グァテマラ エル・インヘルト ¥1,980",
      "link": "https://shop.example/items/500",
      "description": "<p><img src=\"https://img.example/inj.jpg\">華やかな香り &amp; 甘さ。 ¥1,980</p>",
      "thumbnail": "",
      "enclosure": {}
    }
  ]
}"#;

/// RSS-to-JSON envelope reporting a conversion error.
pub const JSON_ERROR: &str = r#"{"status":"error","message":"Cannot download this RSS feed"}"#;

/// Start a mock feed server.
pub async fn start_feed_server() -> MockServer {
    MockServer::start().await
}

/// Mount a GET response on `route`.
pub async fn mount(server: &MockServer, route: &str, response: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

/// Successful response with a text body.
pub fn body(status: u16, text: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_string(text)
}

/// A source on the mock server that passes the feed URL as a query.
pub fn source(server: &MockServer, route: &str, format: BodyFormat) -> SourceDescriptor {
    SourceDescriptor::new(format!("{}{}?url={{url}}", server.uri(), route), format)
}

/// Configuration with fast container retries and the given sources.
pub fn create_test_config(sources: Vec<SourceDescriptor>) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.feed.url = "https://shop.example/feed.xml".to_string();
    config.feed.sources = sources;
    config.display.container_retry_attempts = 2;
    config.display.container_retry_delay_ms = 1;
    config
}

/// The real HTTP transport.
pub fn http_transport() -> Arc<dyn FeedTransport> {
    Arc::new(HttpTransport::new().expect("Failed to create HTTP transport"))
}
