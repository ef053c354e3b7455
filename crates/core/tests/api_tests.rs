//! Library API integration tests
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gleaner_core::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

/// Local HTTP server that answers each connection with the next scripted
/// response (the last one repeats) and records the raw requests.
struct TestServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn serve(responses: Vec<(u16, String)>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/page", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    tokio::spawn(async move {
        let mut served = 0;
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            recorded.lock().unwrap().push(String::from_utf8_lossy(&buf).to_string());

            let (status, body) = &responses[served.min(responses.len() - 1)];
            served += 1;
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    TestServer { url, requests }
}

#[derive(Default)]
struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

fn test_scraper() -> WebScraper<HttpFetcher, RecordingSleeper> {
    let config = ScraperConfig::builder().timeout(5).build();
    let fetcher = HttpFetcher::new(config.fetch.clone()).unwrap();
    WebScraper::with_parts(config, fetcher, RecordingSleeper::default())
}

#[test]
fn test_analyze_fixture() {
    let text = fetch_file(&get_fixture_path("sample.txt")).unwrap();
    let result = TextAnalyzer::new().analyze_text(&text).unwrap();

    assert!(result.statistics.total_words > 0);
    assert!(result.statistics.unique_words <= result.statistics.total_words);
    assert!(result.top_words.len() <= 20);
    assert!((result.themes.total() - 1.0).abs() < 1e-9);
    assert!(result.themes.get("community").unwrap() > 0.0);

    let patterns = result.language_patterns;
    assert_eq!(patterns.question_count, 1);
    assert_eq!(patterns.exclamation_count, 1);
    assert_eq!(patterns.sentence_count, 6);
    assert_eq!(patterns.paragraph_count, 3);
}

#[test]
fn test_search_fixture() {
    let text = read_fixture("sample.txt");
    let result = TextAnalyzer::new().search_content(&text, "living").unwrap();

    let SearchResult::Matches { total_matches, contexts } = result else {
        panic!("expected matches");
    };
    assert_eq!(total_matches, 2);
    let len = text.chars().count();
    assert!(contexts.iter().all(|c| c.position < len && c.context.to_lowercase().contains("living")));
}

#[test]
fn test_extract_fixture() {
    let html = read_fixture("article.html");
    let text = extract_text(&html, &ExtractConfig::default()).unwrap();

    assert!(text.starts_with("Riverside Commons: Living Together by the River\n"));
    assert!(text.contains("North Court | 48"));
    assert!(!text.contains("newsletter"));
    assert!(!text.contains("leasing"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("analytics"));
}

#[test]
fn test_metadata_fixture() {
    let doc = Document::parse(&read_fixture("article.html"));
    let metadata = doc.extract_metadata();

    assert_eq!(metadata.title, "Riverside Commons: Living Together by the River");
    assert_eq!(metadata.author, "Priya Natarajan");
    assert_eq!(metadata.date, "2024-05-02T09:00:00Z");
    assert!(metadata.description.starts_with("A walkable neighborhood"));
}

#[test]
fn test_list_items_fixture() {
    let html = read_fixture("listing.html");

    let items = list_items_from_html(&html, "https://example.com/projects", None).unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Riverside Commons", "Maple Row Townhomes", "Harbor Lofts", "Greenway Cottages"]);

    let items = list_items_from_html(&html, "https://example.com/projects", Some("span.card-title")).unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Old Mill Flats", "Cedar Court"]);
}

#[tokio::test]
async fn test_scrape_text_over_http() {
    let server = serve(vec![(200, read_fixture("article.html"))]).await;
    let scraper = test_scraper();

    let text = scraper.get_website_text_content(&server.url, 3).await.unwrap();
    assert!(text.contains("Riverside Commons is a new neighborhood"));

    let requests = server.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].to_lowercase().contains("user-agent: mozilla/5.0 (windows nt 10.0"));
}

#[tokio::test]
async fn test_scrape_text_retries_then_succeeds() {
    let server = serve(vec![(500, String::new()), (200, read_fixture("article.html"))]).await;
    let scraper = test_scraper();

    let text = scraper.get_website_text_content(&server.url, 3).await;
    assert!(text.is_some());
    assert_eq!(*scraper_sleeps(&scraper), [Duration::from_secs(1)]);
}

#[tokio::test]
async fn test_scrape_text_gives_up() {
    let server = serve(vec![(404, "missing".to_string())]).await;
    let scraper = test_scraper();

    assert!(scraper.get_website_text_content(&server.url, 3).await.is_none());
    assert_eq!(server.requests.lock().unwrap().len(), 3);
    assert_eq!(*scraper_sleeps(&scraper), [Duration::from_secs(1), Duration::from_secs(2)]);
}

#[tokio::test]
async fn test_scrape_list_items_over_http() {
    let server = serve(vec![(200, read_fixture("listing.html"))]).await;
    let scraper = test_scraper();

    let items = scraper.scrape_list_items(&server.url, None).await;
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|i| i.source == server.url && i.url == server.url));
}

#[tokio::test]
async fn test_scrape_list_items_http_error_is_empty() {
    let server = serve(vec![(500, "boom".to_string())]).await;
    let scraper = test_scraper();

    assert!(scraper.scrape_list_items(&server.url, None).await.is_empty());
}

#[tokio::test]
async fn test_metadata_over_http() {
    let server = serve(vec![(200, read_fixture("article.html"))]).await;
    let scraper = test_scraper();

    let metadata = scraper.get_website_metadata(&server.url).await.unwrap();
    assert_eq!(metadata.author, "Priya Natarajan");

    let missing = serve(vec![(404, String::new())]).await;
    assert!(scraper.get_website_metadata(&missing.url).await.is_none());
}

#[tokio::test]
async fn test_fetch_url_maps_status() {
    let server = serve(vec![(403, "forbidden".to_string())]).await;
    let result = fetch_url(&server.url, &FetchConfig::default()).await;

    assert!(matches!(result, Err(GleanerError::HttpStatus { status: 403, .. })));
}

#[test]
fn test_save_and_preview() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig::builder().output_dir(dir.path()).build();
    let scraper = WebScraper::with_config(config).unwrap();

    let text = read_fixture("sample.txt");
    let saved = scraper.save_text_to_file(&text, Some("sample_copy.txt")).unwrap();
    assert_eq!(saved, SavedText::Written(dir.path().join("sample_copy.txt")));
    assert_eq!(std::fs::read_to_string(dir.path().join("sample_copy.txt")).unwrap(), text);

    let preview = scraper.get_text_preview(&text, 20);
    assert_eq!(preview.chars().count(), 23);
    assert!(preview.ends_with("..."));
}

#[test]
fn test_json_formatting() {
    let analysis = TextAnalyzer::new().analyze_text("Easy, quick, and green.").unwrap();
    let value = formatters::to_json_value(&analysis).unwrap();
    assert!(value["themes"].is_object());

    let err = TextAnalyzer::new().analyze_text("").unwrap_err();
    assert_eq!(error_to_json(&err)["error"], "No text provided for analysis");
}

fn scraper_sleeps(scraper: &WebScraper<HttpFetcher, RecordingSleeper>) -> std::sync::MutexGuard<'_, Vec<Duration>> {
    scraper.sleeper().sleeps.lock().unwrap()
}
