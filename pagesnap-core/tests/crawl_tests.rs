// Tests for crawl orchestration

use pagesnap_core::CoreError;
use pagesnap_core::crawl::{CrawlOptions, execute_crawl};
use pagesnap_core::output::{LINKS_FILE, TEXT_FILE, folder_name};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html")
                .set_body_bytes(body.as_bytes().to_vec()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_execute_crawl_no_urls() {
    let root = TempDir::new().unwrap();
    let options = CrawlOptions::new(Vec::new(), root.path());

    let result = execute_crawl(options, None, None).await;
    assert!(matches!(result, Err(CoreError::NoUrls)));
}

#[tokio::test]
async fn test_execute_crawl_writes_artifacts() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        200,
        r#"<html><head><title>Home</title></head><body>
            <p>Hello</p><script>ignored()</script><p>World</p>
            <a href="/a">a</a><a href="/a">a again</a>
        </body></html>"#,
    )
    .await;

    let root = TempDir::new().unwrap();
    let url = mock_server.uri();
    let options = CrawlOptions::new(vec![url.clone()], root.path());

    let records = execute_crawl(options, None, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_success());

    let dir = root.path().join(folder_name(&url));
    assert_eq!(records[0].output_dir.as_deref(), Some(dir.as_path()));

    let links = fs::read_to_string(dir.join(LINKS_FILE)).unwrap();
    assert_eq!(links, format!("{0}/a\n{0}/a\n", url));

    let text: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(TEXT_FILE)).unwrap()).unwrap();
    assert_eq!(text["text"], "Hello World a a again");
}

#[tokio::test]
async fn test_execute_crawl_continues_after_failure() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/broken", 500, "oops").await;
    mount_page(
        &mock_server,
        "/ok",
        200,
        "<html><body><p>Fine</p></body></html>",
    )
    .await;

    let root = TempDir::new().unwrap();
    let urls = vec![
        format!("{}/broken", mock_server.uri()),
        format!("{}/ok", mock_server.uri()),
    ];

    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    let progress = Arc::new(move |msg: String| {
        messages_clone.lock().unwrap().push(msg);
    });

    let records = execute_crawl(
        CrawlOptions::new(urls.clone(), root.path()),
        Some(progress),
        None,
    )
    .await
    .unwrap();

    assert_eq!(records.len(), 2);
    assert!(!records[0].is_success());
    assert!(records[0].result.is_none());
    assert!(records[0].output_dir.is_none());
    assert_eq!(records[0].errors.len(), 1);
    assert!(records[1].is_success());

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains(&urls[0]));

    let dir = root.path().join(folder_name(&urls[1]));
    let text: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(TEXT_FILE)).unwrap()).unwrap();
    assert_eq!(text["text"], "Fine");
}

#[tokio::test]
async fn test_execute_crawl_result_callback_in_input_order() {
    let mock_server = MockServer::start().await;
    for i in 0..6 {
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(format!(
                        "<html><head><title>Page {}</title></head><body></body></html>",
                        i
                    ))
                    // later pages answer first
                    .set_delay(std::time::Duration::from_millis(60 - i * 10)),
            )
            .mount(&mock_server)
            .await;
    }

    let root = TempDir::new().unwrap();
    let urls: Vec<String> = (0..6)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();

    let titles: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let titles_clone = titles.clone();
    let on_result = Arc::new(move |result: &pagesnap_scanner::CrawlResult| {
        titles_clone
            .lock()
            .unwrap()
            .push(result.title.clone().unwrap_or_default());
    });

    let mut options = CrawlOptions::new(urls.clone(), root.path());
    options.concurrency = 4;

    let records = execute_crawl(options, None, Some(on_result)).await.unwrap();

    let record_urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(record_urls, urls.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        *titles.lock().unwrap(),
        (0..6).map(|i| format!("Page {}", i)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_execute_crawl_reports_unwritable_output() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 200, "<html><body>x</body></html>").await;

    let root = TempDir::new().unwrap();
    let url = mock_server.uri();
    fs::write(root.path().join(folder_name(&url)), "not a directory").unwrap();

    let records = execute_crawl(CrawlOptions::new(vec![url], root.path()), None, None)
        .await
        .unwrap();

    assert!(!records[0].is_success());
    assert!(records[0].result.is_some());
    assert!(records[0].output_dir.is_none());
    assert!(records[0].errors[0].contains("Failed to create output directory"));
}
