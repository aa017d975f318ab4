//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use recipe_crawler::config::{Config, OutputMode};
use recipe_crawler::crawler::{crawl, Coordinator};
use recipe_crawler::output::build_sink;
use recipe_crawler::{ConfigError, CrawlerError, Recipe, RecipeExtractor};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a recipe page that links to `links`
fn recipe_page(name: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();

    format!(
        r#"<html><body>
        <h1>{name}</h1>
        <div class="recipe-details-image"><img src="/img/{name}.jpg"></div>
        <a class="recipe-details-rating">
          <span class="full-star" data-star-number="1"></span>
          <span class="full-star" data-star-number="2"></span>
          <span class="full-star" data-star-number="3"></span>
        </a>
        <div id="reviews"><span>(12)</span></div>
        <div class="recipe-summary-item unit"><span>10</span><span>Minutes</span></div>
        <div class="recipe-ingredients"><ul><li><span>1</span><span>egg</span></li></ul></div>
        {anchors}
        </body></html>"#
    )
}

/// Mounts a 200 HTML response at `route`, expecting exactly one hit
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn save_config(dir: &TempDir, workers: usize) -> Config {
    let mut config = Config::default();
    config.crawler.workers = workers;
    config.crawler.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.output.mode = OutputMode::Save;
    config.output.path = dir
        .path()
        .join("crawler_recipes.json")
        .to_string_lossy()
        .into_owned();
    config
}

fn read_records(path: &Path) -> Vec<Recipe> {
    std::fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Output line is not a recipe"))
        .collect()
}

async fn run(config: &Config, seed: &str) -> Result<recipe_crawler::output::CrawlSummary, CrawlerError> {
    let sink = build_sink(&config.output)?;
    Coordinator::new(config, seed, RecipeExtractor::new(), sink)?
        .run_until(std::future::pending())
        .await
}

#[tokio::test]
async fn test_full_crawl_saves_every_recipe() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/recipes/",
        r#"<html><body>
            <a href="/recipe/soup">Soup</a>
            <a href="/recipe/bread">Bread</a>
            <a href="/about">About</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&server, "/recipe/soup", recipe_page("Soup", &["/recipe/stew"])).await;
    mount_page(&server, "/recipe/bread", recipe_page("Bread", &["/recipe/soup"])).await;
    mount_page(&server, "/recipe/stew", recipe_page("Stew", &[])).await;

    let config = save_config(&dir, 3);
    let summary = crawl(config.clone(), &format!("{}/recipes/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.pages_claimed, 4);
    assert_eq!(summary.records_emitted, 3);
    // the seed listing page is not a recipe
    assert_eq!(summary.extraction_failures, 1);

    let mut names: Vec<String> = read_records(Path::new(&config.output.path))
        .into_iter()
        .map(|r| r.recipe_name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Bread", "Soup", "Stew"]);
}

#[tokio::test]
async fn test_saved_record_fields() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_page(&server, "/recipe/soup", recipe_page("Soup", &[])).await;

    let config = save_config(&dir, 1);
    run(&config, &format!("{}/recipe/soup", server.uri()))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&config.output.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(raw.trim()).unwrap();
    assert_eq!(value["recipeName"], "Soup");
    assert_eq!(value["recipePhoto"], "/img/Soup.jpg");
    assert_eq!(value["ingredients"][0], "1 egg");
    assert_eq!(value["ratings"], 3.0);
    assert_eq!(value["reviews"], 12);
    assert_eq!(value["cookTime"], "10 Minutes");
    assert_eq!(value["serve"], 1);
}

#[tokio::test]
async fn test_other_origin_never_fetched() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(recipe_page("Other", &[])))
        .expect(0)
        .mount(&other)
        .await;

    let foreign = format!("{}/recipe/b", other.uri());
    mount_page(
        &server,
        "/recipes/",
        recipe_page("Index", &["/recipe/a", &foreign, "/about"]),
    )
    .await;
    mount_page(&server, "/recipe/a", recipe_page("A", &[])).await;

    let config = save_config(&dir, 2);
    let summary = run(&config, &format!("{}/recipes/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.pages_claimed, 2);
    assert_eq!(summary.links_queued, 1);
}

#[tokio::test]
async fn test_not_found_page_drains_without_record() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/recipes/",
        recipe_page("Index", &["/recipe/missing", "/recipe/ok"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/recipe/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/recipe/ok", recipe_page("Ok", &[])).await;

    let config = save_config(&dir, 2);
    let summary = run(&config, &format!("{}/recipes/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.records_emitted, 2);
    let names: Vec<String> = read_records(Path::new(&config.output.path))
        .into_iter()
        .map(|r| r.recipe_name)
        .collect();
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| n == "Index" || n == "Ok"));
}

#[tokio::test]
async fn test_extraction_failure_still_follows_links() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/recipes/",
        r#"<html><body><a href="/recipe/broken">Broken</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &server,
        "/recipe/broken",
        r#"<html><body><p>no title here</p><a href="/recipe/fine">Fine</a></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&server, "/recipe/fine", recipe_page("Fine", &[])).await;

    let config = save_config(&dir, 2);
    let summary = run(&config, &format!("{}/recipes/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.extraction_failures, 2);
    assert_eq!(summary.records_emitted, 1);
    let records = read_records(Path::new(&config.output.path));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].recipe_name, "Fine");
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // every page links to every other page, several times over
    let all = ["/recipe/a", "/recipe/b", "/recipe/c", "/recipe/a", "/recipe/b"];
    mount_page(&server, "/recipes/", recipe_page("Index", &all)).await;
    for route in ["/recipe/a", "/recipe/b", "/recipe/c"] {
        mount_page(&server, route, recipe_page(route, &all)).await;
    }

    let config = save_config(&dir, 8);
    let summary = run(&config, &format!("{}/recipes/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.pages_claimed, 4);
    assert_eq!(summary.pages_fetched, 4);
    assert_eq!(read_records(Path::new(&config.output.path)).len(), 4);
}

#[tokio::test]
async fn test_output_file_truncated_at_start() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_page(&server, "/recipe/soup", recipe_page("Soup", &[])).await;

    let config = save_config(&dir, 1);
    std::fs::write(&config.output.path, "stale line\nanother stale line\n").unwrap();

    run(&config, &format!("{}/recipe/soup", server.uri()))
        .await
        .unwrap();

    let records = read_records(Path::new(&config.output.path));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].recipe_name, "Soup");
}

#[tokio::test]
async fn test_malformed_seed_fails_before_crawling() {
    let dir = TempDir::new().unwrap();
    let config = save_config(&dir, 2);

    let result = run(&config, "::not a url::").await;
    assert!(matches!(
        result,
        Err(CrawlerError::Config(ConfigError::InvalidUrl(_)))
    ));
}

#[tokio::test]
async fn test_custom_link_pattern() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<a href="/dish/1">Dish</a><a href="/recipe/2">Recipe</a>"#.to_string(),
    )
    .await;
    mount_page(&server, "/dish/1", recipe_page("Dish", &[])).await;

    let mut config = save_config(&dir, 2);
    config.crawler.link_pattern = "^/dish/".to_string();
    let summary = run(&config, &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.pages_claimed, 2);
    assert_eq!(summary.records_emitted, 1);
}

#[tokio::test]
async fn test_stray_latin1_byte_does_not_lose_links() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let mut seed_body = b"<html><body><p>Cr\xE8me</p>".to_vec();
    seed_body.extend_from_slice(br#"<a href="/recipe/creme">Creme</a></body></html>"#);
    Mock::given(method("GET"))
        .and(path("/recipes/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(seed_body, "text/html"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/recipe/creme", recipe_page("Creme", &[])).await;

    let config = save_config(&dir, 2);
    let summary = run(&config, &format!("{}/recipes/", server.uri()))
        .await
        .unwrap();

    assert_eq!(summary.parse_failures, 0);
    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.records_emitted, 1);
}
