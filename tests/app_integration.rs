use std::io::Write;

use tracing::info;

use fxlens::core::rates::RateProvider;
use fxlens::core::{ConversionEngine, CurrencyCatalog, RateError, TrendDirection, trend};
use fxlens::providers::FrankfurterProvider;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server() -> MockServer {
        MockServer::start().await
    }

    pub async fn mock_get(server: &MockServer, url_path: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }
}

#[test_log::test(tokio::test)]
async fn convert_flow_against_a_mock_provider() {
    let server = test_utils::create_mock_server().await;
    test_utils::mock_get(
        &server,
        "/latest",
        r#"{"amount": 100.0, "base": "USD", "date": "2024-03-01", "rates": {"EUR": 92.34}}"#,
    )
    .await;

    let provider = FrankfurterProvider::new(&server.uri());
    let engine = ConversionEngine::new(&provider);

    let result = engine.convert(100.0, "USD", "EUR").await.unwrap();
    info!(result, "conversion resolved");
    assert_eq!(result, 92.34);
}

#[test_log::test(tokio::test)]
async fn convert_command_runs_end_to_end_with_a_config_file() {
    let server = test_utils::create_mock_server().await;
    test_utils::mock_get(
        &server,
        "/latest",
        r#"{"amount": 50.0, "base": "GBP", "date": "2024-03-01", "rates": {"JPY": 9425.5}}"#,
    )
    .await;

    let mut config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
provider:
  base_url: {}
defaults:
  from: "GBP"
  to: "JPY"
"#,
        server.uri()
    );
    config_file
        .write_all(config_content.as_bytes())
        .expect("Failed to write config");

    // Amount comes from the CLI, currencies from the config defaults.
    let command = fxlens::AppCommand::Convert {
        amount: Some(50.0),
        from: None,
        to: None,
    };
    let result = fxlens::run_command(command, config_file.path().to_str()).await;
    assert!(result.is_ok(), "convert flow failed: {result:?}");
}

#[test_log::test(tokio::test)]
async fn rates_flow_renders_the_overview_from_catalog_and_latest() {
    let server = test_utils::create_mock_server().await;
    // Names for only some of the major currencies: the view falls back to
    // the bare code for the rest.
    test_utils::mock_get(
        &server,
        "/currencies",
        r#"{"EUR": "Euro", "GBP": "British Pound", "XXX": "Testing Code"}"#,
    )
    .await;
    // A mix of major and non-major targets: only the majors are shown, the
    // footer counts all of them.
    test_utils::mock_get(
        &server,
        "/latest",
        r#"{"amount": 1.0, "base": "USD", "date": "2024-03-01", "rates": {"EUR": 0.9241, "GBP": 0.7902, "JPY": 150.21, "XXX": 1.5}}"#,
    )
    .await;

    let provider = FrankfurterProvider::new(&server.uri());
    let catalog = CurrencyCatalog::new();

    let result = fxlens::cli::rates::run(&provider, &catalog, "USD").await;
    assert!(result.is_ok(), "rates flow failed: {result:?}");

    // One catalog fetch plus one latest fetch.
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 2);
}

#[test_log::test(tokio::test)]
async fn rates_command_runs_end_to_end_with_a_config_file() {
    let server = test_utils::create_mock_server().await;
    test_utils::mock_get(&server, "/currencies", r#"{"EUR": "Euro"}"#).await;
    test_utils::mock_get(
        &server,
        "/latest",
        r#"{"amount": 1.0, "base": "EUR", "date": "2024-03-01", "rates": {"USD": 1.0843}}"#,
    )
    .await;

    let mut config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
provider:
  base_url: {}
"#,
        server.uri()
    );
    config_file
        .write_all(config_content.as_bytes())
        .expect("Failed to write config");

    let command = fxlens::AppCommand::Rates {
        base: Some("EUR".to_string()),
    };
    let result = fxlens::run_command(command, config_file.path().to_str()).await;
    assert!(result.is_ok(), "rates flow failed: {result:?}");
}

#[test_log::test(tokio::test)]
async fn trend_flow_derives_points_and_a_falling_summary() {
    let server = test_utils::create_mock_server().await;
    test_utils::mock_get(
        &server,
        "/2024-02-26..2024-03-03",
        r#"{
            "amount": 1.0,
            "base": "USD",
            "start_date": "2024-02-26",
            "end_date": "2024-03-03",
            "rates": {
                "2024-02-26": {"EUR": 1.10},
                "2024-02-28": {"EUR": 1.12},
                "2024-03-01": {"EUR": 1.08}
            }
        }"#,
    )
    .await;

    let provider = FrankfurterProvider::new(&server.uri());
    let series = provider
        .get_range("USD", "EUR", "2024-02-26", "2024-03-03")
        .await
        .unwrap();

    let trend = trend::analyze(&series, "EUR");
    assert_eq!(trend.points.len(), 3);
    assert_eq!(trend.points[0].label, "26/02");
    assert_eq!(trend.points[2].label, "01/03");

    let summary = trend.summary.expect("three points give a summary");
    assert!((summary.percent_change - (-1.818)).abs() < 0.001);
    assert_eq!(summary.direction, TrendDirection::Falling);
}

#[test_log::test(tokio::test)]
async fn lookup_flow_returns_the_dated_snapshot() {
    let server = test_utils::create_mock_server().await;
    test_utils::mock_get(
        &server,
        "/2023-11-10",
        r#"{"amount": 1.0, "base": "USD", "date": "2023-11-10", "rates": {"EUR": 0.9362}}"#,
    )
    .await;

    let provider = FrankfurterProvider::new(&server.uri());
    let snapshot = provider
        .get_for_date("2023-11-10", "USD", Some("EUR"))
        .await
        .unwrap();

    assert_eq!(snapshot.date, "2023-11-10");
    assert_eq!(snapshot.rates.get("EUR"), Some(&0.9362));
}

#[test_log::test(tokio::test)]
async fn catalog_fetches_currencies_once_per_view() {
    let server = test_utils::create_mock_server().await;
    test_utils::mock_get(
        &server,
        "/currencies",
        r#"{"EUR": "Euro", "USD": "United States Dollar", "GBP": "British Pound"}"#,
    )
    .await;

    let provider = FrankfurterProvider::new(&server.uri());
    let catalog = CurrencyCatalog::new();

    let first = catalog.get_or_load(&provider).await.unwrap();
    let second = catalog.get_or_load(&provider).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    // Exactly one request reached the provider.
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1);
}

#[test_log::test(tokio::test)]
async fn provider_failure_surfaces_as_a_typed_error() {
    let server = test_utils::create_mock_server().await;
    // No routes mounted: every request gets a 404.

    let provider = FrankfurterProvider::new(&server.uri());
    let engine = ConversionEngine::new(&provider);

    let result = engine.convert(100.0, "USD", "EUR").await;
    assert!(matches!(result, Err(RateError::ProviderUnavailable(_))));
}
