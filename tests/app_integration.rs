use chrono::{Duration, Utc};
use fundscope::AppCommand;
use std::fs;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_fund_api_server(routes: &[(&str, String)]) -> MockServer {
        let mock_server = MockServer::start().await;
        for (url_path, body) in routes {
            Mock::given(method("GET"))
                .and(path(*url_path))
                .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
                .mount(&mock_server)
                .await;
        }
        mock_server
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config = format!(
            r#"
providers:
  fund_api:
    base_url: "{}"
data_path: "{}"
"#,
            base_url,
            dir.join("data").display()
        );
        std::fs::write(&config_path, config).unwrap();
        config_path
    }
}

const FUND: &str = r#"{
    "id": 7,
    "name": "Bluechip Growth Fund",
    "amc_name": "Example AMC",
    "market_cap": "large",
    "nav": "48.20",
    "aum": 15234.5,
    "equity_size": 12500,
    "std_deviation": 12.1,
    "sharpe_ratio": 1.8,
    "sortino_ratio": "n/a",
    "expense_ratio": null
}"#;

fn history_json() -> String {
    let today = Utc::now().date_naive();
    let points: Vec<String> = [400, 120, 60, 45, 10]
        .iter()
        .enumerate()
        .map(|(i, days)| {
            let date = today - Duration::days(*days);
            format!(
                r#"{{"history_date": "{}T00:00:00Z", "nav": {}, "aum": {}, "std_deviation": 11.5}}"#,
                date,
                40.0 + i as f64,
                14000.0 + 100.0 * i as f64
            )
        })
        .collect();
    format!("[{}]", points.join(","))
}

async fn setup_app() -> (wiremock::MockServer, TempDir, String) {
    let funds = format!("[{FUND}, {{\"id\": 8, \"name\": \"Liquid Fund\"}}]");
    let server = test_utils::create_fund_api_server(&[
        ("/funds/", funds),
        ("/funds/7/", FUND.to_string()),
        ("/funds/7/history/", history_json()),
    ])
    .await;

    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), &server.uri());
    let config_path = config_path.to_string_lossy().into_owned();
    (server, temp_dir, config_path)
}

#[test_log::test(tokio::test)]
async fn test_list_command() {
    let (_server, _temp_dir, config_path) = setup_app().await;

    let result = fundscope::run_command(
        AppCommand::List {
            search: Some("bluechip".to_string()),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok(), "list failed: {result:?}");
}

#[test_log::test(tokio::test)]
async fn test_detail_command_with_unknown_window() {
    let (_server, temp_dir, config_path) = setup_app().await;

    let result = fundscope::run_command(
        AppCommand::Detail {
            id: 7,
            window: Some("10y".to_string()),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok(), "detail failed: {result:?}");
    assert!(temp_dir.path().join("data").join("cache").exists());
}

#[test_log::test(tokio::test)]
async fn test_simulate_command() {
    let (_server, _temp_dir, config_path) = setup_app().await;

    for strategy in ["lumpsum", "sip"] {
        info!(?strategy, "Running simulation");
        let result = fundscope::run_command(
            AppCommand::Simulate {
                id: 7,
                strategy: Some(strategy.to_string()),
                amount: Some(5000.0),
                window: Some("3y".to_string()),
            },
            Some(&config_path),
        )
        .await;
        assert!(result.is_ok(), "{strategy} simulation failed: {result:?}");
    }
}

#[test_log::test(tokio::test)]
async fn test_simulate_rejects_unknown_strategy() {
    let (_server, _temp_dir, config_path) = setup_app().await;

    let result = fundscope::run_command(
        AppCommand::Simulate {
            id: 7,
            strategy: Some("weekly".to_string()),
            amount: None,
            window: None,
        },
        Some(&config_path),
    )
    .await;
    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("unknown investment strategy"), "{error_msg}");
}

#[test_log::test(tokio::test)]
async fn test_chart_command() {
    let (_server, _temp_dir, config_path) = setup_app().await;

    for metric in ["nav", "aum", "std_deviation"] {
        let result = fundscope::run_command(
            AppCommand::Chart {
                id: 7,
                metric: metric.to_string(),
                window: Some("3m".to_string()),
            },
            Some(&config_path),
        )
        .await;
        assert!(result.is_ok(), "{metric} chart failed: {result:?}");
    }

    let result = fundscope::run_command(
        AppCommand::Chart {
            id: 7,
            metric: "volume".to_string(),
            window: None,
        },
        Some(&config_path),
    )
    .await;
    assert!(result.unwrap_err().to_string().contains("unknown metric"));
}

#[test_log::test(tokio::test)]
async fn test_missing_fund_reports_error() {
    let (_server, _temp_dir, config_path) = setup_app().await;

    let result = fundscope::run_command(
        AppCommand::Detail {
            id: 99,
            window: None,
        },
        Some(&config_path),
    )
    .await;
    let error_msg = format!("{:#}", result.unwrap_err());
    assert!(error_msg.contains("Failed to load fund 99"), "{error_msg}");
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("absent.yaml");

    let result = fundscope::run_command(
        AppCommand::List { search: None },
        Some(&config_path.to_string_lossy()),
    )
    .await;
    assert!(result.is_err());
    assert!(!fs::exists(&config_path).unwrap());
}
