use httpmock::prelude::*;
use news_analyzer::{AnalysisEngine, AnalyzerError, CliConfig, NewsPipeline, Sentiment};
use std::io::Read;
use tempfile::TempDir;

const GOOD_NEWS: &str = r#"<html><head><title>Acme Corp profits soar</title></head>
<body><article>
<p>Acme Corp reported record profits on Tuesday as demand surged in Europe.</p>
<p>Analysts said the strong growth should continue into next year.</p>
</article></body></html>"#;

const BAD_NEWS: &str = r#"<html><head><title>Acme shares plunge</title>
<meta name="description" content="Acme shares plunged after the company warned of weak demand and announced layoffs at its plants in Germany, sending losses higher.">
</head><body><p>ignored</p></body></html>"#;

fn config(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        news_endpoint: server.url("/v2/everything"),
        api_key: Some("test-key".to_string()),
        concurrent_requests: 2,
        output_path: output_path.to_string(),
        ..CliConfig::default()
    }
}

async fn mock_pages(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/good");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(GOOD_NEWS);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/bad");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(BAD_NEWS);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/articles/gone");
            then.status(404);
        })
        .await;
}

#[tokio::test]
async fn test_end_to_end_analysis_writes_bundle() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    mock_pages(&server).await;

    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/everything")
                .query_param("apiKey", "test-key")
                .query_param("pageSize", "10")
                .query_param("sortBy", "publishedAt");
            then.status(200).json_body(serde_json::json!({
                "status": "ok",
                "totalResults": 4,
                "articles": [
                    {
                        "source": {"id": null, "name": "Wire"},
                        "title": "Acme Corp profits soar",
                        "url": server.url("/articles/good"),
                        "publishedAt": "2024-05-01T12:00:00Z"
                    },
                    {
                        "source": {"id": null, "name": "Daily"},
                        "title": "Acme shares plunge",
                        "url": server.url("/articles/bad"),
                        "publishedAt": "2024-05-02T08:30:00Z"
                    },
                    {
                        "source": {"id": null, "name": "Gone"},
                        "title": "Removed story",
                        "url": server.url("/articles/gone")
                    },
                    {
                        "source": {"id": null, "name": "[Removed]"},
                        "title": "[Removed]",
                        "url": ""
                    }
                ]
            }));
        })
        .await;

    let pipeline = NewsPipeline::from_config(config(&server, &output_path)).unwrap();
    let engine = AnalysisEngine::new_with_monitoring(pipeline, false);

    let report = engine.analyze("Acme").await;
    search.assert_hits_async(1).await;
    let report = match report {
        Ok(report) => report,
        Err(e) => panic!("analysis failed: {e}"),
    };

    assert_eq!(report.company, "Acme");
    let titles: Vec<&str> = report.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Acme Corp profits soar", "Acme shares plunge"]);
    assert_eq!(report.articles[0].sentiment, Sentiment::Positive);
    assert_eq!(report.articles[1].sentiment, Sentiment::Negative);
    assert_eq!(report.articles[0].source.as_deref(), Some("Wire"));
    assert!(report.articles[0].topics.contains(&"Acme Corp".to_string()));
    assert!(report.articles[0].topics.contains(&"Europe".to_string()));
    assert!(report.articles[1].topics.contains(&"Germany".to_string()));
    assert_eq!(report.sentiment_breakdown.positive, 1);
    assert_eq!(report.sentiment_breakdown.negative, 1);

    let output_file = engine.run("Acme").await.unwrap();
    assert!(output_file.ends_with("news_report.zip"));

    let full_path = temp_dir.path().join("news_report.zip");
    let zip_data = std::fs::read(&full_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();

    let file_names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(file_names, vec!["articles.csv", "report.json"]);

    let mut csv_content = String::new();
    archive
        .by_name("articles.csv")
        .unwrap()
        .read_to_string(&mut csv_content)
        .unwrap();
    let mut reader = csv::Reader::from_reader(csv_content.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Acme Corp profits soar");
    assert_eq!(&rows[0][3], "2024-05-01T12:00:00+00:00");
    assert_eq!(&rows[0][4], "Positive");
    assert_eq!(&rows[1][4], "Negative");

    let mut json_content = String::new();
    archive
        .by_name("report.json")
        .unwrap()
        .read_to_string(&mut json_content)
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&json_content).unwrap();
    assert_eq!(json["overview"], "Acme analysis: 2 articles processed");
}

#[tokio::test]
async fn test_news_api_error_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(401).json_body(serde_json::json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid or incorrect."
            }));
        })
        .await;

    let pipeline =
        NewsPipeline::from_config(config(&server, temp_dir.path().to_str().unwrap())).unwrap();
    let engine = AnalysisEngine::new(pipeline);

    let err = engine.run("Acme").await.unwrap_err();
    match err {
        AnalyzerError::NewsApiError { code, .. } => assert_eq!(code, "apiKeyInvalid"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!temp_dir.path().join("news_report.zip").exists());
}

#[tokio::test]
async fn test_all_pages_failing_means_no_articles() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    mock_pages(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(200).json_body(serde_json::json!({
                "status": "ok",
                "articles": [
                    {"title": "Removed story", "url": server.url("/articles/gone")}
                ]
            }));
        })
        .await;

    let pipeline =
        NewsPipeline::from_config(config(&server, temp_dir.path().to_str().unwrap())).unwrap();
    let engine = AnalysisEngine::new(pipeline);

    let err = engine.run("Acme").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::NoArticles { .. }));
}
