use analyzer::{CryptoAnalyzer, GeminiClient, CANDIDATE_MODELS};
use cmc_scraper::CmcScraper;
use mockito::Matcher;
use monitor::pipeline::run_pipeline;
use shared_models::{AnalysisOutcome, DataPackage};
use tests::{gemini_body, init_tracing, test_config, StaticSite, NEWS_URL};

const REPORT: &str = r#"```json
{
    "1_gainers_losers_analysis": {
        "highlight_gainer": { "coin": "GAIN1", "percentage": "+99%", "reason_hypothesis": "Listing pump" },
        "highlight_loser": { "coin": "LOSE100", "percentage": "-50%", "reason_hypothesis": "Unlock dump" },
        "pattern_detected": "Small caps swinging hard both ways."
    },
    "2_news_intelligence": [
        { "headline": "Bitcoin miners move reserves", "summary": "Miners sent BTC to exchanges.", "importance": "High", "affected_coins": ["BTC"] }
    ],
    "3_community_sentiment": {
        "overall_mood": "Neutral",
        "hot_topics": ["SOL breakout", "alt capitulation"],
        "retail_perception": "Split between dip buyers and panic sellers."
    },
    "4_final_conclusion": "Mixed signals; watch BTC miner flows."
}
```"#;

fn mock_path(model: &str) -> String {
    format!("/v1beta/{model}:generateContent")
}

#[test]
fn comprehensive_scan_filters_every_source() {
    init_tracing();
    let mut scraper = CmcScraper::new(StaticSite::coinmarketcap(), test_config());
    let package = scraper.run_comprehensive_scan();

    let movements = &package.market_movements;
    assert_eq!(movements.gainers.len(), 10);
    assert_eq!(movements.gainers[0], "1 GAIN1 $1.00 +99%");
    assert_eq!(movements.losers.len(), 10);
    assert_eq!(movements.losers[0], "51 LOSE51 $51.00 -1%");

    assert_eq!(package.latest_news.len(), 15);
    assert!(package.latest_news.iter().all(|n| n.starts_with("Headline ")));
    assert_eq!(
        package.latest_news[0],
        "Headline 1: Bitcoin miners move reserves amid volatility"
    );

    assert_eq!(
        package.community_posts,
        vec![
            "SOL is breaking out, the chart looks incredibly bullish to me",
            "Everyone is panic selling their alts, blood in the streets today",
        ]
    );

    let site = scraper.into_driver();
    assert_eq!(site.visited.len(), 3);
    assert_eq!(site.scrolls, 3);
}

#[test]
fn unreachable_news_page_keeps_market_data() {
    init_tracing();
    let site = StaticSite::coinmarketcap().unreachable(NEWS_URL);
    let mut scraper = CmcScraper::new(site, test_config());
    let package = scraper.run_comprehensive_scan();

    assert_eq!(package.market_movements.gainers.len(), 10);
    assert!(package.latest_news.is_empty());
    assert!(package.community_posts.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scan_analyze_and_write_report() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;

    let overloaded = server
        .mock("POST", mock_path(CANDIDATE_MODELS[0]).as_str())
        .match_header("x-goog-api-key", "test-key")
        .with_status(503)
        .with_body(r#"{"error":{"code":503,"message":"The model is overloaded."}}"#)
        .expect(1)
        .create_async()
        .await;
    let answering = server
        .mock("POST", mock_path(CANDIDATE_MODELS[1]).as_str())
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("GAIN1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(REPORT))
        .expect(1)
        .create_async()
        .await;
    let untouched = server
        .mock("POST", mock_path(CANDIDATE_MODELS[2]).as_str())
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("test-key", server.url()).unwrap();
    let analyzer = CryptoAnalyzer::new(client);

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("market_report.json");

    let outcome = run_pipeline(
        || {
            let mut scraper = CmcScraper::new(StaticSite::coinmarketcap(), test_config());
            Ok(scraper.run_comprehensive_scan())
        },
        &analyzer,
        Some(&report_path),
    )
    .await
    .unwrap()
    .expect("package was not empty");

    overloaded.assert_async().await;
    answering.assert_async().await;
    untouched.assert_async().await;

    assert_eq!(outcome.model, CANDIDATE_MODELS[1]);
    let report = &outcome.report;
    assert_eq!(report.gainers_losers_analysis.highlight_gainer.coin, "GAIN1");
    assert_eq!(report.news_intelligence[0].affected_coins, vec!["BTC"]);
    assert_eq!(report.community_sentiment.overall_mood, "Neutral");
    assert_eq!(report.final_conclusion, "Mixed signals; watch BTC miner flows.");

    let written: AnalysisOutcome =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(written.run_id, outcome.run_id);
    assert_eq!(written.package.latest_news.len(), 15);
}

#[tokio::test]
async fn empty_scan_never_calls_gemini() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let any_call = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("test-key", server.url()).unwrap();
    let analyzer = CryptoAnalyzer::new(client);

    let outcome = run_pipeline(|| Ok(DataPackage::default()), &analyzer, None)
        .await
        .unwrap();
    assert!(outcome.is_none());
    any_call.assert_async().await;
}

/// Hits the real site and API. Needs Chromium, network access, and
/// CMC_URL, CMC_URL_GAINERS, CMC_URL_NEWS and GEMINI_API_KEY in the environment.
#[cfg(feature = "live-tests")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[ignore]
async fn live_market_report() -> shared_models::error::Result<()> {
    init_tracing();
    require_live_env()?;

    let config = cmc_scraper::ScraperConfig::load()?;
    let analyzer = CryptoAnalyzer::from_env()?;
    let outcome = run_pipeline(move || cmc_scraper::scan(config), &analyzer, None).await?;
    tracing::info!(got_report = outcome.is_some(), "Live run finished");
    Ok(())
}

#[cfg(feature = "live-tests")]
fn require_live_env() -> shared_models::error::Result<()> {
    for key in ["CMC_URL", "CMC_URL_GAINERS", "CMC_URL_NEWS", "GEMINI_API_KEY"] {
        if std::env::var(key).is_err() {
            return Err(shared_models::error::ModelError::Config(format!("{key} not set")));
        }
    }
    Ok(())
}
