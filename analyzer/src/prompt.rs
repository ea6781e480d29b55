use shared_models::error::Result;
use shared_models::DataPackage;

const REPORT_SKELETON: &str = r#"{
    "1_gainers_losers_analysis": {
        "highlight_gainer": { "coin": "Name", "percentage": "%", "reason_hypothesis": "Why did it rise?" },
        "highlight_loser": { "coin": "Name", "percentage": "%", "reason_hypothesis": "Why did it fall?" },
        "pattern_detected": "e.g. AI coins are rising as a block / Memecoins are bleeding."
    },

    "2_news_intelligence": [
        {
            "headline": "Title of the real headline",
            "summary": "One-line summary",
            "importance": "High/Medium",
            "affected_coins": ["BTC", "ETH"]
        }
    ],

    "3_community_sentiment": {
        "overall_mood": "Fear / Neutral / Greed",
        "hot_topics": ["What are people discussing? e.g. BTC price, Scam, Moon"],
        "retail_perception": "Is the retail investor buying or panic selling?"
    },

    "4_final_conclusion": "Strategic summary tying the 3 points above together."
}"#;

/// Three-source analyst prompt. Sources are embedded as compact JSON with
/// non-ASCII text left intact.
pub fn build_market_prompt(package: &DataPackage) -> Result<String> {
    let movements = serde_json::to_string(&package.market_movements)?;
    let news = serde_json::to_string(&package.latest_news)?;
    let community = serde_json::to_string(&package.community_posts)?;

    Ok(format!(
        r#"You are a Crypto Intelligence Analyst. Your task is to produce a segregated report based on 3 distinct sources.

=== SOURCE 1: QUANTITATIVE DATA (Top Gainers & Losers) ===
{movements}

=== SOURCE 2: MEDIA AND NEWS (Facts) ===
{news}

=== SOURCE 3: SOCIAL SENTIMENT (Voice of the Community) ===
{community}

--- RESPONSE INSTRUCTIONS ---
Produce a JSON object with a separate key for each analysis. Do not mix the analyses.
List the 5 most important news items under "2_news_intelligence".

{REPORT_SKELETON}
"#
    ))
}
