use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

// Source Types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    MarketMovements,
    News,
    Community,
}

/// Top gainers and losers, one flattened table row per entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketMovements {
    pub gainers: Vec<String>,
    pub losers: Vec<String>,
}

impl MarketMovements {
    pub fn is_empty(&self) -> bool {
        self.gainers.is_empty() && self.losers.is_empty()
    }
}

/// Everything one scan collects, already filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPackage {
    pub community_posts: Vec<String>,
    pub market_movements: MarketMovements,
    pub latest_news: Vec<String>,
    pub collected_at: DateTime<Utc>,
}

impl Default for DataPackage {
    fn default() -> Self {
        Self {
            community_posts: Vec::new(),
            market_movements: MarketMovements::default(),
            latest_news: Vec::new(),
            collected_at: Utc::now(),
        }
    }
}

impl DataPackage {
    pub fn is_empty(&self) -> bool {
        self.community_posts.is_empty()
            && self.market_movements.is_empty()
            && self.latest_news.is_empty()
    }

    pub fn count(&self, source: SourceType) -> usize {
        match source {
            SourceType::MarketMovements => {
                self.market_movements.gainers.len() + self.market_movements.losers.len()
            }
            SourceType::News => self.latest_news.len(),
            SourceType::Community => self.community_posts.len(),
        }
    }
}

// Report Structs
//
// Keys mirror the JSON skeleton handed to the model. Every field defaults so a
// loosely conforming answer still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketReport {
    #[serde(rename = "1_gainers_losers_analysis")]
    pub gainers_losers_analysis: GainersLosersAnalysis,
    #[serde(rename = "2_news_intelligence")]
    pub news_intelligence: Vec<NewsItem>,
    #[serde(rename = "3_community_sentiment")]
    pub community_sentiment: CommunitySentiment,
    #[serde(rename = "4_final_conclusion")]
    pub final_conclusion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainersLosersAnalysis {
    pub highlight_gainer: CoinHighlight,
    pub highlight_loser: CoinHighlight,
    pub pattern_detected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinHighlight {
    pub coin: String,
    pub percentage: String,
    pub reason_hypothesis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
    pub importance: String,
    pub affected_coins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunitySentiment {
    pub overall_mood: String,
    pub hot_topics: Vec<String>,
    pub retail_perception: String,
}

/// A finished run: which model answered, what it said, and what it was fed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub run_id: Uuid,
    pub model: String,
    pub report: MarketReport,
    pub package: DataPackage,
    pub finished_at: DateTime<Utc>,
}

impl AnalysisOutcome {
    pub fn new(model: String, report: MarketReport, package: DataPackage) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            model,
            report,
            package,
            finished_at: Utc::now(),
        }
    }
}
