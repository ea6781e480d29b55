//! Noise filters applied to raw `innerText` dumps before they reach the model.

use shared_models::MarketMovements;
use std::collections::HashSet;

/// Menu, footer and call-to-action strings that show up in every text dump.
pub const IGNORED_KEYWORDS: &[&str] = &[
    "Leaderboards",
    "Trending",
    "Upcoming",
    "Recently Added",
    "Log In",
    "Sign Up",
    "Copyright",
    "Policies",
    "DexScan",
    "Read all",
    "Show more",
    "Followers",
    "Cookies",
    "Privacy",
];

pub const MIN_POST_LENGTH: usize = 40;
pub const MAX_POST_LENGTH: usize = 2000;

pub const MOVEMENT_ROWS: usize = 10;
pub const MAX_HEADLINES: usize = 15;
pub const MAX_COMMUNITY_POSTS: usize = 20;

const MIN_HEADLINE_CHARS: usize = 20;
const MAX_HEADLINE_CHARS: usize = 300;
const MIN_COMMUNITY_CHARS: usize = 30;

pub fn is_blacklisted(text: &str) -> bool {
    IGNORED_KEYWORDS.iter().any(|bad| text.contains(bad))
}

/// The gainers table comes first on the page and the losers table second, so
/// the losers start halfway through the combined row list.
pub fn split_movements(rows: &[String]) -> MarketMovements {
    let flatten = |r: &String| r.replace('\n', " ");
    let half = rows.len() / 2;

    MarketMovements {
        gainers: rows.iter().take(MOVEMENT_ROWS).map(flatten).collect(),
        losers: rows.iter().skip(half).take(MOVEMENT_ROWS).map(flatten).collect(),
    }
}

pub fn filter_headlines<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter_map(|text| {
            let clean = text.as_ref().trim();
            let len = clean.chars().count();
            if len <= MIN_HEADLINE_CHARS || len >= MAX_HEADLINE_CHARS || is_blacklisted(clean) {
                return None;
            }
            seen.insert(clean.to_string()).then(|| clean.to_string())
        })
        .take(MAX_HEADLINES)
        .collect()
}

/// Length is checked before trimming, matching what the page reports.
pub fn filter_community<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter(|text| {
            let text = text.as_ref();
            text.chars().count() > MIN_COMMUNITY_CHARS && !is_blacklisted(text)
        })
        .map(|text| text.as_ref().trim().to_string())
        .take(MAX_COMMUNITY_POSTS)
        .collect()
}

pub fn filter_posts<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter_map(|text| {
            let clean = text.as_ref().trim();
            let len = clean.chars().count();
            if !(MIN_POST_LENGTH..=MAX_POST_LENGTH).contains(&len) || is_blacklisted(clean) {
                return None;
            }
            seen.insert(clean.to_string()).then(|| clean.to_string())
        })
        .collect()
}

/// Single-line terminal preview.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
