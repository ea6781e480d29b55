use headless_chrome::{Browser, LaunchOptions, Tab};
use shared_models::error::{ModelError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// How long a navigation is allowed to take before the tab gives up.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
/// Extra wait after load to let late XHR-driven content render.
const NETWORK_IDLE_SETTLE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    DomContentLoaded,
    NetworkIdle,
}

/// The handful of browser operations the scraper relies on.
pub trait PageDriver {
    fn goto(&mut self, url: &str, wait: WaitUntil) -> Result<()>;

    /// Scroll the viewport vertically by `dy` pixels, like a mouse wheel.
    fn scroll_by(&mut self, dy: i64) -> Result<()>;

    /// `innerText` of every element matching `selector`. No match yields an
    /// empty list.
    fn inner_texts(&mut self, selector: &str) -> Result<Vec<String>>;

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A single Chromium instance with one tab.
pub struct ChromeSession {
    // Dropping the browser kills the Chromium process; keep it alongside the tab.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    pub fn launch(headless: bool, user_agent: &str) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .build()
            .map_err(|e| ModelError::Browser(format!("Invalid launch options: {}", e)))?;
        let browser = Browser::new(options)
            .map_err(|e| ModelError::Browser(format!("Failed to launch Chromium: {}", e)))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ModelError::Browser(format!("Failed to open tab: {}", e)))?;
        tab.set_default_timeout(NAVIGATION_TIMEOUT);
        tab.set_user_agent(user_agent, None, None)
            .map_err(|e| ModelError::Browser(format!("Failed to set user agent: {}", e)))?;

        info!(headless, "Chromium session started");
        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn evaluate_string(&self, expression: &str) -> Result<String> {
        let object = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| ModelError::Browser(format!("Script evaluation failed: {}", e)))?;
        match object.value {
            Some(serde_json::Value::String(s)) => Ok(s),
            other => Err(ModelError::Browser(format!(
                "Script returned a non-string value: {:?}",
                other
            ))),
        }
    }
}

impl PageDriver for ChromeSession {
    #[tracing::instrument(skip(self))]
    fn goto(&mut self, url: &str, wait: WaitUntil) -> Result<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ModelError::Browser(format!("Navigation to {} failed: {}", url, e)))?;

        if wait == WaitUntil::NetworkIdle {
            self.pause(NETWORK_IDLE_SETTLE);
        }
        debug!("Page loaded");
        Ok(())
    }

    fn scroll_by(&mut self, dy: i64) -> Result<()> {
        self.tab
            .evaluate(&format!("window.scrollBy(0, {dy})"), false)
            .map_err(|e| ModelError::Browser(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    fn inner_texts(&mut self, selector: &str) -> Result<Vec<String>> {
        let expression = inner_texts_script(selector)?;
        let json = self.evaluate_string(&expression)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Builds a script that serializes the texts to a JSON string, since CDP only
/// hands primitives back by value.
fn inner_texts_script(selector: &str) -> Result<String> {
    let quoted = serde_json::to_string(selector)?;
    Ok(format!(
        "JSON.stringify(Array.from(document.querySelectorAll({quoted}), e => e.innerText || ''))"
    ))
}
