//! Chromium driver over the Chrome `DevTools` Protocol.
//!
//! Elements are located with the CSS derived from [`Selector`]. Typing goes
//! through real key events so the screen's own handlers run; clearing uses
//! the native value setter plus an `input` event, which is what controlled
//! inputs listen to.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::config::HarnessConfig;
use crate::driver::UiDriver;
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};

/// Browser launch options
#[derive(Debug, Clone)]
pub struct ChromiumOptions {
    /// Run in headless mode
    pub headless: bool,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for ChromiumOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chromium_path: None,
            viewport_width: 1366,
            viewport_height: 900,
        }
    }
}

impl ChromiumOptions {
    /// Options taken from harness configuration
    #[must_use]
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            headless: config.headless,
            chromium_path: config.chromium_path.clone(),
            ..Self::default()
        }
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

fn cdp_error(e: impl std::fmt::Display) -> ProbeError {
    ProbeError::driver(e.to_string())
}

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}

/// [`UiDriver`] backed by a real Chromium page
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Mutex<Browser>,
    page: Page,
    handler: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    pub async fn launch(options: ChromiumOptions) -> ProbeResult<Self> {
        let launch_error = |e: String| ProbeError::BrowserLaunch { message: e };

        let mut builder = BrowserConfig::builder()
            .window_size(options.viewport_width, options.viewport_height);
        if !options.headless {
            builder = builder.with_head();
        }
        if !options.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = options.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(launch_error)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| launch_error(e.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| launch_error(e.to_string()))?;
        tracing::info!(headless = options.headless, "chromium launched");

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler,
        })
    }

    /// Close the browser
    pub async fn close(self) -> ProbeResult<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(cdp_error)?;
        self.handler.abort();
        Ok(())
    }

    async fn eval<T: DeserializeOwned>(&self, js: String) -> ProbeResult<T> {
        self.page
            .evaluate(js)
            .await
            .map_err(cdp_error)?
            .into_value()
            .map_err(cdp_error)
    }

    async fn element(&self, selector: &Selector) -> ProbeResult<chromiumoxide::element::Element> {
        self.page
            .find_element(selector.to_css())
            .await
            .map_err(|_| ProbeError::unavailable(selector.to_string()))
    }
}

#[async_trait]
impl UiDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ProbeError::NavigationFailure {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.page.url().await.map_err(cdp_error)?.unwrap_or_default())
    }

    async fn count(&self, selector: &Selector) -> ProbeResult<usize> {
        self.eval(selector.to_count_query()).await
    }

    async fn click(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.element(selector)
            .await?
            .click()
            .await
            .map_err(cdp_error)?;
        Ok(())
    }

    async fn clear(&mut self, selector: &Selector) -> ProbeResult<()> {
        let js = format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
             Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, ''); \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); return true; }})()",
            selector.to_query()
        );
        if self.eval::<bool>(js).await? {
            Ok(())
        } else {
            Err(ProbeError::unavailable(selector.to_string()))
        }
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> ProbeResult<()> {
        let element = self.element(selector).await?;
        element.focus().await.map_err(cdp_error)?;
        element.type_str(text).await.map_err(cdp_error)?;
        Ok(())
    }

    async fn check(&mut self, selector: &Selector) -> ProbeResult<()> {
        let js = format!(
            "(() => {{ const el = {}; if (!el) return false; if (!el.checked) el.click(); return true; }})()",
            selector.to_query()
        );
        if self.eval::<bool>(js).await? {
            Ok(())
        } else {
            Err(ProbeError::unavailable(selector.to_string()))
        }
    }

    async fn select_option(&mut self, selector: &Selector, value: &str) -> ProbeResult<()> {
        let js = format!(
            "(() => {{ const el = {}; if (!el) return null; \
             const labels = Array.from(el.options).map(o => o.value); \
             if (!labels.includes({value})) return labels; \
             el.value = {value}; el.dispatchEvent(new Event('change', {{ bubbles: true }})); return []; }})()",
            selector.to_query(),
            value = js_string(value)
        );
        match self.eval::<Option<Vec<String>>>(js).await? {
            None => Err(ProbeError::unavailable(selector.to_string())),
            Some(candidates) if candidates.is_empty() => Ok(()),
            Some(candidates) => Err(ProbeError::SelectionNotFound {
                locator: selector.to_string(),
                key: value.to_string(),
                candidates,
            }),
        }
    }

    async fn read_value(&self, selector: &Selector) -> ProbeResult<String> {
        let js = format!(
            "(() => {{ const el = {}; if (!el) return null; \
             if (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA' || el.tagName === 'SELECT') return String(el.value); \
             return el.textContent.trim(); }})()",
            selector.to_query()
        );
        self.eval::<Option<String>>(js)
            .await?
            .ok_or_else(|| ProbeError::unavailable(selector.to_string()))
    }

    async fn options(&self) -> ProbeResult<Vec<String>> {
        self.eval(
            "Array.from(document.querySelectorAll('[role=\"option\"]')).map(o => o.textContent.trim())"
                .to_string(),
        )
        .await
    }

    async fn choose_option(&mut self, label: &str) -> ProbeResult<()> {
        let js = format!(
            "(() => {{ const opt = Array.from(document.querySelectorAll('[role=\"option\"]')) \
             .find(o => o.textContent.trim() === {}); if (!opt) return false; opt.click(); return true; }})()",
            js_string(label)
        );
        if self.eval::<bool>(js).await? {
            Ok(())
        } else {
            Err(ProbeError::SelectionNotFound {
                locator: "[role=\"option\"]".to_string(),
                key: label.to_string(),
                candidates: self.options().await?,
            })
        }
    }
}
