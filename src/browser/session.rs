use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            capture::CaptureSession,
            dom::{DocumentTree, DomTree, ElementNode, NodeId},
            error::{LocatorError, Result}};
use headless_chrome::{Browser, Tab};
use serde::Deserialize;
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Attribute temporarily set on the target element while the page is serialized
pub const TARGET_MARKER: &str = "data-step-locator-target";

const SNAPSHOT_JS: &str = include_str!("snapshot.js");

/// Payload returned by the snapshot script
#[derive(Debug, Deserialize)]
struct PageSnapshot {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    root: Option<ElementNode>,
    #[serde(default)]
    error: Option<String>,
}

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep the browser alive while a user works through a page
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| LocatorError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| LocatorError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| LocatorError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| LocatorError::ConnectionFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        for tab in &tabs {
            match tab.evaluate("document.visibilityState === 'visible'", false) {
                Ok(remote_object) => {
                    if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                        return Ok(tab.clone());
                    }
                }
                Err(e) => log::debug!("Failed to check tab status: {}", e),
            }
        }

        tabs.last()
            .cloned()
            .ok_or_else(|| LocatorError::ConnectionFailed("No open tab found".to_string()))
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| LocatorError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| LocatorError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Serialize the current page into a [`DomTree`]
    pub fn snapshot(&self) -> Result<DomTree> {
        let (tree, _) = self.run_snapshot(None)?;
        Ok(tree)
    }

    /// Serialize the current page and locate the element matching `selector` in it
    pub fn snapshot_with_target(&self, selector: &str) -> Result<(DomTree, NodeId)> {
        let (tree, target) = self.run_snapshot(Some(selector))?;
        let target = target.ok_or_else(|| LocatorError::ElementNotFound(format!("no element matches '{}'", selector)))?;
        Ok((tree, target))
    }

    /// Snapshot the page into a capture session targeting `selector`
    pub fn capture_session(&self, selector: &str) -> Result<CaptureSession> {
        let (tree, target) = self.snapshot_with_target(selector)?;
        let mut session = CaptureSession::new(tree);
        session.set_target(target)?;
        Ok(session)
    }

    fn run_snapshot(&self, selector: Option<&str>) -> Result<(DomTree, Option<NodeId>)> {
        let arguments = format!(
            "({}, {})",
            serde_json::to_string(&selector).map_err(|e| LocatorError::EvaluationFailed(e.to_string()))?,
            serde_json::to_string(TARGET_MARKER).map_err(|e| LocatorError::EvaluationFailed(e.to_string()))?,
        );
        let script = format!("{}{}", SNAPSHOT_JS.trim_end(), arguments);

        let result = self
            .tab()?
            .evaluate(&script, false)
            .map_err(|e| LocatorError::EvaluationFailed(format!("Failed to execute snapshot script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| LocatorError::DomParseFailed("No value returned from snapshot script".to_string()))?;

        // The script returns a JSON string, so it is decoded as a string first
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| LocatorError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        parse_snapshot(&json_str)
    }

    /// Close all tabs of the browser
    pub fn close(&self) -> Result<()> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| LocatorError::ConnectionFailed(format!("Failed to get tabs: {}", e)))?
            .clone();
        for tab in tabs {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab: {}", e);
            }
        }
        Ok(())
    }
}

/// Build a tree from the snapshot script output, resolving and removing the target marker
fn parse_snapshot(json: &str) -> Result<(DomTree, Option<NodeId>)> {
    let snapshot: PageSnapshot = serde_json::from_str(json)
        .map_err(|e| LocatorError::DomParseFailed(format!("Failed to parse snapshot JSON: {}", e)))?;

    if let Some(error) = snapshot.error {
        return Err(LocatorError::ElementNotFound(error));
    }
    let root = snapshot
        .root
        .ok_or_else(|| LocatorError::DomParseFailed("Snapshot has no document element".to_string()))?;

    let mut tree = DomTree::new(root).with_url(snapshot.url).with_title(snapshot.title);
    let target = tree.find_by_attribute(TARGET_MARKER);
    if let Some(node) = target {
        tree.remove_attribute(node, TARGET_MARKER);
    }

    log::debug!("snapshot of {} with {} elements", tree.url(), tree.count_elements());
    Ok((tree, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(false).window_size(800, 600).sandbox(false);

        assert!(!opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
        assert!(!opts.sandbox);
    }

    #[test]
    fn test_connection_options() {
        let opts = ConnectionOptions::new("ws://localhost:9222").timeout(5000);

        assert_eq!(opts.ws_url, "ws://localhost:9222");
        assert_eq!(opts.timeout, 5000);
    }

    #[test]
    fn test_parse_snapshot_with_marker() {
        let json = r#"{
            "url": "https://example.com/login",
            "title": "Login",
            "root": {"tag_name": "html", "attributes": {}, "children": [
                {"tag_name": "body", "attributes": {}, "children": [
                    {"tag_name": "input", "attributes": {"type": "password", "data-step-locator-target": ""}, "children": []}
                ]}
            ]}
        }"#;

        let (tree, target) = parse_snapshot(json).unwrap();
        let target = target.unwrap();

        assert_eq!(tree.url(), "https://example.com/login");
        assert_eq!(tree.title(), "Login");
        assert_eq!(tree.tag_name(target), "input");
        assert_eq!(tree.attribute(target, TARGET_MARKER), None);
        assert!(!tree.outer_html(target).contains(TARGET_MARKER));
    }

    #[test]
    fn test_parse_snapshot_without_marker() {
        let json = r#"{"url": "about:blank", "title": "", "root": {"tag_name": "html"}}"#;
        let (tree, target) = parse_snapshot(json).unwrap();

        assert_eq!(target, None);
        assert_eq!(tree.count_elements(), 1);
    }

    #[test]
    fn test_parse_snapshot_error() {
        let err = parse_snapshot(r#"{"error": "no element matches '#x'"}"#).unwrap_err();
        assert!(matches!(err, LocatorError::ElementNotFound(_)));

        let err = parse_snapshot(r#"{"url": "x"}"#).unwrap_err();
        assert!(matches!(err, LocatorError::DomParseFailed(_)));
    }

    #[test]
    fn test_snapshot_script_is_an_expression() {
        assert!(SNAPSHOT_JS.trim_start().starts_with("(function"));
        assert!(SNAPSHOT_JS.trim_end().ends_with(')'));
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_navigate() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let result = session.navigate("about:blank");
        assert!(result.is_ok());
    }
}
