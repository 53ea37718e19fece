//! # step-locator
//!
//! Describe a web page element the way a test author needs it: its accessible
//! role and name, a ranked list of locators (role, label, placeholder, test id,
//! text, CSS fallback), a compact element key and warnings about fragile selectors.
//!
//! ## Describing an element of an HTML document
//!
//! ```rust
//! use step_locator::{CaptureSession, SelectorKind};
//!
//! # fn main() -> step_locator::Result<()> {
//! let mut session = CaptureSession::from_html(
//!     r#"<body><button id="submit-btn" aria-label="Submit Order">Buy</button></body>"#,
//! );
//! session.target_by_selector("#submit-btn")?;
//! let description = session.capture()?;
//!
//! assert_eq!(description.element_key, "button_submit_order");
//! assert_eq!(description.selectors[0].kind, SelectorKind::ByRole);
//! # Ok(())
//! # }
//! ```
//!
//! ## Describing an element of a live page
//!
//! ```rust,no_run
//! use step_locator::{BrowserSession, LaunchOptions};
//! use step_locator::step::{Assertion, gherkin_step};
//!
//! # fn main() -> step_locator::Result<()> {
//! let browser = BrowserSession::launch(LaunchOptions::default())?;
//! browser.navigate("https://example.com")?;
//! browser.wait_for_navigation()?;
//!
//! let mut session = browser.capture_session("a")?;
//! let description = session.capture()?;
//! println!("{}", gherkin_step(&description, &Assertion::Visible));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: element tree, the [`DocumentTree`] provider trait and HTML parsing
//! - [`locator`]: role/name resolution, locator candidates, keys and warnings
//! - [`capture`]: per-document capture state
//! - [`step`]: Gherkin steps, selector-mapping blocks and plain-text output
//! - [`browser`]: Chrome sessions and live page snapshots
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod capture;
pub mod dom;
pub mod error;
pub mod locator;
pub mod step;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use capture::CaptureSession;
pub use dom::{DocumentTree, DomTree, ElementNode, NodeId};
pub use error::{LocatorError, Result};
pub use locator::{ElementDescription, SelectorCandidate, SelectorKind, SelectorMap, Warning, describe};
