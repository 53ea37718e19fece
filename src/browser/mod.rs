//! Live page snapshots through Chrome DevTools

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::{BrowserSession, TARGET_MARKER};
