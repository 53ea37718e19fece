//! Document model used by the locator engine
//!
//! This module provides:
//! - ElementNode: owned, serializable element hierarchy (HTML or browser snapshot)
//! - DocumentTree: read-only provider interface the locator engine queries
//! - DomTree: arena-backed implementation with parent links and CSS selection

pub mod element;
pub mod provider;
pub mod tree;

pub use element::{ChildNode, ElementNode};
pub use provider::{DocumentTree, NodeId};
pub use tree::DomTree;
