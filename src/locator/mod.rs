//! Element description and locator synthesis
//!
//! Given an element of a [`DocumentTree`](crate::dom::DocumentTree), [`describe`]
//! resolves its accessible role and name, ranks locator candidates a test
//! framework can use, derives a compact element key and flags fragile selectors.
//! Each signal lookup lives in its own function so it can be tested in isolation.

pub mod candidate;
pub mod css;
pub mod description;
pub mod key;
pub mod name;
pub mod role;
pub mod selector_map;
pub mod text;
pub mod warning;

pub use candidate::{SelectorCandidate, SelectorKind};
pub use description::{ElementDescription, describe};
pub use key::{element_key, page_key};
pub use name::{NameSource, resolve_name};
pub use role::resolve_role;
pub use selector_map::{MappedElement, SelectorMap};
pub use warning::Warning;
