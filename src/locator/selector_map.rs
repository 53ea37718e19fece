use crate::locator::candidate::SelectorCandidate;
use crate::locator::description::ElementDescription;
use crate::step::mapping_block;
use indexmap::IndexMap;
use serde::Serialize;

/// Locators recorded for one captured element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedElement {
    pub page_key: String,
    pub selectors: Vec<SelectorCandidate>,
}

/// Element keys of captured elements mapped to their ranked locators
/// Uses IndexMap to preserve capture order
#[derive(Debug, Clone, Default)]
pub struct SelectorMap {
    map: IndexMap<String, MappedElement>,
}

impl SelectorMap {
    /// Create a new empty SelectorMap
    pub fn new() -> Self {
        Self { map: IndexMap::new() }
    }

    /// Record a description and return the key it was stored under
    ///
    /// A key already taken by a different element gets a numeric suffix
    /// (`_2`, `_3`, ...). Capturing the same element again replaces its entry.
    pub fn register(&mut self, description: &ElementDescription) -> String {
        let entry = MappedElement {
            page_key: description.page_key.clone(),
            selectors: description.selectors.clone(),
        };

        let mut key = description.element_key.clone();
        let mut suffix = 1;
        while let Some(existing) = self.map.get(&key) {
            if existing == &entry {
                break;
            }
            suffix += 1;
            key = format!("{}_{}", description.element_key, suffix);
        }

        self.map.insert(key.clone(), entry);
        key
    }

    /// Get the entry for a key
    pub fn get(&self, key: &str) -> Option<&MappedElement> {
        self.map.get(key)
    }

    /// Check if key exists
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Remove an entry by key
    pub fn remove(&mut self, key: &str) -> Option<MappedElement> {
        self.map.shift_remove(key)
    }

    /// Get the number of registered elements
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all elements
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate over all (key, entry) pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MappedElement)> {
        self.map.iter()
    }

    /// Get all keys
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.map.keys()
    }

    /// Find the key whose candidates include `selector`
    pub fn find_by_selector(&self, selector: &str) -> Option<&str> {
        self.map
            .iter()
            .find(|(_, entry)| entry.selectors.iter().any(|c| c.selector == selector))
            .map(|(key, _)| key.as_str())
    }

    /// Render all entries as a selector-mapping block
    pub fn render(&self) -> String {
        self.map
            .iter()
            .map(|(key, entry)| mapping_block(key, &entry.selectors))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.map)
    }
}
