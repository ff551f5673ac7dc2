use std::collections::HashMap;

use crate::error::{FuelError, Result};

/// Chosen product counts keyed by item key.
///
/// Keys that are not present have a count of 0. Only the interactive layer
/// mutates this; the planner reads it as a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    counts: HashMap<String, u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a key (0 when unselected).
    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Add one unit.
    pub fn add(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Remove one unit. No-op at zero.
    pub fn remove(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(key);
            }
        }
    }

    /// Set an exact count; 0 clears the entry.
    pub fn set(&mut self, key: &str, count: u32) {
        if count == 0 {
            self.counts.remove(key);
        } else {
            self.counts.insert(key.to_string(), count);
        }
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Selected entries sorted by key.
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Total units across all products.
    pub fn total_items(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Parse a `KEY=COUNT` selection argument.
pub fn parse_entry(s: &str) -> Result<(String, u32)> {
    let (key, count) = s
        .split_once('=')
        .ok_or_else(|| FuelError::InvalidInput(format!("expected KEY=COUNT, got '{}'", s)))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(FuelError::InvalidInput(format!("missing key in '{}'", s)));
    }

    let count = count
        .trim()
        .parse()
        .map_err(|_| FuelError::InvalidInput(format!("invalid count in '{}'", s)))?;

    Ok((key.to_string(), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut selection = Selection::new();
        selection.add("maurten-gel_100-");
        selection.add("maurten-gel_100-");
        assert_eq!(selection.count("maurten-gel_100-"), 2);

        selection.remove("maurten-gel_100-");
        assert_eq!(selection.count("maurten-gel_100-"), 1);

        selection.remove("maurten-gel_100-");
        selection.remove("maurten-gel_100-");
        assert_eq!(selection.count("maurten-gel_100-"), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_set_zero_clears() {
        let mut selection = Selection::new();
        selection.set("a", 3);
        selection.set("b", 1);
        assert_eq!(selection.total_items(), 4);

        selection.set("a", 0);
        assert_eq!(selection.entries(), vec![("b", 1)]);
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("a-b-=3").unwrap(), ("a-b-".to_string(), 3));
        assert_eq!(parse_entry(" a = 0 ").unwrap(), ("a".to_string(), 0));
        assert!(parse_entry("no-count").is_err());
        assert!(parse_entry("=2").is_err());
        assert!(parse_entry("a=-1").is_err());
        assert!(parse_entry("a=x").is_err());
    }
}
