//! # Listener registries.
//!
//! Two stores back the dispatcher:
//! - [`ExactRegistry`] event name → listeners, looked up by equality;
//! - [`WildcardRegistry`] pattern → listeners, looked up by matching every pattern.
//!
//! ## Rules
//! - Entries are created on first insert and removed by `forget`.
//! - A [`ListenerSet`] never holds the same listener twice; insertion order is dispatch order.
//! - Wildcard entries keep the order in which their patterns were first registered.

use std::collections::HashMap;
use std::sync::Arc;

use super::pattern::Pattern;
use crate::listeners::{ListenerRef, same_listener};

/// Ordered, duplicate-free listener collection.
#[derive(Default)]
pub(crate) struct ListenerSet {
    items: Vec<ListenerRef>,
}

impl ListenerSet {
    /// Appends `listener` unless already present. Returns `true` if added.
    pub fn insert(&mut self, listener: ListenerRef) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.items.push(listener);
        true
    }

    pub fn contains(&self, listener: &ListenerRef) -> bool {
        self.items.iter().any(|l| same_listener(l, listener))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListenerRef> {
        self.items.iter()
    }
}

/// Exact event name → listeners.
#[derive(Default)]
pub(crate) struct ExactRegistry {
    entries: HashMap<String, ListenerSet>,
}

impl ExactRegistry {
    pub fn insert(&mut self, event: &str, listener: ListenerRef) -> bool {
        self.entries
            .entry(event.to_string())
            .or_default()
            .insert(listener)
    }

    pub fn forget(&mut self, event: &str) -> bool {
        self.entries.remove(event).is_some()
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.entries.get(event).is_some_and(|s| !s.is_empty())
    }

    /// Appends the listeners for `event` to `out`.
    pub fn collect_into(&self, event: &str, out: &mut Vec<ListenerRef>) {
        if let Some(set) = self.entries.get(event) {
            out.extend(set.iter().map(Arc::clone));
        }
    }
}

/// Wildcard pattern → listeners, in pattern registration order.
#[derive(Default)]
pub(crate) struct WildcardRegistry {
    entries: Vec<(Pattern, ListenerSet)>,
}

impl WildcardRegistry {
    /// Adds `listener` under the pattern `source`, compiling it on first use.
    pub fn insert(&mut self, source: &str, listener: ListenerRef) -> Result<bool, regex::Error> {
        if let Some((_, set)) = self.entries.iter_mut().find(|(p, _)| p.as_str() == source) {
            return Ok(set.insert(listener));
        }

        let mut set = ListenerSet::default();
        set.insert(listener);
        self.entries.push((Pattern::new(source)?, set));
        Ok(true)
    }

    pub fn forget(&mut self, source: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(p, _)| p.as_str() != source);
        self.entries.len() != before
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.entries
            .iter()
            .any(|(p, set)| !set.is_empty() && p.matches(event))
    }

    /// Appends the listeners of every matching pattern to `out`.
    pub fn collect_into(&self, event: &str, out: &mut Vec<ListenerRef>) {
        for (pattern, set) in &self.entries {
            if pattern.matches(event) {
                out.extend(set.iter().map(Arc::clone));
            }
        }
    }

    #[cfg(test)]
    pub fn count(&self, source: &str) -> usize {
        self.entries
            .iter()
            .find(|(p, _)| p.as_str() == source)
            .map_or(0, |(_, set)| set.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::{ListenerFn, Payload};

    fn named(name: &'static str) -> ListenerRef {
        ListenerFn::arc(name, |_: &str, _: &Payload| {})
    }

    fn names(list: &[ListenerRef]) -> Vec<&str> {
        list.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn test_set_dedups_by_identity() {
        let a = named("a");
        let mut set = ListenerSet::default();

        assert!(set.insert(Arc::clone(&a)));
        assert!(!set.insert(Arc::clone(&a)));
        assert!(set.insert(named("a")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_exact_forget_starts_fresh() {
        let mut reg = ExactRegistry::default();
        reg.insert("e", named("a"));
        assert!(reg.has_listeners("e"));

        assert!(reg.forget("e"));
        assert!(!reg.has_listeners("e"));
        assert!(!reg.forget("e"));

        reg.insert("e", named("b"));
        let mut out = Vec::new();
        reg.collect_into("e", &mut out);
        assert_eq!(names(&out), vec!["b"]);
    }

    #[test]
    fn test_wildcard_order_follows_patterns() {
        let mut reg = WildcardRegistry::default();
        reg.insert("a.*", named("first")).unwrap();
        reg.insert("*", named("second")).unwrap();
        reg.insert("a.*", named("third")).unwrap();
        reg.insert("b.*", named("other")).unwrap();

        let mut out = Vec::new();
        reg.collect_into("a.x", &mut out);
        assert_eq!(names(&out), vec!["first", "third", "second"]);
        assert_eq!(reg.count("a.*"), 2);
    }

    #[test]
    fn test_wildcard_has_listeners_uses_matching() {
        let mut reg = WildcardRegistry::default();
        reg.insert("order.*", named("l")).unwrap();

        assert!(reg.has_listeners("order.created"));
        assert!(reg.has_listeners("order.*"));
        assert!(!reg.has_listeners("order"));

        assert!(reg.forget("order.*"));
        assert!(!reg.has_listeners("order.created"));
        assert_eq!(reg.count("order.*"), 0);
    }
}
