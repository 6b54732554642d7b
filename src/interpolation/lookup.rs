//! Key to string resolution for template tokens

use std::collections::HashMap;
use std::fmt;

/// Resolves a token key to its replacement text
pub trait StringLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> StringLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

type Supplier<'a> = Box<dyn Fn() -> Option<String> + 'a>;

/// Lazily evaluated string producers, one per key.
///
/// A lookup is filled by registrars for a single rendered message and then
/// dropped. Suppliers run on every lookup: a template that uses a token
/// twice evaluates its supplier twice.
#[derive(Default)]
pub struct SupplierLookup<'a> {
    suppliers: HashMap<String, Supplier<'a>>,
}

impl<'a> SupplierLookup<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `supplier` under `key`, replacing any previous registration
    pub fn add_supplier<F>(&mut self, key: impl Into<String>, supplier: F)
    where
        F: Fn() -> String + 'a,
    {
        self.suppliers
            .insert(key.into(), Box::new(move || Some(supplier())));
    }

    /// Register a supplier that may have nothing to say
    pub fn add_optional_supplier<F>(&mut self, key: impl Into<String>, supplier: F)
    where
        F: Fn() -> Option<String> + 'a,
    {
        self.suppliers.insert(key.into(), Box::new(supplier));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.suppliers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

impl StringLookup for SupplierLookup<'_> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.suppliers.get(key).and_then(|supplier| supplier())
    }
}

impl fmt::Debug for SupplierLookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.suppliers.keys().collect();
        keys.sort();
        f.debug_struct("SupplierLookup").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_missing_key_is_none() {
        let lookup = SupplierLookup::new();
        assert_eq!(lookup.lookup("method"), None);
        assert!(lookup.is_empty());
    }

    #[test]
    fn test_add_supplier_overwrites() {
        let mut lookup = SupplierLookup::new();
        lookup.add_supplier("k", || "first".to_string());
        lookup.add_supplier("k", || "second".to_string());
        assert_eq!(lookup.lookup("k").as_deref(), Some("second"));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_supplier_runs_per_lookup() {
        let calls = AtomicUsize::new(0);
        let mut lookup = SupplierLookup::new();
        lookup.add_supplier("n", || calls.fetch_add(1, Ordering::SeqCst).to_string());

        assert_eq!(lookup.lookup("n").as_deref(), Some("0"));
        assert_eq!(lookup.lookup("n").as_deref(), Some("1"));
        drop(lookup);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_optional_supplier_may_yield_nothing() {
        let mut lookup = SupplierLookup::new();
        lookup.add_optional_supplier("maybe", || None);
        assert!(lookup.contains_key("maybe"));
        assert_eq!(lookup.lookup("maybe"), None);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |key: &str| (key == "a").then(|| "A".to_string());
        assert_eq!(lookup.lookup("a").as_deref(), Some("A"));
        assert_eq!(lookup.lookup("b"), None);
    }
}
