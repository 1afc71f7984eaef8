//! Best-effort binding of loaded ids onto caller-defined named slots.

use std::collections::HashMap;

/// A registry of named id slots supplied by the caller.
///
/// During a load the table offers every `(name, id)` pair it produces, in
/// file order, resolved or not. Implementations bind the id when they know
/// the name and silently ignore it otherwise; binding must never fail.
pub trait SlotRegistry {
    /// Offer one curated name and the id it loaded with.
    fn set_slot(&mut self, name: &str, id: u16);
}

/// The no-op registry, for loads that don't bind slots.
impl SlotRegistry for () {
    fn set_slot(&mut self, _name: &str, _id: u16) {}
}

/// Pre-declared slots keyed by name. Only names already present in the map
/// are bound; the load never grows the registry.
impl SlotRegistry for HashMap<String, u16> {
    fn set_slot(&mut self, name: &str, id: u16) {
        if let Some(slot) = self.get_mut(name) {
            *slot = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_registry_binds_only_declared_names() {
        let mut slots: HashMap<String, u16> = [("Ping".to_string(), 0)].into();
        slots.set_slot("Ping", 10);
        slots.set_slot("Unknown", 99);

        assert_eq!(slots.get("Ping"), Some(&10));
        assert_eq!(slots.len(), 1);
    }
}
