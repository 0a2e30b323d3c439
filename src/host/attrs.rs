//! Character attribute helpers.
use log::trace;

use super::{Attribute, ObjectStore};

/// First attribute named `name` on the character, if any.
pub fn get_attr<S: ObjectStore + ?Sized>(store: &S, character_id: &str, name: &str) -> Option<Attribute> {
    store.find_attributes(character_id, name).into_iter().next()
}

/// Find or create an attribute and set its `current` value.
///
/// A missing attribute, or one whose current value is blank, is created fresh
/// and always receives `value`. An existing attribute is only overwritten when
/// `dont_overwrite` is false. Passing `None` for `value` never writes.
pub fn set_attr<S: ObjectStore + ?Sized>(
    store: &mut S,
    character_id: &str,
    name: &str,
    value: Option<&str>,
    dont_overwrite: bool,
) -> Attribute {
    let (mut attr, fresh) = match get_attr(store, character_id, name) {
        Some(existing) if !existing.current.trim().is_empty() => (existing, false),
        _ => (store.create_attribute(character_id, name), true),
    };
    if let Some(v) = value {
        if fresh || !dont_overwrite {
            trace!("set_attr {}/{} = {}", character_id, name, v);
            store.set_attribute_current(&attr.id, v);
            attr.current = v.to_string();
        }
    }
    attr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn creates_missing_attribute_even_when_deferring() {
        let mut host = MemoryHost::new();
        let attr = set_attr(&mut host, "c1", "hp", Some("10"), true);
        assert_eq!(attr.current, "10");
        assert_eq!(get_attr(&host, "c1", "hp").unwrap().current, "10");
    }

    #[test]
    fn dont_overwrite_keeps_existing_value() {
        let mut host = MemoryHost::new();
        set_attr(&mut host, "c1", "hp", Some("10"), false);
        let attr = set_attr(&mut host, "c1", "hp", Some("3"), true);
        assert_eq!(attr.current, "10");
        let attr = set_attr(&mut host, "c1", "hp", Some("3"), false);
        assert_eq!(attr.current, "3");
    }

    #[test]
    fn none_value_only_ensures_existence() {
        let mut host = MemoryHost::new();
        let attr = set_attr(&mut host, "c1", "ac", None, false);
        assert_eq!(attr.current, "");
        assert!(get_attr(&host, "c1", "ac").is_some());
    }
}
