use modcat_schema::{ModuleDescriptor, ModuleId};
use std::collections::HashSet;

/// Concatenate legacy then catalog descriptors and drop later duplicates by id.
///
/// The first occurrence wins, so a legacy descriptor shadows a catalog one
/// with the same id. Descriptors with an empty id cannot be keyed and are
/// dropped. Relative order of the survivors is preserved.
pub fn merge_modules(
    legacy: Vec<ModuleDescriptor>,
    catalog: Vec<ModuleDescriptor>,
) -> Vec<ModuleDescriptor> {
    let mut seen: HashSet<ModuleId> = HashSet::with_capacity(legacy.len() + catalog.len());
    let mut merged = Vec::with_capacity(legacy.len() + catalog.len());
    let mut shadowed = 0usize;

    for module in legacy.into_iter().chain(catalog) {
        if module.id().is_empty() {
            tracing::debug!("dropping module without id: {:?}", module.name());
            continue;
        }
        if seen.insert(module.id().clone()) {
            merged.push(module);
        } else {
            shadowed += 1;
        }
    }

    if shadowed > 0 {
        tracing::debug!("{shadowed} duplicate module(s) dropped during merge");
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str, name: &str) -> ModuleDescriptor {
        ModuleDescriptor::new(id).with_name(Some(name.to_owned()))
    }

    fn ids(modules: &[ModuleDescriptor]) -> Vec<&str> {
        modules.iter().map(|m| m.id().as_str()).collect()
    }

    #[test]
    fn legacy_wins_on_collision() {
        let merged = merge_modules(
            vec![named("android", "legacy")],
            vec![named("android", "catalog")],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name(), Some("legacy"));
    }

    #[test]
    fn order_is_legacy_then_new_catalog_entries() {
        let merged = merge_modules(
            vec![named("b", "l"), named("a", "l")],
            vec![named("c", "c"), named("a", "c"), named("d", "c")],
        );
        assert_eq!(ids(&merged), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn duplicates_within_one_source_collapse() {
        let merged = merge_modules(vec![], vec![named("x", "1"), named("x", "2")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name(), Some("1"));
    }

    #[test]
    fn empty_ids_are_dropped() {
        let merged = merge_modules(vec![], vec![named("", "nameless"), named("y", "y")]);
        assert_eq!(ids(&merged), vec!["y"]);
    }

    #[test]
    fn empty_inputs_merge_to_empty() {
        assert!(merge_modules(vec![], vec![]).is_empty());
    }
}
