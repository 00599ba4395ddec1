//! Associated-item traversal.

use std::collections::HashSet;

use super::rules::RuleTable;

/// Items implied by `item`, in confidence order, each listed once.
///
/// Walks the table from highest confidence down; every rule whose antecedent
/// contains `item` contributes its consequent items not seen yet. No
/// matching rule yields an empty list.
#[must_use]
pub fn find_associated(item: &str, rules: &RuleTable) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut associated = Vec::new();

    for rule in rules.rules().iter().filter(|rule| rule.applies_to(item)) {
        for consequent in rule.consequent() {
            if seen.insert(consequent.as_str()) {
                associated.push(consequent.clone());
            }
        }
    }

    log::debug!(
        "find_associated: {} items for '{item}' from {} rules",
        associated.len(),
        rules.len()
    );
    associated
}
