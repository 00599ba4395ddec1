//! Association-rule lookup over a precomputed rule table.
//!
//! Rules are mined elsewhere. This module normalizes raw rule rows once
//! (`rules`) and answers "what goes with this item" queries (`lookup`).

mod lookup;
mod rules;

pub use lookup::find_associated;
pub use rules::{RawRule, Rule, RuleSide, RuleTable, normalize_rules};
