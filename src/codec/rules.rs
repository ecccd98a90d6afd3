//! One direction of a policy: the three states of [`RuleSet`] against the
//! absent / empty / non-empty rule list of Kubernetes.

use serde_json::Value;

use super::{WireRule, as_array, decode_list, rule};
use crate::error::Result;
use crate::form::{KeyGen, RuleSet};

/// `None` when the direction is not affected, an empty list for deny-all.
pub fn encode<R: WireRule>(rules: &RuleSet) -> Option<Vec<R>> {
    match rules {
        RuleSet::NotAffected => None,
        RuleSet::DenyAll => Some(vec![]),
        RuleSet::Allow(rules) if rules.is_empty() => None,
        RuleSet::Allow(rules) => Some(rules.iter().map(rule::encode::<R>).collect()),
    }
}

pub fn decode<R: WireRule>(
    affected: bool,
    section: Option<&Value>,
    path: &str,
    keys: &mut KeyGen,
) -> Result<RuleSet> {
    if !affected {
        return Ok(RuleSet::NotAffected);
    }
    let Some(section) = section.filter(|v| !v.is_null()) else {
        return Ok(RuleSet::DenyAll);
    };

    let rules = as_array(section, path)?;
    if rules.is_empty() {
        return Ok(RuleSet::DenyAll);
    }

    let rules = decode_list(rules, path, |v, path| rule::decode(v, path, R::DIRECTION, keys))?;
    Ok(RuleSet::Allow(rules))
}
