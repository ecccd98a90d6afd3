use itertools::Itertools;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use serde_json::{Map, Value, json};

use super::{as_object, as_str, field};
use crate::error::{Error, Result};
use crate::form::Labels;

/// Pairs that were actually entered (non-empty key).
fn entered(pairs: &Labels) -> impl Iterator<Item = &(String, String)> {
    pairs.iter().filter(|(k, _)| !k.is_empty())
}

pub fn encode(pairs: &Labels) -> LabelSelector {
    let labels: std::collections::BTreeMap<_, _> = entered(pairs).cloned().collect();
    LabelSelector {
        match_labels: (!labels.is_empty()).then_some(labels),
        ..Default::default()
    }
}

/// JSON selector with `matchLabels` in pair order. A repeated key keeps its
/// first position and its last value, like [`encode`].
pub fn ordered(pairs: &Labels) -> Value {
    let labels: Map<String, Value> = entered(pairs)
        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
        .collect();
    if labels.is_empty() {
        json!({})
    } else {
        json!({ "matchLabels": labels })
    }
}

/// False if a non-empty key appears more than once.
pub fn is_valid(pairs: &Labels) -> bool {
    entered(pairs).map(|(k, _)| k).all_unique()
}

/// Absent selectors decode to an empty list (match all). Pairs come out in
/// wire order.
pub fn decode(selector: Option<&Value>, path: &str) -> Result<Labels> {
    let Some(selector) = selector.filter(|v| !v.is_null()) else {
        return Ok(vec![]);
    };
    let selector = as_object(selector, path)?;

    if field(selector, "matchExpressions").is_some() {
        return Err(Error::unsupported(format!("{path}.matchExpressions")));
    }

    let Some(labels) = field(selector, "matchLabels") else {
        return Ok(vec![]);
    };
    let path = format!("{path}.matchLabels");
    let labels = as_object(labels, &path)?;

    if labels.contains_key("") {
        return Err(Error::empty_label_key(path));
    }

    labels
        .iter()
        .map(|(k, v)| Ok((k.clone(), as_str(v, &format!("{path}.{k}"))?.to_string())))
        .collect()
}
