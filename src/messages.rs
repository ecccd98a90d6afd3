//! Message formatting.
//!
//! The engine never renders prose itself: every message goes through
//! [`Messages::format`] with a stable key and named parameters, so the text can
//! be owned by a localization layer.

use std::collections::BTreeMap as Map;

pub trait Messages {
    fn format(&self, key: &str, params: &[(&str, &str)]) -> String;
}

impl<F> Messages for F
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        self(key, params)
    }
}

pub const NOT_ARRAY: &str = "networkpolicy.invalid.not-array";
pub const NOT_OBJECT: &str = "networkpolicy.invalid.not-object";
pub const NOT_STRING: &str = "networkpolicy.invalid.not-string";
pub const MISSING: &str = "networkpolicy.invalid.missing";
pub const EMPTY: &str = "networkpolicy.invalid.empty";
pub const DUPLICATE_KEYS: &str = "networkpolicy.invalid.duplicate-keys";
pub const EMPTY_LABEL_KEY: &str = "networkpolicy.invalid.empty-label-key";
pub const PROTOCOL: &str = "networkpolicy.invalid.protocol";
pub const PORT: &str = "networkpolicy.invalid.port";
pub const UNSUPPORTED: &str = "networkpolicy.unsupported";

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl English {
    pub fn template(key: &str) -> Option<&'static str> {
        Some(match key {
            NOT_ARRAY => "{path} should be an Array.",
            NOT_OBJECT => "{path} should be an Object.",
            NOT_STRING => "{path} should be a String.",
            MISSING => "{path} is missing.",
            EMPTY => "{path} should not be empty.",
            DUPLICATE_KEYS => "{path} has duplicate label keys.",
            EMPTY_LABEL_KEY => "{path} has an empty label key.",
            PROTOCOL => "{path} should be one of TCP, UDP or SCTP.",
            PORT => "{path} should be a port number or name.",
            UNSUPPORTED => "{path} is not supported by the form editor.",
            _ => return None,
        })
    }
}

impl Messages for English {
    fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        match Self::template(key) {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }
}

/// Templates overriding the English ones, e.g. loaded from a config file.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Catalog {
    templates: Map<String, String>,
}

impl Catalog {
    pub fn new(templates: Map<String, String>) -> Self {
        Self { templates }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Messages for Catalog {
    fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.templates.get(key) {
            Some(template) => interpolate(template, params),
            None => English.format(key, params),
        }
    }
}

/// Replace `{name}` placeholders. Unknown placeholders are left as-is.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let param = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            (params.iter())
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v, end))
        });

        match param {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out
}
