//! Conversion between the form model and Kubernetes NetworkPolicy resources.
//!
//! Encoding builds typed k8s-openapi values and cannot fail; the JSON form
//! keeps label pairs in form order. Decoding walks the raw JSON so that shape
//! errors carry their path; the first error aborts the whole decode.

pub mod ip_block;
pub mod peer;
pub mod policy;
pub mod port;
pub mod rule;
pub mod rules;
pub mod selector;


pub use policy::{decode, encode, encode_resource};

use k8s_openapi::api::networking::v1::{
    NetworkPolicyEgressRule as EgressRule, NetworkPolicyIngressRule as IngressRule,
    NetworkPolicyPeer, NetworkPolicyPort,
};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ingress,
    Egress,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Ingress, Direction::Egress];

    /// Value listed in `spec.policyTypes`.
    pub fn policy_type(&self) -> &'static str {
        match self {
            Self::Ingress => "Ingress",
            Self::Egress => "Egress",
        }
    }

    /// Key of the rule list in `spec`.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Ingress => "ingress",
            Self::Egress => "egress",
        }
    }

    /// Key of the peer list in a rule.
    pub fn peers_key(&self) -> &'static str {
        match self {
            Self::Ingress => "from",
            Self::Egress => "to",
        }
    }
}

/// Direction-specific Kubernetes rule (`from` for ingress, `to` for egress).
pub trait WireRule: Sized {
    const DIRECTION: Direction;

    fn from_parts(
        peers: Option<Vec<NetworkPolicyPeer>>,
        ports: Option<Vec<NetworkPolicyPort>>,
    ) -> Self;

    fn into_parts(self) -> (Option<Vec<NetworkPolicyPeer>>, Option<Vec<NetworkPolicyPort>>);
}

impl WireRule for IngressRule {
    const DIRECTION: Direction = Direction::Ingress;

    fn from_parts(
        from: Option<Vec<NetworkPolicyPeer>>,
        ports: Option<Vec<NetworkPolicyPort>>,
    ) -> Self {
        Self { from, ports }
    }

    fn into_parts(self) -> (Option<Vec<NetworkPolicyPeer>>, Option<Vec<NetworkPolicyPort>>) {
        (self.from, self.ports)
    }
}

impl WireRule for EgressRule {
    const DIRECTION: Direction = Direction::Egress;

    fn from_parts(
        to: Option<Vec<NetworkPolicyPeer>>,
        ports: Option<Vec<NetworkPolicyPort>>,
    ) -> Self {
        Self { to, ports }
    }

    fn into_parts(self) -> (Option<Vec<NetworkPolicyPeer>>, Option<Vec<NetworkPolicyPort>>) {
        (self.to, self.ports)
    }
}

// JSON walking helpers. `null` is treated as an absent key everywhere.

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn as_object<'a>(v: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    v.as_object().ok_or_else(|| Error::not_object(path))
}

fn as_array<'a>(v: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    v.as_array().ok_or_else(|| Error::not_array(path))
}

fn as_str<'a>(v: &'a Value, path: &str) -> Result<&'a str> {
    v.as_str().ok_or_else(|| Error::not_string(path))
}

/// String field defaulting to empty when absent.
fn string_field(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    match field(obj, key) {
        None => Ok(String::new()),
        Some(v) => Ok(as_str(v, &format!("{path}.{key}"))?.to_string()),
    }
}

/// Decode every item of a list, stopping at the first error.
fn decode_list<'a, T>(
    items: &'a [Value],
    path: &str,
    mut decode: impl FnMut(&'a Value, &str) -> Result<T>,
) -> Result<Vec<T>> {
    (items.iter().enumerate())
        .map(|(i, item)| decode(item, &format!("{path}[{i}]")))
        .collect()
}
