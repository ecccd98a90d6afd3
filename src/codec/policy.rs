use k8s_openapi::{
    api::networking::v1::{
        NetworkPolicy, NetworkPolicyEgressRule as EgressRule,
        NetworkPolicyIngressRule as IngressRule, NetworkPolicySpec,
    },
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use log::{debug, trace};
use serde_json::Value;

use super::{Direction, as_array, as_object, as_str, decode_list, field, rules, selector, string_field};
use crate::error::{Error, Result};
use crate::form::{KeyGen, Policy, RuleSet};

/// Whether a policy affects a direction.
///
/// Without `policyTypes`, all policies affect ingress and only those with an
/// egress section affect egress.
pub fn is_affected(direction: Direction, policy_types: Option<&[&str]>, has_egress: bool) -> bool {
    match policy_types {
        Some(types) => types.contains(&direction.policy_type()),
        None => match direction {
            Direction::Ingress => true,
            Direction::Egress => has_egress,
        },
    }
}

/// Encode to the JSON resource submitted to the API.
///
/// Label pairs keep their form order in every `matchLabels`, so decoding the
/// result gives back the same pairs in the same order.
pub fn encode(policy: &Policy) -> Value {
    let mut resource = serde_json::to_value(encode_resource(policy))
        .expect("NetworkPolicy should serialize");

    if let Some(wire) = resource.pointer_mut("/spec/podSelector") {
        *wire = selector::ordered(&policy.pod_selector);
    }
    order_peer_labels(&mut resource, Direction::Ingress, &policy.ingress);
    order_peer_labels(&mut resource, Direction::Egress, &policy.egress);

    resource
}

fn order_peer_labels(resource: &mut Value, direction: Direction, rules: &RuleSet) {
    let (section, peers_key) = (direction.section(), direction.peers_key());

    for (i, rule) in rules.rules().iter().enumerate() {
        // ipBlock peers are encoded without selectors
        for (j, peer) in rule.peers.iter().enumerate().filter(|(_, p)| p.ip_block.is_none()) {
            let path = format!("/spec/{section}/{i}/{peers_key}/{j}");
            for (key, pairs) in [
                ("podSelector", &peer.pod_selector),
                ("namespaceSelector", &peer.namespace_selector),
            ] {
                let Some(pairs) = pairs else { continue };
                if let Some(wire) = resource.pointer_mut(&format!("{path}/{key}")) {
                    *wire = selector::ordered(pairs);
                }
            }
        }
    }
}

/// Encode to the typed resource. Label maps of typed selectors are sorted by
/// key.
pub fn encode_resource(policy: &Policy) -> NetworkPolicy {
    let ingress = rules::encode::<IngressRule>(&policy.ingress);
    let egress = rules::encode::<EgressRule>(&policy.egress);

    let mut policy_types = Vec::new();
    if ingress.is_some() {
        policy_types.push(Direction::Ingress.policy_type().to_string());
    }
    if egress.is_some() {
        policy_types.push(Direction::Egress.policy_type().to_string());
    }

    debug!(
        "encoding policy {}/{}: policyTypes {policy_types:?}",
        policy.namespace, policy.name
    );

    NetworkPolicy {
        metadata: ObjectMeta {
            name: Some(policy.name.clone()),
            namespace: Some(policy.namespace.clone()),
            ..Default::default()
        },
        spec: Some(NetworkPolicySpec {
            pod_selector: selector::encode(&policy.pod_selector),
            policy_types: Some(policy_types),
            ingress,
            egress,
        }),
        ..Default::default()
    }
}

/// Decode a raw NetworkPolicy. Keys are unique within the returned policy.
pub fn decode(resource: &Value) -> Result<Policy> {
    let res = decode_with(resource, &mut KeyGen::new());
    if let Err(ref e) = res {
        debug!("decode failed: {e}");
    }
    res
}

pub fn decode_with(resource: &Value, keys: &mut KeyGen) -> Result<Policy> {
    let obj = as_object(resource, "resource")?;

    let metadata = field(obj, "metadata").ok_or_else(|| Error::missing("metadata"))?;
    let metadata = as_object(metadata, "metadata")?;
    let spec = field(obj, "spec").ok_or_else(|| Error::missing("spec"))?;
    let spec = as_object(spec, "spec")?;

    let name = string_field(metadata, "name", "metadata")?;
    let namespace = string_field(metadata, "namespace", "metadata")?;
    trace!("decoding policy {namespace}/{name}");

    // the key must be there, even with a null value
    if !spec.contains_key("podSelector") {
        return Err(Error::missing("spec.podSelector"));
    }
    let pod_selector = selector::decode(spec.get("podSelector"), "spec.podSelector")?;

    let policy_types = match field(spec, "policyTypes") {
        None => None,
        Some(v) => Some(decode_list(
            as_array(v, "spec.policyTypes")?,
            "spec.policyTypes",
            as_str,
        )?),
    };
    let has_egress = field(spec, "egress").is_some();

    let affected = |direction| is_affected(direction, policy_types.as_deref(), has_egress);

    let ingress = rules::decode::<IngressRule>(
        affected(Direction::Ingress),
        field(spec, "ingress"),
        "spec.ingress",
        keys,
    )?;
    let egress = rules::decode::<EgressRule>(
        affected(Direction::Egress),
        field(spec, "egress"),
        "spec.egress",
        keys,
    )?;

    Ok(Policy {
        name,
        namespace,
        pod_selector,
        ingress,
        egress,
    })
}
