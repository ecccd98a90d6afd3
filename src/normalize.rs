//! Canonical form of NetworkPolicy resources, so that two semantically equal
//! policies compare equal. Not used on the submit path.

use k8s_openapi::{
    api::networking::v1::{NetworkPolicy, NetworkPolicyPeer, NetworkPolicyPort},
    apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta},
    apimachinery::pkg::util::intstr::IntOrString,
};
use std::collections::BTreeMap as Map;
use xxhash_rust::xxh3;

use crate::codec::{Direction, WireRule, policy::is_affected, port};

pub fn normalize(policy: &NetworkPolicy) -> NetworkPolicy {
    let mut policy = policy.clone();

    policy.metadata = ObjectMeta {
        name: Some(policy.metadata.name.take().unwrap_or_default()),
        namespace: Some(policy.metadata.namespace.take().unwrap_or_default()),
        ..Default::default()
    };

    let spec = policy.spec.get_or_insert_with(Default::default);

    spec.pod_selector = normalize_selector(std::mem::take(&mut spec.pod_selector));

    let affected: Vec<_> = {
        let types = (spec.policy_types.as_ref())
            .map(|types| types.iter().map(String::as_str).collect::<Vec<_>>());
        let has_egress = spec.egress.is_some();
        (Direction::ALL.into_iter())
            .filter(|d| is_affected(*d, types.as_deref(), has_egress))
            .collect()
    };

    spec.policy_types = Some(affected.iter().map(|d| d.policy_type().to_string()).collect());
    spec.ingress = section(affected.contains(&Direction::Ingress), spec.ingress.take());
    spec.egress = section(affected.contains(&Direction::Egress), spec.egress.take());

    policy
}

/// Compare two policies after normalization.
pub fn same(a: &NetworkPolicy, b: &NetworkPolicy) -> bool {
    normalize(a) == normalize(b)
}

/// Hash of the normalized policy, for change detection.
pub fn fingerprint(policy: &NetworkPolicy) -> serde_json::Result<u128> {
    let json = serde_json::to_vec(&normalize(policy))?;
    Ok(xxh3::xxh3_128(&json))
}

/// Affected sections always have a list; unaffected ones are dropped.
fn section<R: WireRule>(affected: bool, rules: Option<Vec<R>>) -> Option<Vec<R>> {
    affected.then(|| rules.unwrap_or_default().into_iter().map(normalize_rule).collect())
}

fn normalize_rule<R: WireRule>(rule: R) -> R {
    let (peers, ports) = rule.into_parts();
    R::from_parts(
        non_empty(peers).map(|peers| peers.into_iter().map(normalize_peer).collect()),
        non_empty(ports).map(|ports| ports.into_iter().map(normalize_port).collect()),
    )
}

fn normalize_peer(peer: NetworkPolicyPeer) -> NetworkPolicyPeer {
    if peer.ip_block.is_some() {
        return NetworkPolicyPeer {
            ip_block: peer.ip_block,
            ..Default::default()
        };
    }
    NetworkPolicyPeer {
        pod_selector: peer.pod_selector.map(normalize_selector),
        namespace_selector: peer.namespace_selector.map(normalize_selector),
        ip_block: None,
    }
}

fn normalize_port(mut np_port: NetworkPolicyPort) -> NetworkPolicyPort {
    np_port.protocol.get_or_insert_with(|| "TCP".into());
    np_port.port = match np_port.port {
        Some(IntOrString::String(s)) => port::coerce(&s),
        v => v,
    };
    np_port
}

fn normalize_selector(mut selector: LabelSelector) -> LabelSelector {
    selector.match_labels = non_empty_map(selector.match_labels);
    selector
}

fn non_empty<T>(v: Option<Vec<T>>) -> Option<Vec<T>> {
    v.filter(|v| !v.is_empty())
}

fn non_empty_map<K, V>(v: Option<Map<K, V>>) -> Option<Map<K, V>> {
    v.filter(|v| !v.is_empty())
}
