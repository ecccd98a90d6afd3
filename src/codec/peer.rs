use k8s_openapi::api::networking::v1::NetworkPolicyPeer;
use serde_json::Value;

use super::{as_object, field, ip_block, selector};
use crate::error::{Error, Result};
use crate::form::{KeyGen, Peer};

pub fn encode(peer: &Peer) -> NetworkPolicyPeer {
    if let Some(ref block) = peer.ip_block {
        return NetworkPolicyPeer {
            ip_block: Some(ip_block::encode(block)),
            ..Default::default()
        };
    }
    NetworkPolicyPeer {
        pod_selector: peer.pod_selector.as_ref().map(selector::encode),
        namespace_selector: peer.namespace_selector.as_ref().map(selector::encode),
        ..Default::default()
    }
}

pub fn decode(peer: &Value, path: &str, keys: &mut KeyGen) -> Result<Peer> {
    let obj = as_object(peer, path)?;
    let key = keys.fresh();

    if let Some(block) = field(obj, "ipBlock") {
        return Ok(Peer {
            key,
            ip_block: Some(ip_block::decode(block, &format!("{path}.ipBlock"), keys)?),
            ..Default::default()
        });
    }

    let decode_selector = |name: &str| {
        field(obj, name)
            .map(|v| selector::decode(Some(v), &format!("{path}.{name}")))
            .transpose()
    };

    let pod_selector = decode_selector("podSelector")?;
    let namespace_selector = decode_selector("namespaceSelector")?;

    if pod_selector.is_none() && namespace_selector.is_none() {
        return Err(Error::empty(path));
    }

    Ok(Peer {
        key,
        ip_block: None,
        pod_selector,
        namespace_selector,
    })
}
