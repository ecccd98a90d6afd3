use serde_json::Value;

use super::{Direction, WireRule, as_array, as_object, decode_list, field, peer, port};
use crate::error::Result;
use crate::form::{KeyGen, Rule};

/// Empty peer and port lists are omitted: an absent list matches everything.
pub fn encode<R: WireRule>(rule: &Rule) -> R {
    let peers = (!rule.peers.is_empty()).then(|| rule.peers.iter().map(peer::encode).collect());
    let ports = (!rule.ports.is_empty()).then(|| rule.ports.iter().map(port::encode).collect());
    R::from_parts(peers, ports)
}

/// Ports are decoded before peers.
pub fn decode(rule: &Value, path: &str, direction: Direction, keys: &mut KeyGen) -> Result<Rule> {
    let obj = as_object(rule, path)?;
    let key = keys.fresh();

    let ports = match field(obj, "ports") {
        None => vec![],
        Some(ports) => {
            let path = format!("{path}.ports");
            decode_list(as_array(ports, &path)?, &path, |v, path| {
                port::decode(v, path, keys)
            })?
        }
    };

    let peers_key = direction.peers_key();
    let peers = match field(obj, peers_key) {
        None => vec![],
        Some(peers) => {
            let path = format!("{path}.{peers_key}");
            decode_list(as_array(peers, &path)?, &path, |v, path| {
                peer::decode(v, path, keys)
            })?
        }
    };

    Ok(Rule { key, peers, ports })
}
