use log::debug;

use crate::codec::{Direction, selector};
use crate::error::{Error, Result};
use crate::form::{Labels, Policy, RuleSet};

/// Check a form before submitting it: label selectors must not repeat a key
/// and every peer needs an ipBlock or a selector.
///
/// The main pod selector is checked first, then ingress and egress peers in
/// list order. Only the first violation is returned.
pub fn check_validity(policy: &Policy) -> Result<()> {
    check_selector(&policy.pod_selector, "spec.podSelector")?;
    check_rules(&policy.ingress, Direction::Ingress)?;
    check_rules(&policy.egress, Direction::Egress)?;
    Ok(())
}

fn check_rules(rules: &RuleSet, direction: Direction) -> Result<()> {
    let section = direction.section();
    let peers_key = direction.peers_key();

    for (i, rule) in rules.rules().iter().enumerate() {
        for (j, peer) in rule.peers.iter().enumerate() {
            let path = format!("spec.{section}[{i}].{peers_key}[{j}]");
            if peer.ip_block.is_none()
                && peer.pod_selector.is_none()
                && peer.namespace_selector.is_none()
            {
                debug!("{path}: empty peer");
                return Err(Error::empty(path));
            }
            if let Some(ref pairs) = peer.pod_selector {
                check_selector(pairs, &format!("{path}.podSelector"))?;
            }
            if let Some(ref pairs) = peer.namespace_selector {
                check_selector(pairs, &format!("{path}.namespaceSelector"))?;
            }
        }
    }
    Ok(())
}

fn check_selector(pairs: &Labels, path: &str) -> Result<()> {
    if selector::is_valid(pairs) {
        return Ok(());
    }
    debug!("{path}: duplicate label keys");
    Err(Error::duplicate_keys(path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::{Peer, Rule};

    fn dup() -> Labels {
        vec![("role".into(), "a".into()), ("role".into(), "b".into())]
    }

    fn peer_rule(peer: Peer) -> RuleSet {
        RuleSet::Allow(vec![Rule {
            peers: vec![
                Peer {
                    namespace_selector: Some(vec![]),
                    ..Default::default()
                },
                peer,
            ],
            ..Default::default()
        }])
    }

    #[test]
    fn test_valid() {
        let policy = Policy {
            pod_selector: vec![("app".into(), "x".into()), ("".into(), "".into())],
            ingress: RuleSet::DenyAll,
            ..Default::default()
        };
        assert_eq!(check_validity(&policy), Ok(()));
    }

    #[test]
    fn test_main_selector_first() {
        let policy = Policy {
            pod_selector: dup(),
            ingress: peer_rule(Peer {
                namespace_selector: Some(dup()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            check_validity(&policy),
            Err(Error::duplicate_keys("spec.podSelector"))
        );
    }

    #[test]
    fn test_peer_paths() {
        let policy = Policy {
            egress: peer_rule(Peer {
                namespace_selector: Some(dup()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let e = check_validity(&policy).unwrap_err();
        assert_eq!(e.path(), "spec.egress[0].to[1].namespaceSelector");
        assert_eq!(
            e.to_string(),
            "spec.egress[0].to[1].namespaceSelector has duplicate label keys."
        );
    }

    #[test]
    fn test_empty_peer() {
        let policy = Policy {
            ingress: peer_rule(Peer::default()),
            ..Default::default()
        };
        let e = check_validity(&policy).unwrap_err();
        assert_eq!(e, Error::empty("spec.ingress[0].from[1]"));
        assert_eq!(e.to_string(), "spec.ingress[0].from[1] should not be empty.");

        // an ipBlock alone is enough
        let policy = Policy {
            egress: peer_rule(Peer {
                ip_block: Some(Default::default()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(check_validity(&policy), Ok(()));
    }

    #[test]
    fn test_ingress_before_egress() {
        let bad = Peer {
            pod_selector: Some(dup()),
            ..Default::default()
        };
        let policy = Policy {
            ingress: peer_rule(bad.clone()),
            egress: peer_rule(bad),
            ..Default::default()
        };
        assert_eq!(
            check_validity(&policy).unwrap_err().path(),
            "spec.ingress[0].from[1].podSelector"
        );
    }
}
