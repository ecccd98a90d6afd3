//! Form-editable representation of a NetworkPolicy.
//!
//! Every list row carries a synthetic [`Key`] so that UIs can keep a stable
//! identity across re-renders. Keys are generated on decode and never reach
//! the Kubernetes resource.

pub mod keys;

pub use keys::{Key, KeyGen};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered label pairs. A pair with an empty key is a row still being typed.
pub type Labels = Vec<(String, String)>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub pod_selector: Labels,
    #[serde(default)]
    pub ingress: RuleSet,
    #[serde(default)]
    pub egress: RuleSet,
}

impl Policy {
    /// Reset every synthetic key, leaving only what reaches Kubernetes.
    pub fn clear_keys(&mut self) {
        for rule in self.ingress.rules_mut().chain(self.egress.rules_mut()) {
            rule.key = Key::default();
            for peer in &mut rule.peers {
                peer.key = Key::default();
                if let Some(except) = peer.ip_block.as_mut().and_then(|b| b.except.as_mut()) {
                    except.iter_mut().for_each(|e| e.key = Key::default());
                }
            }
            rule.ports.iter_mut().for_each(|p| p.key = Key::default());
        }
    }
}

/// What a policy does for one traffic direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RuleSetFields", into = "RuleSetFields")]
pub enum RuleSet {
    /// The direction is not listed in `policyTypes`.
    #[default]
    NotAffected,
    /// The direction is affected and nothing is allowed.
    DenyAll,
    /// The direction is affected and these rules allow traffic.
    /// An empty list is treated as [`RuleSet::NotAffected`].
    Allow(Vec<Rule>),
}

impl RuleSet {
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        if rules.is_empty() {
            Self::NotAffected
        } else {
            Self::Allow(rules)
        }
    }

    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }

    pub fn is_affected(&self) -> bool {
        match self {
            Self::NotAffected => false,
            Self::DenyAll => true,
            Self::Allow(rules) => !rules.is_empty(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        match self {
            Self::Allow(rules) => rules,
            _ => &[],
        }
    }

    fn rules_mut(&mut self) -> std::slice::IterMut<'_, Rule> {
        match self {
            Self::Allow(rules) => rules.iter_mut(),
            _ => Default::default(),
        }
    }
}

/// The `{denyAll, rules}` shape form editors work with.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleSetFields {
    #[serde(default)]
    deny_all: bool,
    #[serde(default)]
    rules: Vec<Rule>,
}

impl From<RuleSetFields> for RuleSet {
    fn from(v: RuleSetFields) -> Self {
        if v.deny_all {
            Self::DenyAll
        } else {
            Self::from_rules(v.rules)
        }
    }
}

impl From<RuleSet> for RuleSetFields {
    fn from(v: RuleSet) -> Self {
        match v {
            RuleSet::NotAffected => Self {
                deny_all: false,
                rules: vec![],
            },
            RuleSet::DenyAll => Self {
                deny_all: true,
                rules: vec![],
            },
            RuleSet::Allow(rules) => Self {
                deny_all: false,
                rules,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub key: Key,
    /// Sources (ingress) or destinations (egress). Empty matches everything.
    #[serde(default)]
    pub peers: Vec<Peer>,
    /// Empty matches all ports.
    #[serde(default)]
    pub ports: Vec<Port>,
}

/// A traffic source or destination.
///
/// `ip_block` takes precedence: when set, the selectors are ignored on encode.
/// A `None` selector is not emitted, while `Some(vec![])` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    #[serde(default)]
    pub key: Key,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_block: Option<IpBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_selector: Option<Labels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpBlock {
    /// Empty means all external sources.
    #[serde(default)]
    pub cidr: String,
    /// `Some` even when empty once the exceptions editor has been used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Vec<Except>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Except {
    #[serde(default)]
    pub key: Key,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub key: Key,
    #[serde(default)]
    pub protocol: Protocol,
    /// Numeric literal or named port. Empty means all ports.
    #[serde(default)]
    pub port: String,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    TCP,
    UDP,
    SCTP,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TCP => "TCP",
            Self::UDP => "UDP",
            Self::SCTP => "SCTP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TCP" => Ok(Self::TCP),
            "UDP" => Ok(Self::UDP),
            "SCTP" => Ok(Self::SCTP),
            _ => Err(()),
        }
    }
}
