use k8s_openapi::api::networking::v1::NetworkPolicyPort;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde_json::Value;

use super::{as_object, field};
use crate::error::{Error, Result};
use crate::form::{KeyGen, Port, Protocol};

/// Numeric-looking ports become numbers, anything else stays a named port.
/// An empty port means all ports of the protocol.
pub fn coerce(port: &str) -> Option<IntOrString> {
    if port.is_empty() {
        return None;
    }
    Some(match port.parse::<i32>() {
        Ok(n) => IntOrString::Int(n),
        Err(_) => IntOrString::String(port.to_string()),
    })
}

pub fn encode(port: &Port) -> NetworkPolicyPort {
    NetworkPolicyPort {
        protocol: Some(port.protocol.to_string()),
        port: coerce(&port.port),
        ..Default::default()
    }
}

pub fn decode(port: &Value, path: &str, keys: &mut KeyGen) -> Result<Port> {
    let obj = as_object(port, path)?;

    if field(obj, "endPort").is_some() {
        return Err(Error::unsupported(format!("{path}.endPort")));
    }

    let protocol = match field(obj, "protocol") {
        None => Protocol::default(),
        Some(v) => (v.as_str())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::protocol(format!("{path}.protocol")))?,
    };

    let port = match field(obj, "port") {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match number(n) {
            Some(port) => port,
            None => return Err(Error::port(format!("{path}.port"))),
        },
        Some(_) => return Err(Error::port(format!("{path}.port"))),
    };

    Ok(Port {
        key: keys.fresh(),
        protocol,
        port,
    })
}

/// String form of a numeric port. Integral floats such as `80.0` count as
/// integers.
fn number(n: &serde_json::Number) -> Option<String> {
    if n.is_i64() || n.is_u64() {
        return Some(n.to_string());
    }
    let f = n.as_f64()?;
    (f.is_finite() && f.fract() == 0.0).then(|| format!("{f:.0}"))
}
