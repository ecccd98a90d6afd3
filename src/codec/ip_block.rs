use k8s_openapi::api::networking::v1::IPBlock;
use serde_json::Value;

use super::{as_array, as_object, as_str, decode_list, field, string_field};
use crate::error::Result;
use crate::form::{Except, IpBlock, KeyGen};

/// `except` is emitted whenever the form carries it, even empty.
pub fn encode(ip_block: &IpBlock) -> IPBlock {
    IPBlock {
        cidr: ip_block.cidr.clone(),
        except: (ip_block.except.as_ref())
            .map(|except| except.iter().map(|e| e.value.clone()).collect()),
    }
}

pub fn decode(ip_block: &Value, path: &str, keys: &mut KeyGen) -> Result<IpBlock> {
    let obj = as_object(ip_block, path)?;
    let cidr = string_field(obj, "cidr", path)?;

    let except = match field(obj, "except") {
        None => None,
        Some(except) => {
            let path = format!("{path}.except");
            let except = as_array(except, &path)?;
            Some(decode_list(except, &path, |v, path| {
                Ok(Except {
                    key: keys.fresh(),
                    value: as_str(v, path)?.to_string(),
                })
            })?)
        }
    };

    Ok(IpBlock { cidr, except })
}
