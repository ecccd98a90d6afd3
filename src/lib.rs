//! NetworkPolicy form engine.
//!
//! Converts between the form-editable [`form::Policy`] and Kubernetes
//! `networking.k8s.io/v1` NetworkPolicy resources, validates forms before
//! submission and normalizes resources for comparison.

pub mod codec;
pub mod error;
pub mod form;
pub mod messages;
pub mod normalize;
pub mod validate;

pub use codec::{decode, encode, encode_resource};
pub use error::{Error, Kind, Result};
pub use normalize::{fingerprint, normalize, same};
pub use validate::check_validity;
