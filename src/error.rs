use crate::messages::{self, English, Messages};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A conversion or validation failure at a JSON path of the resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message(&English))]
pub struct Error {
    reason: Reason,
    path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The input does not have the NetworkPolicy shape.
    Invalid,
    /// Valid Kubernetes, but not representable in the form model.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    NotArray,
    NotObject,
    NotString,
    Missing,
    Empty,
    DuplicateKeys,
    EmptyLabelKey,
    Protocol,
    Port,
    Unsupported,
}

impl Reason {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Unsupported => Kind::Unsupported,
            _ => Kind::Invalid,
        }
    }

    /// Message key handed to the formatter.
    pub fn key(&self) -> &'static str {
        use Reason::*;
        match self {
            NotArray => messages::NOT_ARRAY,
            NotObject => messages::NOT_OBJECT,
            NotString => messages::NOT_STRING,
            Missing => messages::MISSING,
            Empty => messages::EMPTY,
            DuplicateKeys => messages::DUPLICATE_KEYS,
            EmptyLabelKey => messages::EMPTY_LABEL_KEY,
            Protocol => messages::PROTOCOL,
            Port => messages::PORT,
            Unsupported => messages::UNSUPPORTED,
        }
    }
}

impl Error {
    pub fn new(reason: Reason, path: impl Into<String>) -> Self {
        Self {
            reason,
            path: path.into(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.reason.kind()
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn key(&self) -> &'static str {
        self.reason.key()
    }

    pub fn message(&self, messages: &(impl Messages + ?Sized)) -> String {
        messages.format(self.key(), &[("path", self.path.as_str())])
    }
}

macro_rules! constructors {
    ($( $name:ident => $reason:ident, )+) => {
        impl Error {
            $(
            pub fn $name(path: impl Into<String>) -> Self {
                Self::new(Reason::$reason, path)
            }
            )+
        }
    };
}

constructors! {
    not_array => NotArray,
    not_object => NotObject,
    not_string => NotString,
    missing => Missing,
    empty => Empty,
    duplicate_keys => DuplicateKeys,
    empty_label_key => EmptyLabelKey,
    protocol => Protocol,
    port => Port,
    unsupported => Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::not_array("spec.ingress");
        assert_eq!(e.kind(), Kind::Invalid);
        assert_eq!(e.to_string(), "spec.ingress should be an Array.");

        let e = Error::unsupported("spec.podSelector.matchExpressions");
        assert_eq!(e.kind(), Kind::Unsupported);
        assert_eq!(e.key(), "networkpolicy.unsupported");
    }
}
