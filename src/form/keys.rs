/// Synthetic identity of a form list row. Never serialized to Kubernetes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Key(u64);

impl Key {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "key-{}", self.0)
    }
}

/// Key source scoped to a single decode call.
#[derive(Debug, Default)]
pub struct KeyGen {
    next: u64,
}

impl KeyGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> Key {
        self.next += 1;
        Key(self.next)
    }
}
