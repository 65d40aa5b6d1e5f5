//! Reader configuration.

/// What a reader does with an object key that the schema does not name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Skip the key and its value.
    #[default]
    Skip,
    /// Fail with [`Schema::InvalidKey`](crate::Schema::InvalidKey).
    Reject,
}

/// Options applied to a single decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub unknown_keys: UnknownKeys,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_unknown_keys(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Reject;
        self
    }
}
