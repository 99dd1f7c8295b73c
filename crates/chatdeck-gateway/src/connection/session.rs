//! Session state of a single connection

/// Who a connection speaks for, set by `join`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

/// Connection lifecycle: every socket starts anonymous and becomes
/// identified on its first `join`. A later `join` replaces the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Identified(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Identified(identity) => Some(identity),
        }
    }

    pub fn is_identified(&self) -> bool {
        matches!(self, Self::Identified(_))
    }

    /// Move to `Identified`, returning the identity held before
    pub fn identify(&mut self, identity: Identity) -> Option<Identity> {
        match std::mem::replace(self, Self::Identified(identity)) {
            Self::Anonymous => None,
            Self::Identified(previous) => Some(previous),
        }
    }
}
