//! Identity of whoever invokes an issue operation.

use std::fmt;

use super::UserId;

/// The principal behind a request.
///
/// Form actions derive the caller from the session; the JSON API is open and
/// always acts as [`Caller::TrustedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No session is attached to the request.
    Anonymous,
    /// A signed-in user.
    User(UserId),
    /// The unauthenticated JSON API.
    TrustedApi,
}

impl Caller {
    /// Build a caller from an optional session user.
    pub fn from_session(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Anonymous, Self::User)
    }

    /// Whether the caller may create, update or delete issues.
    pub fn may_mutate(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("anonymous"),
            Self::User(id) => write!(f, "user:{id}"),
            Self::TrustedApi => f.write_str("trusted-api"),
        }
    }
}
