//! Service error and lookup key types.

use crate::model::todo::TodoId;
use crate::model::user::UserId;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Key of a lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    UserId(UserId),
    UserEmail(String),
    TodoId(TodoId),
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserId(id) => write!(f, "{id}"),
            Self::UserEmail(email) => write!(f, "{email}"),
            Self::TodoId(id) => write!(f, "{id}"),
        }
    }
}

impl LookupKey {
    /// Entity kind the key belongs to, for messages and log lines.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::UserId(_) | Self::UserEmail(_) => "user",
            Self::TodoId(_) => "todo",
        }
    }
}

#[derive(Debug)]
pub enum ServiceError {
    /// A user or todo lookup by id or email found nothing.
    NotFound(LookupKey),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn not_found_key(&self) -> Option<&LookupKey> {
        match self {
            Self::NotFound(key) => Some(key),
            Self::Store(_) => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "{} not found: {key}", key.entity()),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
