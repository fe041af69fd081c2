//! Record identifiers.
//!
//! Identifiers are opaque strings. Stores written by earlier clients used
//! millisecond timestamps, so any non-empty text is accepted on read; new
//! records receive a UUID v4.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Allocate a fresh identifier for a new record.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_record_id! {
    /// Identifier of a [`Syndicate`](super::Syndicate).
    SyndicateId
}

define_record_id! {
    /// Identifier of a [`Member`](super::Member).
    MemberId
}

define_record_id! {
    /// Identifier of a [`Contribution`](super::Contribution).
    ContributionId
}

define_record_id! {
    /// Identifier of a [`Training`](super::Training).
    TrainingId
}

impl SyndicateId {
    /// Syndicate assigned to members registered by an administrator.
    #[must_use]
    pub fn unaffiliated() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(MemberId::random(), MemberId::random());
    }

    #[test]
    fn ids_serialise_as_bare_strings() {
        let id = SyndicateId::new("1718000000000");
        let value = serde_json::to_value(&id).expect("serialise");
        assert_eq!(value, serde_json::json!("1718000000000"));
        let back: SyndicateId = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, id);
    }
}
