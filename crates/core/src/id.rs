//! Strongly-typed identifiers used across the domain.
//!
//! Permission paths are made of three distinct string newtypes so a module id
//! can never be passed where an entity name is expected.

use core::str::FromStr;
use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a custom role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(Uuid);

/// Identifier of a user (role author / editor).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// All-zero identifier, reserved for built-in records.
            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(RoleId, "RoleId");
impl_uuid_newtype!(UserId, "UserId");

/// Module identifier (e.g. `"event"`, `"osha"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(Cow<'static, str>);

/// Entity name within a module (e.g. `"Safety Event"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(Cow<'static, str>);

/// Bare action key within an entity (e.g. `"create"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKey(Cow<'static, str>);

/// Full catalog action identifier (e.g. `"event:create"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(Cow<'static, str>);

/// OSHA establishment identifier (e.g. `"osha_toronto"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstablishmentId(Cow<'static, str>);

macro_rules! impl_str_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
                Self(value.into())
            }

            /// Borrow a compile-time constant without allocating.
            pub const fn from_static(value: &'static str) -> Self {
                Self(Cow::Borrowed(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $t {
            fn from(value: &'static str) -> Self {
                Self(Cow::Borrowed(value))
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(Cow::Owned(value))
            }
        }
    };
}

impl_str_newtype!(ModuleId);
impl_str_newtype!(EntityName);
impl_str_newtype!(ActionKey);
impl_str_newtype!(ActionId);
impl_str_newtype!(EstablishmentId);

impl ActionId {
    /// The part before the first `:` (e.g. `"osha-report"` for `"osha-report:create"`).
    ///
    /// Not necessarily the owning module id: OSHA actions are prefixed per entity.
    pub fn prefix(&self) -> Option<&str> {
        self.0.split_once(':').map(|(prefix, _)| prefix)
    }

    /// The bare action key: everything after the first `:`, or the whole id
    /// when there is no separator.
    pub fn key_str(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, key)) => key,
            None => &self.0,
        }
    }

    pub fn action_key(&self) -> ActionKey {
        match self.0 {
            Cow::Borrowed(s) => ActionKey::from_static(match s.split_once(':') {
                Some((_, key)) => key,
                None => s,
            }),
            Cow::Owned(_) => ActionKey::new(self.key_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn action_key_strips_prefix() {
        let id = ActionId::from_static("event:create");
        assert_eq!(id.action_key().as_str(), "create");
        assert_eq!(id.prefix(), Some("event"));

        let multi = ActionId::new("osha-summary:view-cases".to_string());
        assert_eq!(multi.action_key(), ActionKey::from("view-cases"));
        assert_eq!(multi.prefix(), Some("osha-summary"));
    }

    #[test]
    fn action_key_without_separator_is_whole_id() {
        let id = ActionId::from("orphan");
        assert_eq!(id.key_str(), "orphan");
        assert_eq!(id.prefix(), None);
    }

    #[test]
    fn string_ids_look_up_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ModuleId::from("event"), 1);
        assert_eq!(map.get("event"), Some(&1));
        assert_eq!(map.get("capa"), None);
    }

    #[test]
    fn string_ids_serialize_transparently() {
        let json = serde_json::to_string(&EntityName::from("Safety Event")).unwrap();
        assert_eq!(json, "\"Safety Event\"");

        let back: EntityName = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "Safety Event");
    }

    #[test]
    fn role_id_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<RoleId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("RoleId")));
    }
}
