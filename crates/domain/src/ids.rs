use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| crate::error::DomainError::invalid_id(format!("{}: {}", s, e)))
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CharacterId);
define_id!(ItemId);
define_id!(SpellId);
define_id!(UserId);

/// Deserializes an id that may be missing, null, or not a UUID at all.
///
/// Documents written by older clients used timestamps or short strings as ids.
/// Those are replaced by a freshly generated id instead of failing the whole
/// document; callers that own the real key (the repository, import) overwrite
/// it anyway.
pub(crate) fn lenient_id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<Uuid> + Default,
{
    let parsed = deserializer.deserialize_any(LenientIdVisitor)?;
    Ok(parsed.map(T::from).unwrap_or_default())
}

struct LenientIdVisitor;

impl<'de> Visitor<'de> for LenientIdVisitor {
    type Value = Option<Uuid>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a UUID string, a legacy string or numeric id, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Uuid::parse_str(v.trim()).ok())
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient_id")]
        id: ItemId,
    }

    #[test]
    fn parses_uuid_strings() {
        let id = CharacterId::new();
        let parsed: CharacterId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_non_uuid_strings() {
        let result = "hero-default".parse::<CharacterId>();
        assert!(result.is_err());
    }

    #[test]
    fn lenient_id_keeps_valid_uuid() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{}"}}"#, id);
        let holder: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(holder.id.to_uuid(), id);
    }

    #[test]
    fn lenient_id_replaces_legacy_ids() {
        let holder: Holder = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_ne!(holder.id.to_uuid(), Uuid::nil());

        let holder: Holder = serde_json::from_str(r#"{"id":1700000000000}"#).unwrap();
        assert_ne!(holder.id.to_uuid(), Uuid::nil());

        let holder: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_ne!(holder.id.to_uuid(), Uuid::nil());
    }
}
