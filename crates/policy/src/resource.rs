//! Canonical resource/action naming.
//!
//! The policy engine scopes decisions by resource identifier strings:
//! `"departments"` for collection-scoped actions and `"departments:42"`
//! for instance-scoped ones. Instance keys must be substituted from typed
//! path parameters before the identifier is built; there is no way to
//! construct an unresolved `"departments:{id}"` template through this API.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Canonical identifier of the object an action targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    kind: Cow<'static, str>,
    instance: Option<String>,
}

impl ResourceId {
    /// Collection-scoped resource (create/list style actions).
    pub fn collection(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            instance: None,
        }
    }

    /// Instance-scoped resource. The key is rendered from a typed path
    /// parameter (`DepartmentId`, `EmployeeId`), never free-form input.
    pub fn instance(kind: impl Into<Cow<'static, str>>, key: impl core::fmt::Display) -> Self {
        Self {
            kind: kind.into(),
            instance: Some(key.to_string()),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Render the wire form sent to the policy engine.
    pub fn render(&self) -> String {
        match &self.instance {
            Some(key) => format!("{}:{}", self.kind, key),
            None => self.kind.to_string(),
        }
    }
}

impl core::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.instance {
            Some(key) => write!(f, "{}:{}", self.kind, key),
            None => f.write_str(&self.kind),
        }
    }
}

/// Action identifier used by policy rules (e.g. "create_department").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionName(Cow<'static, str>);

impl ActionName {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ActionName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_renders_bare_type() {
        assert_eq!(ResourceId::collection("departments").render(), "departments");
    }

    #[test]
    fn instance_renders_type_and_key() {
        assert_eq!(
            ResourceId::instance("departments", 42).render(),
            "departments:42"
        );
        assert_eq!(
            ResourceId::instance("employees", 7).to_string(),
            "employees:7"
        );
    }

    #[test]
    fn string_keys_are_supported() {
        assert_eq!(
            ResourceId::instance("tenants", "default").render(),
            "tenants:default"
        );
    }
}
