//! Access gate: role-gated screen access and dashboard routing.
//!
//! DESIGN
//! ======
//! The gate is a pure function of a `Session` snapshot and the set of roles a
//! screen accepts. It never performs I/O: session resolution happens before
//! evaluation (see `routes::auth`) and the result is passed in explicitly.
//!
//! Evaluation order, first match wins:
//! 1. loading session -> `Pending`
//! 2. no user identity -> redirect to the login screen
//! 3. known-but-disallowed role -> redirect to that role's home
//! 4. otherwise -> `Allow`
//!
//! TRADE-OFFS
//! ==========
//! An authenticated user whose role has not been resolved falls through to
//! `Allow` under the default `GatePolicy::Permissive`. `GatePolicy::DenyUnresolved`
//! sends such users to the root screen instead.

use serde::{Deserialize, Serialize};

/// Login screen.
pub const AUTH_ROUTE: &str = "/auth";
/// Landing screen, also the fallback home for unrecognized roles.
pub const ROOT_ROUTE: &str = "/";
pub const STUDENT_ROUTE: &str = "/student";
pub const COMPANY_ROUTE: &str = "/company";
pub const PLACEMENT_HEAD_ROUTE: &str = "/placement-head";

// =============================================================================
// ROLE
// =============================================================================

/// Role tag attached to a user. Unknown tags are preserved rather than
/// rejected so the gate can route them to the fallback home.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Student,
    Company,
    PlacementHead,
    Unrecognized(String),
}

impl Role {
    /// Parse a role tag. Never fails; unknown tags become `Unrecognized`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "student" => Self::Student,
            "company" => Self::Company,
            "placement_head" => Self::PlacementHead,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// Parse a role tag, accepting only the three known roles.
    #[must_use]
    pub fn known(tag: &str) -> Option<Self> {
        Some(Self::from_tag(tag)).filter(Self::is_known)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Student => "student",
            Self::Company => "company",
            Self::PlacementHead => "placement_head",
            Self::Unrecognized(tag) => tag,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Dashboard a user with this role lands on.
    #[must_use]
    pub fn home_route(&self) -> &'static str {
        match self {
            Self::Student => STUDENT_ROUTE,
            Self::Company => COMPANY_ROUTE,
            Self::PlacementHead => PLACEMENT_HEAD_ROUTE,
            Self::Unrecognized(_) => ROOT_ROUTE,
        }
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Snapshot of the caller's authentication state.
///
/// `role` is only meaningful when `user_identity` is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user_identity: Option<String>,
    /// A blank tag is treated as no role.
    #[serde(default, deserialize_with = "blank_role_as_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub loading: bool,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session whose resolution is still in flight.
    #[cfg(test)]
    #[must_use]
    pub fn loading() -> Self {
        Self { loading: true, ..Self::default() }
    }

    #[must_use]
    pub fn authenticated(user_identity: impl Into<String>, role: Option<Role>) -> Self {
        Self { user_identity: Some(user_identity.into()), role, loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_identity.is_some()
    }
}

fn blank_role_as_none<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.filter(|t| !t.trim().is_empty()).map(Role::from))
}

// =============================================================================
// POLICY
// =============================================================================

/// How to treat an authenticated user with no resolved role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GatePolicy {
    /// Allow through regardless of the required roles.
    #[default]
    Permissive,
    /// Redirect to the root screen.
    DenyUnresolved,
}

impl GatePolicy {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" => Some(Self::Permissive),
            "deny_unresolved" | "deny-unresolved" | "strict" => Some(Self::DenyUnresolved),
            _ => None,
        }
    }
}

// =============================================================================
// DECISION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Session still resolving; show a placeholder, never redirect.
    Pending,
    Redirect(&'static str),
    Allow,
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Evaluate the gate under the default (permissive) policy.
#[must_use]
pub fn evaluate(session: &Session, required_roles: &[Role]) -> Decision {
    evaluate_with(GatePolicy::default(), session, required_roles)
}

/// Evaluate the gate under an explicit policy.
#[must_use]
pub fn evaluate_with(policy: GatePolicy, session: &Session, required_roles: &[Role]) -> Decision {
    if session.loading {
        return Decision::Pending;
    }

    if !session.is_authenticated() {
        return Decision::Redirect(AUTH_ROUTE);
    }

    match &session.role {
        Some(role) if !required_roles.contains(role) => Decision::Redirect(role.home_route()),
        Some(_) => Decision::Allow,
        None => match policy {
            GatePolicy::Permissive => Decision::Allow,
            GatePolicy::DenyUnresolved => Decision::Redirect(ROOT_ROUTE),
        },
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
