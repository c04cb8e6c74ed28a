//! Access-control roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The two kinds of console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Advisor,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Advisor];

    /// Wire representation, `ADMIN` or `ADVISOR`.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Advisor => "ADVISOR",
        }
    }

    /// Path prefix of every page that belongs to this role.
    pub fn route_prefix(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Advisor => "/advisor",
        }
    }

    /// Login page for this role.
    pub fn login_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin/login",
            Role::Advisor => "/advisor/login",
        }
    }

    /// Landing page after login.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Advisor => "/advisor/dashboard",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Role::Admin => 0b01,
            Role::Advisor => 0b10,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "ADVISOR" => Ok(Role::Advisor),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// A set of roles, as accepted by role checks and route allow-lists.
///
/// Built from a single [`Role`], an array, a slice or a `Vec`:
///
/// ```
/// use squarefeet_console::{Role, RoleSet};
///
/// assert!(RoleSet::from(Role::Admin).contains(Role::Admin));
/// assert!(RoleSet::from([Role::Admin, Role::Advisor]).contains(Role::Advisor));
/// assert!(RoleSet::empty().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        RoleSet(0)
    }

    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet(role.bit())
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_only() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ADVISOR".parse::<Role>().unwrap(), Role::Advisor);
        assert!(matches!("admin".parse::<Role>(), Err(Error::UnknownRole(_))));
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Advisor).unwrap(), "\"ADVISOR\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn role_set_membership() {
        let set = RoleSet::from(vec![Role::Advisor]);
        assert!(set.contains(Role::Advisor));
        assert!(!set.contains(Role::Admin));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Role::Advisor]);
        let none: &[Role] = &[];
        assert!(RoleSet::from(none).is_empty());
    }
}
