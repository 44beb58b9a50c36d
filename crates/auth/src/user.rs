use serde::{Deserialize, Serialize};

use wareflow_core::UserId;

/// Role of a signed-in user within the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Operator,
    Supervisor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        }
    }

    /// Supervisors and admins may cancel orders and counts; operators may not.
    pub fn can_cancel(&self) -> bool {
        matches!(self, Role::Supervisor | Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = wareflow_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operator" => Ok(Role::Operator),
            "supervisor" => Ok(Role::Supervisor),
            "admin" => Ok(Role::Admin),
            other => Err(wareflow_core::DomainError::invalid_id(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    /// Warehouse codes the user works in.
    pub warehouses: Vec<String>,
}

impl UserProfile {
    pub fn works_in(&self, warehouse: &str) -> bool {
        self.warehouses
            .iter()
            .any(|w| w.eq_ignore_ascii_case(warehouse.trim()))
    }
}
