use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use wareflow_auth::{Session, UserProfile};
use wareflow_core::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileDto {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub role: String,
    #[serde(default)]
    pub warehouses: Vec<String>,
}

/// Response of `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfileDto,
}

impl core::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish()
    }
}

impl LoginResponse {
    /// Anchor the relative lifetime at `issued_at`.
    pub fn into_session(self, issued_at: DateTime<Utc>) -> Result<Session, DomainError> {
        if self.access_token.trim().is_empty() {
            return Err(DomainError::validation("login response carried no access token"));
        }
        if self.expires_in <= 0 {
            return Err(DomainError::validation(format!(
                "expires_in must be positive, got {}",
                self.expires_in
            )));
        }
        Ok(Session {
            access_token: self.access_token,
            user: self.user.try_into()?,
            issued_at,
            expires_at: issued_at + Duration::seconds(self.expires_in),
        })
    }
}

impl From<&Session> for LoginResponse {
    fn from(session: &Session) -> Self {
        Self {
            access_token: session.access_token.clone(),
            expires_in: (session.expires_at - session.issued_at).num_seconds(),
            user: UserProfileDto::from(&session.user),
        }
    }
}

impl TryFrom<UserProfileDto> for UserProfile {
    type Error = DomainError;

    fn try_from(dto: UserProfileDto) -> Result<Self, Self::Error> {
        let display_name = if dto.display_name.trim().is_empty() {
            dto.username.clone()
        } else {
            dto.display_name
        };
        Ok(Self {
            id: dto.id.parse()?,
            username: dto.username,
            display_name,
            role: dto.role.parse()?,
            warehouses: dto.warehouses,
        })
    }
}

impl From<&UserProfile> for UserProfileDto {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            role: user.role.to_string(),
            warehouses: user.warehouses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wareflow_auth::Role;

    #[test]
    fn login_response_becomes_a_session() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access_token": "tok",
            "expires_in": 3600,
            "user": {
                "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                "username": "jdoe",
                "role": "supervisor",
                "warehouses": ["WH1"]
            }
        }))
        .unwrap();

        let now = Utc::now();
        let session = response.into_session(now).unwrap();
        assert_eq!(session.expires_at - session.issued_at, Duration::hours(1));
        assert_eq!(session.user.role, Role::Supervisor);
        assert_eq!(session.user.display_name, "jdoe");
        assert!(session.is_valid_at(now));
    }

    #[test]
    fn non_positive_lifetime_is_rejected() {
        let response = LoginResponse {
            access_token: "tok".into(),
            expires_in: 0,
            user: UserProfileDto {
                id: "01890a5d-ac96-774b-bcce-b302099a8057".into(),
                username: "jdoe".into(),
                display_name: "J. Doe".into(),
                role: "operator".into(),
                warehouses: vec![],
            },
        };
        assert!(response.into_session(Utc::now()).is_err());
    }
}
