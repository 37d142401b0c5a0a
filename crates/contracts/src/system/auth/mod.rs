use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{de_opt_i64, de_string_or_default};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        (!username.is_empty() && !password.is_empty()).then(|| Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// `data` of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// `data` of `GET /users`, cached in browser storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de_string_or_default")]
    pub username: String,
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub branch_id: Option<i64>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case("admin"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_token_alias() {
        let r: LoginResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(r.token, "abc");
        assert!(r.user.is_none());
    }

    #[test]
    fn test_profile() {
        let p: UserProfile =
            serde_json::from_str(r#"{"id":"2","username":"rina","full_name":"Rina","role":"Admin"}"#)
                .unwrap();
        assert_eq!(p.display_name(), "Rina");
        assert!(p.is_admin());
        assert_eq!(UserProfile::default().display_name(), "");
    }

    #[test]
    fn test_login_request_requires_both() {
        assert!(LoginRequest::new(" ", "x").is_none());
        assert!(LoginRequest::new("rina", "").is_none());
        assert_eq!(LoginRequest::new(" rina ", "pw").unwrap().username, "rina");
    }
}
