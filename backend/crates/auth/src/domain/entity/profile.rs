//! User Profile Entity
//!
//! Application-specific user record, owned by the backend `users` table and
//! mirrored into the client store after authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub completed_airdrops: i32,
    #[serde(default)]
    pub wallet_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Partial profile update. `None` leaves a field untouched.
///
/// Nullable fields take `Some(None)` to clear the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub username: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub points: Option<i32>,
    pub completed_airdrops: Option<i32>,
    pub wallet_address: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge onto `profile`; fields set on the patch win.
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(username) = self.username {
            profile.username = username;
        }
        if let Some(role) = self.role {
            profile.role = role;
        }
        if let Some(points) = self.points {
            profile.points = points;
        }
        if let Some(completed) = self.completed_airdrops {
            profile.completed_airdrops = completed;
        }
        if let Some(wallet) = self.wallet_address {
            profile.wallet_address = wallet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            email: "hunter@example.com".to_string(),
            username: Some("hunter".to_string()),
            role: UserRole::User,
            points: 10,
            completed_airdrops: 1,
            wallet_address: Some("0xabc".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_patch_overrides_only_set_fields() {
        let mut p = profile();
        ProfilePatch {
            points: Some(50),
            wallet_address: Some(None),
            ..Default::default()
        }
        .apply(&mut p);

        assert_eq!(p.points, 50);
        assert_eq!(p.wallet_address, None);
        assert_eq!(p.username.as_deref(), Some("hunter"));
        assert_eq!(p.completed_airdrops, 1);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProfilePatch::default().is_empty());
        let mut p = profile();
        let before = p.clone();
        ProfilePatch::default().apply(&mut p);
        assert_eq!(p, before);
    }

    #[test]
    fn test_profile_deserializes_backend_row() {
        let json = r#"{
            "id": "u1",
            "email": "hunter@example.com",
            "username": null,
            "role": "admin",
            "points": 120,
            "completed_airdrops": 4,
            "wallet_address": null,
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let p: UserProfile = serde_json::from_str(json).unwrap();
        assert!(p.is_admin());
        assert_eq!(p.points, 120);
        assert!(p.username.is_none());
    }
}
