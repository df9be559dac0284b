//! Authenticated user profile.

use serde::{Deserialize, Serialize};

/// How the user signed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Google OAuth.
    Google,
    /// Email and password.
    Local,
}

/// The signed-in user, as returned by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id; scopes every expense query.
    #[serde(rename = "_id")]
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Sign-up provider.
    pub provider: AuthProvider,
    /// Avatar URL; may be empty.
    #[serde(default)]
    pub image: String,
}

impl User {
    /// Returns "First Last".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_user() {
        let json = r#"{
            "_id": "u1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "provider": "google"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.provider, AuthProvider::Google);
        assert_eq!(user.image, "");
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
}
