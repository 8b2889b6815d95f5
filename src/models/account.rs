use serde::{Deserialize, Serialize};

/// Account as stored: carries the plaintext secret and never leaves the
/// data layer. Everything past the credential check works with [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: i32,
    pub email: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub password: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

impl AccountRecord {
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        email_key(&self.email) == email_key(email)
    }

    /// Email compares case-insensitively, the secret exactly.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.has_email(email) && self.password == password
    }
}

/// Public user shape handed to the session and the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<AccountRecord> for User {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            is_admin: record.is_admin,
        }
    }
}

impl From<&AccountRecord> for User {
    fn from(record: &AccountRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            name: record.name.clone(),
            is_admin: record.is_admin,
        }
    }
}

/// Normalized form used for uniqueness and lookup.
#[must_use]
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AccountRecord {
        AccountRecord {
            id: 1,
            email: "a@x.com".to_string(),
            name: "Admin".to_string(),
            password: "p".to_string(),
            is_admin: true,
        }
    }

    #[test]
    fn test_matches_is_case_insensitive_on_email_only() {
        let r = record();
        assert!(r.matches("A@X.COM", "p"));
        assert!(!r.matches("a@x.com", "P"));
        assert!(!r.matches("a@x.com", "wrong"));
        assert!(!r.matches("b@x.com", "p"));
    }

    #[test]
    fn test_public_user_drops_secret() {
        let user = User::from(record());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"is_admin\":true"));
        assert!(json.contains("\"nombre\":\"Admin\""));
    }

    #[test]
    fn test_seed_record_wire_names() {
        let json = r#"{"id":7,"email":"x@y.z","nombre":"X","password":"s","isAdmin":false}"#;
        let parsed: AccountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.name, "X");
        assert!(!parsed.is_admin);
    }
}
