//! Form and message types for the portal

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Registration form submission
///
/// Passwords are wrapped in `SecretString` so they are redacted from Debug
/// output and never serialized back out.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub password2: SecretString,
}

/// Login form submission
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// One-time notification attached to a session, shown on the next render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: String,
    pub text: String,
}

impl FlashMessage {
    pub fn new(category: &str, text: &str) -> Self {
        Self {
            category: category.to_string(),
            text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_redacted_in_debug() {
        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: SecretString::new("hunter2".to_string()),
        };
        let debug_str = format!("{:?}", form);
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_flash_message_roundtrip() {
        let flash = FlashMessage::new("error", "Please log in first");
        let json = serde_json::to_string(&flash).unwrap();
        let back: FlashMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(flash, back);
    }
}
