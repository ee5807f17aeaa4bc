//! `Authorization` header values

use base64::Engine;

use crate::models::{AuthType, ResolvedAuth};

/// Returns the `Authorization` value for the given auth, or `None` when no
/// scheme is set.
pub fn authorization_value(auth: &ResolvedAuth) -> Option<String> {
    match auth.auth_type {
        AuthType::None => None,
        AuthType::Password => {
            let credentials = format!("{}:{}", auth.username, auth.password);
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            Some(format!("Basic {}", encoded))
        }
        AuthType::Bearer => Some(format!("Bearer {}", auth.token)),
        AuthType::Token => Some(format!("Token {}", auth.token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password() {
        let auth = ResolvedAuth {
            auth_type: AuthType::Password,
            username: "joey".to_string(),
            password: "sandwiches".to_string(),
            ..Default::default()
        };
        let expected = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode("joey:sandwiches")
        );
        assert_eq!(authorization_value(&auth), Some(expected));
        assert_eq!(
            authorization_value(&auth).as_deref(),
            Some("Basic am9leTpzYW5kd2ljaGVz")
        );
    }

    #[test]
    fn test_tokens() {
        let mut auth = ResolvedAuth {
            auth_type: AuthType::Bearer,
            token: "ABC-456".to_string(),
            ..Default::default()
        };
        assert_eq!(authorization_value(&auth).as_deref(), Some("Bearer ABC-456"));

        auth.auth_type = AuthType::Token;
        assert_eq!(authorization_value(&auth).as_deref(), Some("Token ABC-456"));
    }

    #[test]
    fn test_none() {
        assert_eq!(authorization_value(&ResolvedAuth::default()), None);
    }
}
