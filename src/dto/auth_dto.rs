use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body shared by register and login.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct AuthRequestDto {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: String,
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(
        max = 254,
        message = "Email must not exceed 254 characters"
    ))]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    pub username: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

impl std::fmt::Debug for AuthRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::request_error::field_error_map;

    fn request(username: &str, password: &str, email: Option<&str>) -> AuthRequestDto {
        AuthRequestDto {
            username: username.to_string(),
            password: password.to_string(),
            email: email.map(|e| e.to_string()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request("alice", "secret1", Some("a@x.com")).validate().is_ok());
    }

    #[test]
    fn test_email_is_optional() {
        assert!(request("alice", "secret1", None).validate().is_ok());
    }

    #[test]
    fn test_short_username_is_keyed_by_field() {
        let errors = request("al", "secret1", None).validate().unwrap_err();
        let map = field_error_map(errors);

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("username").map(String::as_str),
            Some("Username must be between 3 and 50 characters")
        );
    }

    #[test]
    fn test_short_password_is_keyed_by_field() {
        let errors = request("alice", "short", None).validate().unwrap_err();
        let map = field_error_map(errors);

        assert!(map.contains_key("password"));
        assert!(!map.contains_key("username"));
    }

    #[test]
    fn test_malformed_email_is_keyed_by_field() {
        let errors = request("alice", "secret1", Some("not-an-email")).validate().unwrap_err();
        let map = field_error_map(errors);

        assert_eq!(map.get("email").map(String::as_str), Some("Email format is invalid"));
    }

    #[test]
    fn test_multiple_failures_report_every_field() {
        let errors = request("al", "short", Some("bad")).validate().unwrap_err();
        let map = field_error_map(errors);

        assert!(map.contains_key("username"));
        assert!(map.contains_key("password"));
        assert!(map.contains_key("email"));
    }

    #[test]
    fn test_debug_omits_password() {
        let debug = format!("{:?}", request("alice", "secret1", None));
        assert!(!debug.contains("secret1"));
    }

    #[test]
    fn test_request_deserializes_without_email() {
        let parsed: AuthRequestDto =
            serde_json::from_str(r#"{"username": "alice", "password": "secret1"}"#).unwrap();

        assert_eq!(parsed.username, "alice");
        assert_eq!(parsed.email, None);
    }

    #[test]
    fn test_response_uses_camel_case_keys() {
        let response = AuthResponseDto {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            username: "alice".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "a");
        assert_eq!(json["refreshToken"], "r");
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_refresh_request_uses_camel_case_key() {
        let parsed: RefreshRequestDto =
            serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();

        assert_eq!(parsed.refresh_token, "abc");
    }
}
