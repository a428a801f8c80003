//! Login request/response payloads.

use serde::{Deserialize, Serialize};

/// Credentials sent to `POST /token/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair plus the role tag added by the portal's token serializer.
///
/// `role` and `username` are extra fields the backend attaches to the
/// standard JWT pair; older deployments may omit them.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{"access":"a.b.c","refresh":"d.e.f","role":"DOCTOR","username":"dr_ahmed"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access, "a.b.c");
        assert_eq!(resp.role.as_deref(), Some("DOCTOR"));
        assert_eq!(resp.username.as_deref(), Some("dr_ahmed"));
    }

    #[test]
    fn test_parse_bare_token_pair() {
        let json = r#"{"access":"a.b.c","refresh":"d.e.f"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(resp.role.is_none());
        assert!(resp.username.is_none());
    }
}
