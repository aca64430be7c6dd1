use serde::{Deserialize, Serialize};

// Wire fields are PascalCase (`Email`, `ConfirmPassword`, ...). Everything is
// Option so presence can be reported with the route-specific 400 message
// instead of a generic deserialization rejection; an empty string counts as
// absent.

/// Request body for registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for requesting a reset code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// Request body for redeeming a reset code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub code: Option<String>,
    pub new_password: Option<String>,
}

/// Request body for account deletion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAccountRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Success half of the response envelope: `{"success": <message>}`.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: message.into(),
        }
    }
}

pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_deserialize_from_pascal_case_bodies() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"Email":"a@b.com","Password":"secret-123","ConfirmPassword":"secret-123"}"#,
        )
        .expect("register body");
        assert_eq!(req.email.as_deref(), Some("a@b.com"));
        assert_eq!(req.confirm_password.as_deref(), Some("secret-123"));

        let req: ResetPasswordRequest =
            serde_json::from_str(r#"{"Email":"a@b.com","Code":"1a2b3c4d","NewPassword":"n"}"#)
                .expect("reset body");
        assert_eq!(req.code.as_deref(), Some("1a2b3c4d"));
        assert_eq!(req.new_password.as_deref(), Some("n"));
    }

    #[test]
    fn missing_fields_deserialize_to_none() {
        let req: RegisterRequest = serde_json::from_str(r#"{"Email":"a@b.com"}"#).expect("body");
        assert!(req.password.is_none());
        assert!(req.confirm_password.is_none());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("x".into())), Some("x"));
    }

    #[test]
    fn success_envelope_serializes_under_the_success_key() {
        let json = serde_json::to_string(&SuccessResponse::new("Account created")).unwrap();
        assert_eq!(json, r#"{"success":"Account created"}"#);
    }
}
