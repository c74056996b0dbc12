//! Login stub.
//!
//! There is no credential store: a login succeeds for any non-blank username. The check lives
//! here so every transport applies the same rule.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginRes {
    pub message: String,
    pub username: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("El campo 'username' es obligatorio")]
    MissingUsername,
}

/// Validates a login request.
///
/// Returns `Ok(LoginRes)` echoing the trimmed username, or an error if it is blank.
pub fn validate_login(req: &LoginReq) -> Result<LoginRes, AuthError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AuthError::MissingUsername);
    }

    Ok(LoginRes {
        message: "Login success".into(),
        username: username.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_any_non_blank_username() {
        let res = validate_login(&LoginReq {
            username: " prestador.201 ".into(),
        })
        .expect("login should succeed");
        assert_eq!(res.username, "prestador.201");
        assert_eq!(res.message, "Login success");
    }

    #[test]
    fn login_rejects_blank_username() {
        let err = validate_login(&LoginReq {
            username: "   ".into(),
        })
        .expect_err("blank username should fail");
        assert_eq!(err, AuthError::MissingUsername);
    }
}
