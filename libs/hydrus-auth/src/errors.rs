use http::StatusCode;
use hydrus_errors::Failure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required: missing Basic credentials")]
    Unauthenticated,

    #[error("Authentication failed: invalid credentials")]
    InvalidCredentials,

    #[error("Malformed Basic credentials: {0}")]
    MalformedCredentials(String),

    #[error("User with ID {0} is not a valid user")]
    UnknownUser(u64),

    #[error("Identity store failure: {0}")]
    Store(String),
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated
            | AuthError::InvalidCredentials
            | AuthError::MalformedCredentials(_) => StatusCode::UNAUTHORIZED,
            AuthError::UnknownUser(_) => StatusCode::BAD_REQUEST,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_failure(&self) -> Failure {
        Failure::new(self.status(), self.to_string())
    }
}

impl From<AuthError> for Failure {
    fn from(e: AuthError) -> Self {
        e.to_failure()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(AuthError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::MalformedCredentials("no colon".to_owned()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::UnknownUser(2).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::Store("down".to_owned()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn failure_carries_display_message() {
        let failure: Failure = AuthError::UnknownUser(9).into();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
        assert_eq!(failure.message, "User with ID 9 is not a valid user");
    }
}
