use std::env;
use std::fmt;

/// Seam for the authentication collaborator. The dashboard only ever asks
/// for the current bearer token; acquiring and refreshing it is someone
/// else's job.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> String;
}

/// Token handed in through the environment, read once at startup. The
/// startup read doubles as the initialization check: a missing or empty
/// `API_TOKEN` refuses to boot instead of failing on the first request.
pub struct EnvToken {
    token: String,
}

pub const TOKEN_VAR: &str = "API_TOKEN";

impl EnvToken {
    pub fn from_env() -> Result<Self, AuthError> {
        match env::var(TOKEN_VAR) {
            Ok(value) if !value.trim().is_empty() => Ok(Self {
                token: value.trim().to_string(),
            }),
            _ => Err(AuthError::MissingToken),
        }
    }
}

impl TokenProvider for EnvToken {
    fn bearer_token(&self) -> String {
        self.token.clone()
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "{TOKEN_VAR} is not set or empty"),
        }
    }
}

impl std::error::Error for AuthError {}
