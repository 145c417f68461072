//! Credential access for outgoing requests
//!
//! Logging in, refreshing and logging out are the caller's business. The
//! client only asks a [`CredentialProvider`] for the current token right
//! before each request and puts it in the envelope's `auth` member.

/// Methods the server rejects when an `auth` member is present
pub const UNAUTHENTICATED_METHODS: &[&str] =
    &["apiinfo.version", "user.login", "user.checkAuthentication"];

/// True if `method` must be sent with the `auth` member
pub fn requires_auth(method: &str) -> bool {
    !UNAUTHENTICATED_METHODS.contains(&method)
}

/// Supplies the current session or API token
pub trait CredentialProvider: Send + Sync {
    /// Token for the next request, or `None` to send no `auth` member
    fn token(&self) -> Option<String>;
}

/// A fixed API token
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No credentials; only unauthenticated methods will succeed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl CredentialProvider for NoAuth {
    fn token(&self) -> Option<String> {
        None
    }
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}
