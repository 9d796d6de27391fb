//! Auth service client.

use crate::{AuthError, Credentials, Registration, User};
use async_trait::async_trait;
use lumen_data::{FetchClient, FetchError, Response};
use serde::Serialize;
use tracing::{debug, warn};

/// Something that can exchange credentials for a [`User`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError>;

    async fn register(&self, registration: &Registration) -> Result<User, AuthError>;
}

/// [`Authenticator`] backed by the storefront's auth endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: FetchClient,
    path: String,
}

impl AuthClient {
    pub fn new(http: FetchClient, path: impl Into<String>) -> Self {
        Self {
            http,
            path: path.into(),
        }
    }

    async fn post<T: Serialize + Sync>(&self, body: &T) -> Result<User, AuthError> {
        let response = self.http.post(&self.path).json(body)?.send().await?;
        user_from_response(response)
    }
}

#[async_trait]
impl Authenticator for AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        credentials.validate()?;
        debug!(email = %credentials.email, "signing in");
        self.post(credentials).await.inspect_err(|e| {
            warn!(email = %credentials.email, error = %e, "sign-in failed");
        })
    }

    async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        registration.validate()?;
        debug!(email = %registration.email, "registering");
        self.post(registration).await.inspect_err(|e| {
            warn!(email = %registration.email, error = %e, "registration failed");
        })
    }
}

fn user_from_response(response: Response) -> Result<User, AuthError> {
    match response.error_for_status() {
        Ok(response) => Ok(response.json()?),
        Err(FetchError::Http { status, message }) => Err(AuthError::from_status(status, message)),
        Err(e) => Err(e.into()),
    }
}
