//! Supabase Auth Backend
//!
//! [`AuthBackend`] over the Supabase GoTrue and PostgREST HTTP APIs.

use chrono::Utc;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::entity::{
    profile::UserProfile,
    session::{AuthenticatedSession, Session},
    user::AuthUser,
};
use crate::domain::repository::AuthBackend;
use crate::error::{AuthError, AuthResult};

/// Supabase project endpoint and public key.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

pub struct SupabaseAuthBackend {
    http: reqwest::Client,
    config: SupabaseConfig,
    /// Token of the last confirmed session, used for row-level-secured reads.
    access_token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserResponse> for AuthUser {
    fn from(r: UserResponse) -> Self {
        AuthUser::new(r.id, r.email)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserResponse,
}

impl TokenResponse {
    fn into_authenticated(self, now: i64) -> AuthenticatedSession {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));

        AuthenticatedSession {
            user: self.user.into(),
            session: Session {
                access_token: self.access_token,
                refresh_token: self.refresh_token,
                token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
                expires_at,
            },
        }
    }
}

impl SupabaseAuthBackend {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            access_token: RwLock::new(None),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, path)
    }

    fn with_key(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.anon_key)
    }

    /// `Ok(None)` when the token is rejected.
    async fn get_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>> {
        let resp = self
            .with_key(self.http.get(self.auth_url("user")))
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(resp.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }

        let user: UserResponse = parse(resp).await?;
        Ok(Some(user.into()))
    }

    /// `Ok(None)` when the refresh token is rejected.
    async fn refresh(&self, refresh_token: &str) -> AuthResult<Option<AuthenticatedSession>> {
        let resp = self
            .with_key(self.http.post(self.auth_url("token")))
            .query(&[("grant_type", "refresh_token")])
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if resp.status().is_client_error() {
            let message = error_message(resp.status(), &resp.text().await.unwrap_or_default());
            tracing::info!(message = %message, "Refresh token rejected");
            return Ok(None);
        }

        let token: TokenResponse = parse(resp).await?;
        Ok(Some(token.into_authenticated(Utc::now().timestamp())))
    }

    async fn remember(&self, session: Option<&AuthenticatedSession>) {
        *self.access_token.write().await = session.map(|s| s.session.access_token.clone());
    }
}

impl AuthBackend for SupabaseAuthBackend {
    async fn restore_session(
        &self,
        stored: Option<&Session>,
    ) -> AuthResult<Option<AuthenticatedSession>> {
        let Some(stored) = stored else {
            return Ok(None);
        };

        let restored = if stored.is_expired(Utc::now()) {
            match stored.refresh_token.as_deref() {
                Some(token) => self.refresh(token).await?,
                None => None,
            }
        } else {
            match self.get_user(&stored.access_token).await? {
                Some(user) => Some(AuthenticatedSession {
                    user,
                    session: stored.clone(),
                }),
                None => match stored.refresh_token.as_deref() {
                    Some(token) => self.refresh(token).await?,
                    None => None,
                },
            }
        };

        self.remember(restored.as_ref()).await;
        Ok(restored)
    }

    async fn fetch_profile(&self, user_id: &str) -> AuthResult<Option<UserProfile>> {
        let bearer = self
            .access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.config.anon_key.clone());

        let resp = self
            .with_key(self.http.get(self.rest_url("users")))
            .bearer_auth(bearer)
            .query(&[("id", format!("eq.{user_id}")), ("select", "*".to_string())])
            .send()
            .await?;

        let mut rows: Vec<UserProfile> = parse(resp).await?;
        if rows.len() > 1 {
            return Err(AuthError::Backend(format!(
                "Expected one profile for user {user_id}, found {}",
                rows.len()
            )));
        }

        Ok(rows.pop())
    }

    async fn sign_out(&self, session: &Session) -> AuthResult<()> {
        let resp = self
            .with_key(self.http.post(self.auth_url("logout")))
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        self.remember(None).await;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Backend(error_message(status, &body)));
        }

        Ok(())
    }
}

/// Decode a success body or surface the backend's error message.
async fn parse<T: serde::de::DeserializeOwned>(resp: Response) -> AuthResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        return Err(if status.is_server_error() {
            AuthError::Unavailable(message)
        } else {
            AuthError::Backend(message)
        });
    }

    Ok(resp.json::<T>().await?)
}

/// Message from a Supabase error body.
///
/// GoTrue and PostgREST disagree on the field name; the first present of
/// `msg`, `message`, `error_description`, `error` wins.
fn error_message(status: StatusCode, body: &str) -> String {
    const FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            FIELDS
                .iter()
                .find_map(|f| json.get(f).and_then(|v| v.as_str()).map(str::to_string))
        })
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| format!("Auth service returned {status}"))
}
