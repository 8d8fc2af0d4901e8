use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, Url, header::AUTHORIZATION};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::AuthError,
    server::{bind_api_server, start_api_server},
    types::{BearerToken, PendingLogin},
    utils, warning,
};

/// How long `login` waits for the authorization callback.
pub const LOGIN_TIMEOUT_SECS: u64 = 120;

/// Grant used to obtain a bearer token.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Client-credentials grant. No user context; enough for catalog reads.
    Service,
    /// Authorization-code grant with a code obtained through the login
    /// callback. Needed for playlist writes.
    Delegated { code: String },
}

/// Requests a bearer token from the accounts service.
///
/// Both grants authenticate the application with HTTP Basic credentials
/// built from the configured client id and secret.
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] when client id or secret are unset
/// - [`AuthError::Rejected`] on a non-success response
/// - [`AuthError::Http`] on transport failures
/// - [`AuthError::MalformedResponse`] when the body carries no access token
pub async fn authenticate(config: &Config, mode: AuthMode) -> Result<BearerToken, AuthError> {
    let credentials = config
        .credentials
        .as_ref()
        .ok_or(AuthError::MissingCredentials)?;

    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let form: Vec<(&str, &str)> = match &mode {
        AuthMode::Service => vec![("grant_type", "client_credentials")],
        AuthMode::Delegated { code } => vec![
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    };

    let response = Client::new()
        .post(&config.token_url)
        .header(AUTHORIZATION, format!("Basic {}", basic))
        .form(&form)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Rejected { status, body });
    }

    let body = response.text().await?;
    let token: BearerToken =
        serde_json::from_str(&body).map_err(|_| AuthError::MalformedResponse("access_token"))?;
    if token.access_token.is_empty() {
        return Err(AuthError::MalformedResponse("access_token"));
    }

    Ok(token)
}

/// Builds the authorize URL the user is sent to during login.
pub fn authorize_url(config: &Config, state: &str) -> Result<String, AuthError> {
    let client_id = config
        .credentials
        .as_ref()
        .map(|c| c.client_id.as_str())
        .ok_or(AuthError::MissingCredentials)?;

    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;

    Ok(url.to_string())
}

/// Runs the interactive authorization-code flow.
///
/// 1. Generates a random `state` and stores it in the shared login state
/// 2. Binds and starts the local callback server; a bind failure is
///    returned right away
/// 3. Opens the authorize URL in the default browser
/// 4. Waits for the callback handler to exchange the code for a token
///
/// The returned token carries the playlist-modify scopes and is what the
/// repartition step expects in `SPOTIFY_USER_TOKEN`.
pub async fn login(config: Arc<Config>) -> Result<BearerToken, AuthError> {
    let state = utils::generate_state();
    let auth_url = authorize_url(&config, &state)?;

    let shared_state: Arc<Mutex<Option<PendingLogin>>> = Arc::new(Mutex::new(Some(PendingLogin {
        state,
        token: None,
    })));

    let listener = bind_api_server(&config)
        .await
        .map_err(AuthError::CallbackServer)?;

    let server_state = Arc::clone(&shared_state);
    let server_config = Arc::clone(&config);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, server_config, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state, Duration::from_secs(LOGIN_TIMEOUT_SECS))
        .await
        .ok_or(AuthError::TimedOut(LOGIN_TIMEOUT_SECS))
}

/// Polls the shared login state once per second until the callback stored
/// a token or `max_wait` elapsed.
pub async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PendingLogin>>>,
    max_wait: Duration,
) -> Option<BearerToken> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pending) = lock.as_ref() {
            if let Some(token) = &pending.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
