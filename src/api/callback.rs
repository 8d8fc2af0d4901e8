use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    spotify::auth::{AuthMode, authenticate, authorize_url},
    types::PendingLogin,
    warning,
};

/// Redirects the browser to the Spotify authorize page.
pub async fn login(
    Extension(config): Extension<Arc<Config>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Response {
    let state = match shared_state.lock().await.as_ref() {
        Some(pending) => pending.state.clone(),
        None => return Html("<h4>No login in progress.</h4>").into_response(),
    };

    match authorize_url(&config, &state) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            warning!("Cannot build authorize url: {}", e);
            Html("<h4>Login is not configured.</h4>").into_response()
        }
    }
}

/// Exchanges the authorization code for a user token.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let expected = match shared_state.lock().await.as_ref() {
        Some(pending) => pending.state.clone(),
        None => return Html("<h4>No login in progress.</h4>"),
    };

    if params.get("state") != Some(&expected) {
        return Html("<h4>State mismatch, please restart the login.</h4>");
    }

    // the lock is not held during the exchange
    let mode = AuthMode::Delegated { code: code.clone() };
    let token = match authenticate(&config, mode).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Html("<h4>Login failed.</h4>");
        }
    };

    let mut state = shared_state.lock().await;
    match state.as_mut() {
        Some(pending) if pending.state == expected => {
            pending.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        _ => Html("<h4>Login was restarted, please try again.</h4>"),
    }
}
