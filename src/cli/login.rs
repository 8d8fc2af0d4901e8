use std::sync::Arc;

use crate::{config::Config, error, info, spotify, success};

pub async fn login(config: Arc<Config>) {
    info!(
        "Waiting up to {} seconds for the authorization callback on {}",
        spotify::auth::LOGIN_TIMEOUT_SECS,
        config.redirect_uri
    );

    match spotify::auth::login(config).await {
        Ok(token) => {
            success!("Authentication successful!");
            if let Some(expires_at) = token.expires_at() {
                info!("Token expires at {}", expires_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            info!("Set SPOTIFY_USER_TOKEN to the following value:");
            println!("{}", token.as_str());
        }
        Err(e) => error!("Login failed: {}", e),
    }
}
