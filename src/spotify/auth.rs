use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Error, Res, config,
    management::TokenManager,
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long to wait for the browser to hit the callback endpoint.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// 1. **PKCE Setup**: generates a code verifier and its SHA256 challenge
/// 2. **Server Start**: launches the local callback server
/// 3. **Browser Launch**: opens the authorization URL in the default browser
/// 4. **Callback Handling**: the callback exchanges the code for a token
/// 5. **Token Persistence**: the token is cached for later runs
///
/// # Arguments
///
/// * `shared_state` - State shared with the callback handler, holding the
///   verifier and, once the exchange succeeded, the token
///
/// # Errors
///
/// [`Error::Config`] for missing client settings, [`Error::Auth`] when no
/// token arrived within the timeout, and IO errors from persisting the token.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;
    let scope = config::spotify_scope();

    let auth_url = reqwest::Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("Invalid SPOTIFY_API_AUTH_URL: {}", e)))?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    match token {
        Some(t) => TokenManager::new(t).persist().await,
        None => Err(Error::Auth(
            "Authentication failed or timed out.".to_string(),
        )),
    }
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = std::time::Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
                return Some(token.clone());
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may omit the refresh token from the response, in which case the
/// one passed in stays valid and is kept.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;

    let response = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?;

    let token = parse_token_response(response).await?;
    Ok(Token {
        refresh_token: if token.refresh_token.is_empty() {
            refresh_token.to_string()
        } else {
            token.refresh_token
        },
        ..token
    })
}

/// Exchanges an authorization code and the PKCE verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let response = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    parse_token_response(response).await
}

async fn parse_token_response(response: reqwest::Response) -> Res<Token> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth(format!(
            "token request failed ({}): {}",
            status, body
        )));
    }

    let json = response.json::<TokenResponse>().await?;
    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
