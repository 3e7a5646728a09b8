use serde::Deserialize;
use tokio::time::{sleep, Duration};

use crate::error::{Error, Result};

const DEVICE_CODE_URL: &str = "https://github.com/login/device/code";
const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const OAUTH_SCOPE: &str = "repo read:user";

/// Poll interval to use when the server does not specify one.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

enum PollOutcome {
    Authorized(String),
    Pending,
    Failed(String),
}

impl AccessTokenResponse {
    /// `authorization_pending` is the only code that keeps the poll loop
    /// alive; everything else without a token is terminal.
    fn outcome(self) -> PollOutcome {
        if let Some(token) = self.access_token {
            return PollOutcome::Authorized(token);
        }

        match self.error.as_deref() {
            Some("authorization_pending") => PollOutcome::Pending,
            _ => PollOutcome::Failed(
                self.error_description
                    .or(self.error)
                    .unwrap_or_else(|| "login failed".to_string()),
            ),
        }
    }
}

/// GitHub device-flow login. Displays a one-time code for the user to enter
/// out-of-band, then polls the token endpoint at the server-specified
/// interval until the authorization is approved or rejected.
pub async fn device_login(client_id: &str) -> Result<String> {
    let client = reqwest::Client::new();

    let device: DeviceCodeResponse = client
        .post(DEVICE_CODE_URL)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[("client_id", client_id), ("scope", OAUTH_SCOPE)])
        .send()
        .await?
        .json()
        .await
        .map_err(|e| Error::DeviceFlow(format!("device code request failed: {}", e)))?;

    println!(
        "Open {} and enter code {}",
        device.verification_uri, device.user_code
    );

    let interval = device.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

    loop {
        sleep(Duration::from_secs(interval)).await;

        let poll: AccessTokenResponse = client
            .post(ACCESS_TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", client_id),
                ("device_code", device.device_code.as_str()),
                ("grant_type", DEVICE_GRANT_TYPE),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| Error::DeviceFlow(format!("token poll failed: {}", e)))?;

        match poll.outcome() {
            PollOutcome::Authorized(token) => return Ok(token),
            PollOutcome::Pending => continue,
            PollOutcome::Failed(reason) => return Err(Error::DeviceFlow(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> AccessTokenResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_token_ends_polling() {
        let outcome = response(r#"{"access_token": "gho_abc123"}"#).outcome();
        assert!(matches!(outcome, PollOutcome::Authorized(t) if t == "gho_abc123"));
    }

    #[test]
    fn test_pending_continues_polling() {
        let outcome = response(r#"{"error": "authorization_pending"}"#).outcome();
        assert!(matches!(outcome, PollOutcome::Pending));
    }

    #[test]
    fn test_other_errors_are_terminal() {
        let outcome = response(
            r#"{"error": "access_denied", "error_description": "The user denied the request."}"#,
        )
        .outcome();
        assert!(matches!(
            outcome,
            PollOutcome::Failed(reason) if reason == "The user denied the request."
        ));
    }

    #[test]
    fn test_terminal_error_without_description_uses_code() {
        let outcome = response(r#"{"error": "expired_token"}"#).outcome();
        assert!(matches!(outcome, PollOutcome::Failed(reason) if reason == "expired_token"));
    }
}
