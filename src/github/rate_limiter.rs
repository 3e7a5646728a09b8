use reqwest::Response;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

/// Tracks GitHub's rate-limit response headers and pauses before the next
/// request once the remaining budget hits zero.
pub struct RateLimiter {
    state: Mutex<State>,
}

struct State {
    remaining: u32,
    reset_at: Option<std::time::Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                remaining: 5000,
                reset_at: None,
            }),
        }
    }

    pub async fn wait(&self) {
        let wait_for = {
            let state = self.state.lock().await;
            match state.reset_at {
                Some(reset_at) if state.remaining == 0 => {
                    reset_at.checked_duration_since(std::time::Instant::now())
                }
                _ => None,
            }
        };

        if let Some(duration) = wait_for {
            tracing::info!("Rate limit exhausted, sleeping {:?}", duration);
            sleep(duration).await;
        }
    }

    pub async fn update_from_response(&self, response: &Response) {
        let Some(remaining) = header_value::<u32>(response, "x-ratelimit-remaining") else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = remaining;

        if let Some(reset_timestamp) = header_value::<u64>(response, "x-ratelimit-reset") {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            if reset_timestamp > now {
                state.reset_at = Some(
                    std::time::Instant::now() + Duration::from_secs(reset_timestamp - now),
                );
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value<T: std::str::FromStr>(response: &Response, name: &str) -> Option<T> {
    response.headers().get(name)?.to_str().ok()?.parse().ok()
}
