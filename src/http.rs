use std::thread;
use std::time::Duration;

use log::debug;

#[derive(Debug, Clone)]
pub(crate) struct RequestPolicy {
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
    pub(crate) attempts: usize,
    pub(crate) retry_delay: Duration,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(10),
            attempts: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HttpFailure {
    Status { status: u16, body: String },
    Transport(String),
}

fn should_retry_http_status(status: u16) -> bool {
    status == 408 || status == 429 || (500..=599).contains(&status)
}

fn truncated_body(response: ureq::Response) -> String {
    let body = response.into_string().ok().unwrap_or_default();
    body.trim().chars().take(240).collect()
}

/// GET `url` and return the body. Transport errors and transient statuses are
/// retried up to `policy.attempts` times; any other status fails immediately.
pub(crate) fn get_text(
    url: &str,
    headers: &[(&str, &str)],
    query: &[(String, String)],
    policy: &RequestPolicy,
) -> Result<String, HttpFailure> {
    let attempts = policy.attempts.max(1);
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(policy.connect_timeout)
        .timeout_read(policy.read_timeout)
        .timeout_write(policy.read_timeout)
        .build();

    for attempt in 1..=attempts {
        let mut request = agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }
        for (key, value) in query {
            request = request.query(key, value);
        }

        match request.call() {
            Ok(response) => {
                return response.into_string().map_err(|err| {
                    HttpFailure::Transport(format!("response decode failed: {err}"))
                });
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = truncated_body(response);
                if should_retry_http_status(status) && attempt < attempts {
                    debug!("GET {url} returned {status}, retrying ({attempt}/{attempts})");
                    thread::sleep(policy.retry_delay);
                    continue;
                }
                return Err(HttpFailure::Status { status, body });
            }
            Err(ureq::Error::Transport(err)) => {
                if attempt < attempts {
                    debug!("GET {url} transport error: {err}, retrying ({attempt}/{attempts})");
                    thread::sleep(policy.retry_delay);
                    continue;
                }
                return Err(HttpFailure::Transport(format!(
                    "transport error after {attempts} attempt(s): {err}"
                )));
            }
        }
    }

    Err(HttpFailure::Transport(
        "exhausted attempts without a concrete error".to_string(),
    ))
}
