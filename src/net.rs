// src/net.rs
//
// Blocking JSON GET with bounded retries and exponential backoff.
// Retries happen here, synchronously, before control returns to the caller.

use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::config::consts::{ACCEPT_LANGUAGE, RETRY_STATUSES, USER_AGENT};
use crate::config::SourceOptions;
use crate::error::{Result, TrendError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retries: u32,
    pub backoff: Duration,
    pub statuses: &'static [u16],
}

impl RetryPolicy {
    pub fn from_options(opts: &SourceOptions) -> Self {
        Self { retries: opts.retries, backoff: opts.backoff, statuses: RETRY_STATUSES }
    }

    /// Wait before retry number `n` (1-based): backoff, 2x, 4x, ...
    pub fn delay(&self, n: u32) -> Duration {
        let factor = 1u32.checked_shl(n.saturating_sub(1)).unwrap_or(u32::MAX);
        self.backoff.saturating_mul(factor)
    }

    pub fn retry_status(&self, code: u16) -> bool {
        self.statuses.contains(&code)
    }
}

/// Outcome of one attempt.
pub enum Attempt<T> {
    Done(T),
    /// Transient; try again if the budget allows.
    Retry(TrendError),
    /// Permanent; give up now.
    Fail(TrendError),
}

/// Run `op` until it succeeds, fails permanently, or the retry budget is spent.
/// `sleep` is injected so callers can pace (or skip pacing in tests).
pub fn with_retry<T>(
    policy: &RetryPolicy,
    mut sleep: impl FnMut(Duration),
    mut op: impl FnMut(u32) -> Attempt<T>,
) -> Result<T> {
    let mut attempt = 0u32;
    loop {
        match op(attempt) {
            Attempt::Done(v) => return Ok(v),
            Attempt::Fail(e) => return Err(e),
            Attempt::Retry(e) => {
                if attempt >= policy.retries {
                    return Err(e);
                }
                attempt += 1;
                logd!("Net: retry {attempt}/{} after {e}", policy.retries);
                sleep(policy.delay(attempt));
            }
        }
    }
}

pub struct HttpClient {
    agent: ureq::Agent,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn new(opts: &SourceOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(opts.timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent, policy: RetryPolicy::from_options(opts) }
    }

    pub fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        with_retry(&self.policy, thread::sleep, |_| self.attempt(url, query))
    }

    fn attempt(&self, url: &str, query: &[(&str, &str)]) -> Attempt<Value> {
        let mut req = self.agent.get(url).set("Accept-Language", ACCEPT_LANGUAGE);
        for (k, v) in query {
            req = req.query(k, v);
        }

        match req.call() {
            Ok(resp) => match resp.into_json::<Value>() {
                Ok(v) => Attempt::Done(v),
                Err(e) => Attempt::Fail(TrendError::Decode(e.to_string())),
            },
            Err(ureq::Error::Status(code, _)) => {
                let err = TrendError::Http(format!("status {code} for {url}"));
                if self.policy.retry_status(code) { Attempt::Retry(err) } else { Attempt::Fail(err) }
            }
            Err(ureq::Error::Transport(t)) => Attempt::Retry(TrendError::Http(t.to_string())),
        }
    }
}
