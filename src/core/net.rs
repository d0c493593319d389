// src/core/net.rs
// Blocking HTTPS GET that keeps retrying until the server answers 200.
// The digital library throttles bursts with 429/503, so a pause-and-retry
// loop is the normal path, not an exceptional one.

use std::{thread, time::Duration};

use log::{debug, warn};
use reqwest::{StatusCode, blocking::Client};

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub struct Fetcher {
    client: Client,
    pause: Duration,
    max_attempts: u32,
}

impl Fetcher {
    pub fn new(pause: Duration, max_attempts: u32) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, pause, max_attempts: max_attempts.max(1) })
    }

    /// GET `url`, retrying on any non-200 status or transport error.
    pub fn get_text(&self, url: &str) -> Result<String> {
        match self.get_inner(url, false)? {
            Some(body) => Ok(body),
            None => Err(Error::Http { url: url.to_string(), status: StatusCode::NOT_FOUND.as_u16() }),
        }
    }

    /// Like `get_text`, but a 404 is answered immediately with `None`
    /// so the caller can try another URL form.
    pub fn get_text_or_missing(&self, url: &str) -> Result<Option<String>> {
        self.get_inner(url, true)
    }

    fn get_inner(&self, url: &str, missing_ok: bool) -> Result<Option<String>> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let last = attempt >= self.max_attempts;

            match self.client.get(url).send() {
                Ok(resp) if resp.status() == StatusCode::OK => {
                    let bytes = resp.bytes()?;
                    debug!("GET {url}: {} bytes", bytes.len());
                    let body = String::from_utf8(bytes.to_vec())
                        .map_err(|e| Error::Encoding { url: url.to_string(), source: e.utf8_error() })?;
                    return Ok(Some(body));
                }
                Ok(resp) if missing_ok && resp.status() == StatusCode::NOT_FOUND => {
                    return Ok(None);
                }
                Ok(resp) => {
                    let status = resp.status();
                    if last {
                        return Err(Error::Http { url: url.to_string(), status: status.as_u16() });
                    }
                    warn!("Response: Status: {status}. Trying again ({attempt}/{})...", self.max_attempts);
                }
                Err(e) => {
                    if last {
                        return Err(e.into());
                    }
                    warn!("Request to {url} failed: {e}. Trying again ({attempt}/{})...", self.max_attempts);
                }
            }
            thread::sleep(self.pause);
        }
    }
}
