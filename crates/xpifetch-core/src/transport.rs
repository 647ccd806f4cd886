//! Blocking HTTP transport.
//!
//! One curl easy handle is reused for every request of a session, so the
//! catalog query and the package download can share a kept-alive connection.
//! The handle is not shared across threads; callers hold it by `&mut`.

use std::time::Duration;
use thiserror::Error;

/// Why a GET did not produce a body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
}

/// Minimal HTTP capability needed by the fetch paths.
pub trait Transport {
    /// Performs a GET and returns the full response body on a 2xx status.
    fn get(&mut self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Transport-level knobs. The core imposes no timeout on its own; these are
/// only set when the caller asks for them.
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    pub user_agent: Option<String>,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

/// libcurl-backed transport. Follows redirects (AMO download links redirect
/// to a CDN).
pub struct CurlTransport {
    easy: curl::easy::Easy,
}

impl CurlTransport {
    pub fn new(options: &CurlOptions) -> Result<Self, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if let Some(ua) = &options.user_agent {
            easy.useragent(ua)?;
        }
        if let Some(t) = options.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = options.timeout {
            easy.timeout(t)?;
        }
        Ok(CurlTransport { easy })
    }
}

impl Transport for CurlTransport {
    fn get(&mut self, url: &str) -> Result<Vec<u8>, TransportError> {
        let mut body = Vec::new();
        self.easy.url(url)?;
        self.easy.get(true)?;

        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = self.easy.response_code()?;
        if !(200..300).contains(&status) {
            tracing::debug!(url, status, "GET rejected");
            return Err(TransportError::Http {
                url: url.to_string(),
                status,
            });
        }

        tracing::debug!(url, status, bytes = body.len(), "GET complete");
        Ok(body)
    }
}
