use crate::ProviderError;
use std::io::Read;

/// `User-Agent` sent with every manifest request.
pub const USER_AGENT: &str = concat!("modcat/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client shared by both manifest providers.
pub struct HttpFetcher {
    agent: ureq::Agent,
    auth_token: Option<String>,
}

impl HttpFetcher {
    pub fn new(auth_token: Option<String>) -> Self {
        let agent = ureq::Agent::new_with_defaults();
        Self { agent, auth_token }
    }

    /// GET `url` and return the full body. 404 maps to `NotFound`, any other
    /// status of 400 and above to `Http`.
    pub fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        tracing::debug!("GET {url}");
        let mut req = self.agent.get(url).header("User-Agent", USER_AGENT);
        if let Some(ref token) = self.auth_token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = match req.call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(404)) => {
                return Err(ProviderError::NotFound(url.to_owned()));
            }
            Err(ureq::Error::StatusCode(code)) => {
                return Err(ProviderError::Http(format!("HTTP {code} for {url}")));
            }
            Err(e) => {
                return Err(ProviderError::Http(e.to_string()));
            }
        };

        let code = resp.status().as_u16();
        if code == 404 {
            return Err(ProviderError::NotFound(url.to_owned()));
        }
        if code >= 400 {
            return Err(ProviderError::Http(format!("HTTP {code} for {url}")));
        }

        let mut reader = resp.into_body().into_reader();
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| ProviderError::Http(e.to_string()))?;
        tracing::trace!("GET {url} returned {} bytes", body.len());
        Ok(body)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}
