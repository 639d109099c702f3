use thiserror::Error;
use url::Url;

/// Fixed path of the push channel on the page's host.
pub const PUSH_PATH: &str = "/ws/progress";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("unsupported page scheme {0:?}")]
    UnsupportedScheme(String),
    #[error("page url has no host")]
    MissingHost,
    #[error("invalid url: {0}")]
    Invalid(String),
}

pub fn parse_base_url(raw: &str) -> Result<Url, EndpointError> {
    let url = Url::parse(raw.trim()).map_err(|err| EndpointError::Invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().is_none() {
        return Err(EndpointError::MissingHost);
    }
    Ok(url)
}

/// Push channel endpoint for a page origin: `wss` under `https`, `ws`
/// otherwise, same authority, [`PUSH_PATH`].
pub fn push_endpoint(page: &Url) -> Result<Url, EndpointError> {
    let scheme = match page.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    };
    let host = page.host_str().ok_or(EndpointError::MissingHost)?;
    let authority = match page.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Url::parse(&format!("{scheme}://{authority}{PUSH_PATH}"))
        .map_err(|err| EndpointError::Invalid(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_follows_transport_security() {
        let plain = push_endpoint(&Url::parse("http://localhost:8000/index.html").unwrap()).unwrap();
        assert_eq!(plain.as_str(), "ws://localhost:8000/ws/progress");

        let secure = push_endpoint(&Url::parse("https://hub.example.com/app?x=1").unwrap()).unwrap();
        assert_eq!(secure.as_str(), "wss://hub.example.com/ws/progress");
    }

    #[test]
    fn ipv6_host_keeps_brackets() {
        let url = push_endpoint(&Url::parse("http://[::1]:9000/").unwrap()).unwrap();
        assert_eq!(url.as_str(), "ws://[::1]:9000/ws/progress");
    }

    #[test]
    fn non_http_pages_are_rejected() {
        assert_eq!(
            parse_base_url("ftp://example.com"),
            Err(EndpointError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(parse_base_url("not a url"), Err(EndpointError::Invalid(_))));
    }
}
