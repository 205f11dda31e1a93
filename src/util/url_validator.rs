use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Reasons an article image URL is refused.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL points to a private/internal IP address.
    #[error("Private IP address not allowed: {0}")]
    PrivateIp(String),
    /// The URL points to localhost.
    #[error("Localhost not allowed")]
    Localhost,
}

/// Validates an image URL taken from article data.
///
/// Images are loaded by whatever renders the page, so a data file must not be
/// able to point them at local files or internal hosts. Rejects:
/// - non-HTTP(S) schemes (`file://`, `data:`, `javascript:`)
/// - localhost (`localhost`, `127.0.0.1`, `::1`)
/// - private, link-local and unspecified addresses
///
/// # Examples
///
/// ```
/// use newsdesk::util::validate_image_url;
///
/// let url = validate_image_url("https://images.unsplash.com/photo-1?w=800").unwrap();
/// assert_eq!(url.host_str(), Some("images.unsplash.com"));
///
/// assert!(validate_image_url("file:///etc/passwd").is_err());
/// assert!(validate_image_url("http://192.168.1.1/a.png").is_err());
/// ```
pub fn validate_image_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if let Some(host) = url.host_str() {
        if host.eq_ignore_ascii_case("localhost") {
            return Err(UrlValidationError::Localhost);
        }

        let host_for_parse = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        if let Ok(ip) = host_for_parse.parse::<IpAddr>() {
            if ip.is_loopback() {
                return Err(UrlValidationError::Localhost);
            }
            if is_private_ip(&ip) {
                return Err(UrlValidationError::PrivateIp(ip.to_string()));
            }
        }
    }

    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private() || ipv4.is_loopback() || ipv4.is_link_local() || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            if ipv6.is_loopback() || ipv6.is_unspecified() {
                return true;
            }
            let segments = ipv6.segments();
            // fc00::/7
            let is_unique_local = (segments[0] & 0xfe00) == 0xfc00;
            // fe80::/10
            let is_link_local = (segments[0] & 0xffc0) == 0xfe80;
            is_unique_local || is_link_local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsplash_urls_accepted() {
        assert!(validate_image_url(
            "https://images.unsplash.com/photo-1531482615713-2afd69097998?w=800&h=400&fit=crop"
        )
        .is_ok());
        assert!(validate_image_url("http://cdn.example.org/a.jpg").is_ok());
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        assert!(matches!(
            validate_image_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_image_url("javascript:alert(1)").is_err());
        assert!(validate_image_url("data:image/png;base64,AAAA").is_err());
    }

    #[test]
    fn test_relative_path_rejected() {
        assert!(matches!(
            validate_image_url("images/photo.jpg"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_localhost_rejected() {
        assert!(matches!(
            validate_image_url("http://localhost/a.png"),
            Err(UrlValidationError::Localhost)
        ));
        assert!(validate_image_url("http://127.0.0.1/a.png").is_err());
        assert!(validate_image_url("http://[::1]/a.png").is_err());
    }

    #[test]
    fn test_private_and_link_local_rejected() {
        assert!(validate_image_url("http://10.0.0.1/a.png").is_err());
        assert!(validate_image_url("http://172.16.0.1:8080/a.png").is_err());
        assert!(validate_image_url("http://169.254.1.1/a.png").is_err());
        assert!(validate_image_url("http://[fe80::1]/a.png").is_err());
        assert!(validate_image_url("http://0.0.0.0/a.png").is_err());
    }
}
