//! Session cookie carrier: one cookie, one name, both directions.
//!
//! The login route sets the cookie and the guard reads it back, so the name
//! lives here and nowhere else.

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

use super::state::AuthConfig;

/// Name of the session cookie, shared by login, logout and the guard.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Build the `Set-Cookie` value carrying a freshly minted session token.
///
/// `SameSite=Strict` plus `HttpOnly`; `Secure` only when the deployment
/// says it is served over HTTPS.
///
/// # Errors
/// Returns an error if the token contains bytes invalid in a header value.
pub fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={ttl_seconds}"
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the `Set-Cookie` value that clears the session cookie.
///
/// # Errors
/// Returns an error if the rendered value is not a valid header value.
pub fn clear_session_cookie(
    config: &AuthConfig,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Read the session token from the request's `Cookie` header, if present.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        // Nameless members ("flag; token=<jwt>") are legal; skip them
        // instead of giving up on the rest of the header.
        let Some((key, val)) = pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::state::AuthConfig;
    use secrecy::SecretString;

    fn config(secure: bool) -> AuthConfig {
        AuthConfig::new(
            SecretString::from("secret"),
            604_800,
            secure,
            "/dashboard".to_string(),
        )
    }

    #[test]
    fn session_cookie_attributes() {
        let value = session_cookie(&config(false), "abc.def.ghi").unwrap();
        let rendered = value.to_str().unwrap();
        assert_eq!(
            rendered,
            "token=abc.def.ghi; Path=/; HttpOnly; SameSite=Strict; Max-Age=604800"
        );
    }

    #[test]
    fn secure_flag_only_in_production() {
        let value = session_cookie(&config(true), "abc").unwrap();
        assert!(value.to_str().unwrap().ends_with("; Secure"));

        let value = session_cookie(&config(false), "abc").unwrap();
        assert!(!value.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn clear_cookie_zeroes_max_age() {
        let value = clear_session_cookie(&config(false)).unwrap();
        let rendered = value.to_str().unwrap();
        assert!(rendered.starts_with("token=;"));
        assert!(rendered.contains("Max-Age=0"));
    }

    #[test]
    fn extract_finds_the_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def; locale=pt-BR"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc.def".to_string()));
    }

    #[test]
    fn extract_without_cookie_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn extract_skips_nameless_pairs_before_the_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("flag; token=abc.def"));
        assert_eq!(extract_session_token(&headers), Some("abc.def".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("flag; theme=dark; token=abc.def; other"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc.def".to_string()));
    }

    #[test]
    fn extract_ignores_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=abc; theme=dark"));
        assert_eq!(extract_session_token(&headers), None);
    }
}
