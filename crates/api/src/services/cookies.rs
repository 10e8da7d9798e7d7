//! Session cookie helper.
//!
//! The admin back office uses one httpOnly cookie carrying an opaque
//! session token. Sign-in sets it, sign-out clears it, and the admin route
//! gate only checks for its presence.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::SessionConfig;

#[derive(Debug, Clone)]
pub struct SessionCookies {
    config: SessionConfig,
}

impl SessionCookies {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Build the Set-Cookie value carrying a session token.
    pub fn build_session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly",
            self.config.cookie_name, token, self.config.max_age_secs
        );
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.config.same_site));
        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }
        cookie
    }

    /// Build the Set-Cookie value that clears the session cookie.
    pub fn build_clear_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly",
            self.config.cookie_name
        );
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.config.same_site));
        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }
        cookie
    }

    /// Add the session cookie to response headers.
    pub fn add_session_cookie(&self, headers: &mut HeaderMap, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.build_session_cookie(token)) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    /// Add the clearing cookie to response headers (sign-out).
    pub fn add_clear_cookie(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.build_clear_cookie()) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    /// Extract the session token from request headers, if present.
    pub fn extract_session<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|cookie_header| {
                cookie_header
                    .split(';')
                    .map(|s| s.trim())
                    .find_map(|cookie| {
                        let (name, value) = cookie.split_once('=')?;
                        (name == self.config.cookie_name).then_some(value)
                    })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            cookie_name: "cms_session".to_string(),
            secure: true,
            same_site: "Lax".to_string(),
            domain: String::new(),
            max_age_secs: 86400,
        }
    }

    #[test]
    fn session_cookie_carries_security_attributes() {
        let cookies = SessionCookies::new(test_config());
        let cookie = cookies.build_session_cookie("abc123");

        assert!(cookie.starts_with("cms_session=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookies = SessionCookies::new(test_config());
        let cookie = cookies.build_clear_cookie();

        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn secure_flag_is_optional() {
        let mut config = test_config();
        config.secure = false;
        let cookies = SessionCookies::new(config);
        assert!(!cookies.build_session_cookie("t").contains("Secure"));
    }

    #[test]
    fn domain_attribute_only_when_configured() {
        let mut config = test_config();
        config.domain = "example.org".to_string();
        let cookies = SessionCookies::new(config);
        assert!(cookies
            .build_session_cookie("t")
            .contains("Domain=example.org"));
    }

    #[test]
    fn extract_finds_session_among_other_cookies() {
        let cookies = SessionCookies::new(test_config());
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cms_session=tok123; lang=en"),
        );
        assert_eq!(cookies.extract_session(&headers), Some("tok123"));
    }

    #[test]
    fn extract_returns_none_without_cookie() {
        let cookies = SessionCookies::new(test_config());
        assert_eq!(cookies.extract_session(&HeaderMap::new()), None);
    }
}
