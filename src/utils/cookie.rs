//! 令牌 cookie 的写入与清除
//!
use crate::config::app_config::CookieConfig;
use axum_extra::extract::cookie::{Cookie, SameSite};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

fn token_cookie(name: &'static str, token: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((name, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure)
        .max_age(time::Duration::seconds(config.max_age_secs))
        .build()
}

pub fn access_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    token_cookie(ACCESS_TOKEN_COOKIE, token, config)
}

pub fn refresh_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    token_cookie(REFRESH_TOKEN_COOKIE, token, config)
}

/// 用于 `CookieJar::remove`，路径需与写入时一致
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cookie_attributes() {
        let config = CookieConfig {
            secure: false,
            max_age_secs: 60,
        };
        let cookie = access_cookie("abc".to_string(), &config);
        assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_ne!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
    }

    #[test]
    fn production_cookie_is_secure() {
        let config = CookieConfig {
            secure: true,
            max_age_secs: 60,
        };
        let cookie = refresh_cookie("xyz".to_string(), &config);
        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.secure(), Some(true));
    }
}
