use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::ServerConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

fn auth_cookie(
    name: &'static str,
    value: String,
    max_age: time::Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Add both auth cookies with lifetimes matching the token expiries.
pub fn set_auth_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
    config: &ServerConfig,
) -> CookieJar {
    let access = auth_cookie(
        ACCESS_TOKEN_COOKIE,
        access_token,
        time::Duration::minutes(config.jwt.access_token_expiry_mins),
        config.cookie_secure,
    );
    let refresh = auth_cookie(
        REFRESH_TOKEN_COOKIE,
        refresh_token,
        time::Duration::days(config.jwt.refresh_token_expiry_days),
        config.cookie_secure,
    );
    jar.add(access).add(refresh)
}

/// Expire both auth cookies on the client.
pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"))
}
