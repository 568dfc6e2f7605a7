use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::SET_COOKIE, request::Parts, HeaderMap, HeaderValue},
};
use axum_extra::extract::CookieJar;
use ulid::Ulid;

use crate::{
    names,
    rejections::{AppError, ResultExt},
    utils,
};

/// Extracts whether the request is an HTMX request by checking the `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .and_then(|v: &HeaderValue| v.to_str().ok())
            .is_some_and(|v| v == "true");
        Ok(IsHtmx(is_htmx))
    }
}

/// The practice session token from the `review_session` cookie. A fresh token
/// is minted when the cookie is missing.
pub struct SessionToken {
    pub token: String,
    pub is_new: bool,
}

impl SessionToken {
    /// `Set-Cookie` headers that (re)issue the session cookie.
    pub fn headers(&self, secure: bool) -> Result<HeaderMap, AppError> {
        let cookie = utils::cookie(names::REVIEW_SESSION_COOKIE_NAME, &self.token, secure);
        let mut headers = HeaderMap::new();
        headers.insert(
            SET_COOKIE,
            HeaderValue::from_str(&cookie).reject("could not build session cookie")?,
        );
        Ok(headers)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let existing = jar
            .get(names::REVIEW_SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty());

        Ok(match existing {
            Some(token) => SessionToken {
                token,
                is_new: false,
            },
            None => SessionToken {
                token: Ulid::new().to_string(),
                is_new: true,
            },
        })
    }
}
