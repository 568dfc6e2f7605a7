use crate::names::SESSION_MAX_AGE_SECS;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> String {
    if secure {
        format!("{name}={value}; HttpOnly; Max-Age={SESSION_MAX_AGE_SECS}; Secure; Path=/; SameSite=Strict")
    } else {
        format!("{name}={value}; HttpOnly; Max-Age={SESSION_MAX_AGE_SECS}; Path=/; SameSite=Strict")
    }
}
