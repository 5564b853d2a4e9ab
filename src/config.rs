//! Build-time configuration
//!
//! The dashboard is shipped as static files, so everything configurable is
//! baked in at compile time through environment variables.

/// Backend base URL, e.g. `https://api.areatrans.es`. Unset means same origin.
const API_URL: Option<&str> = option_env!("AREATRANS_API_URL");

/// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
const LOG_LEVEL: Option<&str> = option_env!("AREATRANS_LOG");

pub fn api_base() -> &'static str {
    normalize_base(API_URL.unwrap_or(""))
}

/// Full URL for an absolute backend path such as `/api/login`.
pub fn api_url(path: &str) -> String {
    join(api_base(), path)
}

pub fn log_level() -> log::Level {
    parse_level(LOG_LEVEL.unwrap_or("info"))
}

fn normalize_base(raw: &str) -> &str {
    raw.trim().strip_suffix('/').unwrap_or(raw.trim())
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

fn parse_level(raw: &str) -> log::Level {
    raw.trim().parse().unwrap_or(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_strips_one_trailing_slash() {
        assert_eq!(normalize_base("https://x.es/"), "https://x.es");
        assert_eq!(normalize_base("https://x.es"), "https://x.es");
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("  /  "), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("https://x.es", "/api/login"), "https://x.es/api/login");
        assert_eq!(join("", "/api/login"), "/api/login");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), log::Level::Debug);
        assert_eq!(parse_level("WARN"), log::Level::Warn);
        assert_eq!(parse_level("nonsense"), log::Level::Info);
    }
}
