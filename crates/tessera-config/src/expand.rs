//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` (errors when unset) and `${VAR:-default}`.

use crate::ConfigError;

/// Expand `${VAR}` / `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let Some(end) = tail.find('}') else {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: "unterminated ${ reference".to_owned(),
            });
        };

        let reference = &tail[..end];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };

        match std::env::var(name) {
            Ok(resolved) => out.push_str(&resolved),
            Err(_) => match default {
                Some(default) => out.push_str(default),
                None => {
                    return Err(ConfigError::EnvVar {
                        field: field.to_owned(),
                        message: format!("${{{name}}} not set"),
                    });
                }
            },
        }

        rest = &tail[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }

    #[test]
    fn test_expands_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TESSERA_EXPAND_TEST", "value");
        }

        assert_eq!(
            expand_env("${TESSERA_EXPAND_TEST}", "f").unwrap(),
            "value"
        );

        unsafe {
            std::env::remove_var("TESSERA_EXPAND_TEST");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TESSERA_EXPAND_MISSING");
        }

        assert_eq!(
            expand_env("${TESSERA_EXPAND_MISSING:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_missing_required_var_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TESSERA_EXPAND_MISSING2");
        }

        let err = expand_env("${TESSERA_EXPAND_MISSING2}", "auth.secret").unwrap_err();

        assert!(err.to_string().contains("TESSERA_EXPAND_MISSING2"));
        assert!(err.to_string().contains("auth.secret"));
    }

    #[test]
    fn test_unterminated_reference_errors() {
        assert!(expand_env("${OOPS", "f").is_err());
    }

    #[test]
    fn test_mixed_literal_and_reference() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TESSERA_EXPAND_HOST", "example.com");
        }

        assert_eq!(
            expand_env("www.${TESSERA_EXPAND_HOST}:443", "f").unwrap(),
            "www.example.com:443"
        );

        unsafe {
            std::env::remove_var("TESSERA_EXPAND_HOST");
        }
    }
}
