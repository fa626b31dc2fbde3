//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// - `${VAR}` expands to the value of VAR, errors if unset
/// - `${VAR:-default}` expands to VAR if set, otherwise uses default
///
/// Strings without `${` are returned unchanged, so a bare `$` in a value
/// is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FW_TEST_EXPAND_ROOT", "/srv/wiki");
        }
        let result = expand_env("${FW_TEST_EXPAND_ROOT}/data", "wiki.root_dir").unwrap();
        assert_eq!(result, "/srv/wiki/data");
        unsafe {
            std::env::remove_var("FW_TEST_EXPAND_ROOT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FW_TEST_EXPAND_UNSET");
        }
        let result = expand_env("${FW_TEST_EXPAND_UNSET:-data}", "wiki.root_dir").unwrap();
        assert_eq!(result, "data");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FW_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${FW_TEST_EXPAND_MISSING}", "comments.admins").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FW_TEST_EXPAND_MISSING"));
        assert!(err.to_string().contains("comments.admins"));
    }

    #[test]
    fn test_literals_unchanged() {
        assert_eq!(expand_env("data", "f").unwrap(), "data");
        assert_eq!(expand_env("$HOME/data", "f").unwrap(), "$HOME/data");
    }
}
