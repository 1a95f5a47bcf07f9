use crate::ConfigError;
use std::env;

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a variable from the environment
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Load a variable from the environment
pub fn load_u64(key: &str) -> Result<u64, ConfigError> {
    let val = load_string(key)?;
    val.trim().parse::<u64>().map_err(|e| ConfigError::parse(key, e))
}

/// Load an optional variable from the environment. A present but malformed
/// value is an error.
pub fn load_u64_opt(key: &str) -> Result<Option<u64>, ConfigError> {
    load_string_opt(key)
        .map(|val| val.trim().parse::<u64>().map_err(|e| ConfigError::parse(key, e)))
        .transpose()
}

/// Load a comma-separated list from the environment. Blank entries are
/// dropped.
pub fn load_list_opt(key: &str) -> Option<Vec<String>> {
    let val = load_string_opt(key)?;
    Some(val.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_vars() {
        let key = "RELAY_TYPES_TEST_DEFINITELY_UNSET";
        assert!(matches!(load_string(key), Err(ConfigError::Var(k)) if k == key));
        assert!(load_string_opt(key).is_none());
        assert!(matches!(load_u64_opt(key), Ok(None)));
        assert!(load_list_opt(key).is_none());
    }

    #[test]
    fn parse_vars() {
        env::set_var("RELAY_TYPES_TEST_U64", " 42 ");
        assert_eq!(load_u64("RELAY_TYPES_TEST_U64").unwrap(), 42);

        env::set_var("RELAY_TYPES_TEST_BAD_U64", "forty-two");
        assert!(matches!(
            load_u64_opt("RELAY_TYPES_TEST_BAD_U64"),
            Err(ConfigError::Parse { .. })
        ));

        env::set_var("RELAY_TYPES_TEST_LIST", "X-A, ,X-B,");
        assert_eq!(
            load_list_opt("RELAY_TYPES_TEST_LIST").unwrap(),
            vec!["X-A".to_string(), "X-B".to_string()]
        );
    }
}
