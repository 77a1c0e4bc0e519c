/// Application-level constants
pub const APP_NAME: &str = "symptom-matcher";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag stamped on every emitted match record.
pub const ENGINE_VERSION: &str = "v3.2";

/// Environment variable holding a path to a JSON options file.
/// Read by the CLI when `--options` is not given.
pub const OPTIONS_ENV_VAR: &str = "SYMPTOM_MATCHER_OPTIONS";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "symptom_matcher_lib=debug,symptom_matcher=debug"
    } else {
        "symptom_matcher_lib=info,symptom_matcher=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_symptom_matcher() {
        assert_eq!(APP_NAME, "symptom-matcher");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.2");
    }

    #[test]
    fn engine_version_is_v3_2() {
        assert_eq!(ENGINE_VERSION, "v3.2");
    }

    #[test]
    fn default_filter_targets_this_crate() {
        assert!(default_log_filter().starts_with("symptom_matcher_lib="));
    }
}
