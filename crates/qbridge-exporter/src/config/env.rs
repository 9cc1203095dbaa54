//! Environment overrides. They take precedence over flags and the config file.
//!
//! A variable only applies when it is set and non-empty. `INTERVAL` values
//! that are not integers are ignored, and `TAGS` can only turn tag labels off.

use super::schema::ExporterConfig;

pub const ENV_LISTEN: &str = "LISTEN";
pub const ENV_METRICS_PATH: &str = "METRICS_PATH";
pub const ENV_PREFIX: &str = "PREFIX";
pub const ENV_FILTER: &str = "FILTER";
pub const ENV_INTERVAL: &str = "INTERVAL";
pub const ENV_TAGS: &str = "TAGS";

/// Apply overrides from the process environment.
pub fn apply_process_env(cfg: &mut ExporterConfig) {
    apply_env(cfg, |key| std::env::var(key).ok());
}

/// Apply overrides resolved through `lookup`.
pub fn apply_env<F>(cfg: &mut ExporterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get(ENV_LISTEN) {
        cfg.listen = v;
    }
    if let Some(v) = get(ENV_METRICS_PATH) {
        cfg.metrics_path = v;
    }
    if let Some(v) = get(ENV_PREFIX) {
        cfg.prefix = v;
    }
    if let Some(v) = get(ENV_FILTER) {
        cfg.filter = v;
    }
    if let Some(v) = get(ENV_INTERVAL) {
        match v.parse::<u64>() {
            Ok(secs) => cfg.interval_secs = secs,
            Err(e) => tracing::warn!(value = %v, error = %e, "ignoring non-integer INTERVAL"),
        }
    }
    if let Some(v) = get(ENV_TAGS) {
        if v.eq_ignore_ascii_case("false") {
            cfg.tags_as_labels = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn apply(vars: &[(&str, &str)]) -> ExporterConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut cfg = ExporterConfig::default();
        apply_env(&mut cfg, |k| vars.get(k).cloned());
        cfg
    }

    #[test]
    fn set_variables_override() {
        let cfg = apply(&[("PREFIX", "orders-"), ("FILTER", "^orders-[ab]$"), ("INTERVAL", "30")]);
        assert_eq!(cfg.prefix, "orders-");
        assert_eq!(cfg.filter, "^orders-[ab]$");
        assert_eq!(cfg.interval_secs, 30);
    }

    #[test]
    fn empty_variables_are_ignored() {
        let cfg = apply(&[("PREFIX", ""), ("FILTER", "")]);
        assert_eq!(cfg.prefix, "");
        assert_eq!(cfg.filter, ".*");
    }

    #[test]
    fn bad_interval_keeps_previous_value() {
        let cfg = apply(&[("INTERVAL", "ten")]);
        assert_eq!(cfg.interval_secs, 600);
    }

    #[test]
    fn tags_can_only_be_disabled() {
        assert!(!apply(&[("TAGS", "FALSE")]).tags_as_labels);
        assert!(apply(&[("TAGS", "no")]).tags_as_labels);

        let mut cfg = ExporterConfig::default();
        cfg.tags_as_labels = false;
        apply_env(&mut cfg, |k| (k == "TAGS").then(|| "true".to_string()));
        assert!(!cfg.tags_as_labels);
    }
}
