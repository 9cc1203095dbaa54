#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use clap::Parser;

use qbridge_exporter::config::{self, Cli, ExporterConfig};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
interval_secs: 60
upstream:
  regoin: "eu-west-1" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn ok_empty_config_uses_defaults() {
    let cfg = config::load_from_str("{}").expect("must parse");
    assert_eq!(cfg.listen, "0.0.0.0:9108");
    assert_eq!(cfg.metrics_path, "/metrics");
    assert_eq!(cfg.interval_secs, 600);
    assert!(cfg.tags_as_labels);
    assert_eq!(cfg.prefix, "");
    assert_eq!(cfg.filter, ".*");
    assert!(cfg.upstream.region.is_none());
}

#[test]
fn ok_full_config() {
    let ok = r#"
listen: "127.0.0.1:9200"
metrics_path: /scrape
interval_secs: 30
tags_as_labels: false
prefix: orders-
filter: "^orders-(a|b)$"
scrape_concurrency: 8
upstream:
  region: eu-west-1
  endpoint_url: http://localhost:4566
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.interval().as_secs(), 30);
    assert!(!cfg.tags_as_labels);
    assert!(cfg.compile_filter().unwrap().is_match("orders-a"));
    assert_eq!(cfg.upstream.endpoint_url.as_deref(), Some("http://localhost:4566"));
}

#[test]
fn invalid_filter_is_reported() {
    let err = config::load_from_str("filter: \"(unclosed\"\n").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "INVALID_FILTER");
}

#[test]
fn out_of_range_values_fail_validation() {
    for bad in [
        "interval_secs: 0\n",
        "interval_secs: 18446744073709551615\n",
        "metrics_path: \"/m\\\"><script>\"\n",
        "metrics_path: /a b\n",
        "metrics_path: /:id\n",
        "metrics_path: metrics\n",
        "metrics_path: /\n",
        "scrape_concurrency: 0\n",
        "listen: \"not-an-addr\"\n",
        "upstream:\n  endpoint_url: localhost:4566\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.kind().as_str(), "CONFIG", "input={bad}");
    }
}

#[test]
fn explicit_flags_override_file_values() {
    let mut cfg = config::load_from_str("prefix: from-file-\ninterval_secs: 30\n").unwrap();
    let cli = Cli::try_parse_from([
        "qbridge-exporter",
        "--prefix",
        "orders-",
        "--tags=false",
        "--path",
        "/m",
    ])
    .unwrap();

    cli.apply(&mut cfg);

    assert_eq!(cfg.prefix, "orders-");
    assert!(!cfg.tags_as_labels);
    assert_eq!(cfg.metrics_path, "/m");
    assert_eq!(cfg.interval_secs, 30);
}

#[test]
fn absent_flags_leave_defaults_alone() {
    let mut cfg = ExporterConfig::default();
    Cli::try_parse_from(["qbridge-exporter"]).unwrap().apply(&mut cfg);
    assert_eq!(cfg.filter, ".*");
    assert_eq!(cfg.interval_secs, 600);
}

#[test]
fn env_overrides_flags() {
    let mut cfg = ExporterConfig::default();
    Cli::try_parse_from(["qbridge-exporter", "--filter", "^a$", "--interval", "5"])
        .unwrap()
        .apply(&mut cfg);

    config::env::apply_env(&mut cfg, |k| match k {
        "FILTER" => Some("^b$".to_string()),
        "INTERVAL" => Some("90".to_string()),
        _ => None,
    });

    assert_eq!(cfg.filter, "^b$");
    assert_eq!(cfg.interval_secs, 90);
}

#[test]
fn env_interval_beyond_limit_fails_validation() {
    let mut cfg = ExporterConfig::default();
    config::env::apply_env(&mut cfg, |k| (k == "INTERVAL").then(|| u64::MAX.to_string()));
    assert_eq!(cfg.interval_secs, u64::MAX);

    let err = cfg.validate().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");

    cfg.interval_secs = config::MAX_INTERVAL_SECS;
    cfg.validate().expect("upper bound is inclusive");
}

#[test]
fn bare_tags_flag_means_true() {
    let mut cfg = ExporterConfig::default();
    cfg.tags_as_labels = false;
    Cli::try_parse_from(["qbridge-exporter", "--tags"]).unwrap().apply(&mut cfg);
    assert!(cfg.tags_as_labels);

    Cli::try_parse_from(["qbridge-exporter", "--tags", "false"]).unwrap().apply(&mut cfg);
    assert!(!cfg.tags_as_labels);
}
