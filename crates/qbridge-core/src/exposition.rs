//! Prometheus text exposition (format 0.0.4).
//!
//! Families are rendered in descriptor order, each with one `# HELP` and
//! `# TYPE` header followed by its samples in emission order. A family with no
//! samples still gets its header.

use std::fmt::Write;

use crate::metric::{MetricDesc, Sample};

/// Content type of the rendered payload.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a sample value the way Prometheus parsers expect.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{v}")
    }
}

fn render_sample(sample: &Sample, out: &mut String) {
    if sample.labels.is_empty() {
        let _ = writeln!(out, "{} {}", sample.name, format_value(sample.value));
        return;
    }
    let label_str = sample
        .labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = writeln!(out, "{}{{{}}} {}", sample.name, label_str, format_value(sample.value));
}

/// Render one family into `out`.
pub fn render_family<'a>(
    desc: &MetricDesc,
    samples: impl IntoIterator<Item = &'a Sample>,
    out: &mut String,
) {
    let _ = writeln!(out, "# HELP {} {}", desc.name, escape_help(&desc.help));
    let _ = writeln!(out, "# TYPE {} {}", desc.name, desc.kind.as_str());
    for s in samples {
        render_sample(s, out);
    }
}

/// Render every described family, picking its samples out of `samples`.
/// Samples whose name matches no descriptor are dropped with a warning.
pub fn render(descs: &[MetricDesc], samples: &[Sample]) -> String {
    let mut out = String::new();
    for desc in descs {
        render_family(desc, samples.iter().filter(|s| s.name == desc.name), &mut out);
    }

    let orphans = samples
        .iter()
        .filter(|s| !descs.iter().any(|d| d.name == s.name))
        .count();
    if orphans > 0 {
        tracing::warn!(count = orphans, "dropping samples without a descriptor");
    }
    out
}
