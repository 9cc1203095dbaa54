//! Metric descriptor and sample types shared by collectors and the renderer.

/// Ordered `(label name, label value)` pairs for one sample.
pub type LabelSet = Vec<(String, String)>;

/// Exposition type of a metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Static description of one metric family.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDesc {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    /// Label names known up front. Dynamic tag labels are not listed.
    pub label_names: Vec<String>,
}

impl MetricDesc {
    pub fn new(name: impl Into<String>, help: impl Into<String>, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            kind,
            label_names: Vec::new(),
        }
    }

    pub fn with_labels(mut self, names: &[&str]) -> Self {
        self.label_names = names.iter().map(|n| n.to_string()).collect();
        self
    }
}

/// One observed value of a family.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub labels: LabelSet,
    pub value: f64,
}

impl Sample {
    pub fn new(name: impl Into<String>, labels: LabelSet, value: f64) -> Self {
        Self {
            name: name.into(),
            labels,
            value,
        }
    }

    /// Value of the label `key`, if present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_label_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Join non-empty name parts with `_`.
pub fn fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fq_name_skips_empty_parts() {
        assert_eq!(fq_name("aws", "sqs", "total_scrapes"), "aws_sqs_total_scrapes");
        assert_eq!(fq_name("", "sqs", "x"), "sqs_x");
        assert_eq!(fq_name("aws", "", "x"), "aws_x");
    }

    #[test]
    fn sanitize_replaces_invalid_chars() {
        assert_eq!(sanitize_label_name("team"), "team");
        assert_eq!(sanitize_label_name("aws:cost-center"), "aws_cost_center");
        assert_eq!(sanitize_label_name("env.name"), "env_name");
    }
}
