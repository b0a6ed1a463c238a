//! Rule data model.
//! Pure rule data, no matching logic; patterns stay uncompiled strings here.

use std::fmt;

/// Check strategy with the patterns it actually uses.
/// The serialized record always carries two pattern fields; `Presence`
/// ignores the second one on load and writes it back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    /// Pass/fail on whether any line matches `pattern`.
    Presence { pattern: String },
    /// `parameter` selects a line, `value` must then match the same line.
    Parameter { parameter: String, value: String },
    /// `first` and `second` are counted independently over all lines.
    TwoParameter { first: String, second: String },
}

impl CheckKind {
    /// Record token identifying this strategy in the catalog format.
    pub fn strategy_token(&self) -> &'static str {
        match self {
            CheckKind::Presence { .. } => "check_in_simple",
            CheckKind::Parameter { .. } => "check_parameter",
            CheckKind::TwoParameter { .. } => "check_two_parameters",
        }
    }

    /// Human-readable strategy label for report headers.
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Presence { .. } => "simple check",
            CheckKind::Parameter { .. } => "parameter check",
            CheckKind::TwoParameter { .. } => "two parameters check",
        }
    }

    /// Serialized pattern fields `(pattern1, pattern2)`.
    pub fn pattern_fields(&self) -> (&str, &str) {
        match self {
            CheckKind::Presence { pattern } => (pattern, ""),
            CheckKind::Parameter { parameter, value } => (parameter, value),
            CheckKind::TwoParameter { first, second } => (first, second),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One compliance check definition.
/// Constructed at catalog load, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub name: String,
    pub check: CheckKind,
    /// Whether the match (or match pair) must be present (`true`)
    /// or absent (`false`) for the rule to pass.
    pub required: bool,
    pub ok_message: String,
    pub fail_message: String,
    pub info: String,
    pub reference_url: String,
    pub remediation: String,
}

impl RuleDefinition {
    /// Ordered `(field name, value)` pairs, matching the record layout.
    /// Used by describe output and by serialization.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        let (pattern1, pattern2) = self.check.pattern_fields();
        [
            ("check_name", &self.name),
            ("check_type", self.check.strategy_token()),
            ("match1", pattern1),
            ("match2", pattern2),
            ("required", if self.required { "yes" } else { "no" }),
            ("result_ok", &self.ok_message),
            ("result_failed", &self.fail_message),
            ("info", &self.info),
            ("url", &self.reference_url),
            ("fix", &self.remediation),
        ]
    }
}
