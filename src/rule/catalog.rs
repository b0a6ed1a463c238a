//! Catalog load and export.
//! The on-disk format is one record per line, ten `;`-delimited fields:
//! `name;type;match1;match2;required;result_ok;result_failed;info;url;fix`.
//! Field order is a compatibility contract with existing rule files.

use std::path::Path;
use tracing::debug;

use super::model::{CheckKind, RuleDefinition};
use crate::error::{AuditError, AuditResult};

pub const FIELD_SEPARATOR: char = ';';
const RECORD_FIELDS: usize = 10;

/// Ordered collection of rule definitions, evaluated in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCatalog {
    rules: Vec<RuleDefinition>,
}

impl RuleCatalog {
    /// Parse catalog text. The first malformed record aborts the whole
    /// load (no partial catalog); `#` lines are comments, blank lines are
    /// skipped. Rule names must be unique.
    pub fn parse(text: &str) -> AuditResult<Self> {
        let mut rules: Vec<RuleDefinition> = Vec::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let rule = Self::parse_record(line, line_no)?;
            if rules.iter().any(|r| r.name == rule.name) {
                return Err(AuditError::DuplicateRuleName(rule.name));
            }
            rules.push(rule);
        }

        debug!("catalog parsed, {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Load and parse a catalog file.
    pub async fn load(path: impl AsRef<Path>) -> AuditResult<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(&text)
    }

    fn parse_record(line: &str, line_no: usize) -> AuditResult<RuleDefinition> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != RECORD_FIELDS {
            return Err(AuditError::MalformedRuleRecord {
                line: line_no,
                found: fields.len(),
            });
        }

        let check = match fields[1] {
            "check_in_simple" => CheckKind::Presence {
                pattern: fields[2].to_string(),
            },
            "check_parameter" => CheckKind::Parameter {
                parameter: fields[2].to_string(),
                value: fields[3].to_string(),
            },
            "check_two_parameters" => CheckKind::TwoParameter {
                first: fields[2].to_string(),
                second: fields[3].to_string(),
            },
            other => {
                return Err(AuditError::UnknownStrategy {
                    strategy: other.to_string(),
                    line: line_no,
                });
            }
        };

        let required = match fields[4] {
            "yes" => true,
            "no" => false,
            other => {
                return Err(AuditError::InvalidRequiredFlag {
                    value: other.to_string(),
                    line: line_no,
                });
            }
        };

        Ok(RuleDefinition {
            name: fields[0].to_string(),
            check,
            required,
            ok_message: fields[5].to_string(),
            fail_message: fields[6].to_string(),
            info: fields[7].to_string(),
            reference_url: fields[8].to_string(),
            remediation: fields[9].trim_end().to_string(),
        })
    }

    /// Serialize the whole catalog, exact inverse of `parse`.
    /// A field value containing the separator (or a newline) is rejected
    /// rather than escaped, so anything this accepts round-trips.
    pub fn serialize(&self) -> AuditResult<String> {
        let mut out = String::new();
        for rule in &self.rules {
            let mut record: Vec<&str> = Vec::with_capacity(RECORD_FIELDS);
            for (field_name, value) in rule.fields() {
                if value.contains(FIELD_SEPARATOR) || value.contains('\n') {
                    return Err(AuditError::SeparatorInField {
                        rule: rule.name.clone(),
                        field: field_name,
                    });
                }
                record.push(value);
            }
            out.push_str(&record.join(";"));
            out.push('\n');
        }
        Ok(out)
    }

    /// Look up one rule by name; absence is a reported condition,
    /// not silence.
    pub fn describe(&self, name: &str) -> AuditResult<&RuleDefinition> {
        self.get(name)
            .ok_or_else(|| AuditError::UnknownRule(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# security checks
csc1_1;check_in_simple;ntp server;;yes;ntp configured;ntp missing;ntp must be set;https://example.net/ntp;configure ntp server
csc1_2;check_parameter;aaa authentication;group tacacs;yes;tacacs in use;tacacs missing;aaa must use tacacs;https://example.net/aaa;configure aaa group
csc1_3;check_two_parameters;feature ssh;no feature telnet;yes;ssh only;telnet enabled;ssh preferred over telnet;https://example.net/ssh;disable telnet
";

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let catalog = RuleCatalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_parse_maps_strategy_tokens_to_variants() {
        let catalog = RuleCatalog::parse(SAMPLE).unwrap();
        assert!(matches!(
            catalog.get("csc1_1").unwrap().check,
            CheckKind::Presence { .. }
        ));
        assert!(matches!(
            catalog.get("csc1_2").unwrap().check,
            CheckKind::Parameter { .. }
        ));
        assert!(matches!(
            catalog.get("csc1_3").unwrap().check,
            CheckKind::TwoParameter { .. }
        ));
    }

    #[test]
    fn test_parse_reports_malformed_record_line() {
        let text = "csc1_1;check_in_simple;ntp server;;yes;ok;bad;info;url;fix\nbroken;record\n";
        let err = RuleCatalog::parse(text).unwrap_err();
        match err {
            AuditError::MalformedRuleRecord { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        let text = "c1;check_magic;a;b;yes;ok;bad;info;url;fix\n";
        assert!(matches!(
            RuleCatalog::parse(text).unwrap_err(),
            AuditError::UnknownStrategy { ref strategy, line: 1 } if strategy == "check_magic"
        ));
    }

    #[test]
    fn test_parse_rejects_bad_required_flag() {
        let text = "c1;check_in_simple;a;;maybe;ok;bad;info;url;fix\n";
        assert!(matches!(
            RuleCatalog::parse(text).unwrap_err(),
            AuditError::InvalidRequiredFlag { line: 1, .. }
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        let text = "c1;check_in_simple;a;;yes;ok;bad;info;url;fix\n\
                    c1;check_in_simple;b;;no;ok;bad;info;url;fix\n";
        assert!(matches!(
            RuleCatalog::parse(text).unwrap_err(),
            AuditError::DuplicateRuleName(ref name) if name == "c1"
        ));
    }

    #[test]
    fn test_round_trip_preserves_rule_order_and_content() {
        let catalog = RuleCatalog::parse(SAMPLE).unwrap();
        let exported = catalog.serialize().unwrap();
        let reloaded = RuleCatalog::parse(&exported).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_serialize_rejects_separator_in_field() {
        let mut catalog = RuleCatalog::parse(SAMPLE).unwrap();
        catalog.rules[0].info = "broken; field".to_string();
        assert!(matches!(
            catalog.serialize().unwrap_err(),
            AuditError::SeparatorInField { ref rule, field: "info" } if rule == "csc1_1"
        ));
    }

    #[test]
    fn test_describe_unknown_rule_is_an_error() {
        let catalog = RuleCatalog::parse(SAMPLE).unwrap();
        assert!(matches!(
            catalog.describe("nope").unwrap_err(),
            AuditError::UnknownRule(ref name) if name == "nope"
        ));
        assert_eq!(catalog.describe("csc1_2").unwrap().name, "csc1_2");
    }
}
