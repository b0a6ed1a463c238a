//! Compiled rule model.
//! Patterns are compiled once per run, before any source is scanned.

use regex::Regex;

use crate::error::{AuditError, AuditResult};
use crate::rule::model::{CheckKind, RuleDefinition};

/// Check strategy after regex compilation.
#[derive(Debug, Clone)]
pub enum CompiledCheck {
    Presence { pattern: Regex },
    Parameter { parameter: Regex, value: Regex },
    TwoParameter { first: Regex, second: Regex },
}

/// One rule ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub check: CompiledCheck,
    pub required: bool,
    pub ok_message: String,
    pub fail_message: String,
}

impl CompiledRule {
    /// Compile one definition; a bad pattern fails with the rule name
    /// attached.
    pub fn compile(rule: &RuleDefinition) -> AuditResult<Self> {
        let check = match &rule.check {
            CheckKind::Presence { pattern } => CompiledCheck::Presence {
                pattern: compile_pattern(&rule.name, pattern)?,
            },
            CheckKind::Parameter { parameter, value } => CompiledCheck::Parameter {
                parameter: compile_pattern(&rule.name, parameter)?,
                value: compile_pattern(&rule.name, value)?,
            },
            CheckKind::TwoParameter { first, second } => CompiledCheck::TwoParameter {
                first: compile_pattern(&rule.name, first)?,
                second: compile_pattern(&rule.name, second)?,
            },
        };

        Ok(Self {
            name: rule.name.clone(),
            check,
            required: rule.required,
            ok_message: rule.ok_message.clone(),
            fail_message: rule.fail_message.clone(),
        })
    }
}

fn compile_pattern(rule: &str, pattern: &str) -> AuditResult<Regex> {
    Regex::new(pattern).map_err(|source| AuditError::RegexCompile {
        rule: rule.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::model::CheckKind;

    fn definition(check: CheckKind) -> RuleDefinition {
        RuleDefinition {
            name: "r1".to_string(),
            check,
            required: true,
            ok_message: "ok".to_string(),
            fail_message: "bad".to_string(),
            info: String::new(),
            reference_url: String::new(),
            remediation: String::new(),
        }
    }

    #[test]
    fn test_compile_all_variants() {
        let presence = definition(CheckKind::Presence {
            pattern: "ntp server".to_string(),
        });
        assert!(matches!(
            CompiledRule::compile(&presence).unwrap().check,
            CompiledCheck::Presence { .. }
        ));

        let two = definition(CheckKind::TwoParameter {
            first: "feature ssh".to_string(),
            second: "feature telnet".to_string(),
        });
        assert!(matches!(
            CompiledRule::compile(&two).unwrap().check,
            CompiledCheck::TwoParameter { .. }
        ));
    }

    #[test]
    fn test_compile_invalid_pattern_names_the_rule() {
        let bad = definition(CheckKind::Presence {
            pattern: "ntp (server".to_string(),
        });
        assert!(matches!(
            CompiledRule::compile(&bad).unwrap_err(),
            AuditError::RegexCompile { ref rule, .. } if rule == "r1"
        ));
    }
}
