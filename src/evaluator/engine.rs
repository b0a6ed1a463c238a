//! The evaluation engine: applies every catalog rule, in order, against one
//! source's line sequence. Pure counting over lines; rendering happens in
//! the reporter.

use tracing::debug;

use super::compiled::{CompiledCheck, CompiledRule};
use crate::error::AuditResult;
use crate::rule::RuleCatalog;
use crate::source::ConfigSource;

/// Outcome of one rule against one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Failed,
    /// Two-parameter checks where only one of the two counts agrees with
    /// the required flag. A named outcome, never a silent no-op.
    Inconclusive,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Ok => "ok",
            Verdict::Failed => "failed",
            Verdict::Inconclusive => "inconclusive",
        }
    }
}

/// Result of one rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub rule_name: String,
    pub verdict: Verdict,
    pub message: String,
    /// Lines matching pattern1 (joint count for parameter checks).
    pub match_count1: usize,
    /// Lines matching pattern2; only two-parameter checks count it
    /// separately.
    pub match_count2: Option<usize>,
}

/// Evaluator over a compiled catalog.
pub struct RuleEvaluator {
    rules: Vec<CompiledRule>,
}

impl RuleEvaluator {
    /// Compile every catalog rule. Catalog insertion order is preserved.
    pub fn compile(catalog: &RuleCatalog) -> AuditResult<Self> {
        let rules = catalog
            .iter()
            .map(CompiledRule::compile)
            .collect::<AuditResult<Vec<_>>>()?;
        debug!("compiled {} rules", rules.len());
        Ok(Self { rules })
    }

    /// Apply every rule against one source. Exactly one result per rule,
    /// in catalog order; no short-circuiting.
    pub fn evaluate_source(&self, source: &ConfigSource) -> Vec<EvaluationResult> {
        self.rules
            .iter()
            .map(|rule| evaluate_rule(rule, &source.lines))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn evaluate_rule(rule: &CompiledRule, lines: &[String]) -> EvaluationResult {
    match &rule.check {
        CompiledCheck::Presence { pattern } => {
            let count = lines.iter().filter(|l| pattern.is_match(l)).count();
            single_count_result(rule, count)
        }
        CompiledCheck::Parameter { parameter, value } => {
            // pattern2 is only tried on lines where pattern1 already hit
            let count = lines
                .iter()
                .filter(|l| parameter.is_match(l) && value.is_match(l))
                .count();
            single_count_result(rule, count)
        }
        CompiledCheck::TwoParameter { first, second } => {
            let mut count1 = 0;
            let mut count2 = 0;
            for line in lines {
                if first.is_match(line) {
                    count1 += 1;
                }
                if second.is_match(line) {
                    count2 += 1;
                }
            }
            two_count_result(rule, count1, count2)
        }
    }
}

/// Presence and parameter checks share the verdict table: a positive count
/// is OK when required, a zero count is OK when forbidden.
fn single_count_result(rule: &CompiledRule, count: usize) -> EvaluationResult {
    let verdict = if (rule.required && count > 0) || (!rule.required && count == 0) {
        Verdict::Ok
    } else {
        Verdict::Failed
    };
    EvaluationResult {
        rule_name: rule.name.clone(),
        verdict,
        message: verdict_message(rule, verdict, count, 0),
        match_count1: count,
        match_count2: None,
    }
}

fn two_count_result(rule: &CompiledRule, count1: usize, count2: usize) -> EvaluationResult {
    let verdict = if rule.required {
        match (count1 > 0, count2 > 0) {
            (true, true) => Verdict::Ok,
            (true, false) => Verdict::Inconclusive,
            (false, _) => Verdict::Failed,
        }
    } else {
        match (count1 > 0, count2 > 0) {
            (false, false) => Verdict::Ok,
            (false, true) => Verdict::Inconclusive,
            (true, _) => Verdict::Failed,
        }
    };
    EvaluationResult {
        rule_name: rule.name.clone(),
        verdict,
        message: verdict_message(rule, verdict, count1, count2),
        match_count1: count1,
        match_count2: Some(count2),
    }
}

fn verdict_message(rule: &CompiledRule, verdict: Verdict, count1: usize, count2: usize) -> String {
    match verdict {
        Verdict::Ok => rule.ok_message.clone(),
        Verdict::Failed => rule.fail_message.clone(),
        Verdict::Inconclusive => format!(
            "patterns matched unevenly (first: {count1}, second: {count2})"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleCatalog;
    use crate::source::ConfigSource;

    fn catalog(record: &str) -> RuleCatalog {
        RuleCatalog::parse(record).unwrap()
    }

    fn source(lines: &[&str]) -> ConfigSource {
        ConfigSource::from_lines("test.conf", lines.iter().map(|l| l.to_string()).collect())
    }

    fn single_result(record: &str, lines: &[&str]) -> EvaluationResult {
        let evaluator = RuleEvaluator::compile(&catalog(record)).unwrap();
        let mut results = evaluator.evaluate_source(&source(lines));
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    const NTP_RULE: &str =
        "ntp-enabled;check_in_simple;ntp server;;yes;ntp ok;ntp missing;ntp;url;fix\n";

    #[test]
    fn test_presence_required_matches() {
        let result = single_result(NTP_RULE, &["ntp server 10.0.0.1", "interface eth0"]);
        assert_eq!(result.verdict, Verdict::Ok);
        assert_eq!(result.message, "ntp ok");
        assert_eq!(result.match_count1, 1);
        assert_eq!(result.match_count2, None);
    }

    #[test]
    fn test_presence_required_missing() {
        let result = single_result(NTP_RULE, &["interface eth0"]);
        assert_eq!(result.verdict, Verdict::Failed);
        assert_eq!(result.message, "ntp missing");
        assert_eq!(result.match_count1, 0);
    }

    #[test]
    fn test_presence_forbidden() {
        let rule = "no-http;check_in_simple;feature http-server;;no;http off;http on;http;url;fix\n";
        assert_eq!(single_result(rule, &["feature ssh"]).verdict, Verdict::Ok);
        assert_eq!(
            single_result(rule, &["feature http-server"]).verdict,
            Verdict::Failed
        );
    }

    const AAA_RULE: &str =
        "aaa-tacacs;check_parameter;aaa authentication;group tacacs;yes;tacacs ok;tacacs missing;aaa;url;fix\n";

    #[test]
    fn test_parameter_both_match_same_line() {
        let result = single_result(
            AAA_RULE,
            &["aaa authentication login default group tacacs+"],
        );
        assert_eq!(result.verdict, Verdict::Ok);
        assert_eq!(result.match_count1, 1);
        assert_eq!(result.match_count2, None);
    }

    #[test]
    fn test_parameter_value_on_other_line_does_not_count() {
        // value pattern must hit the same line as the parameter pattern
        let result = single_result(
            AAA_RULE,
            &["aaa authentication login default local", "group tacacs+"],
        );
        assert_eq!(result.verdict, Verdict::Failed);
        assert_eq!(result.match_count1, 0);
    }

    const SSH_RULE: &str =
        "ssh-only;check_two_parameters;feature ssh;ssh key rsa;yes;ssh ok;ssh missing;ssh;url;fix\n";

    #[test]
    fn test_two_parameter_required_verdict_table() {
        assert_eq!(
            single_result(SSH_RULE, &["feature ssh", "ssh key rsa 2048"]).verdict,
            Verdict::Ok
        );
        assert_eq!(
            single_result(SSH_RULE, &["interface eth0"]).verdict,
            Verdict::Failed
        );
        // first pattern present, second absent: a defined outcome,
        // not a silently dropped result
        let uneven = single_result(SSH_RULE, &["feature ssh"]);
        assert_eq!(uneven.verdict, Verdict::Inconclusive);
        assert_eq!(uneven.match_count1, 1);
        assert_eq!(uneven.match_count2, Some(0));
    }

    #[test]
    fn test_two_parameter_forbidden_verdict_table() {
        let rule = "no-telnet;check_two_parameters;feature telnet;telnet server;no;telnet off;telnet on;telnet;url;fix\n";
        assert_eq!(single_result(rule, &["feature ssh"]).verdict, Verdict::Ok);
        assert_eq!(
            single_result(rule, &["feature telnet"]).verdict,
            Verdict::Failed
        );
        assert_eq!(
            single_result(rule, &["telnet server enable"]).verdict,
            Verdict::Inconclusive
        );
    }

    #[test]
    fn test_every_rule_yields_one_result_in_catalog_order() {
        let text = format!("{NTP_RULE}{AAA_RULE}{SSH_RULE}");
        let evaluator = RuleEvaluator::compile(&catalog(&text)).unwrap();
        let results = evaluator.evaluate_source(&source(&["interface eth0"]));
        let names: Vec<&str> = results.iter().map(|r| r.rule_name.as_str()).collect();
        assert_eq!(names, vec!["ntp-enabled", "aaa-tacacs", "ssh-only"]);
    }

    #[test]
    fn test_duplicate_matches_are_all_counted() {
        let result = single_result(
            NTP_RULE,
            &["ntp server 10.0.0.1", "ntp server 10.0.0.2", "ntp server 10.0.0.3"],
        );
        assert_eq!(result.match_count1, 3);
        assert_eq!(result.verdict, Verdict::Ok);
    }
}
