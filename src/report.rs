//! Console rendering of evaluation results, rule details, and fetch
//! failures. Report output goes to stdout; diagnostics go to the log
//! stream.

use crate::coordinator::FetchFailure;
use crate::evaluator::{EvaluationResult, Verdict};
use crate::rule::{RuleCatalog, RuleDefinition};
use crate::source::ConfigSource;

/// Renders one run's results.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_source_header(&self, source: &ConfigSource) {
        println!("{}", source.identifier);
    }

    /// One block per rule: a header line with name, strategy, and info,
    /// then the verdict line. Results arrive in catalog order.
    pub fn print_results(&self, catalog: &RuleCatalog, results: &[EvaluationResult]) {
        for result in results {
            if let Some(rule) = catalog.get(&result.rule_name) {
                println!("{} - {} - {}", rule.name, rule.check.label(), rule.info);
            } else {
                println!("{}", result.rule_name);
            }

            let marker = match result.verdict {
                Verdict::Ok => '+',
                Verdict::Failed => '-',
                Verdict::Inconclusive => 'o',
            };
            println!(
                "\t{} {} : {}",
                marker,
                result.verdict.label(),
                result.message
            );

            if self.verbose {
                match result.match_count2 {
                    Some(count2) => println!(
                        "\t# matches: first {}, second {}",
                        result.match_count1, count2
                    ),
                    None => println!("\t# matches: {}", result.match_count1),
                }
            }
        }
    }

    /// Every field of one rule, aligned; used by the --info flag.
    pub fn print_rule_details(&self, rule: &RuleDefinition) {
        for (field, value) in rule.fields() {
            println!("{field:<10}\t: {value}");
        }
    }

    /// Devices that contributed no source. Printed after all evaluations
    /// so a failed device is never silently absent from the report.
    pub fn print_fetch_failures(&self, failures: &[FetchFailure]) {
        if failures.is_empty() {
            return;
        }
        println!("unreachable devices:");
        for failure in failures {
            println!("\t- {} : {}", failure.device, failure.error);
        }
    }
}
