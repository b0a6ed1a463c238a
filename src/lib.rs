//! rsconfaudit - security-compliance auditing for Cisco NX-OS configurations

// Crate-wide error type
pub use self::error::{AuditError, AuditResult};

// Configuration
pub use self::config::{ConfigManager, CustomConfigBuilder, GlobalConfig};

// Rule catalog
pub use self::rule::{CheckKind, RuleCatalog, RuleDefinition};

// Evaluation engine
pub use self::evaluator::{
    CompiledCheck, CompiledRule, EvaluationResult, RuleEvaluator, Verdict,
};

// Sources and retrieval
pub use self::source::{
    ConfigSource, DeviceTarget, Inventory, NxapiClient, SourceOrigin, load_file_source,
};
pub use self::coordinator::{FetchFailure, RetrievalCoordinator, RetrievalReport};

// Archival and reporting
pub use self::archive::ArchiveWriter;
pub use self::report::ConsoleReporter;

// Module declarations
pub mod archive;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod rule;
pub mod source;
