// Wealth Compass - Core Library
// Household financial diagnosis: raw survey records → normalized model →
// metrics, grades, tax estimate, DESIRE stage, action plan → one snapshot.
// Exposes all modules for use in CLI, API server, and tests.

pub mod grade;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod normalizer;
pub mod plan;
pub mod report;
pub mod snapshot;
pub mod stage;
pub mod store;
pub mod tax;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use grade::{grade_metrics, Grade, GradeReport, GradeScale};
pub use loader::{load_records, LoadedRecords, StorageKeys};
pub use metrics::{compute_metrics, Metrics, LIFE_EXPECTANCY};
pub use model::{
    AssetPortfolio, CoverageItem, CoverageKind, DebtPortfolio, ExpenseStatement, HouseholdProfile,
    IncomeStatement, InsurancePortfolio, InvestmentProfile, LoanRecord, NormalizedModel,
    RetirementPlan, SavingsGoal, TaxProfile,
};
pub use normalizer::normalize;
pub use plan::{build_action_plan, ActionPlanItem};
pub use report::render_report;
pub use snapshot::{compute_snapshot, snapshot_from_store, FinancialSnapshot};
pub use stage::{classify_stage, DesireStage, StageAssessment};
pub use store::{MemoryStore, RecordStore, SqliteStore};
pub use tax::{
    income_tax_settlement, inheritance_tax, progressive_tax, TaxAssessment, TaxBracket,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
