// 📸 Snapshot Assembly
// The single artifact handed to every presentation surface. Recomputed in
// full from the store on each trigger; consumers keep the latest one and
// use the fingerprint to skip unchanged inputs (last-write-wins).

use crate::grade::{grade_metrics, GradeReport};
use crate::loader::{load_records, LoadedRecords, StorageKeys};
use crate::metrics::{compute_metrics, Metrics};
use crate::model::NormalizedModel;
use crate::normalizer::normalize;
use crate::plan::{build_action_plan, ActionPlanItem};
use crate::stage::{classify_stage, StageAssessment};
use crate::store::RecordStore;
use crate::tax::{income_tax_settlement, inheritance_tax, IncomeTaxSettlement, InheritanceTaxResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ============================================================================
// FINANCIAL SNAPSHOT
// ============================================================================

/// Everything a report needs, fully self-contained. Produced fresh on each
/// computation and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSnapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Hash of the raw input records; identical inputs hash identically
    pub input_fingerprint: String,
    pub model: NormalizedModel,
    pub metrics: Metrics,
    pub grades: GradeReport,
    pub inheritance_tax: InheritanceTaxResult,
    pub income_tax: IncomeTaxSettlement,
    pub stage: StageAssessment,
    pub plan: Vec<ActionPlanItem>,
}

/// Run the whole pipeline over an already-loaded record pair.
pub fn compute_snapshot(records: &LoadedRecords) -> FinancialSnapshot {
    let model = normalize(records.basic.as_ref(), records.design.as_ref());
    let metrics = compute_metrics(&model);
    let grades = grade_metrics(&metrics);
    let stage = classify_stage(&model, &metrics);
    let plan = build_action_plan(&metrics, stage);

    FinancialSnapshot {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        input_fingerprint: fingerprint(records),
        inheritance_tax: inheritance_tax(&model.tax.inheritance),
        income_tax: income_tax_settlement(&model.tax.income),
        stage: StageAssessment::from(stage),
        model,
        metrics,
        grades,
        plan,
    }
}

/// Load from the store and compute. The loader absorbs every read/parse
/// failure, so this is total as well.
pub fn snapshot_from_store(store: &dyn RecordStore, keys: &StorageKeys) -> FinancialSnapshot {
    let records = load_records(store, keys);
    compute_snapshot(&records)
}

/// Content hash over the raw record texts, in fixed key order.
fn fingerprint(records: &LoadedRecords) -> String {
    let mut hasher = Sha256::new();
    hasher.update(records.basic_raw.as_deref().unwrap_or(""));
    hasher.update([0u8]);
    hasher.update(records.design_raw.as_deref().unwrap_or(""));
    format!("{:x}", hasher.finalize())
}
