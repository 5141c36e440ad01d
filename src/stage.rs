// 🪜 Stage Classifier - the DESIRE progression
// Six ordered stages: Debt-free → Emergency fund → Savings → Investment →
// Retirement → Enjoy. The gates live in a fixed-order table and the first
// matching gate decides; there is no persisted state, each snapshot is
// classified from scratch.

use crate::metrics::Metrics;
use crate::model::NormalizedModel;
use serde::Serialize;

/// Investable-asset gate for stage 4, 만원 (10억)
pub const INVESTABLE_ASSET_TARGET: f64 = 100_000.0;

// ============================================================================
// STAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DesireStage {
    DebtFree,
    EmergencyFund,
    Savings,
    Investment,
    Retirement,
    Enjoy,
}

impl DesireStage {
    pub fn number(&self) -> u8 {
        match self {
            DesireStage::DebtFree => 1,
            DesireStage::EmergencyFund => 2,
            DesireStage::Savings => 3,
            DesireStage::Investment => 4,
            DesireStage::Retirement => 5,
            DesireStage::Enjoy => 6,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DesireStage::DebtFree => "D",
            DesireStage::EmergencyFund => "E",
            DesireStage::Savings => "S",
            DesireStage::Investment => "I",
            DesireStage::Retirement => "R",
            DesireStage::Enjoy => "E+",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DesireStage::DebtFree => "부채 청산",
            DesireStage::EmergencyFund => "비상예비자금 마련",
            DesireStage::Savings => "저축 습관 만들기",
            DesireStage::Investment => "투자 자산 키우기",
            DesireStage::Retirement => "주택대출 상환·은퇴 준비",
            DesireStage::Enjoy => "경제적 자유",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DesireStage::DebtFree => "⛓️",
            DesireStage::EmergencyFund => "🛟",
            DesireStage::Savings => "🌱",
            DesireStage::Investment => "📈",
            DesireStage::Retirement => "🏠",
            DesireStage::Enjoy => "🏖️",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DesireStage::DebtFree => "신용성 부채가 남아 있습니다. 고금리 부채 상환이 최우선입니다.",
            DesireStage::EmergencyFund => "비상예비자금이 목표 개월수에 미치지 못합니다.",
            DesireStage::Savings => "정기적인 저축·연금 납입 습관이 아직 없습니다.",
            DesireStage::Investment => "투자 가능 자산을 10억원까지 키워가는 단계입니다.",
            DesireStage::Retirement => "주택담보대출 상환과 은퇴 준비를 마무리하는 단계입니다.",
            DesireStage::Enjoy => "모든 단계를 달성했습니다. 자산을 누리며 유지 관리에 집중하세요.",
        }
    }
}

// ============================================================================
// GATE TABLE
// ============================================================================

type Gate = fn(&NormalizedModel, &Metrics) -> bool;

/// One `(gate, stage)` row; rows are evaluated top to bottom and the first
/// match wins, so the gate order IS the progression order.
pub struct StageGate {
    pub stage: DesireStage,
    pub gate: Gate,
}

pub fn stage_gates() -> [StageGate; 6] {
    [
        StageGate {
            stage: DesireStage::DebtFree,
            gate: |_, m| m.debt_mix.credit_total > 0.0,
        },
        StageGate {
            stage: DesireStage::EmergencyFund,
            gate: |_, m| m.emergency_months < m.emergency_target_months,
        },
        StageGate {
            stage: DesireStage::Savings,
            gate: |_, m| m.monthly_saving_total <= 0.0,
        },
        StageGate {
            stage: DesireStage::Investment,
            gate: |model, _| model.investment.total_assets < INVESTABLE_ASSET_TARGET,
        },
        StageGate {
            stage: DesireStage::Retirement,
            gate: |_, m| m.debt_mix.mortgage_total > 0.0,
        },
        StageGate {
            stage: DesireStage::Enjoy,
            gate: |_, _| true,
        },
    ]
}

/// First matching gate decides. Total: the terminal gate always matches.
pub fn classify_stage(model: &NormalizedModel, metrics: &Metrics) -> DesireStage {
    for row in stage_gates() {
        if (row.gate)(model, metrics) {
            return row.stage;
        }
    }
    DesireStage::Enjoy
}

// ============================================================================
// ASSESSMENT VIEW
// ============================================================================

/// The stage with its display fields, ready to render without lookups.
#[derive(Debug, Clone, Serialize)]
pub struct StageAssessment {
    pub number: u8,
    pub code: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl From<DesireStage> for StageAssessment {
    fn from(stage: DesireStage) -> Self {
        StageAssessment {
            number: stage.number(),
            code: stage.code().to_string(),
            name: stage.name().to_string(),
            icon: stage.icon().to_string(),
            description: stage.description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::normalizer::normalize;
    use serde_json::json;

    fn stage_for(basic: serde_json::Value, design: serde_json::Value) -> DesireStage {
        let model = normalize(Some(&basic), Some(&design));
        let metrics = compute_metrics(&model);
        classify_stage(&model, &metrics)
    }

    #[test]
    fn test_credit_debt_forces_stage_one() {
        // Credit debt overrides everything else, however healthy
        let stage = stage_for(
            json!({
                "debts": {"credit": [{"amount": 5000}]},
                "assets": {"financial": 20000, "emergencyFund": 10000},
                "expense": {"living": 100, "saving": 100}
            }),
            json!({"invest": {"totalAssets": 500000}}),
        );
        assert_eq!(stage, DesireStage::DebtFree);
    }

    #[test]
    fn test_empty_household_is_stage_two() {
        // No credit debt, but also no emergency fund → stage 2
        let model = normalize(None, None);
        let metrics = compute_metrics(&model);
        assert_eq!(classify_stage(&model, &metrics), DesireStage::EmergencyFund);
    }

    #[test]
    fn test_dual_income_lowers_emergency_target() {
        let basic = json!({
            "personalInfo": {"doubleIncome": true},
            "expense": {"living": 250, "insurance": 25, "loan": 25},
            "assets": {"emergencyFund": 1200}
        });
        // 1200 / 300 = 4 months: short of 6 but enough for a dual-income
        // household's 3-month target, so the savings gate decides next
        let stage = stage_for(basic, json!({}));
        assert_eq!(stage, DesireStage::Savings);
    }

    #[test]
    fn test_savings_habit_gate() {
        let basic = json!({
            "expense": {"living": 100, "saving": 0, "pension": 0},
            "assets": {"emergencyFund": 600}
        });
        assert_eq!(stage_for(basic, json!({})), DesireStage::Savings);
    }

    #[test]
    fn test_investment_gate_below_target() {
        let basic = json!({
            "expense": {"living": 100, "saving": 50},
            "assets": {"emergencyFund": 600}
        });
        let design = json!({"invest": {"totalAssets": 80000}});
        assert_eq!(stage_for(basic, design), DesireStage::Investment);
    }

    #[test]
    fn test_mortgage_gate_then_terminal_stage() {
        let basic = json!({
            "expense": {"living": 100, "saving": 50},
            "assets": {"emergencyFund": 600},
            "debts": {"mortgage": [{"amount": 20000}]}
        });
        let design = json!({"invest": {"totalAssets": 150000}});
        assert_eq!(stage_for(basic.clone(), design.clone()), DesireStage::Retirement);

        let paid_off = json!({
            "expense": {"living": 100, "saving": 50},
            "assets": {"emergencyFund": 600}
        });
        assert_eq!(stage_for(paid_off, design), DesireStage::Enjoy);
    }

    #[test]
    fn test_classification_is_total_and_idempotent() {
        let model = normalize(None, None);
        let metrics = compute_metrics(&model);

        let first = classify_stage(&model, &metrics);
        let second = classify_stage(&model, &metrics);
        assert_eq!(first, second);
    }

    #[test]
    fn test_assessment_view_carries_display_fields() {
        let assessment = StageAssessment::from(DesireStage::DebtFree);
        assert_eq!(assessment.number, 1);
        assert_eq!(assessment.code, "D");
        assert!(!assessment.name.is_empty());
        assert!(!assessment.description.is_empty());
    }
}
