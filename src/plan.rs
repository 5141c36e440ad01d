// 📝 Action Plan Generator
// A fixed-order rule list over the computed metrics. Each rule that fires
// appends one item with the next priority number, so priorities are
// contiguous from 1 in evaluation order - not sorted by severity.

use crate::metrics::Metrics;
use crate::stage::DesireStage;
use serde::Serialize;

/// Savings-rate policy target (% of monthly income)
pub const SAVINGS_RATE_TARGET: f64 = 20.0;
/// Real-estate share above this calls for rebalancing (%)
pub const REAL_ESTATE_LIMIT: f64 = 70.0;

#[derive(Debug, Clone, Serialize)]
pub struct ActionPlanItem {
    /// 1-based, contiguous, in generation order
    pub priority: u32,
    pub domain: String,
    pub action: String,
    pub detail: String,
}

struct PlanBuilder {
    items: Vec<ActionPlanItem>,
}

impl PlanBuilder {
    fn new() -> Self {
        PlanBuilder { items: Vec::new() }
    }

    fn push(&mut self, domain: &str, action: &str, detail: String) {
        let priority = self.items.len() as u32 + 1;
        self.items.push(ActionPlanItem {
            priority,
            domain: domain.to_string(),
            action: action.to_string(),
            detail,
        });
    }
}

pub fn build_action_plan(metrics: &Metrics, stage: DesireStage) -> Vec<ActionPlanItem> {
    let mut plan = PlanBuilder::new();

    if stage == DesireStage::DebtFree {
        plan.push(
            "부채",
            "신용성 부채 상환",
            format!(
                "신용성 부채 {:.0}만원이 남아 있습니다. 저축보다 고금리 부채 상환을 우선하세요.",
                metrics.debt_mix.credit_total
            ),
        );
    }

    if metrics.emergency_months < metrics.emergency_target_months {
        plan.push(
            "비상자금",
            "비상예비자금 적립",
            format!(
                "현재 {:.1}개월분을 보유 중입니다. 필수 생활비 {:.0}개월분까지 적립하세요.",
                metrics.emergency_months, metrics.emergency_target_months
            ),
        );
    }

    if metrics.retirement.monthly_shortfall > 0.0 {
        plan.push(
            "은퇴준비",
            "은퇴 저축 증액",
            format!(
                "은퇴 후 월 {:.0}만원이 부족합니다. 매월 {:.0}만원의 추가 저축이 필요합니다.",
                metrics.retirement.monthly_shortfall,
                metrics.retirement.additional_monthly_saving
            ),
        );
    }

    if metrics.insurance.lack_count > 0 {
        plan.push(
            "보장",
            "보장 공백 보완",
            format!(
                "{}개 보장 항목이 부족합니다: {}.",
                metrics.insurance.lack_count,
                metrics.insurance.lacking.join(", ")
            ),
        );
    }

    if metrics.savings_rate < SAVINGS_RATE_TARGET {
        plan.push(
            "저축률",
            "저축률 끌어올리기",
            format!(
                "저축률이 {:.0}%입니다. 소득의 {:.0}% 이상을 저축·연금에 배분하세요.",
                metrics.savings_rate, SAVINGS_RATE_TARGET
            ),
        );
    }

    if metrics.real_estate_concentration > REAL_ESTATE_LIMIT {
        plan.push(
            "자산배분",
            "부동산 비중 조정",
            format!(
                "부동산 비중이 {:.0}%로 {:.0}%를 초과합니다. 금융자산 비중을 늘려 재조정하세요.",
                metrics.real_estate_concentration, REAL_ESTATE_LIMIT
            ),
        );
    }

    if plan.items.is_empty() {
        plan.push(
            "종합",
            "현재 상태 유지",
            "재무 상태가 건강합니다. 현재의 저축·투자 흐름을 유지하세요.".to_string(),
        );
    }

    plan.items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::model::NormalizedModel;
    use crate::normalizer::normalize;
    use crate::stage::classify_stage;
    use serde_json::json;

    fn plan_for(model: &NormalizedModel) -> Vec<ActionPlanItem> {
        let metrics = compute_metrics(model);
        let stage = classify_stage(model, &metrics);
        build_action_plan(&metrics, stage)
    }

    fn priorities_contiguous(plan: &[ActionPlanItem]) -> bool {
        plan.iter()
            .enumerate()
            .all(|(i, item)| item.priority == i as u32 + 1)
    }

    #[test]
    fn test_empty_household_plan_is_ordered_and_nonempty() {
        let plan = plan_for(&NormalizedModel::default());

        assert!(!plan.is_empty());
        assert!(priorities_contiguous(&plan));
        // Emergency fund fires first: no credit debt, so no debt item
        assert_eq!(plan[0].domain, "비상자금");
    }

    #[test]
    fn test_debt_item_leads_when_stage_one() {
        let basic = json!({"debts": {"credit": [{"amount": 3000}]}});
        let model = normalize(Some(&basic), None);
        let plan = plan_for(&model);

        assert_eq!(plan[0].priority, 1);
        assert_eq!(plan[0].domain, "부채");
        assert!(plan[0].detail.contains("3000만원"));
        assert!(priorities_contiguous(&plan));
    }

    #[test]
    fn test_healthy_household_gets_single_maintenance_item() {
        let basic = json!({
            "personalInfo": {"age": 45},
            "income": {"salary": 700},
            "expense": {"living": 200, "insurance": 40, "loan": 0, "saving": 150, "pension": 50},
            "assets": {"financial": 90000, "emergencyFund": 2000, "realEstate": 30000}
        });
        let design = json!({
            "retire": {
                "currentAge": 45, "retireAge": 65, "monthlyExpense": 200,
                "publicPension": 120, "privatePension": 80, "lumpSum": 30000
            },
            "invest": {"totalAssets": 122000},
            "insurance": {
                "annualIncome": 8400, "totalDebt": 0,
                "prepared": {
                    "death": 30000, "disability": 20000, "cancer": 9000,
                    "brain": 5000, "heart": 5000, "eldercare": 2000,
                    "medical": true, "liability": true
                }
            },
            "estate": {"homeValue": 30000}
        });
        let model = normalize(Some(&basic), Some(&design));
        let plan = plan_for(&model);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].priority, 1);
        assert_eq!(plan[0].domain, "종합");
    }

    #[test]
    fn test_rule_order_is_generation_order() {
        // Trip every rule at once
        let basic = json!({
            "personalInfo": {"age": 40},
            "income": {"salary": 300},
            "expense": {"living": 250, "loan": 50, "saving": 10},
            "assets": {"realEstate": 40000, "emergencyFund": 100},
            "debts": {"credit": [{"amount": 2000}], "totalDebt": 2000}
        });
        let design = json!({
            "retire": {"currentAge": 40, "retireAge": 60, "monthlyExpense": 300},
            "estate": {"homeValue": 35000, "investValue": 5000},
            "invest": {"totalAssets": 50000}
        });
        let model = normalize(Some(&basic), Some(&design));
        let plan = plan_for(&model);

        let domains: Vec<&str> = plan.iter().map(|i| i.domain.as_str()).collect();
        assert_eq!(
            domains,
            vec!["부채", "비상자금", "은퇴준비", "보장", "저축률", "자산배분"]
        );
        assert!(priorities_contiguous(&plan));
    }
}
