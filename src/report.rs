// 🖨️ Text Report - thin consumer of the snapshot
// Renders the full diagnosis as plain text. All numbers come straight off
// the snapshot; nothing is recomputed here.

use crate::snapshot::FinancialSnapshot;
use std::fmt::Write;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn render_report(snapshot: &FinancialSnapshot) -> String {
    let mut out = String::new();
    let m = &snapshot.metrics;

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "💰 {} 님의 재무 진단 리포트",
        snapshot.model.profile.name
    );
    let _ = writeln!(
        out,
        "   {} 기준",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "{}", RULE);

    // Current stage
    let _ = writeln!(
        out,
        "\n{} 현재 단계: {}단계 - {}",
        snapshot.stage.icon, snapshot.stage.number, snapshot.stage.name
    );
    let _ = writeln!(out, "   {}", snapshot.stage.description);

    // Grades
    let g = &snapshot.grades;
    let _ = writeln!(out, "\n📋 영역별 등급");
    let _ = writeln!(
        out,
        "   부채       {} ({})   (부채비율 {:.0}%)",
        g.debt.code(),
        g.debt.label(),
        m.debt_ratio
    );
    let _ = writeln!(
        out,
        "   저축       {} ({})   (저축률 {:.0}%)",
        g.savings.code(),
        g.savings.label(),
        m.savings_rate
    );
    let _ = writeln!(
        out,
        "   비상자금   {} ({})   ({:.1}개월 / 목표 {:.0}개월)",
        g.emergency.code(),
        g.emergency.label(),
        m.emergency_months,
        m.emergency_target_months
    );
    let _ = writeln!(
        out,
        "   은퇴준비   {} ({})   (준비율 {:.0}%)",
        g.retirement.code(),
        g.retirement.label(),
        m.retirement.readiness_rate
    );
    let _ = writeln!(
        out,
        "   보장       {} ({})   (충족률 {:.0}%, 부족 {}건)",
        g.insurance.code(),
        g.insurance.label(),
        m.insurance.coverage_rate,
        m.insurance.lack_count
    );
    let _ = writeln!(
        out,
        "   ─ 종합     {} ({})   (점수 {:.0})",
        g.overall.code(),
        g.overall.label(),
        g.overall_score
    );

    // Key figures
    let _ = writeln!(out, "\n📊 주요 지표");
    let _ = writeln!(out, "   순자산        {:>12.0} 만원", m.net_worth);
    let _ = writeln!(out, "   월 소득       {:>12.0} 만원", m.monthly_income);
    let _ = writeln!(out, "   DSR           {:>12.0} %", m.dsr);
    let _ = writeln!(out, "   웰스인덱스    {:>12.0}", m.wealth_index);
    let _ = writeln!(
        out,
        "   부동산 비중   {:>12.0} %",
        m.real_estate_concentration
    );

    // Retirement detail
    let r = &m.retirement;
    let _ = writeln!(out, "\n🏖️  은퇴 준비");
    let _ = writeln!(
        out,
        "   필요 {:.0}만원/월, 준비 {:.0}만원/월 → 부족 {:.0}만원/월",
        r.required_monthly, r.prepared_monthly, r.monthly_shortfall
    );
    if r.monthly_shortfall > 0.0 {
        let _ = writeln!(
            out,
            "   은퇴 기간 총 부족액 {:.0}만원, 은퇴 전 매월 {:.0}만원 추가 저축 필요",
            r.funding_gap, r.additional_monthly_saving
        );
    }

    // Inheritance tax
    let tax = &snapshot.inheritance_tax;
    let _ = writeln!(out, "\n🧾 상속세 추정");
    let _ = writeln!(
        out,
        "   과세표준 {:.0}만원 (공제 {:.0}만원), 구간 {}",
        tax.taxable_base, tax.deductions.total, tax.assessment.bracket_label
    );
    let _ = writeln!(
        out,
        "   예상 세액 {:.0}만원 (한계세율 {:.0}%)",
        tax.assessment.tax,
        tax.assessment.marginal_rate * 100.0
    );

    // Action plan
    let _ = writeln!(out, "\n✅ 실행 계획");
    for item in &snapshot.plan {
        let _ = writeln!(out, "   {}. [{}] {}", item.priority, item.domain, item.action);
        let _ = writeln!(out, "      {}", item.detail);
    }

    let _ = writeln!(out, "\n{}", RULE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadedRecords;
    use crate::snapshot::compute_snapshot;
    use serde_json::json;

    #[test]
    fn test_report_renders_for_empty_household() {
        let snapshot = compute_snapshot(&LoadedRecords::default());
        let report = render_report(&snapshot);

        assert!(report.contains("고객"));
        assert!(report.contains("현재 단계: 2단계"));
        assert!(report.contains("실행 계획"));
    }

    #[test]
    fn test_report_lists_every_plan_item() {
        let records = LoadedRecords {
            basic: Some(json!({"debts": {"credit": [{"amount": 3000}]}})),
            ..Default::default()
        };
        let snapshot = compute_snapshot(&records);
        let report = render_report(&snapshot);

        for item in &snapshot.plan {
            assert!(report.contains(&item.action));
        }
        assert!(report.contains("1. [부채]"));
    }
}
