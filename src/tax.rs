// 🧾 Progressive Tax Calculator
// One generic bracket walker, applied to the inheritance-tax table and to
// the salary income-tax table. Brackets are data: ascending upper bounds,
// the last one open-ended via infinity.

use crate::model::{IncomeTaxInput, InheritanceTaxInput};
use serde::Serialize;

// ============================================================================
// BRACKETS
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, 만원. Infinity on the last.
    pub upper: f64,
    /// Marginal rate applied to the slice inside this bracket
    pub rate: f64,
}

/// 상속세 brackets (만원)
pub const INHERITANCE_BRACKETS: [TaxBracket; 5] = [
    TaxBracket { upper: 10_000.0, rate: 0.10 },
    TaxBracket { upper: 50_000.0, rate: 0.20 },
    TaxBracket { upper: 100_000.0, rate: 0.30 },
    TaxBracket { upper: 300_000.0, rate: 0.40 },
    TaxBracket { upper: f64::INFINITY, rate: 0.50 },
];

/// 근로소득세 brackets (만원, annual taxable salary)
pub const INCOME_TAX_BRACKETS: [TaxBracket; 8] = [
    TaxBracket { upper: 1_400.0, rate: 0.06 },
    TaxBracket { upper: 5_000.0, rate: 0.15 },
    TaxBracket { upper: 8_800.0, rate: 0.24 },
    TaxBracket { upper: 15_000.0, rate: 0.35 },
    TaxBracket { upper: 30_000.0, rate: 0.38 },
    TaxBracket { upper: 50_000.0, rate: 0.40 },
    TaxBracket { upper: 100_000.0, rate: 0.42 },
    TaxBracket { upper: f64::INFINITY, rate: 0.45 },
];

// Inheritance deductions (만원)
pub const BASIC_DEDUCTION: f64 = 20_000.0;
pub const SPOUSE_DEDUCTION: f64 = 50_000.0;
pub const PER_CHILD_DEDUCTION: f64 = 5_000.0;

// ============================================================================
// BRACKET WALK
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TaxAssessment {
    pub tax: f64,
    pub marginal_rate: f64,
    pub bracket_label: String,
}

impl TaxAssessment {
    fn none() -> Self {
        TaxAssessment {
            tax: 0.0,
            marginal_rate: 0.0,
            bracket_label: "-".to_string(),
        }
    }
}

/// Walk the brackets in ascending order, taxing the slice of `base` that
/// falls inside each, until the bracket holding `base` is reached.
pub fn progressive_tax(base: f64, brackets: &[TaxBracket]) -> TaxAssessment {
    if base <= 0.0 {
        return TaxAssessment::none();
    }

    let mut tax = 0.0;
    let mut lower = 0.0;

    for bracket in brackets {
        let slice = (base.min(bracket.upper) - lower).max(0.0);
        tax += slice * bracket.rate;

        if base <= bracket.upper {
            let bracket_label = if bracket.upper.is_finite() {
                format!("{:.0}만원 이하", bracket.upper)
            } else {
                format!("{:.0}만원 초과", lower)
            };
            return TaxAssessment {
                // Settled to 0.01만원 so slice arithmetic never leaks
                // float dust into the report
                tax: (tax * 100.0).round() / 100.0,
                marginal_rate: bracket.rate,
                bracket_label,
            };
        }
        lower = bracket.upper;
    }

    // Unreachable with a well-formed table ending at infinity
    TaxAssessment::none()
}

// ============================================================================
// INHERITANCE TAX
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct InheritanceDeductions {
    pub basic: f64,
    pub spouse: f64,
    pub children: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InheritanceTaxResult {
    pub net_estate: f64,
    pub deductions: InheritanceDeductions,
    pub taxable_base: f64,
    pub assessment: TaxAssessment,
}

pub fn inheritance_tax(input: &InheritanceTaxInput) -> InheritanceTaxResult {
    let spouse = if input.has_spouse { SPOUSE_DEDUCTION } else { 0.0 };
    let children = PER_CHILD_DEDUCTION * input.children_count as f64;
    let total = BASIC_DEDUCTION + spouse + children;

    let net_estate = input.total_assets - input.total_debts;
    let taxable_base = (net_estate - total).max(0.0);

    InheritanceTaxResult {
        net_estate,
        deductions: InheritanceDeductions {
            basic: BASIC_DEDUCTION,
            spouse,
            children,
            total,
        },
        taxable_base,
        assessment: progressive_tax(taxable_base, &INHERITANCE_BRACKETS),
    }
}

// ============================================================================
// INCOME TAX (year-end settlement)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct IncomeTaxSettlement {
    /// Estimate from the progressive table on the annual salary
    pub estimated: TaxAssessment,
    pub determined_tax: f64,
    pub prepaid_tax: f64,
    /// prepaid − determined; positive means a refund is due
    pub balance: f64,
}

pub fn income_tax_settlement(input: &IncomeTaxInput) -> IncomeTaxSettlement {
    IncomeTaxSettlement {
        estimated: progressive_tax(input.annual_salary, &INCOME_TAX_BRACKETS),
        determined_tax: input.determined_tax,
        prepaid_tax: input.prepaid_tax,
        balance: input.prepaid_tax - input.determined_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_or_negative_base_is_untaxed() {
        let assessment = progressive_tax(0.0, &INHERITANCE_BRACKETS);
        assert_eq!(assessment.tax, 0.0);
        assert_eq!(assessment.marginal_rate, 0.0);
        assert_eq!(assessment.bracket_label, "-");

        let assessment = progressive_tax(-500.0, &INHERITANCE_BRACKETS);
        assert_eq!(assessment.tax, 0.0);
    }

    #[test]
    fn test_marginal_slices_accumulate() {
        // 70000: 10000 @ 10% + 40000 @ 20% + 20000 @ 30%
        let assessment = progressive_tax(70_000.0, &INHERITANCE_BRACKETS);

        assert_eq!(assessment.tax, 1_000.0 + 8_000.0 + 6_000.0);
        assert_eq!(assessment.marginal_rate, 0.30);
        assert_eq!(assessment.bracket_label, "100000만원 이하");
    }

    #[test]
    fn test_open_ended_bracket_label() {
        let assessment = progressive_tax(400_000.0, &INHERITANCE_BRACKETS);

        assert_eq!(assessment.marginal_rate, 0.50);
        assert_eq!(assessment.bracket_label, "300000만원 초과");
    }

    #[test]
    fn test_continuity_at_bracket_boundary() {
        let eps = 0.01;
        for bound in [10_000.0, 50_000.0, 100_000.0, 300_000.0] {
            let below = progressive_tax(bound - eps, &INHERITANCE_BRACKETS);
            let at = progressive_tax(bound, &INHERITANCE_BRACKETS);
            // No jump beyond the marginal rate on the incremental slice
            assert!((at.tax - below.tax).abs() < eps);
        }
    }

    #[test]
    fn test_inheritance_with_spouse_and_children() {
        let input = InheritanceTaxInput {
            total_assets: 150_000.0,
            total_debts: 0.0,
            has_spouse: true,
            children_count: 2,
        };
        let result = inheritance_tax(&input);

        assert_eq!(result.deductions.total, 80_000.0);
        assert_eq!(result.taxable_base, 70_000.0);
        assert_eq!(result.assessment.tax, 15_000.0);
    }

    #[test]
    fn test_inheritance_deductions_floor_base_at_zero() {
        let input = InheritanceTaxInput {
            total_assets: 15_000.0,
            total_debts: 5_000.0,
            has_spouse: false,
            children_count: 0,
        };
        let result = inheritance_tax(&input);

        assert_eq!(result.taxable_base, 0.0);
        assert_eq!(result.assessment.tax, 0.0);
        assert_eq!(result.assessment.bracket_label, "-");
    }

    #[test]
    fn test_income_tax_settlement_refund_sign() {
        let refund = income_tax_settlement(&IncomeTaxInput {
            annual_salary: 6_000.0,
            determined_tax: 300.0,
            prepaid_tax: 420.0,
        });
        assert_eq!(refund.balance, 120.0);

        let due = income_tax_settlement(&IncomeTaxInput {
            annual_salary: 6_000.0,
            determined_tax: 500.0,
            prepaid_tax: 420.0,
        });
        assert_eq!(due.balance, -80.0);

        // 1400 @ 6% + 3600 @ 15% + 1000 @ 24%
        assert_eq!(refund.estimated.tax, 84.0 + 540.0 + 240.0);
        assert_eq!(refund.estimated.marginal_rate, 0.24);
    }
}
