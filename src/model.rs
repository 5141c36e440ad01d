// 📋 Normalized Data Model
// Strict, fully-defaulted shapes produced by the normalizer.
// Nothing downstream ever sees an absent field.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Monetary unit used everywhere: 만원 (ten-thousand won).
pub const MONEY_UNIT: &str = "만원";

/// Placeholder name when the survey never captured one
pub const DEFAULT_CUSTOMER_NAME: &str = "고객";

// ============================================================================
// HOUSEHOLD PROFILE
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub name: String,
    pub age: u32,
    pub retirement_age: u32,
    pub marital_status: String,
    pub dual_income: bool,
    pub occupation: String,
    pub family_size: u32,
}

// ============================================================================
// INCOME / EXPENSE (monthly, 만원)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub salary: f64,
    pub spouse_salary: f64,
    pub other: f64,
    /// Sum of the three unless an authoritative total was supplied
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseStatement {
    pub living: f64,
    pub insurance_premium: f64,
    pub loan_service: f64,
    pub savings: f64,
    pub pension_contribution: f64,
    pub surplus: f64,
    pub total: f64,
}

// ============================================================================
// ASSETS / DEBTS
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPortfolio {
    pub real_estate: f64,
    pub financial: f64,
    pub emergency_fund: f64,
    /// Itemized sum, or the legacy aggregate field when items were absent
    pub total: f64,
}

/// One loan as entered in the survey. The survey forms let users attach
/// arbitrary extra columns, so unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub term_months: f64,
    #[serde(flatten, default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtPortfolio {
    pub mortgage: Vec<LoanRecord>,
    pub credit: Vec<LoanRecord>,
    pub other: Vec<LoanRecord>,
    /// Aggregate total debt (legacy aggregate fallback when absent)
    pub total: f64,
}

impl DebtPortfolio {
    pub fn mortgage_total(&self) -> f64 {
        self.mortgage.iter().map(|l| l.amount).sum()
    }

    pub fn credit_total(&self) -> f64 {
        self.credit.iter().map(|l| l.amount).sum()
    }

    pub fn other_total(&self) -> f64 {
        self.other.iter().map(|l| l.amount).sum()
    }
}

// ============================================================================
// RETIREMENT / GOALS
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Required monthly living expense after retirement
    pub required_monthly: f64,
    /// Expected public-pension monthly amount
    pub public_pension: f64,
    /// Current private-pension monthly amount
    pub private_pension: f64,
    /// Expected lump-sum payout at retirement (severance, pension lump)
    pub lump_sum: f64,
    /// Optional extra retirement income streams (monthly)
    pub rental_income: f64,
    pub financial_income: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub purpose: String,
    pub horizon_years: f64,
    pub target_amount: f64,
}

// ============================================================================
// INVESTMENT
// ============================================================================

/// Five-bucket portfolio breakdown plus real-estate sub-values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestmentProfile {
    pub current_age: u32,
    pub monthly_income: f64,
    pub total_assets: f64,
    pub total_debt: f64,
    pub liquid: f64,
    pub safe: f64,
    pub growth: f64,
    pub high_risk: f64,
    pub emergency: f64,
    pub residential_real_estate: f64,
    pub investment_real_estate: f64,
    pub dual_income: bool,
}

// ============================================================================
// TAX
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub annual_salary: f64,
    pub determined_tax: f64,
    pub prepaid_tax: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InheritanceTaxInput {
    pub total_assets: f64,
    pub total_debts: f64,
    pub has_spouse: bool,
    pub children_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxProfile {
    pub income: IncomeTaxInput,
    pub inheritance: InheritanceTaxInput,
}

// ============================================================================
// INSURANCE
// ============================================================================

/// How a coverage item is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageKind {
    /// Needed vs prepared monetary amounts (만원)
    Amount,
    /// Subscription yes/no: needed is one unit, prepared is 0 or 1
    Subscription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageItem {
    pub key: String,
    pub name: String,
    pub kind: CoverageKind,
    pub needed: f64,
    pub prepared: f64,
}

impl CoverageItem {
    /// An item lacks coverage when prepared falls short of needed
    /// (amount items) or the subscription is simply missing.
    pub fn is_lacking(&self) -> bool {
        match self.kind {
            CoverageKind::Amount => self.prepared < self.needed,
            CoverageKind::Subscription => self.prepared == 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsurancePortfolio {
    /// Annual income basis the needed amounts are derived from
    pub annual_income: f64,
    /// Total debt basis (death coverage should clear outstanding debt)
    pub total_debt: f64,
    /// The eight coverage items, fixed order
    pub items: Vec<CoverageItem>,
}

// ============================================================================
// NORMALIZED MODEL (the full survey, strictly shaped)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedModel {
    pub profile: HouseholdProfile,
    pub interests: Vec<String>,
    pub goal: String,
    pub income: IncomeStatement,
    pub expense: ExpenseStatement,
    pub assets: AssetPortfolio,
    pub debts: DebtPortfolio,
    pub retirement: RetirementPlan,
    pub savings_goals: Vec<SavingsGoal>,
    pub investment: InvestmentProfile,
    pub tax: TaxProfile,
    pub insurance: InsurancePortfolio,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_category_totals_fold_amounts() {
        let debts = DebtPortfolio {
            mortgage: vec![
                LoanRecord {
                    amount: 12000.0,
                    ..Default::default()
                },
                LoanRecord {
                    amount: 3000.0,
                    ..Default::default()
                },
            ],
            credit: vec![LoanRecord {
                amount: 500.0,
                ..Default::default()
            }],
            other: vec![],
            total: 15500.0,
        };

        assert_eq!(debts.mortgage_total(), 15000.0);
        assert_eq!(debts.credit_total(), 500.0);
        assert_eq!(debts.other_total(), 0.0);
    }

    #[test]
    fn test_coverage_item_lacking() {
        let amount = CoverageItem {
            key: "death".to_string(),
            name: "사망보장".to_string(),
            kind: CoverageKind::Amount,
            needed: 10000.0,
            prepared: 8000.0,
        };
        assert!(amount.is_lacking());

        let subscription = CoverageItem {
            key: "medical".to_string(),
            name: "실손의료비".to_string(),
            kind: CoverageKind::Subscription,
            needed: 1.0,
            prepared: 1.0,
        };
        assert!(!subscription.is_lacking());
    }

    #[test]
    fn test_loan_record_keeps_free_form_fields() {
        let json = r#"{"label":"주택담보","amount":20000,"rate":3.5,"term_months":240,"bank":"국민"}"#;
        let loan: LoanRecord = serde_json::from_str(json).unwrap();

        assert_eq!(loan.amount, 20000.0);
        assert_eq!(loan.extra.get("bank").and_then(|v| v.as_str()), Some("국민"));
    }
}
