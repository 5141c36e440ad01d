// 🧹 Normalizer - loose raw records in, strict model out
// Every field resolves through an ordered candidate-path list:
// nested field → legacy flat field → zero-equivalent default.
// The survey forms shipped several field renames over time, so the legacy
// names stay readable here as data instead of scattered special cases.

use crate::model::{
    AssetPortfolio, CoverageItem, CoverageKind, DebtPortfolio, ExpenseStatement,
    HouseholdProfile, IncomeStatement, IncomeTaxInput, InheritanceTaxInput, InsurancePortfolio,
    InvestmentProfile, LoanRecord, NormalizedModel, RetirementPlan, SavingsGoal, TaxProfile,
    DEFAULT_CUSTOMER_NAME,
};
use serde_json::Value;

// ============================================================================
// CANDIDATE-PATH RESOLUTION
// ============================================================================

/// Walk a dotted path ("income.salary") below a raw record.
fn lookup<'a>(root: Option<&'a Value>, path: &str) -> Option<&'a Value> {
    let mut current = root?;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// First candidate path that resolves to a numeric value, else 0.
/// Survey values arrive as numbers or as formatted strings ("1,200").
fn num_at(root: Option<&Value>, paths: &[&str]) -> f64 {
    for path in paths {
        match lookup(root, path) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64() {
                    return v;
                }
            }
            Some(Value::String(s)) => {
                let cleaned = s.trim().replace(',', "");
                if let Ok(v) = cleaned.parse::<f64>() {
                    return v;
                }
            }
            _ => {}
        }
    }
    0.0
}

/// Non-negative integer variant of `num_at` (ages, counts).
fn int_at(root: Option<&Value>, paths: &[&str]) -> u32 {
    num_at(root, paths).max(0.0) as u32
}

/// First candidate path holding a non-empty string, else the default.
fn text_at(root: Option<&Value>, paths: &[&str], default: &str) -> String {
    for path in paths {
        if let Some(Value::String(s)) = lookup(root, path) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    default.to_string()
}

/// Yes/no-like resolution: booleans, affirmative strings, nonzero numbers.
fn bool_at(root: Option<&Value>, paths: &[&str]) -> bool {
    for path in paths {
        match lookup(root, path) {
            Some(Value::Bool(b)) => return *b,
            Some(Value::String(s)) => {
                let s = s.trim().to_lowercase();
                return matches!(s.as_str(), "y" | "yes" | "true" | "1" | "o" | "예" | "유" | "있음");
            }
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(0.0) != 0.0,
            _ => {}
        }
    }
    false
}

/// First candidate path holding an array; anything else coerces to empty.
fn array_at(root: Option<&Value>, paths: &[&str]) -> Vec<Value> {
    for path in paths {
        if let Some(Value::Array(items)) = lookup(root, path) {
            return items.clone();
        }
    }
    Vec::new()
}

// ============================================================================
// NORMALIZE
// ============================================================================

/// Map the raw `(basic, design)` record pair into the strict model.
/// Total function: absent records simply produce an all-default model.
pub fn normalize(basic: Option<&Value>, design: Option<&Value>) -> NormalizedModel {
    NormalizedModel {
        profile: normalize_profile(basic),
        interests: normalize_interests(basic),
        goal: text_at(basic, &["goal"], ""),
        income: normalize_income(basic),
        expense: normalize_expense(basic),
        assets: normalize_assets(basic),
        debts: normalize_debts(basic),
        retirement: normalize_retirement(design),
        savings_goals: normalize_goals(design),
        investment: normalize_investment(design),
        tax: normalize_tax(design),
        insurance: normalize_insurance(design),
    }
}

fn normalize_profile(basic: Option<&Value>) -> HouseholdProfile {
    HouseholdProfile {
        name: text_at(basic, &["personalInfo.name", "name"], DEFAULT_CUSTOMER_NAME),
        age: int_at(basic, &["personalInfo.age", "age"]),
        retirement_age: int_at(basic, &["personalInfo.retireAge", "retireAge"]),
        marital_status: text_at(basic, &["personalInfo.married", "married"], ""),
        dual_income: bool_at(basic, &["personalInfo.doubleIncome", "doubleIncome"]),
        occupation: text_at(basic, &["personalInfo.job", "job"], ""),
        family_size: int_at(basic, &["personalInfo.familyNum", "familyNum"]),
    }
}

fn normalize_interests(basic: Option<&Value>) -> Vec<String> {
    array_at(basic, &["interests"])
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect()
}

fn normalize_income(basic: Option<&Value>) -> IncomeStatement {
    let salary = num_at(basic, &["income.salary", "salary"]);
    let spouse_salary = num_at(basic, &["income.spouseSalary", "spouseSalary"]);
    let other = num_at(basic, &["income.etcIncome", "etcIncome"]);

    // An authoritative total wins over the component sum
    let supplied_total = num_at(basic, &["income.total"]);
    let total = if supplied_total > 0.0 {
        supplied_total
    } else {
        salary + spouse_salary + other
    };

    IncomeStatement {
        salary,
        spouse_salary,
        other,
        total,
    }
}

fn normalize_expense(basic: Option<&Value>) -> ExpenseStatement {
    let living = num_at(basic, &["expense.living", "living"]);
    let insurance_premium = num_at(basic, &["expense.insurance", "insurance"]);
    let loan_service = num_at(basic, &["expense.loan", "loan"]);
    let savings = num_at(basic, &["expense.saving", "saving"]);
    let pension_contribution = num_at(basic, &["expense.pension", "pension"]);
    let surplus = num_at(basic, &["expense.surplus", "surplus"]);

    let supplied_total = num_at(basic, &["expense.total"]);
    let total = if supplied_total > 0.0 {
        supplied_total
    } else {
        living + insurance_premium + loan_service + savings + pension_contribution + surplus
    };

    ExpenseStatement {
        living,
        insurance_premium,
        loan_service,
        savings,
        pension_contribution,
        surplus,
        total,
    }
}

fn normalize_assets(basic: Option<&Value>) -> AssetPortfolio {
    let real_estate = num_at(basic, &["assets.realEstate", "realEstate"]);
    let financial = num_at(basic, &["assets.financial", "financial"]);
    let emergency_fund = num_at(basic, &["assets.emergencyFund", "emergencyFund"]);

    let itemized = real_estate + financial + emergency_fund;
    let total = if itemized > 0.0 {
        itemized
    } else {
        // Legacy aggregate field from before the assets form was itemized
        num_at(basic, &["assets.total", "totalAsset"])
    };

    AssetPortfolio {
        real_estate,
        financial,
        emergency_fund,
        total,
    }
}

fn normalize_debts(basic: Option<&Value>) -> DebtPortfolio {
    let mortgage = parse_loans(array_at(basic, &["debts.mortgage"]));
    let credit = parse_loans(array_at(basic, &["debts.credit"]));
    let other = parse_loans(array_at(basic, &["debts.other"]));

    let itemized: f64 = mortgage
        .iter()
        .chain(&credit)
        .chain(&other)
        .map(|l| l.amount)
        .sum();
    let total = if itemized > 0.0 {
        itemized
    } else {
        num_at(basic, &["debts.totalDebt", "totalDebt"])
    };

    DebtPortfolio {
        mortgage,
        credit,
        other,
        total,
    }
}

// Fields the shaped loan resolution consumes; everything else stays free-form
const LOAN_FIELDS: &[&str] = &[
    "label",
    "name",
    "amount",
    "balance",
    "rate",
    "interestRate",
    "term_months",
    "term",
];

fn parse_loans(raw: Vec<Value>) -> Vec<LoanRecord> {
    raw.into_iter()
        .map(|item| {
            let root = Some(&item);
            let mut extra = std::collections::HashMap::new();
            if let Value::Object(map) = &item {
                for (key, value) in map {
                    if !LOAN_FIELDS.contains(&key.as_str()) {
                        extra.insert(key.clone(), value.clone());
                    }
                }
            }

            LoanRecord {
                label: text_at(root, &["label", "name"], ""),
                amount: num_at(root, &["amount", "balance"]),
                rate: num_at(root, &["rate", "interestRate"]),
                term_months: num_at(root, &["term_months", "term"]),
                extra,
            }
        })
        .collect()
}

fn normalize_retirement(design: Option<&Value>) -> RetirementPlan {
    RetirementPlan {
        current_age: int_at(design, &["retire.currentAge", "retire.age"]),
        retirement_age: int_at(design, &["retire.retireAge"]),
        required_monthly: num_at(design, &["retire.monthlyExpense", "retire.livingCost"]),
        public_pension: num_at(design, &["retire.publicPension", "retire.nationalPension"]),
        private_pension: num_at(design, &["retire.privatePension", "retire.personalPension"]),
        lump_sum: num_at(design, &["retire.lumpSum", "retire.retirePay"]),
        rental_income: num_at(design, &["retire.rentalIncome"]),
        financial_income: num_at(design, &["retire.financialIncome"]),
    }
}

fn normalize_goals(design: Option<&Value>) -> Vec<SavingsGoal> {
    let listed = array_at(design, &["save.goals"]);
    if !listed.is_empty() {
        return listed
            .iter()
            .map(|item| {
                let root = Some(item);
                SavingsGoal {
                    purpose: text_at(root, &["purpose", "name"], ""),
                    horizon_years: num_at(root, &["years", "period"]),
                    target_amount: num_at(root, &["amount", "targetAmount"]),
                }
            })
            .collect();
    }

    // Older records kept a single goal directly under `save`
    let target = num_at(design, &["save.targetAmount", "save.amount"]);
    if target > 0.0 {
        return vec![SavingsGoal {
            purpose: text_at(design, &["save.purpose"], ""),
            horizon_years: num_at(design, &["save.years", "save.period"]),
            target_amount: target,
        }];
    }

    Vec::new()
}

fn normalize_investment(design: Option<&Value>) -> InvestmentProfile {
    InvestmentProfile {
        current_age: int_at(design, &["invest.currentAge", "invest.age"]),
        monthly_income: num_at(design, &["invest.monthlyIncome"]),
        total_assets: num_at(design, &["invest.totalAssets"]),
        total_debt: num_at(design, &["invest.totalDebt"]),
        liquid: num_at(design, &["invest.liquid"]),
        safe: num_at(design, &["invest.safe"]),
        growth: num_at(design, &["invest.growth"]),
        high_risk: num_at(design, &["invest.highRisk"]),
        emergency: num_at(design, &["invest.emergency"]),
        residential_real_estate: num_at(design, &["estate.homeValue", "invest.homeValue"]),
        investment_real_estate: num_at(design, &["estate.investValue", "invest.investRealEstate"]),
        dual_income: bool_at(design, &["invest.doubleIncome"]),
    }
}

fn normalize_tax(design: Option<&Value>) -> TaxProfile {
    TaxProfile {
        income: IncomeTaxInput {
            annual_salary: num_at(design, &["tax.incomeData.salary"]),
            determined_tax: num_at(design, &["tax.incomeData.determinedTax"]),
            prepaid_tax: num_at(design, &["tax.incomeData.prepaidTax"]),
        },
        inheritance: InheritanceTaxInput {
            total_assets: num_at(design, &["tax.inheritData.totalAssets"]),
            total_debts: num_at(design, &["tax.inheritData.totalDebts"]),
            has_spouse: bool_at(design, &["tax.inheritData.hasSpouse"]),
            children_count: int_at(design, &["tax.inheritData.childrenCount", "tax.inheritData.children"]),
        },
    }
}

// ============================================================================
// INSURANCE COVERAGE TABLE
// ============================================================================

// (key, display name, kind, income multiplier, add debt basis, floor 만원)
// Needed amounts are rules of thumb derived from the annual-income basis;
// the floors keep an all-zero household from looking fully covered.
const COVERAGE_TABLE: &[(&str, &str, CoverageKind, f64, bool, f64)] = &[
    ("death", "사망보장", CoverageKind::Amount, 3.0, true, 10_000.0),
    ("disability", "장해보장", CoverageKind::Amount, 2.0, false, 5_000.0),
    ("cancer", "암진단", CoverageKind::Amount, 1.0, false, 3_000.0),
    ("brain", "뇌혈관진단", CoverageKind::Amount, 0.5, false, 2_000.0),
    ("heart", "심혈관진단", CoverageKind::Amount, 0.5, false, 2_000.0),
    ("eldercare", "노후의료비", CoverageKind::Amount, 0.0, false, 1_000.0),
    ("medical", "실손의료비", CoverageKind::Subscription, 0.0, false, 1.0),
    ("liability", "일상배상책임", CoverageKind::Subscription, 0.0, false, 1.0),
];

fn normalize_insurance(design: Option<&Value>) -> InsurancePortfolio {
    let annual_income = num_at(design, &["insurance.annualIncome", "insurance.income"]);
    let total_debt = num_at(design, &["insurance.totalDebt"]);

    let items = COVERAGE_TABLE
        .iter()
        .map(|&(key, name, kind, multiplier, add_debt, floor)| {
            let needed = match kind {
                CoverageKind::Amount => {
                    let base = annual_income * multiplier
                        + if add_debt { total_debt } else { 0.0 };
                    base.max(floor)
                }
                CoverageKind::Subscription => 1.0,
            };

            let prepared_path = format!("insurance.prepared.{}", key);
            let prepared = match kind {
                CoverageKind::Amount => num_at(design, &[prepared_path.as_str()]),
                CoverageKind::Subscription => {
                    if bool_at(design, &[prepared_path.as_str()]) {
                        1.0
                    } else {
                        0.0
                    }
                }
            };

            CoverageItem {
                key: key.to_string(),
                name: name.to_string(),
                kind,
                needed,
                prepared,
            }
        })
        .collect();

    InsurancePortfolio {
        annual_income,
        total_debt,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_fully_defaults_on_absent_records() {
        let model = normalize(None, None);

        assert_eq!(model.profile.name, "고객");
        assert_eq!(model.profile.age, 0);
        assert_eq!(model.income.total, 0.0);
        assert_eq!(model.assets.total, 0.0);
        assert!(model.debts.mortgage.is_empty());
        assert!(model.savings_goals.is_empty());
        assert_eq!(model.insurance.items.len(), 8);
        assert!(model.insurance.items.iter().all(|i| i.prepared == 0.0));
    }

    #[test]
    fn test_name_fallback_chain() {
        let nested = json!({"personalInfo": {"name": "김철수"}});
        assert_eq!(normalize(Some(&nested), None).profile.name, "김철수");

        let legacy = json!({"name": "이영희"});
        assert_eq!(normalize(Some(&legacy), None).profile.name, "이영희");

        let blank = json!({"personalInfo": {"name": "  "}});
        assert_eq!(normalize(Some(&blank), None).profile.name, "고객");
    }

    #[test]
    fn test_income_total_prefers_supplied_total() {
        let basic = json!({"income": {"salary": 400, "spouseSalary": 200, "total": 700}});
        assert_eq!(normalize(Some(&basic), None).income.total, 700.0);

        let summed = json!({"income": {"salary": 400, "spouseSalary": 200, "etcIncome": 50}});
        assert_eq!(normalize(Some(&summed), None).income.total, 650.0);
    }

    #[test]
    fn test_numeric_strings_with_commas_parse() {
        let basic = json!({"assets": {"realEstate": "45,000", "financial": 5000}});
        let assets = normalize(Some(&basic), None).assets;

        assert_eq!(assets.real_estate, 45000.0);
        assert_eq!(assets.total, 50000.0);
    }

    #[test]
    fn test_non_array_debt_collections_coerce_to_empty() {
        let basic = json!({"debts": {"mortgage": "none", "credit": 3, "totalDebt": 900}});
        let debts = normalize(Some(&basic), None).debts;

        assert!(debts.mortgage.is_empty());
        assert!(debts.credit.is_empty());
        // Itemized sum is zero, so the legacy aggregate wins
        assert_eq!(debts.total, 900.0);
    }

    #[test]
    fn test_itemized_debts_override_legacy_aggregate() {
        let basic = json!({"debts": {
            "credit": [{"label": "신용대출", "amount": 2000, "rate": 5.9}],
            "totalDebt": 100
        }});
        let debts = normalize(Some(&basic), None).debts;

        assert_eq!(debts.credit_total(), 2000.0);
        assert_eq!(debts.total, 2000.0);
    }

    #[test]
    fn test_legacy_asset_aggregate_used_when_items_absent() {
        let basic = json!({"totalAsset": 30000});
        assert_eq!(normalize(Some(&basic), None).assets.total, 30000.0);
    }

    #[test]
    fn test_retirement_legacy_field_names() {
        let design = json!({"retire": {
            "age": 45, "retireAge": 65, "livingCost": 300,
            "nationalPension": 80, "personalPension": 50, "retirePay": 10000
        }});
        let retire = normalize(None, Some(&design)).retirement;

        assert_eq!(retire.current_age, 45);
        assert_eq!(retire.required_monthly, 300.0);
        assert_eq!(retire.public_pension, 80.0);
        assert_eq!(retire.lump_sum, 10000.0);
    }

    #[test]
    fn test_goals_list_and_single_object_forms() {
        let listed = json!({"save": {"goals": [
            {"purpose": "주택마련", "years": 5, "amount": 20000},
            {"purpose": "교육자금", "period": 10, "targetAmount": 8000}
        ]}});
        let goals = normalize(None, Some(&listed)).savings_goals;
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[1].horizon_years, 10.0);
        assert_eq!(goals[1].target_amount, 8000.0);

        let single = json!({"save": {"purpose": "결혼자금", "period": 3, "targetAmount": 5000}});
        let goals = normalize(None, Some(&single)).savings_goals;
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].purpose, "결혼자금");
    }

    #[test]
    fn test_insurance_needed_amounts_from_income_basis() {
        let design = json!({"insurance": {
            "annualIncome": 6000, "totalDebt": 10000,
            "prepared": {"death": 15000, "medical": "예"}
        }});
        let insurance = normalize(None, Some(&design)).insurance;

        let death = &insurance.items[0];
        assert_eq!(death.needed, 6000.0 * 3.0 + 10000.0);
        assert_eq!(death.prepared, 15000.0);
        assert!(death.is_lacking());

        let medical = insurance.items.iter().find(|i| i.key == "medical").unwrap();
        assert_eq!(medical.prepared, 1.0);
        assert!(!medical.is_lacking());
    }

    #[test]
    fn test_insurance_floors_apply_at_zero_income() {
        let insurance = normalize(None, None).insurance;

        let death = &insurance.items[0];
        assert_eq!(death.needed, 10000.0);
        assert!(insurance.items.iter().all(|i| i.is_lacking()));
    }

    #[test]
    fn test_dual_income_yes_string() {
        let basic = json!({"personalInfo": {"doubleIncome": "예"}});
        assert!(normalize(Some(&basic), None).profile.dual_income);

        let basic = json!({"doubleIncome": false});
        assert!(!normalize(Some(&basic), None).profile.dual_income);
    }
}
