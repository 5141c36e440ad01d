// 📊 Metric Calculator
// Pure derivation of every ratio/index from the normalized model.
// Every division is guarded: a zero denominator yields 0, never NaN or
// infinity, so downstream classifiers stay total.

use crate::model::{CoverageKind, NormalizedModel};
use serde::Serialize;

/// Planning horizon used to amortize retirement lump sums
pub const LIFE_EXPECTANCY: u32 = 90;

/// Emergency-fund target in months of required expense
pub const EMERGENCY_TARGET_DUAL: f64 = 3.0;
pub const EMERGENCY_TARGET_SINGLE: f64 = 6.0;

// ============================================================================
// GUARDED ARITHMETIC
// ============================================================================

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Percentage rounded to the nearest integer
fn pct(numerator: f64, denominator: f64) -> f64 {
    (ratio(numerator, denominator) * 100.0).round()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// METRIC SHAPES
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct RetirementMetrics {
    pub required_monthly: f64,
    /// Pensions + amortized lump sum + extra income streams, monthly
    pub prepared_monthly: f64,
    pub readiness_rate: f64,
    pub monthly_shortfall: f64,
    /// Shortfall carried across every month of retirement
    pub funding_gap: f64,
    pub additional_monthly_saving: f64,
    pub years_to_retirement: f64,
    pub years_in_retirement: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InsuranceMetrics {
    /// Prepared over needed across the amount-based items only
    pub coverage_rate: f64,
    /// Items short of their target, binary subscriptions included
    pub lack_count: u32,
    pub lacking: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DebtMix {
    pub mortgage_total: f64,
    pub credit_total: f64,
    pub other_total: f64,
    pub mortgage_pct: f64,
    pub credit_pct: f64,
    pub other_pct: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    pub monthly_income: f64,
    pub annual_income: f64,
    /// living + insurance premium + loan service
    pub monthly_required_expense: f64,
    pub emergency_months: f64,
    pub emergency_target_months: f64,
    pub debt_ratio: f64,
    pub dsr: f64,
    pub savings_rate: f64,
    pub monthly_saving_total: f64,
    pub net_worth: f64,
    pub wealth_index: f64,
    pub retirement: RetirementMetrics,
    pub insurance: InsuranceMetrics,
    pub real_estate_concentration: f64,
    pub debt_mix: DebtMix,
}

// ============================================================================
// COMPUTE
// ============================================================================

pub fn compute_metrics(model: &NormalizedModel) -> Metrics {
    let monthly_income = model.income.total;
    let annual_income = monthly_income * 12.0;

    let monthly_required_expense =
        model.expense.living + model.expense.insurance_premium + model.expense.loan_service;
    let emergency_months = round1(ratio(model.assets.emergency_fund, monthly_required_expense));
    let emergency_target_months = if model.profile.dual_income {
        EMERGENCY_TARGET_DUAL
    } else {
        EMERGENCY_TARGET_SINGLE
    };

    let debt_ratio = pct(model.debts.total, model.assets.total);
    let dsr = pct(model.expense.loan_service * 12.0, annual_income);

    let monthly_saving_total = model.expense.savings + model.expense.pension_contribution;
    let savings_rate = pct(monthly_saving_total, monthly_income);

    let net_worth = model.assets.total - model.debts.total;
    let wealth_index = wealth_index(net_worth, model.profile.age, annual_income);

    let retirement = retirement_metrics(model);
    let insurance = insurance_metrics(model);

    let invest = &model.investment;
    let real_estate_value = invest.residential_real_estate + invest.investment_real_estate;
    let concentration_base = if invest.total_assets > 0.0 {
        invest.total_assets
    } else {
        model.assets.total
    };
    let real_estate_concentration = pct(real_estate_value, concentration_base);

    let debt_mix = debt_mix(model);

    Metrics {
        monthly_income,
        annual_income,
        monthly_required_expense,
        emergency_months,
        emergency_target_months,
        debt_ratio,
        dsr,
        savings_rate,
        monthly_saving_total,
        net_worth,
        wealth_index,
        retirement,
        insurance,
        real_estate_concentration,
        debt_mix,
    }
}

/// (net worth * 10) / (age * annual income) * 100.
/// 0 when age or income is unknown; floored at 0 for indebted households.
fn wealth_index(net_worth: f64, age: u32, annual_income: f64) -> f64 {
    if age == 0 || annual_income == 0.0 {
        return 0.0;
    }
    ((net_worth * 10.0) / (age as f64 * annual_income) * 100.0)
        .round()
        .max(0.0)
}

fn retirement_metrics(model: &NormalizedModel) -> RetirementMetrics {
    let plan = &model.retirement;

    let years_in_retirement =
        (LIFE_EXPECTANCY.saturating_sub(plan.retirement_age)) as f64;
    let years_to_retirement =
        (plan.retirement_age.saturating_sub(plan.current_age)) as f64;

    // The lump-sum payout spread evenly over the months of retirement
    let amortized_lump = ratio(plan.lump_sum, years_in_retirement * 12.0);

    let prepared = plan.public_pension
        + plan.private_pension
        + amortized_lump
        + plan.rental_income
        + plan.financial_income;

    let required = plan.required_monthly;
    let shortfall = (required - prepared).max(0.0);
    let funding_gap = (shortfall * 12.0 * years_in_retirement).round();
    let additional_monthly_saving = if years_to_retirement > 0.0 {
        round1(funding_gap / (years_to_retirement * 12.0))
    } else {
        0.0
    };

    RetirementMetrics {
        required_monthly: required,
        prepared_monthly: round1(prepared),
        readiness_rate: pct(prepared, required),
        monthly_shortfall: round1(shortfall),
        funding_gap,
        additional_monthly_saving,
        years_to_retirement,
        years_in_retirement,
    }
}

fn insurance_metrics(model: &NormalizedModel) -> InsuranceMetrics {
    let mut needed_sum = 0.0;
    let mut prepared_sum = 0.0;
    let mut lacking = Vec::new();

    for item in &model.insurance.items {
        if item.kind == CoverageKind::Amount {
            needed_sum += item.needed;
            prepared_sum += item.prepared;
        }
        if item.is_lacking() {
            lacking.push(item.name.clone());
        }
    }

    InsuranceMetrics {
        coverage_rate: pct(prepared_sum, needed_sum),
        lack_count: lacking.len() as u32,
        lacking,
    }
}

fn debt_mix(model: &NormalizedModel) -> DebtMix {
    let mortgage_total = model.debts.mortgage_total();
    let credit_total = model.debts.credit_total();
    let other_total = model.debts.other_total();
    let total = model.debts.total;

    DebtMix {
        mortgage_total,
        credit_total,
        other_total,
        mortgage_pct: pct(mortgage_total, total),
        credit_pct: pct(credit_total, total),
        other_pct: pct(other_total, total),
    }
}
