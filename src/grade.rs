// 🎖️ Grade Classifier
// Four ordered letter grades assigned by descending-threshold tables.
// Every graded metric shares the same classifier; only the table differs.

use crate::metrics::Metrics;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

// ============================================================================
// GRADE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    Best,
    Good,
    Caution,
    Risk,
}

impl Grade {
    pub fn code(&self) -> &'static str {
        match self {
            Grade::Best => "A",
            Grade::Good => "B",
            Grade::Caution => "C",
            Grade::Risk => "D",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Best => "우수",
            Grade::Good => "양호",
            Grade::Caution => "주의",
            Grade::Risk => "위험",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Grade::Best => "#2e7d32",
            Grade::Good => "#558b2f",
            Grade::Caution => "#f9a825",
            Grade::Risk => "#c62828",
        }
    }

    /// Numeric score used by the composite grade (A=100 … D=25)
    pub fn score(&self) -> f64 {
        match self {
            Grade::Best => 100.0,
            Grade::Good => 75.0,
            Grade::Caution => 50.0,
            Grade::Risk => 25.0,
        }
    }
}

// A grade renders self-contained: the consumer needs no lookup table.
impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Grade", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("color", self.color())?;
        state.end()
    }
}

// ============================================================================
// GRADE SCALE
// ============================================================================

const GRADE_ORDER: [Grade; 4] = [Grade::Best, Grade::Good, Grade::Caution, Grade::Risk];

/// Descending thresholds; the first one the value meets or exceeds wins,
/// anything below the last maps to the least favorable grade.
#[derive(Debug, Clone, Copy)]
pub struct GradeScale {
    pub thresholds: [f64; 4],
}

impl GradeScale {
    pub fn classify(&self, value: f64) -> Grade {
        for (grade, threshold) in GRADE_ORDER.iter().zip(self.thresholds) {
            if value >= threshold {
                return *grade;
            }
        }
        Grade::Risk
    }
}

// Per-metric tables. Debt is graded on the inverted value (100 − ratio)
// so a lower debt ratio lands on a better grade through the same scan.
pub const DEBT_SCALE: GradeScale = GradeScale { thresholds: [80.0, 60.0, 40.0, 0.0] };
pub const SAVINGS_SCALE: GradeScale = GradeScale { thresholds: [30.0, 20.0, 10.0, 0.0] };
pub const EMERGENCY_SCALE: GradeScale = GradeScale { thresholds: [6.0, 3.0, 1.0, 0.0] };
pub const RETIREMENT_SCALE: GradeScale = GradeScale { thresholds: [100.0, 70.0, 40.0, 0.0] };
pub const INSURANCE_SCALE: GradeScale = GradeScale { thresholds: [80.0, 60.0, 40.0, 0.0] };
pub const OVERALL_SCALE: GradeScale = GradeScale { thresholds: [80.0, 60.0, 40.0, 0.0] };

// ============================================================================
// GRADE REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub debt: Grade,
    pub savings: Grade,
    pub emergency: Grade,
    pub retirement: Grade,
    pub insurance: Grade,
    /// Mean of the five per-metric scores
    pub overall_score: f64,
    pub overall: Grade,
}

pub fn grade_metrics(metrics: &Metrics) -> GradeReport {
    let debt = DEBT_SCALE.classify(100.0 - metrics.debt_ratio);
    let savings = SAVINGS_SCALE.classify(metrics.savings_rate);
    let emergency = EMERGENCY_SCALE.classify(metrics.emergency_months);
    let retirement = RETIREMENT_SCALE.classify(metrics.retirement.readiness_rate);
    let insurance = INSURANCE_SCALE.classify(metrics.insurance.coverage_rate);

    let overall_score = [debt, savings, emergency, retirement, insurance]
        .iter()
        .map(Grade::score)
        .sum::<f64>()
        / 5.0;
    let overall = OVERALL_SCALE.classify(overall_score);

    GradeReport {
        debt,
        savings,
        emergency,
        retirement,
        insurance,
        overall_score,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::model::NormalizedModel;

    #[test]
    fn test_descending_scan_first_match_wins() {
        assert_eq!(SAVINGS_SCALE.classify(35.0), Grade::Best);
        assert_eq!(SAVINGS_SCALE.classify(30.0), Grade::Best);
        assert_eq!(SAVINGS_SCALE.classify(25.0), Grade::Good);
        assert_eq!(SAVINGS_SCALE.classify(10.0), Grade::Caution);
        assert_eq!(SAVINGS_SCALE.classify(0.0), Grade::Risk);
        assert_eq!(SAVINGS_SCALE.classify(-5.0), Grade::Risk);
    }

    #[test]
    fn test_grade_is_monotonic_in_value() {
        let scale = GradeScale { thresholds: [80.0, 60.0, 40.0, 0.0] };
        let mut previous = scale.classify(-10.0);
        let mut value = -10.0;
        while value <= 110.0 {
            let current = scale.classify(value);
            // Ord: Best < Good < Caution < Risk, so higher value never worsens
            assert!(current <= previous);
            previous = current;
            value += 0.5;
        }
    }

    #[test]
    fn test_debt_grade_uses_inverted_value() {
        // 15% debt ratio → inverted 85 → Best
        assert_eq!(DEBT_SCALE.classify(100.0 - 15.0), Grade::Best);
        // 70% debt ratio → inverted 30 → Risk
        assert_eq!(DEBT_SCALE.classify(100.0 - 70.0), Grade::Risk);
    }

    #[test]
    fn test_zero_debt_grades_best() {
        let report = grade_metrics(&compute_metrics(&NormalizedModel::default()));
        assert_eq!(report.debt, Grade::Best);
    }

    #[test]
    fn test_composite_grade_from_mean_score() {
        let report = grade_metrics(&compute_metrics(&NormalizedModel::default()));

        // Empty household: debt Best (100), everything else Risk (25)
        assert_eq!(report.overall_score, 40.0);
        assert_eq!(report.overall, Grade::Caution);
    }

    #[test]
    fn test_grade_serializes_self_contained() {
        let json = serde_json::to_value(Grade::Caution).unwrap();
        assert_eq!(json["code"], "C");
        assert_eq!(json["label"], "주의");
        assert!(json["color"].as_str().unwrap().starts_with('#'));
    }
}
