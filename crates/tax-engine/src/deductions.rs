//! Statutory deduction caps and per-section utilization analysis.

use crate::input::TaxInput;
use serde::{Deserialize, Serialize};

/// Statutory figures for one assessment year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxYearRules {
    /// Flat deduction applied to gross income before slab computation.
    pub standard_deduction: f64,
    /// §80C investment cap.
    pub cap_80c: f64,
    /// §80D health-insurance cap below the senior-citizen threshold.
    pub cap_80d: f64,
    /// §80D cap at or above the senior-citizen threshold.
    pub cap_80d_senior: f64,
    /// Age at which the senior §80D cap applies.
    pub senior_age: u32,
    /// §24(b) home-loan-interest cap for a self-occupied property.
    pub cap_24b_self_occupied: f64,
    /// Flat additional NPS allowance under §80CCD(1B).
    pub allowance_80ccd1b: f64,
    /// §87A rebate: taxable income at or below this pays zero tax.
    pub rebate_threshold: f64,
}

impl TaxYearRules {
    /// Figures for FY 2023-24 (AY 2024-25).
    pub fn fy_2023_24() -> Self {
        Self {
            standard_deduction: 50_000.0,
            cap_80c: 150_000.0,
            cap_80d: 50_000.0,
            cap_80d_senior: 75_000.0,
            senior_age: 60,
            cap_24b_self_occupied: 200_000.0,
            allowance_80ccd1b: 50_000.0,
            rebate_threshold: 500_000.0,
        }
    }

    /// §80D cap for the taxpayer's age.
    pub fn cap_80d_for_age(&self, age: u32) -> f64 {
        if age >= self.senior_age {
            self.cap_80d_senior
        } else {
            self.cap_80d
        }
    }
}

impl Default for TaxYearRules {
    fn default() -> Self {
        Self::fy_2023_24()
    }
}

/// Named deduction sections, in suggestion priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Section 80C")]
    Sec80C,
    #[serde(rename = "Section 80CCD(1B)")]
    Sec80Ccd1b,
    #[serde(rename = "Section 80D")]
    Sec80D,
    #[serde(rename = "Section 24(b)")]
    Sec24b,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Sec80C => write!(f, "Section 80C"),
            Section::Sec80Ccd1b => write!(f, "Section 80CCD(1B)"),
            Section::Sec80D => write!(f, "Section 80D"),
            Section::Sec24b => write!(f, "Section 24(b)"),
        }
    }
}

/// Utilization of a single capped section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionUsage {
    /// Amount counted against taxable income.
    pub applied: f64,
    /// Unused headroom against the statutory cap.
    pub gap: f64,
}

impl SectionUsage {
    fn capped(claimed: f64, cap: f64) -> Self {
        Self {
            applied: claimed.min(cap),
            gap: (cap - claimed).max(0.0),
        }
    }
}

/// Per-section utilization for one taxpayer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionAnalysis {
    pub sec_80c: SectionUsage,
    pub sec_80d: SectionUsage,
    pub sec_24b: SectionUsage,
}

impl DeductionAnalysis {
    /// Cap each claimed amount and measure the remaining headroom.
    pub fn from_input(rules: &TaxYearRules, input: &TaxInput) -> Self {
        let sec_80c = SectionUsage::capped(input.deductions_80c, rules.cap_80c);
        let sec_80d =
            SectionUsage::capped(input.deductions_80d, rules.cap_80d_for_age(input.age));

        // Let-out and deemed let-out property interest is deductible in
        // full; the cap applies only when self-occupied. Headroom is
        // always measured against the self-occupied cap.
        let applied_24b = if input.multiple_properties {
            input.home_loan_interest
        } else {
            input.home_loan_interest.min(rules.cap_24b_self_occupied)
        };
        let sec_24b = SectionUsage {
            applied: applied_24b,
            gap: (rules.cap_24b_self_occupied - input.home_loan_interest).max(0.0),
        };

        Self {
            sec_80c,
            sec_80d,
            sec_24b,
        }
    }

    /// Sum of applied itemized deductions (standard deduction excluded).
    pub fn total_applied(&self) -> f64 {
        self.sec_80c.applied + self.sec_80d.applied + self.sec_24b.applied
    }

    /// Sum of every headroom bucket, including the flat §80CCD(1B)
    /// allowance, which is always available on top of §80C.
    pub fn total_headroom(&self, rules: &TaxYearRules) -> f64 {
        self.sec_80c.gap + self.sec_80d.gap + self.sec_24b.gap + rules.allowance_80ccd1b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_applied_plus_gap_equals_cap() {
        let rules = TaxYearRules::default();
        let input = TaxInput {
            deductions_80c: 60_000.0,
            deductions_80d: 10_000.0,
            home_loan_interest: 120_000.0,
            age: 30,
            ..Default::default()
        };
        let analysis = DeductionAnalysis::from_input(&rules, &input);

        assert!(close(analysis.sec_80c.applied + analysis.sec_80c.gap, rules.cap_80c));
        assert!(close(analysis.sec_80d.applied + analysis.sec_80d.gap, rules.cap_80d));
        assert!(close(
            analysis.sec_24b.applied + analysis.sec_24b.gap,
            rules.cap_24b_self_occupied
        ));
    }

    #[test]
    fn test_claims_over_cap_are_clamped() {
        let rules = TaxYearRules::default();
        let input = TaxInput {
            deductions_80c: 500_000.0,
            ..Default::default()
        };
        let analysis = DeductionAnalysis::from_input(&rules, &input);
        assert!(close(analysis.sec_80c.applied, 150_000.0));
        assert_eq!(analysis.sec_80c.gap, 0.0);
    }

    #[test]
    fn test_senior_citizen_80d_cap() {
        let rules = TaxYearRules::default();
        assert!(close(rules.cap_80d_for_age(59), 50_000.0));
        assert!(close(rules.cap_80d_for_age(60), 75_000.0));
        assert!(close(rules.cap_80d_for_age(75), 75_000.0));
    }

    #[test]
    fn test_multiple_properties_interest_uncapped() {
        let rules = TaxYearRules::default();
        let input = TaxInput {
            home_loan_interest: 350_000.0,
            multiple_properties: true,
            ..Default::default()
        };
        let analysis = DeductionAnalysis::from_input(&rules, &input);
        assert!(close(analysis.sec_24b.applied, 350_000.0));
        assert_eq!(analysis.sec_24b.gap, 0.0);
    }

    #[test]
    fn test_self_occupied_interest_capped() {
        let rules = TaxYearRules::default();
        let input = TaxInput {
            home_loan_interest: 350_000.0,
            multiple_properties: false,
            ..Default::default()
        };
        let analysis = DeductionAnalysis::from_input(&rules, &input);
        assert!(close(analysis.sec_24b.applied, 200_000.0));
        assert_eq!(analysis.sec_24b.gap, 0.0);
    }

    #[test]
    fn test_total_headroom_includes_nps_allowance() {
        let rules = TaxYearRules::default();
        let input = TaxInput::default();
        let analysis = DeductionAnalysis::from_input(&rules, &input);
        // 150k + 50k + 200k + the flat 50k NPS bucket.
        assert!(close(analysis.total_headroom(&rules), 450_000.0));
    }
}
