//! Old-vs-new regime comparison.

use crate::deductions::TaxYearRules;
use crate::input::TaxInput;
use crate::slabs::SlabSchedule;
use serde::{Deserialize, Serialize};

/// Which regime to file under, with the computed liability on each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeRecommendation {
    pub regime: String,
    pub reason: String,
    /// Cess-inclusive old-regime liability, rounded to the rupee.
    pub old_tax: f64,
    /// Cess-inclusive new-regime liability, rounded to the rupee.
    pub new_tax: f64,
}

/// Computes liability under both regimes and picks the cheaper one.
pub struct RegimeComparator {
    rules: TaxYearRules,
    old_schedule: SlabSchedule,
    new_schedule: SlabSchedule,
}

impl RegimeComparator {
    pub fn new() -> Self {
        Self::with_rules(TaxYearRules::default())
    }

    pub fn with_rules(rules: TaxYearRules) -> Self {
        Self {
            rules,
            old_schedule: SlabSchedule::old_regime(),
            new_schedule: SlabSchedule::new_regime(),
        }
    }

    /// Compare both regimes for the given profile. Never fails: missing
    /// input fields have already coerced to zero.
    pub fn recommend(&self, input: &TaxInput) -> RegimeRecommendation {
        let total_income = input.salary + input.capital_gains;
        // Claimed deductions are taken at face value here; capping
        // belongs to the suggestion path.
        let total_deductions =
            input.deductions_80c + input.deductions_80d + input.home_loan_interest;

        let old_taxable =
            (total_income - total_deductions - self.rules.standard_deduction).max(0.0);
        let new_taxable = (total_income - self.rules.standard_deduction).max(0.0);

        let old_tax = self.old_schedule.tax_with_cess(old_taxable);
        let new_tax = self.new_schedule.tax_with_cess(new_taxable);

        // Strict comparison on unrounded values; a tie goes new.
        let (regime, reason) = if old_tax < new_tax {
            (
                "Old Regime",
                "Old Regime saves you more tax based on your deductions.",
            )
        } else {
            (
                "New Regime",
                "New Regime saves you more tax or you have few deductions.",
            )
        };

        RegimeRecommendation {
            regime: regime.to_string(),
            reason: reason.to_string(),
            old_tax: old_tax.round(),
            new_tax: new_tax.round(),
        }
    }
}

impl Default for RegimeComparator {
    fn default() -> Self {
        Self::new()
    }
}
