//! Deduction-headroom advisor for old-regime filers.
//!
//! Computes the current liability, then estimates what the taxpayer
//! could save by filling every unused deduction bucket.

use crate::currency::format_inr;
use crate::deductions::{DeductionAnalysis, Section, TaxYearRules};
use crate::input::{Regime, TaxInput};
use crate::slabs::SlabSchedule;
use serde::{Deserialize, Serialize};

const NEW_REGIME_NOTICE: &str = "The New Tax Regime has been selected. It offers lower \
    slab rates but generally disallows 80C/80D/24(b) deductions, so no further \
    tax-saving suggestions on investment are applicable.";

/// One actionable suggestion for an under-utilized section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub section: Section,
    /// Headroom the taxpayer can still deduct under this section.
    pub amount: f64,
    pub message: String,
}

/// Advisory output for an old-regime taxpayer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxReport {
    pub gross_total_income: f64,
    pub net_taxable_income: f64,
    pub tax_payable: f64,
    /// Insertion order is priority order: 80C, 80CCD(1B), 80D, 24(b).
    pub suggestions: Vec<Suggestion>,
    pub potential_savings: f64,
    pub net_taxable_income_post_suggestion: f64,
    pub tax_payable_post_suggestion: f64,
}

/// Fixed notice returned when the new regime is selected. Wire-shaped
/// like an error record, but it is a designed outcome, not a fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeNotice {
    pub error: bool,
    pub message: String,
}

/// Outcome of an advisory request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdviceOutcome {
    Report(TaxReport),
    NotApplicable(RegimeNotice),
}

impl AdviceOutcome {
    pub fn report(&self) -> Option<&TaxReport> {
        match self {
            AdviceOutcome::Report(report) => Some(report),
            AdviceOutcome::NotApplicable(_) => None,
        }
    }
}

/// Generates prioritized deduction suggestions under old-regime rules.
pub struct SuggestionEngine {
    rules: TaxYearRules,
    schedule: SlabSchedule,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::with_rules(TaxYearRules::default())
    }

    pub fn with_rules(rules: TaxYearRules) -> Self {
        Self {
            rules,
            schedule: SlabSchedule::old_regime(),
        }
    }

    pub fn rules(&self) -> &TaxYearRules {
        &self.rules
    }

    /// Old-regime slab tax with the §87A rebate: taxable income at or
    /// below the threshold pays nothing. Rounded to the rupee.
    fn tax_payable_on(&self, taxable_income: f64) -> f64 {
        if taxable_income <= self.rules.rebate_threshold {
            return 0.0;
        }
        self.schedule.tax_with_cess(taxable_income).round()
    }

    /// Compute the current liability and the best achievable outcome if
    /// every suggested headroom bucket is fully used.
    pub fn advise(&self, input: &TaxInput) -> AdviceOutcome {
        if input.regime == Regime::New {
            return AdviceOutcome::NotApplicable(RegimeNotice {
                error: true,
                message: NEW_REGIME_NOTICE.to_string(),
            });
        }

        let gross_total_income = input.salary + input.capital_gains;
        let analysis = DeductionAnalysis::from_input(&self.rules, input);

        let total_deductions = self.rules.standard_deduction + analysis.total_applied();
        let net_taxable_income = (gross_total_income - total_deductions).max(0.0);
        let tax_payable = self.tax_payable_on(net_taxable_income);

        let suggestions = self.build_suggestions(input, &analysis);

        // Best case: every headroom bucket on top of what is claimed.
        let max_deductions = total_deductions + analysis.total_headroom(&self.rules);
        let net_taxable_post = (gross_total_income - max_deductions).max(0.0);
        let tax_payable_post = self.tax_payable_on(net_taxable_post);

        AdviceOutcome::Report(TaxReport {
            gross_total_income,
            net_taxable_income,
            tax_payable,
            suggestions,
            potential_savings: tax_payable - tax_payable_post,
            net_taxable_income_post_suggestion: net_taxable_post,
            tax_payable_post_suggestion: tax_payable_post,
        })
    }

    fn build_suggestions(
        &self,
        input: &TaxInput,
        analysis: &DeductionAnalysis,
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        if analysis.sec_80c.gap > 0.0 {
            let (risk_profile, instrument) = if input.age < 35 {
                (
                    "growth",
                    "Equity Linked Savings Schemes (ELSS) for market-linked returns",
                )
            } else {
                (
                    "capital-preservation",
                    "Public Provident Fund (PPF) or tax-saving fixed deposits",
                )
            };
            suggestions.push(Suggestion {
                section: Section::Sec80C,
                amount: analysis.sec_80c.gap,
                message: format!(
                    "You can deduct up to {} more by fully utilizing your 80C limit. \
                     Recommended {} investment: {}.",
                    format_inr(analysis.sec_80c.gap),
                    risk_profile,
                    instrument
                ),
            });
        }

        // The NPS bucket sits outside 80C and is always worth claiming.
        suggestions.push(Suggestion {
            section: Section::Sec80Ccd1b,
            amount: self.rules.allowance_80ccd1b,
            message: format!(
                "You can claim an additional deduction of {} outside the 80C limit by \
                 contributing to the National Pension System (NPS).",
                format_inr(self.rules.allowance_80ccd1b)
            ),
        });

        if analysis.sec_80d.gap > 0.0 {
            suggestions.push(Suggestion {
                section: Section::Sec80D,
                amount: analysis.sec_80d.gap,
                message: format!(
                    "Your Section 80D limit for health insurance is under-utilized. You \
                     can claim up to {} more by buying or increasing cover on a medical \
                     insurance policy.",
                    format_inr(analysis.sec_80d.gap)
                ),
            });
        }

        if !input.multiple_properties
            && analysis.sec_24b.gap > 0.0
            && input.home_loan_interest < self.rules.cap_24b_self_occupied
        {
            suggestions.push(Suggestion {
                section: Section::Sec24b,
                amount: analysis.sec_24b.gap,
                message: format!(
                    "You can claim up to {} on home loan interest for a self-occupied \
                     property. Ensure you fully utilize this deduction.",
                    format_inr(self.rules.cap_24b_self_occupied)
                ),
            });
        }

        suggestions
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}
