//! Progressive slab schedules for the two statutory regimes.

use serde::{Deserialize, Serialize};

/// Health and education cess charged on top of slab tax.
pub const CESS_RATE: f64 = 0.04;

/// One progressive band. Income between the previous band's upper bound
/// and `upper` is taxed at `rate`; `None` means unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlabBand {
    pub upper: Option<f64>,
    pub rate: f64,
}

impl SlabBand {
    fn new(upper: f64, rate: f64) -> Self {
        Self {
            upper: Some(upper),
            rate,
        }
    }

    fn open(rate: f64) -> Self {
        Self { upper: None, rate }
    }
}

/// A named slab schedule for one regime and assessment year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabSchedule {
    pub name: String,
    pub bands: Vec<SlabBand>,
    pub cess_rate: f64,
}

impl SlabSchedule {
    /// Old-regime schedule: itemized deductions allowed, four bands.
    pub fn old_regime() -> Self {
        Self {
            name: "Old Regime".to_string(),
            bands: vec![
                SlabBand::new(250_000.0, 0.0),
                SlabBand::new(500_000.0, 0.05),
                SlabBand::new(1_000_000.0, 0.20),
                SlabBand::open(0.30),
            ],
            cess_rate: CESS_RATE,
        }
    }

    /// New-regime schedule: lower rates, six bands, few deductions.
    pub fn new_regime() -> Self {
        Self {
            name: "New Regime".to_string(),
            bands: vec![
                SlabBand::new(300_000.0, 0.0),
                SlabBand::new(600_000.0, 0.05),
                SlabBand::new(900_000.0, 0.10),
                SlabBand::new(1_200_000.0, 0.15),
                SlabBand::new(1_500_000.0, 0.20),
                SlabBand::open(0.30),
            ],
            cess_rate: CESS_RATE,
        }
    }

    /// Marginal tax on `taxable_income`, before cess. Income exactly at
    /// a band edge is taxed at the lower band's rate.
    pub fn slab_tax(&self, taxable_income: f64) -> f64 {
        let mut tax = 0.0;
        let mut lower = 0.0;
        for band in &self.bands {
            if taxable_income <= lower {
                break;
            }
            let upper = band.upper.unwrap_or(f64::INFINITY);
            tax += (taxable_income.min(upper) - lower) * band.rate;
            lower = upper;
        }
        tax
    }

    /// Slab tax with cess applied, unrounded.
    pub fn tax_with_cess(&self, taxable_income: f64) -> f64 {
        self.slab_tax(taxable_income) * (1.0 + self.cess_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_old_regime_exempt_band() {
        let schedule = SlabSchedule::old_regime();
        assert_eq!(schedule.slab_tax(0.0), 0.0);
        assert_eq!(schedule.slab_tax(250_000.0), 0.0);
    }

    #[test]
    fn test_old_regime_band_edges_use_lower_rate() {
        let schedule = SlabSchedule::old_regime();
        // Exactly at the 5% band's top: the whole band at 5%.
        assert!(close(schedule.slab_tax(500_000.0), 12_500.0));
        // One rupee above starts the 20% band.
        assert!(close(schedule.slab_tax(500_001.0), 12_500.20));
        // At the 20% band's top.
        assert!(close(schedule.slab_tax(1_000_000.0), 112_500.0));
    }

    #[test]
    fn test_old_regime_top_band() {
        let schedule = SlabSchedule::old_regime();
        // 1,150,000: 12,500 + 100,000 + 45,000.
        assert!(close(schedule.slab_tax(1_150_000.0), 157_500.0));
    }

    #[test]
    fn test_new_regime_bands() {
        let schedule = SlabSchedule::new_regime();
        assert_eq!(schedule.slab_tax(300_000.0), 0.0);
        assert!(close(schedule.slab_tax(600_000.0), 15_000.0));
        assert!(close(schedule.slab_tax(900_000.0), 45_000.0));
        assert!(close(schedule.slab_tax(1_200_000.0), 90_000.0));
        assert!(close(schedule.slab_tax(1_500_000.0), 150_000.0));
        // 1,150,000: 45,000 + 15% of 250,000.
        assert!(close(schedule.slab_tax(1_150_000.0), 82_500.0));
    }

    #[test]
    fn test_cess_multiplier() {
        let schedule = SlabSchedule::old_regime();
        assert!(close(schedule.tax_with_cess(500_000.0), 13_000.0));
    }
}
