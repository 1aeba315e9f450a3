//! Tax Engine
//!
//! Core calculator for the Indian income-tax regime choice: compares the
//! old and new regime slab schedules for a taxpayer and generates
//! deduction-headroom suggestions for old-regime filers.

pub mod advisor;
pub mod currency;
pub mod deductions;
pub mod input;
pub mod regime;
pub mod slabs;

pub use advisor::{AdviceOutcome, RegimeNotice, Suggestion, SuggestionEngine, TaxReport};
pub use currency::format_inr;
pub use deductions::{DeductionAnalysis, Section, SectionUsage, TaxYearRules};
pub use input::{Regime, TaxInput};
pub use regime::{RegimeComparator, RegimeRecommendation};
pub use slabs::{SlabBand, SlabSchedule};
