//! Synthetic record generation.
//!
//! Per record, random words are consumed in a fixed order: portfolio, geography,
//! category, brand, segment, then margin, then initial sales. Constraint resolution
//! consumes nothing. The same seed therefore always yields the same sequence.

pub mod rng;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::constraints::{ConstraintSet, Percent};

pub use rng::{mix64, RandomSource, Rng};

/// Row count used when the caller does not specify one.
pub const DEFAULT_ROWS: usize = 1000;
/// Seed used when the caller does not specify one, so default runs are reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Output column names, in output order.
pub const COLUMNS: [&str; 11] = [
    "Portfolio",
    "Geography",
    "Category",
    "Brand",
    "Segment",
    "Initial_Sales",
    "Margin",
    "Min_Trend",
    "Max_Trend",
    "Min_Contribution",
    "Max_Contribution",
];

/// One generated row. Field order matches [COLUMNS].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Portfolio")]
    pub portfolio: String,
    #[serde(rename = "Geography")]
    pub geography: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "Initial_Sales")]
    pub initial_sales: i64,
    #[serde(rename = "Margin")]
    pub margin: i64,
    #[serde(rename = "Min_Trend")]
    pub min_trend: Percent,
    #[serde(rename = "Max_Trend")]
    pub max_trend: Percent,
    #[serde(rename = "Min_Contribution")]
    pub min_contribution: Percent,
    #[serde(rename = "Max_Contribution")]
    pub max_contribution: Percent,
}

impl Record {
    pub fn constraints(&self) -> ConstraintSet {
        ConstraintSet {
            min_trend: self.min_trend,
            max_trend: self.max_trend,
            min_contribution: self.min_contribution,
            max_contribution: self.max_contribution,
        }
    }

    /// Cell values as display strings, in [COLUMNS] order.
    pub fn cells(&self) -> [String; 11] {
        [
            self.portfolio.clone(),
            self.geography.clone(),
            self.category.clone(),
            self.brand.clone(),
            self.segment.clone(),
            self.initial_sales.to_string(),
            self.margin.to_string(),
            self.min_trend.to_string(),
            self.max_trend.to_string(),
            self.min_contribution.to_string(),
            self.max_contribution.to_string(),
        ]
    }
}

/// Draws records against a validated, read-only configuration.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// `config` must have passed [GeneratorConfig::validate]; catalogs must be non-empty
    /// and ranges ordered.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Draw one record from `rng`.
    pub fn next_record<R: RandomSource>(&self, rng: &mut R) -> Record {
        let hierarchy = &self.config.hierarchy;
        let portfolio = rng.choose(&hierarchy.portfolios);
        let geography = rng.choose(&hierarchy.geographies);
        let category = rng.choose(&hierarchy.categories);
        let brand = rng.choose(&hierarchy.brands);
        let segment = rng.choose(&hierarchy.segments);

        let constraints = self.config.resolve(portfolio, brand);

        let margin_range = self.config.global.margin_range;
        let margin = rng.range_inclusive(margin_range.low, margin_range.high);
        let sales_range = self.config.global.sales_range;
        let initial_sales = rng.range_inclusive(sales_range.low, sales_range.high);

        Record {
            portfolio: portfolio.clone(),
            geography: geography.clone(),
            category: category.clone(),
            brand: brand.clone(),
            segment: segment.clone(),
            initial_sales,
            margin,
            min_trend: constraints.min_trend,
            max_trend: constraints.max_trend,
            min_contribution: constraints.min_contribution,
            max_contribution: constraints.max_contribution,
        }
    }

    /// Lazy sequence of `count` records from a fresh generator seeded with `seed`.
    pub fn records(&self, count: usize, seed: u64) -> Records<'a, Rng> {
        self.records_with(count, Rng::new(seed))
    }

    /// Lazy sequence of `count` records drawn from an injected random source.
    pub fn records_with<R: RandomSource>(&self, count: usize, rng: R) -> Records<'a, R> {
        Records {
            generator: *self,
            rng,
            remaining: count,
        }
    }

    /// Eagerly generate `count` records. `count == 0` yields an empty vector.
    pub fn generate(&self, count: usize, seed: u64) -> Vec<Record> {
        tracing::debug!(count, seed, "generating records");
        self.records(count, seed).collect()
    }

    /// Eagerly generate `count` records from an injected random source.
    pub fn generate_with<R: RandomSource>(&self, count: usize, rng: &mut R) -> Vec<Record> {
        (0..count).map(|_| self.next_record(rng)).collect()
    }
}

/// Iterator returned by [Generator::records]. Restartable by constructing a new one with
/// the same seed.
#[derive(Debug, Clone)]
pub struct Records<'a, R> {
    generator: Generator<'a>,
    rng: R,
    remaining: usize,
}

impl<R: RandomSource> Iterator for Records<'_, R> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.next_record(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: RandomSource> ExactSizeIterator for Records<'_, R> {}

/// Convenience: generate `count` records for `config` with `seed`.
pub fn generate(config: &GeneratorConfig, count: usize, seed: u64) -> Vec<Record> {
    Generator::new(config).generate(count, seed)
}
