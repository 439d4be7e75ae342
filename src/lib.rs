//! Synthetic retail/brand hierarchy dataset generator.
//!
//! Records draw five hierarchy labels (portfolio, geography, category, brand, segment),
//! sample initial sales and margin, and carry trend/contribution bounds resolved through
//! a global -> portfolio -> brand override chain.
//!
//! ```
//! use acme_synth::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::acme();
//! let rows = generate(&config, 100, 42);
//! assert_eq!(rows.len(), 100);
//! assert_eq!(rows, generate(&config, 100, 42));
//! ```

pub mod cli;
pub mod config;
pub mod constraints;
pub mod export;
pub mod generator;
pub mod logging;
pub mod parallel;
pub mod server;

pub use config::{load_config, ConfigError, GeneratorConfig, GlobalDefaults, HierarchyCatalog, IntRange};
pub use constraints::{resolve, ConfigLayer, ConstraintSet, PartialConstraintSet, Percent};
pub use generator::{generate, Generator, RandomSource, Record, Rng};
