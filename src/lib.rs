//! Fieldbudget - field-trip cost template generator
//!
//! Builds a six-sheet Excel workbook for budgeting a single research field
//! trip: centralized rates bound to defined names, participant per-diems and
//! overnights, hour-based student-assistant wages, travel and material
//! ledgers, and a summary with a centrally computed shuttle cost. All
//! arithmetic lives in generated formulas; editing a rate in the produced
//! file recalculates every dependent total.
//!
//! # Example
//!
//! ```no_run
//! use fieldbudget::excel::TemplateBuilder;
//! use fieldbudget::rates::RateRegistry;
//! use std::path::Path;
//!
//! let mut registry = RateRegistry::with_defaults();
//! registry.set_value(fieldbudget::rates::PER_DIEM, 28.0)?;
//!
//! let builder = TemplateBuilder::new(registry);
//! builder.save(Path::new("output/fieldtrip-cost-template.xlsx"))?;
//! # Ok::<(), fieldbudget::error::BudgetError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod rates;
pub mod types;

// Re-export commonly used types
pub use error::{BudgetError, BudgetResult};
pub use excel::TemplateBuilder;
pub use rates::{RateOverrides, RateParameter, RateRegistry};
pub use types::{MaterialCategory, Role, TransportType};
