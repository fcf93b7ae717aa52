//! Rate parameter registry.
//!
//! All rates the generated formulas depend on live in one ordered registry.
//! Each entry becomes one row on the "Inputs & Rates" sheet and one
//! workbook-level defined name, so downstream formulas reference rates
//! symbolically and a single edit in the generated file recalculates every
//! dependent cell.
//!
//! The registry is resolved once at build time (defaults, then optional
//! overrides) and handed to the sheet builders as an immutable value.

use crate::error::{BudgetError, BudgetResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// Defined names referenced by the generated formulas.
pub const PER_DIEM: &str = "PER_DIEM";
pub const SHUTTLE_BASE: &str = "SHUTTLE_BASE";
pub const SHUTTLE_CAR_COUNT: &str = "SHUTTLE_CAR_COUNT";
pub const TOTAL_KM: &str = "TOTAL_KM";
pub const SHUTTLE_PER_KM: &str = "SHUTTLE_PER_KM";
pub const SHUTTLE_LUMPSUM: &str = "SHUTTLE_LUMPSUM";
pub const OVERNIGHT_DEFAULT: &str = "OVERNIGHT_DEFAULT";
pub const HIWI_RATE: &str = "HIWI_RATE";

/// A single named rate: one row on the Inputs & Rates sheet
#[derive(Debug, Clone, PartialEq)]
pub struct RateParameter {
    /// Workbook defined name (e.g. `PER_DIEM`)
    pub name: String,
    /// Row label shown in the Item column
    pub label: String,
    pub value: f64,
    /// Guidance shown in the Notes column
    pub note: String,
    /// Whether the value cell gets the currency number format
    pub currency: bool,
}

impl RateParameter {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        value: f64,
        note: impl Into<String>,
        currency: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value,
            note: note.into(),
            currency,
        }
    }
}

/// Flat `NAME: value` mapping accepted by override files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateOverrides(pub BTreeMap<String, f64>);

/// Ordered collection of rate parameters with last-write-wins inserts
#[derive(Debug, Clone, Default)]
pub struct RateRegistry {
    entries: Vec<RateParameter>,
}

impl RateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the planning defaults.
    ///
    /// Entry order is sheet order: the first entry lands on row 2 of
    /// "Inputs & Rates", directly under the header.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(RateParameter::new(
            PER_DIEM,
            "Per diem - full day (domestic)",
            24.0,
            "Defaults to EUR 24 per full day",
            true,
        ));
        registry.insert(RateParameter::new(
            SHUTTLE_BASE,
            "Shuttle base rate (per car)",
            150.0,
            "Average base rate in EUR for one shared rental car",
            true,
        ));
        registry.insert(RateParameter::new(
            SHUTTLE_CAR_COUNT,
            "Number of shuttle cars",
            1.0,
            "Number of shared rental cars for the trip",
            false,
        ));
        registry.insert(RateParameter::new(
            TOTAL_KM,
            "Total trip kilometers",
            100.0,
            "Sum of all kilometers across all cars",
            false,
        ));
        registry.insert(RateParameter::new(
            SHUTTLE_PER_KM,
            "Shuttle per-km cost (incl. fuel)",
            0.35,
            "Planning value; adjust to the provider rate for the booked cars",
            true,
        ));
        registry.insert(RateParameter::new(
            SHUTTLE_LUMPSUM,
            "Shuttle lump sum override",
            0.0,
            "Enter a flat EUR total for all shuttle rentals; overrides the computed cost when > 0",
            true,
        ));
        registry.insert(RateParameter::new(
            OVERNIGHT_DEFAULT,
            "Default overnight cost per night",
            95.0,
            "Planning cap or expected average incl. taxes; edit per trip",
            true,
        ));
        registry.insert(RateParameter::new(
            HIWI_RATE,
            "Hiwi hourly rate (default)",
            20.0,
            "Accounts for future wage raises",
            true,
        ));
        registry
    }

    /// Insert a parameter. Redefining an existing name replaces the prior
    /// definition in place (same sheet row), never creates a duplicate.
    pub fn insert(&mut self, param: RateParameter) {
        match self.entries.iter_mut().find(|e| e.name == param.name) {
            Some(existing) => *existing = param,
            None => self.entries.push(param),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RateParameter> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Update the value of an existing parameter
    pub fn set_value(&mut self, name: &str, value: f64) -> BudgetResult<()> {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.value = value;
                Ok(())
            }
            None => Err(BudgetError::Validation(format!(
                "unknown rate parameter '{}' (known: {})",
                name,
                self.names().join(", ")
            ))),
        }
    }

    /// Apply a YAML override file: a flat `NAME: value` mapping.
    ///
    /// Unknown names are rejected so a typo cannot silently leave a default
    /// in place. Returns the number of overridden parameters.
    pub fn apply_overrides_file(&mut self, path: &Path) -> BudgetResult<usize> {
        let content = fs::read_to_string(path)?;
        let overrides: RateOverrides = serde_yaml::from_str(&content)?;

        let unknown: Vec<&str> = overrides
            .0
            .keys()
            .filter(|name| self.get(name).is_none())
            .map(|name| name.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(BudgetError::Validation(format!(
                "unknown rate parameter(s) in {}: {} (known: {})",
                path.display(),
                unknown.join(", "),
                self.names().join(", ")
            )));
        }

        for (name, value) in &overrides.0 {
            self.set_value(name, *value)?;
        }
        Ok(overrides.0.len())
    }

    /// Ready-to-edit override file content listing every rate at its
    /// current value, in sheet order
    pub fn overrides_template(&self) -> BudgetResult<String> {
        let mut mapping = serde_yaml::Mapping::new();
        for param in &self.entries {
            mapping.insert(
                serde_yaml::Value::String(param.name.clone()),
                serde_yaml::Value::Number(param.value.into()),
            );
        }
        Ok(serde_yaml::to_string(&mapping)?)
    }

    /// Parameters in sheet order
    pub fn entries(&self) -> &[RateParameter] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
