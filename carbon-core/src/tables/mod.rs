//! Read-only reference tables for species growth and site modifiers.
//!
//! The tables are compiled into the binary and cannot be mutated at runtime.
//! Lookups by typed identifier are total; lookups by name fail with
//! [`SequestrationError::UnknownCategory`](crate::SequestrationError).

mod modifiers;
mod species;

pub use modifiers::{ModifierSet, rainfall_factor, site_quality_factor, soil_factor};
pub use species::{all_species, lookup_species, species_record};
