//! Game-data resolution for Stardew Valley wiki maintenance: load the raw
//! JSON dumps, normalize item identifiers, and cross-reference recipes,
//! shops, crops, and fish into publishable report records.

pub mod config;
pub mod fish;
pub mod ident;
pub mod model;
pub mod recipe;
pub mod report;
pub mod shop;
pub mod store;
pub mod xref;

#[cfg(test)]
pub(crate) mod testutil;
