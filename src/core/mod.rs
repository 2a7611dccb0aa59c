//! Core business logic - framework-agnostic objective, milestone, transaction,
//! document and dashboard operations shared by the screens and the command line.

/// Currencies, static exchange rates and pt-BR money formatting
pub mod currency;
/// Dashboard progress and expense breakdown
pub mod dashboard;
/// Document metadata records
pub mod document;
/// Milestone persistence
pub mod milestone;
/// Objective creation and lookup
pub mod objective;
/// Case-insensitive list search
pub mod search;
/// Placeholder data for a fresh database
pub mod seed;
/// Income and expense records
pub mod transaction;
