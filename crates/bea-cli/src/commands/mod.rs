// Command modules for CLI

/// Operator application
pub mod combine;

/// Catalog listings
pub mod catalog;
