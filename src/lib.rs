// ==========================================
// Vegetation Cut - core library
// ==========================================
// Cut status, staleness color and cut priority per area
// Stack: Rust + SQLite (configuration) + CSV/Excel input
// ==========================================

// Localization
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// Modules
// ==========================================

// Domain - entities and value types
pub mod domain;

// Engine - pure derivation rules
pub mod engine;

// Importer - cut date files
pub mod importer;

// Export - CSV reports and templates
pub mod export;

// Configuration
pub mod config;

// Repository - data access
pub mod repository;

// Database setup (connection PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// Localization helpers
pub mod i18n;

// API - operations exposed to the CLI
pub mod api;

// Application wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{CutStatus, Machine, Period};

pub use domain::{
    AreaConfig, ColorScale, CutRecord, DashboardConfig, DerivedStatus, HistoryReport, HistoryRow,
    LegendEntry, PriorityReport, PriorityRow, SeasonCalendar, UncutArea,
};

pub use engine::{PrioritySorter, ReportBuilder, StatusEngine};

pub use importer::{CutImportReport, CutImporter, RejectReason};

pub use api::{ApiError, ConfigApi, DashboardApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Vegetation Cut";
