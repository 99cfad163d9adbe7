//! tally - Personal budget and savings-goal engine
//!
//! This library provides the aggregation core for a personal finance
//! application: an income/expense ledger with per-category monthly budget
//! limits, savings goals with derived progress state, and read-side reports
//! over calendar-month windows. It exposes structured values only; rendering
//! and interaction belong to the embedding application.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, limits, goals, money, months)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (budget and goal services)
//! - `reports`: Stateless read-side reports and time series
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::TallyPaths;
//! use tally::services::BudgetService;
//! use tally::storage::LedgerStore;
//!
//! let store = LedgerStore::open(TallyPaths::new()?)?;
//! store.load_all()?;
//! let budget = BudgetService::new(&store);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
