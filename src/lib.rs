//! Stock Price Dashboard - per-company closing prices, comparison and
//! forecast overlay from local CSV files.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod gui;
pub mod stats;

pub use dashboard::{render, DashboardView, Selection};
pub use error::{DashboardError, Result};
