//! United Runners - running club desktop app.
//!
//! A pace calculator with finish time predictions and an AI coach that
//! writes one-week training plans, plus strength and drill catalogues.

pub mod app;
pub mod calculator;
pub mod coach;
pub mod config;
pub mod training;
pub mod views;

pub use app::{UnitedRunnersApp, View};
pub use calculator::{compute, format_pace, format_speed, format_time, CalculatorInput};
pub use config::AppConfig;
