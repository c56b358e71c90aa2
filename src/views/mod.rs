//! View panels shown in the central area.

mod calculator;
mod plan;

pub use calculator::CalculatorView;
pub use plan::{PlanState, PlanTab, PlanView};
