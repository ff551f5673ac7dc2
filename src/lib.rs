pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use config::PlannerConfig;
pub use error::{FuelError, Result};
pub use models::{BarData, BarSegment, Nutrient, Product};
