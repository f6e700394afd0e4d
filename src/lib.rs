//! Aggregation core of the teacher-evaluation dashboard.
//!
//! A UI picks a metric (`pj_pf`, `pj_ecep`) and a grouping (`dependencia`,
//! `nivel`, `sexo`, `rural`, `grupo_edad`); [`aggregator::chart_for`] turns
//! that pair into a [`chart::ChartSpecification`] of per-category means.
//!
//! ```no_run
//! use docente_dash::{aggregator::chart_for, dataset};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = dataset::load_global(Path::new("data/dash_docentes_2023.csv"))?;
//!     let chart = chart_for(data, "pj_ecep", "rural")?;
//!     for point in &chart.points {
//!         println!("{} => {:.2}", point.category, point.value);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod chart;
pub mod config;
pub mod csv_reader;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod keys;
pub mod logging;
pub mod resolver;
pub mod terminal;
pub mod ui;

pub use error::{DashboardError, Result};
