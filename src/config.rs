use std::path::PathBuf;

use clap::Parser;

use crate::error::Result;
use crate::keys::{GroupKey, MetricKey};

pub const DEFAULT_DATA_PATH: &'static str = "./data/dash_docentes_2023.csv";
pub const DEFAULT_LOG_PATH: &'static str = "dashboard.log";

#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard")]
#[command(about = "Evaluación Docente 2023 - Dashboard")]
pub struct Args {
    /// Evaluation CSV, loaded once at startup
    #[arg(long, env = "DASH_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initial metric: pj_pf | pj_ecep
    #[arg(short, long, default_value = "pj_pf")]
    pub metric: String,

    /// Initial grouping: dependencia | nivel | sexo | rural | grupo_edad
    #[arg(short, long, default_value = "nivel")]
    pub group: String,

    /// Print the chart specification as JSON and exit
    #[arg(long)]
    pub export: bool,

    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,

    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    pub fn selection(&self) -> Result<(MetricKey, GroupKey)> {
        Ok((self.metric.parse()?, self.group.parse()?))
    }
}
