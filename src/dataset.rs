use std::borrow::Cow;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use tracing::info;

use crate::csv_reader::{read_data, Record};
use crate::error::{DashboardError, Result};
use crate::keys::MetricKey;

const CATEGORY_COLUMNS: &'static [&'static str] =
    &["dependencia", "nivel", "sexo", "rural", "grupo_edad"];

static DATASET: OnceCell<Dataset> = OnceCell::new();

/// Evaluation table, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let records = read_data(path)?;
        info!(path = %path.display(), rows = records.len(), "loaded evaluation dataset");
        Ok(Dataset::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of a categorical column as text. Coded columns yield their raw codes.
    pub fn category_column(&self, name: &str) -> Option<Vec<Option<Cow<'_, str>>>> {
        match name {
            "dependencia" | "nivel" | "grupo_edad" => Some(
                self.records
                    .iter()
                    .map(|r| r.text_field(name).map(Cow::Borrowed))
                    .collect(),
            ),
            "sexo" | "rural" => Some(
                self.records
                    .iter()
                    .map(|r| r.code_field(name).map(|c| Cow::Owned(c.to_string())))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn metric_values(&self, metric: MetricKey) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(move |r| match metric {
            MetricKey::Portfolio => r.pj_pf,
            MetricKey::KnowledgeTest => r.pj_ecep,
        })
    }
}

/// Installs the process-wide dataset. Fails if one is already installed.
pub fn install_global(dataset: Dataset) -> Result<&'static Dataset> {
    DATASET
        .set(dataset)
        .map_err(|_| DashboardError::DatasetAlreadyLoaded)?;
    global()
}

pub fn load_global(path: &Path) -> Result<&'static Dataset> {
    install_global(Dataset::load(path)?)
}

pub fn global() -> Result<&'static Dataset> {
    DATASET.get().ok_or(DashboardError::DatasetNotLoaded)
}

/// Read-only view over a [`Dataset`] with extra label columns layered on top.
#[derive(Debug, Clone)]
pub struct WorkingDataset<'a> {
    base: &'a Dataset,
    derived: IndexMap<String, Vec<Option<&'static str>>>,
}

impl<'a> WorkingDataset<'a> {
    pub fn new(base: &'a Dataset) -> Self {
        WorkingDataset {
            base,
            derived: IndexMap::new(),
        }
    }

    pub fn with_column(mut self, name: &str, labels: Vec<Option<&'static str>>) -> Self {
        debug_assert_eq!(labels.len(), self.base.len());
        self.derived.insert(name.to_string(), labels);
        self
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.derived.contains_key(name) || CATEGORY_COLUMNS.iter().any(|c| *c == name)
    }

    pub fn derived_columns(&self) -> impl Iterator<Item = &str> {
        self.derived.keys().map(String::as_str)
    }

    /// Category labels for `name`, derived columns taking precedence.
    pub fn labels(&self, name: &str) -> Result<Vec<Option<Cow<'a, str>>>> {
        if let Some(labels) = self.derived.get(name) {
            return Ok(labels.iter().map(|l| l.map(Cow::Borrowed)).collect());
        }
        self.base
            .category_column(name)
            .ok_or_else(|| DashboardError::UnknownColumn(name.to_string()))
    }

    pub fn metric_values(&self, metric: MetricKey) -> impl Iterator<Item = Option<f64>> + 'a {
        self.base.metric_values(metric)
    }
}
