use std::borrow::Cow;

use indexmap::IndexMap;
use tracing::debug;

use crate::chart::{ChartPoint, ChartSpecification};
use crate::dataset::{Dataset, WorkingDataset};
use crate::error::{DashboardError, Result};
use crate::keys::MetricKey;
use crate::resolver::resolve;

/// Bucket for rows whose category label is missing or unmapped.
pub const MISSING_CATEGORY: &'static str = "Sin dato";

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Averages `metric` per distinct label of `column`, in first-seen order.
///
/// Rows with a missing metric are skipped. A category whose rows are all
/// missing emits no point and is listed in `empty_categories` instead.
pub fn aggregate(
    working: &WorkingDataset,
    column: &str,
    group_label: &str,
    metric: MetricKey,
) -> Result<ChartSpecification> {
    if !working.has_column(column) {
        return Err(DashboardError::UnknownColumn(column.to_string()));
    }
    let labels = working.labels(column)?;

    // missing labels keep their own key so a real "Sin dato" category never merges with them
    let mut groups: IndexMap<Option<Cow<str>>, Accumulator> = IndexMap::new();
    for (label, value) in labels.into_iter().zip(working.metric_values(metric)) {
        let acc = groups.entry(label).or_default();
        if let Some(value) = value {
            acc.sum += value;
            acc.count += 1;
        }
    }

    let mut chart = ChartSpecification::new(metric.label(), group_label);
    for (category, acc) in groups {
        let category = category.unwrap_or(Cow::Borrowed(MISSING_CATEGORY));
        if acc.count == 0 {
            chart.empty_categories.push(category.into_owned());
            continue;
        }
        chart.points.push(ChartPoint {
            category: category.into_owned(),
            value: acc.sum / acc.count as f64,
            count: acc.count,
        });
    }
    debug!(
        metric = metric.key(),
        column,
        points = chart.points.len(),
        empty = chart.empty_categories.len(),
        "aggregated chart"
    );
    Ok(chart)
}

/// Same as [`aggregate`] with the metric given as its selector string.
pub fn aggregate_key(
    working: &WorkingDataset,
    column: &str,
    group_label: &str,
    metric_key: &str,
) -> Result<ChartSpecification> {
    let metric: MetricKey = metric_key.parse()?;
    aggregate(working, column, group_label, metric)
}

/// Full pipeline for one UI interaction: resolve the grouping, then aggregate.
pub fn chart_for(dataset: &Dataset, metric_key: &str, group_key: &str) -> Result<ChartSpecification> {
    let resolution = resolve(dataset, group_key)?;
    aggregate_key(
        &resolution.working,
        &resolution.column,
        resolution.axis_label,
        metric_key,
    )
}
