use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::aggregator::aggregate;
use crate::chart::ChartSpecification;
use crate::dataset::Dataset;
use crate::keys::{GroupKey, MetricKey};
use crate::resolver::resolve_group;

/// Current selection and the chart computed for it.
#[derive(Clone)]
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
    pub metric: MetricKey,
    pub group: GroupKey,
    pub chart: Option<ChartSpecification>,
    pub error: Option<String>,
    pub refreshed_at: Option<DateTime<Local>>,
}

pub trait SelectionControl<'a> {
    fn new(dataset: &'a Dataset, metric: MetricKey, group: GroupKey) -> Self;
    fn toggle_metric(&mut self);
    fn select_metric(&mut self, metric: MetricKey);
    fn next_group(&mut self);
    fn previous_group(&mut self);
    fn select_group(&mut self, group: GroupKey);
    fn refresh_chart(&mut self);
}

impl<'a> Dashboard<'a> {
    fn compute(&self) -> crate::error::Result<ChartSpecification> {
        let resolution = resolve_group(self.dataset, self.group);
        aggregate(
            &resolution.working,
            &resolution.column,
            resolution.axis_label,
            self.metric,
        )
    }
}

impl<'a> SelectionControl<'a> for Dashboard<'a> {
    fn new(dataset: &'a Dataset, metric: MetricKey, group: GroupKey) -> Self {
        let mut dashboard = Dashboard {
            dataset,
            metric,
            group,
            chart: None,
            error: None,
            refreshed_at: None,
        };
        dashboard.refresh_chart();
        dashboard
    }

    fn toggle_metric(&mut self) {
        self.metric = self.metric.toggle();
        self.refresh_chart()
    }

    fn select_metric(&mut self, metric: MetricKey) {
        if self.metric != metric {
            self.metric = metric;
            self.refresh_chart()
        }
    }

    fn next_group(&mut self) {
        self.group = self.group.next();
        self.refresh_chart()
    }

    fn previous_group(&mut self) {
        self.group = self.group.previous();
        self.refresh_chart()
    }

    fn select_group(&mut self, group: GroupKey) {
        if self.group != group {
            self.group = group;
            self.refresh_chart()
        }
    }

    fn refresh_chart(&mut self) {
        self.refreshed_at = Some(Local::now());
        match self.compute() {
            Ok(chart) => {
                info!(
                    metric = self.metric.key(),
                    group = self.group.key(),
                    points = chart.points.len(),
                    empty = chart.empty_categories.len(),
                    "chart refreshed"
                );
                self.chart = Some(chart);
                self.error = None;
            }
            Err(e) => {
                error!(metric = self.metric.key(), group = self.group.key(), "chart refresh failed: {}", e);
                self.chart = None;
                self.error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::Record;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Record {
                nivel: Some("Media".into()),
                sexo: Some(1),
                rural: Some(0),
                pj_pf: Some(2.0),
                pj_ecep: Some(40.0),
                ..Default::default()
            },
            Record {
                nivel: Some("Basica".into()),
                sexo: Some(2),
                rural: Some(1),
                pj_pf: Some(3.0),
                pj_ecep: None,
                ..Default::default()
            },
        ])
    }

    #[test]
    fn starts_with_a_chart() {
        let data = dataset();
        let dashboard = Dashboard::new(&data, MetricKey::Portfolio, GroupKey::Level);
        let chart = dashboard.chart.as_ref().unwrap();
        assert_eq!(chart.title, "Evaluación Docente - Portafolio por Nivel");
        assert_eq!(chart.categories(), vec!["Media", "Basica"]);
        assert!(dashboard.error.is_none());
        assert!(dashboard.refreshed_at.is_some());
    }

    #[test]
    fn toggling_metric_recomputes() {
        let data = dataset();
        let mut dashboard = Dashboard::new(&data, MetricKey::Portfolio, GroupKey::Level);
        dashboard.toggle_metric();
        assert_eq!(dashboard.metric, MetricKey::KnowledgeTest);
        let chart = dashboard.chart.as_ref().unwrap();
        assert_eq!(chart.y_label, "Promedio ECEP");
        assert_eq!(chart.categories(), vec!["Media"]);
        assert_eq!(chart.empty_categories, vec!["Basica".to_string()]);
    }

    #[test]
    fn group_navigation_recomputes() {
        let data = dataset();
        let mut dashboard = Dashboard::new(&data, MetricKey::Portfolio, GroupKey::Level);
        dashboard.next_group();
        assert_eq!(dashboard.group, GroupKey::Sex);
        assert_eq!(
            dashboard.chart.as_ref().unwrap().categories(),
            vec!["Masculino", "Femenino"]
        );
        dashboard.select_group(GroupKey::Rurality);
        assert_eq!(
            dashboard.chart.as_ref().unwrap().categories(),
            vec!["Urbano", "Rural"]
        );
        dashboard.previous_group();
        assert_eq!(dashboard.group, GroupKey::Sex);
    }
}
