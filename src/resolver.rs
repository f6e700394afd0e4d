use tracing::debug;

use crate::dataset::{Dataset, WorkingDataset};
use crate::error::Result;
use crate::keys::GroupKey;

/// Grouping column ready for aggregation.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub working: WorkingDataset<'a>,
    pub column: String,
    pub axis_label: &'static str,
}

/// Resolves a grouping selector as sent by the UI, e.g. `"sexo"`.
pub fn resolve<'a>(dataset: &'a Dataset, group_key: &str) -> Result<Resolution<'a>> {
    let group: GroupKey = group_key.parse()?;
    Ok(resolve_group(dataset, group))
}

/// Coded columns get a `<key>_label` column of display labels; text columns pass through.
pub fn resolve_group(dataset: &Dataset, group: GroupKey) -> Resolution<'_> {
    let working = WorkingDataset::new(dataset);
    let (working, column) = match group.code_labels() {
        Some(table) => {
            let column = format!("{}_label", group.key());
            let codes = dataset.records().iter().map(|r| r.code_field(group.key()));
            let labels = remap_codes(codes, table);
            let unmapped = labels.iter().filter(|l| l.is_none()).count();
            debug!(%column, unmapped, "derived label column");
            (working.with_column(&column, labels), column)
        }
        None => (working, group.key().to_string()),
    };
    Resolution {
        working,
        column,
        axis_label: group.label(),
    }
}

/// Codes missing from `table` (or missing altogether) stay as `None`, one entry per row.
pub fn remap_codes<I>(codes: I, table: &[(i64, &'static str)]) -> Vec<Option<&'static str>>
where
    I: IntoIterator<Item = Option<i64>>,
{
    codes
        .into_iter()
        .map(|code| {
            let code = code?;
            table.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::Record;
    use crate::error::DashboardError;

    fn coded(sexo: Option<i64>, rural: Option<i64>) -> Record {
        Record {
            sexo,
            rural,
            nivel: Some("Media".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn sex_codes_map_to_labels() {
        let dataset = Dataset::new(vec![coded(Some(1), None), coded(Some(2), None)]);
        let resolution = resolve(&dataset, "sexo").unwrap();
        assert_eq!(resolution.column, "sexo_label");
        assert_eq!(resolution.axis_label, "Género");
        let labels = resolution.working.labels(&resolution.column).unwrap();
        assert_eq!(labels[0].as_deref(), Some("Masculino"));
        assert_eq!(labels[1].as_deref(), Some("Femenino"));
    }

    #[test]
    fn rurality_codes_map_to_labels() {
        let dataset = Dataset::new(vec![coded(None, Some(0)), coded(None, Some(1))]);
        let resolution = resolve(&dataset, "rural").unwrap();
        assert_eq!(resolution.column, "rural_label");
        assert_eq!(resolution.axis_label, "Ruralidad");
        let labels = resolution.working.labels(&resolution.column).unwrap();
        assert_eq!(labels[0].as_deref(), Some("Urbano"));
        assert_eq!(labels[1].as_deref(), Some("Rural"));
    }

    #[test]
    fn unmapped_codes_are_kept_as_missing() {
        let dataset = Dataset::new(vec![
            coded(Some(3), None),
            coded(None, None),
            coded(Some(1), None),
        ]);
        let resolution = resolve_group(&dataset, GroupKey::Sex);
        let labels = resolution.working.labels(&resolution.column).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], None);
        assert_eq!(labels[1], None);
        assert_eq!(labels[2].as_deref(), Some("Masculino"));
    }

    #[test]
    fn text_columns_pass_through() {
        let dataset = Dataset::new(vec![coded(Some(1), Some(0))]);
        for key in ["dependencia", "nivel", "grupo_edad"] {
            let resolution = resolve(&dataset, key).unwrap();
            assert_eq!(resolution.column, key);
            assert_eq!(resolution.working.derived_columns().count(), 0);
            assert!(resolution.working.has_column(key));
        }
    }

    #[test]
    fn unknown_group_key_fails() {
        let dataset = Dataset::default();
        assert!(matches!(
            resolve(&dataset, "invalid_key"),
            Err(DashboardError::UnknownGroupKey(_))
        ));
    }

    #[test]
    fn source_dataset_is_untouched() {
        let dataset = Dataset::new(vec![coded(Some(2), Some(1))]);
        let before = dataset.clone();
        let _ = resolve_group(&dataset, GroupKey::Rurality);
        assert_eq!(dataset, before);
        assert_eq!(dataset.category_column("sexo").unwrap()[0].as_deref(), Some("2"));
    }
}
