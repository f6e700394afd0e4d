use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// One teacher-evaluation row. Unparsable cells load as missing.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Record {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub dependencia: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub nivel: Option<String>,
    #[serde(default, deserialize_with = "code_cell")]
    pub sexo: Option<i64>,
    #[serde(default, deserialize_with = "code_cell")]
    pub rural: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub grupo_edad: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pj_pf: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pj_ecep: Option<f64>,
}

/// Integer code cell. Integral floats such as `1.0` are accepted; anything else is missing.
fn code_cell<'de, D>(de: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(de).ok().flatten();
    Ok(cell.as_deref().and_then(parse_code))
}

fn parse_code(cell: &str) -> Option<i64> {
    if let Ok(code) = cell.parse::<i64>() {
        return Some(code);
    }
    let value = cell.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

pub fn read_data(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    read_records(file)
}

pub fn read_records<R: Read>(source: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let mut records = Vec::<Record>::new();
    for result in rdr.deserialize() {
        let record: Record = result?;
        records.push(record.normalized());
    }
    Ok(records)
}

impl Record {
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "dependencia" => self.dependencia.as_deref(),
            "nivel" => self.nivel.as_deref(),
            "grupo_edad" => self.grupo_edad.as_deref(),
            _ => None,
        }
    }

    pub fn code_field(&self, name: &str) -> Option<i64> {
        match name {
            "sexo" => self.sexo,
            "rural" => self.rural,
            _ => None,
        }
    }

    // Blank text reads as Some(""), scores may read as NaN.
    fn normalized(mut self) -> Self {
        for text in [&mut self.dependencia, &mut self.nivel, &mut self.grupo_edad] {
            if text.as_deref().map_or(false, str::is_empty) {
                *text = None;
            }
        }
        for score in [&mut self.pj_pf, &mut self.pj_ecep] {
            if score.map_or(false, |v| !v.is_finite()) {
                *score = None;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_coded_and_missing_cells() {
        let data = "\
dependencia,nivel,sexo,rural,grupo_edad,pj_pf,pj_ecep,extra
Municipal,Basica,1,0,30-39,2.5,,x
Particular,,2,abc,,NaN,3.1,y
";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sexo, Some(1));
        assert_eq!(records[0].rural, Some(0));
        assert_eq!(records[0].pj_pf, Some(2.5));
        assert_eq!(records[0].pj_ecep, None);
        assert_eq!(records[1].nivel, None);
        assert_eq!(records[1].rural, None);
        assert_eq!(records[1].grupo_edad, None);
        assert_eq!(records[1].pj_pf, None);
        assert_eq!(records[1].pj_ecep, Some(3.1));
    }

    #[test]
    fn float_written_codes_are_integral() {
        let data = "sexo,rural,pj_pf\n1.0,0.0,10\n2.0,1.0,20\n1.5,x,30\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records[0].sexo, Some(1));
        assert_eq!(records[0].rural, Some(0));
        assert_eq!(records[1].sexo, Some(2));
        assert_eq!(records[1].rural, Some(1));
        assert_eq!(records[2].sexo, None);
        assert_eq!(records[2].rural, None);
        assert_eq!(parse_code("inf"), None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_data(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, crate::error::DashboardError::Io(_)));
    }
}
