use serde::Serialize;

use crate::error::Result;

pub const MARKER_COLOR: &'static str = "#570df8";
pub const FONT_COLOR: &'static str = "#1f2937";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
    /// Rows that contributed to `value`.
    pub count: usize,
}

/// Render-ready output of one aggregation. Built fresh for every selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpecification {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub marker_color: String,
    pub font_color: String,
    pub points: Vec<ChartPoint>,
    /// Categories present in the data with no usable metric value; they get no bar.
    pub empty_categories: Vec<String>,
}

impl ChartSpecification {
    pub fn new(metric_label: &str, group_label: &str) -> Self {
        ChartSpecification {
            title: format!("Evaluación Docente - {} por {}", metric_label, group_label),
            x_label: group_label.to_string(),
            y_label: format!("Promedio {}", metric_label),
            marker_color: MARKER_COLOR.to_string(),
            font_color: FONT_COLOR.to_string(),
            points: Vec::new(),
            empty_categories: Vec::new(),
        }
    }

    pub fn value_of(&self, category: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.category == category)
            .map(|p| p.value)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.category.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn marker_rgb(&self) -> Option<(u8, u8, u8)> {
        hex_to_rgb(&self.marker_color)
    }
}

/// Parses `#rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
