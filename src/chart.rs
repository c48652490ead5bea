//! Chart model handed to the summarization clients.
//!
//! A `Chart` is plain data: it knows its series and render size, and the
//! renderer turns it into pixels. The mock client only looks at the series
//! kinds through [`Chart::classify`].

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::data::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
    Scatter,
}

impl SeriesKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "line" | "折れ線グラフ" => Some(SeriesKind::Line),
            "bar" | "棒グラフ" => Some(SeriesKind::Bar),
            "scatter" | "散布図" => Some(SeriesKind::Scatter),
            _ => None,
        }
    }
}

/// Classification used to pick a canned mock summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
    pub width: u32,
    pub height: u32,
}

impl Chart {
    pub fn new(title: impl Into<String>, size: ChartConfig) -> Self {
        Self {
            title: title.into(),
            x_labels: Vec::new(),
            series: Vec::new(),
            width: size.width,
            height: size.height,
        }
    }

    /// One series per table column, all drawn with `kind`.
    pub fn from_table(table: &Table, kind: SeriesKind, title: &str, size: ChartConfig) -> Self {
        let mut chart = Self::new(title, size);
        chart.x_labels = table.index.clone();
        chart.series = table
            .columns
            .iter()
            .map(|c| Series {
                name: c.name.clone(),
                kind,
                values: c.values.clone(),
            })
            .collect();
        chart
    }

    pub fn with_series(mut self, name: impl Into<String>, kind: SeriesKind, values: Vec<f64>) -> Self {
        self.series.push(Series {
            name: name.into(),
            kind,
            values,
        });
        self
    }

    /// Bars win over lines; a chart with neither counts as a line chart.
    pub fn classify(&self) -> ChartKind {
        if self.series.iter().any(|s| s.kind == SeriesKind::Bar) {
            ChartKind::Bar
        } else {
            ChartKind::Line
        }
    }

    /// Number of x positions across all series.
    pub fn point_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.values.len())
            .chain(std::iter::once(self.x_labels.len()))
            .max()
            .unwrap_or(0)
    }

    /// Min and max over finite values, `None` when nothing is plottable.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Chart {
        Chart::new("t", ChartConfig::default())
    }

    #[test]
    fn bar_series_classify_as_bar() {
        let chart = empty()
            .with_series("a", SeriesKind::Line, vec![1.0])
            .with_series("b", SeriesKind::Bar, vec![2.0]);
        assert_eq!(chart.classify(), ChartKind::Bar);
    }

    #[test]
    fn lines_and_empty_charts_classify_as_line() {
        assert_eq!(
            empty().with_series("a", SeriesKind::Line, vec![1.0]).classify(),
            ChartKind::Line
        );
        assert_eq!(empty().classify(), ChartKind::Line);
        assert_eq!(
            empty().with_series("s", SeriesKind::Scatter, vec![1.0]).classify(),
            ChartKind::Line
        );
    }

    #[test]
    fn value_range_skips_nan() {
        let chart = empty().with_series("a", SeriesKind::Line, vec![f64::NAN, -2.0, 5.0]);
        assert_eq!(chart.value_range(), Some((-2.0, 5.0)));
        assert_eq!(empty().value_range(), None);
    }

    #[test]
    fn from_table_copies_columns() {
        let table = Table::new("x", vec!["a".into(), "b".into()])
            .with_column("c1", vec![1.0, 2.0])
            .with_column("c2", vec![3.0, 4.0]);
        let chart = Chart::from_table(&table, SeriesKind::Bar, "title", ChartConfig::default());
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.point_count(), 2);
        assert_eq!(chart.width, 1000);
        assert_eq!(chart.classify(), ChartKind::Bar);
    }
}
