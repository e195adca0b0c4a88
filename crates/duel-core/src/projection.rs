//! Read-only projections over a performance collection
//!
//! Projections never trigger aggregation themselves; they are handed the
//! collection the aggregator already produced.

use duel_model::PerformanceRecord;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Title prefix shown before the selected names
pub const TITLE_PREFIX: &str = "DatabaseDuel ⚔️ - Comparing: ";

/// Chart title when there are records
pub const CHART_TITLE: &str = "Database Performance Metrics";

/// Chart title when there are no records
pub const EMPTY_CHART_TITLE: &str = "No Data to Display";

/// Series plotted per backend, in order
pub const CHART_SERIES: [&str; 2] = ["avg_query_time", "data_insertion_time"];

/// Dashboard title for a selection
#[must_use]
pub fn title<S: AsRef<str>>(selection: &[S]) -> String {
    let names: Vec<&str> = selection.iter().map(AsRef::as_ref).collect();
    format!("{TITLE_PREFIX}{}", names.join(", "))
}

/// Mean of `avg_query_time`, 0 when empty
#[must_use]
pub fn average_execution_time(records: &[PerformanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = records.len() as f64;
    records.iter().map(|r| r.avg_query_time).sum::<f64>() / count
}

/// Sum of `total_queries`, 0 when empty
#[must_use]
pub fn total_queries(records: &[PerformanceRecord]) -> u64 {
    records.iter().map(|r| r.total_queries).sum()
}

/// Relative spread of total times
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PerformanceDifference {
    /// Fewer than two records
    NotApplicable,
    /// `(max - min) / min * 100`, or 0 when `min` is 0
    Percent(f64),
}

impl Display for PerformanceDifference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => f.write_str("N/A"),
            Self::Percent(p) => write!(f, "{p:.2}%"),
        }
    }
}

/// Percentage difference between slowest and fastest total time
#[must_use]
pub fn performance_difference(records: &[PerformanceRecord]) -> PerformanceDifference {
    if records.len() < 2 {
        return PerformanceDifference::NotApplicable;
    }
    let (min, max) = records
        .iter()
        .map(|r| r.total_time)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t), hi.max(t))
        });
    if min == 0.0 {
        return PerformanceDifference::Percent(0.0);
    }
    PerformanceDifference::Percent((max - min) / min * 100.0)
}

/// The three value boxes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Mean of per-backend average query times
    pub average_execution_time: f64,
    /// Total queries across backends
    pub total_queries: u64,
    /// Spread of total times
    pub difference: PerformanceDifference,
}

impl Summary {
    /// Summarize records
    #[must_use]
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        Self {
            average_execution_time: average_execution_time(records),
            total_queries: total_queries(records),
            difference: performance_difference(records),
        }
    }

    /// Display strings for the value boxes
    #[must_use]
    pub fn display(&self) -> SummaryText {
        SummaryText {
            average_execution_time: format!("{:.3} seconds", self.average_execution_time),
            total_queries: self.total_queries.to_string(),
            performance_difference: self.difference.to_string(),
        }
    }
}

/// Rendered value box strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryText {
    /// e.g. `0.075 seconds`
    pub average_execution_time: String,
    /// e.g. `4`
    pub total_queries: String,
    /// e.g. `100.00%` or `N/A`
    pub performance_difference: String,
}

/// One row of the performance table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRow {
    /// Backend name
    pub db_name: String,
    /// Mean seconds per query
    pub avg_query_time: f64,
    /// Queries run
    pub total_queries: u64,
    /// Insertion plus query seconds
    pub total_time: f64,
    /// Seconds spent inserting
    pub data_insertion_time: f64,
    /// Rows inserted
    pub rows_inserted: usize,
}

impl From<&PerformanceRecord> for PerformanceRow {
    fn from(record: &PerformanceRecord) -> Self {
        let PerformanceRecord {
            backend_name,
            avg_query_time,
            total_queries,
            total_time,
            data_insertion_time,
            rows_inserted,
        } = record;
        Self {
            db_name: backend_name.clone(),
            avg_query_time: *avg_query_time,
            total_queries: *total_queries,
            total_time: *total_time,
            data_insertion_time: *data_insertion_time,
            rows_inserted: *rows_inserted,
        }
    }
}

/// Performance table rows in collection order
#[must_use]
pub fn performance_rows(records: &[PerformanceRecord]) -> Vec<PerformanceRow> {
    records.iter().map(PerformanceRow::from).collect()
}

/// One category of the grouped bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    /// Backend name (x axis)
    pub category: String,
    /// First series value
    pub avg_query_time: f64,
    /// Second series value
    pub data_insertion_time: f64,
}

/// Grouped bar chart description
///
/// Rendering is left to whatever draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart title, or the empty-chart title when there are no rows
    pub title: &'static str,
    /// X axis label
    pub x_label: &'static str,
    /// Y axis label
    pub y_label: &'static str,
    /// Series names in bar order
    pub series: [&'static str; 2],
    /// One entry per backend in selection order
    pub rows: Vec<ChartRow>,
}

impl ChartSpec {
    /// Build chart from records
    #[must_use]
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        let rows: Vec<ChartRow> = records
            .iter()
            .map(|r| ChartRow {
                category: r.backend_name.clone(),
                avg_query_time: r.avg_query_time,
                data_insertion_time: r.data_insertion_time,
            })
            .collect();
        Self {
            title: if rows.is_empty() {
                EMPTY_CHART_TITLE
            } else {
                CHART_TITLE
            },
            x_label: "Database",
            y_label: "Time (seconds)",
            series: CHART_SERIES,
            rows,
        }
    }

    /// True if there is nothing to plot
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str, avg: f64, total: f64) -> PerformanceRecord {
        PerformanceRecord::new(name, avg, 2, total, 0.1, 10).unwrap()
    }

    #[test]
    fn empty_summary() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.average_execution_time, 0.0);
        assert_eq!(summary.total_queries, 0);
        assert_eq!(summary.difference, PerformanceDifference::NotApplicable);

        let text = summary.display();
        assert_eq!(text.average_execution_time, "0.000 seconds");
        assert_eq!(text.total_queries, "0");
        assert_eq!(text.performance_difference, "N/A");
    }

    #[test]
    fn single_record_difference_not_applicable() {
        assert_eq!(
            performance_difference(&[record("a", 0.1, 1.0)]),
            PerformanceDifference::NotApplicable
        );
    }

    #[test]
    fn difference_one_and_two_is_hundred_percent() {
        let records = [record("a", 0.1, 1.0), record("b", 0.1, 2.0)];
        assert_eq!(performance_difference(&records), PerformanceDifference::Percent(100.0));
        assert_eq!(performance_difference(&records).to_string(), "100.00%");
    }

    #[test]
    fn difference_zero_minimum() {
        let records = [record("a", 0.0, 0.0), record("b", 0.1, 2.0)];
        assert_eq!(performance_difference(&records), PerformanceDifference::Percent(0.0));
    }

    #[test]
    fn summary_formatting() {
        let records = [record("a", 0.05, 0.2), record("b", 0.1, 0.4)];
        let text = Summary::from_records(&records).display();
        assert_eq!(text.average_execution_time, "0.075 seconds");
        assert_eq!(text.total_queries, "4");
        assert_eq!(text.performance_difference, "100.00%");
    }

    #[test]
    fn title_joins_selection() {
        assert_eq!(title(&["DuckDB", "Postgres"]), "DatabaseDuel ⚔️ - Comparing: DuckDB, Postgres");
        assert_eq!(title::<&str>(&[]), "DatabaseDuel ⚔️ - Comparing: ");
    }

    #[test]
    fn chart_rows_follow_records() {
        let records = [record("b", 0.1, 0.4), record("a", 0.05, 0.2)];
        let chart = ChartSpec::from_records(&records);

        assert_eq!(chart.title, CHART_TITLE);
        assert_eq!(chart.x_label, "Database");
        assert_eq!(chart.y_label, "Time (seconds)");
        let categories: Vec<_> = chart.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["b", "a"]);
    }

    #[test]
    fn empty_chart_title() {
        let chart = ChartSpec::from_records(&[]);
        assert!(chart.is_empty());
        assert_eq!(chart.title, "No Data to Display");
    }

    #[test]
    fn performance_rows_copy_every_field() {
        let rows = performance_rows(&[record("a", 0.05, 0.2)]);
        assert_eq!(
            rows,
            vec![PerformanceRow {
                db_name: "a".into(),
                avg_query_time: 0.05,
                total_queries: 2,
                total_time: 0.2,
                data_insertion_time: 0.1,
                rows_inserted: 10,
            }]
        );
    }
}
