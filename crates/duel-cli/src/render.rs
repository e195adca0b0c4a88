//! Plain-text rendering of a dashboard snapshot

use duel_core::table::CONNECTION_COLUMNS;
use duel_core::DashboardSnapshot;
use std::fmt::Write;

/// Render the snapshot as terminal text
pub(crate) fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_snapshot(&mut out, snapshot);
    out
}

fn write_snapshot(out: &mut String, snapshot: &DashboardSnapshot) -> std::fmt::Result {
    writeln!(out, "{}", snapshot.title)?;
    writeln!(out, "{}", "=".repeat(snapshot.title.chars().count()))?;
    writeln!(out)?;

    let text = &snapshot.summary_text;
    writeln!(out, "Average Execution Time : {}", text.average_execution_time)?;
    writeln!(out, "Total Queries Run      : {}", text.total_queries)?;
    writeln!(out, "Performance Difference : {}", text.performance_difference)?;
    writeln!(out)?;

    let chart = &snapshot.chart;
    writeln!(out, "{}", chart.title)?;
    if !chart.is_empty() {
        writeln!(
            out,
            "  {:<16} {:>16} {:>20}",
            chart.x_label, chart.series[0], chart.series[1]
        )?;
        for row in &chart.rows {
            writeln!(
                out,
                "  {:<16} {:>16.3} {:>20.3}",
                row.category, row.avg_query_time, row.data_insertion_time
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Database Connections")?;
    writeln!(out, "  {}", CONNECTION_COLUMNS.join(" | "))?;
    for row in snapshot.connections.rows() {
        let cells: Vec<String> = CONNECTION_COLUMNS
            .iter()
            .map(|c| row.cell(c).unwrap_or_default())
            .collect();
        writeln!(out, "  {}", cells.join(" | "))?;
    }

    if !snapshot.notifications.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notifications")?;
        for notification in &snapshot.notifications {
            writeln!(out, "  {notification}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use duel_core::{DashboardConfig, DashboardSession};

    #[test]
    fn renders_default_dashboard() {
        let mut session = DashboardSession::new(DashboardConfig::default()).unwrap();
        session.on_add_backend("DuckDB");
        let text = render_text(&session.snapshot());

        assert!(text.starts_with("DatabaseDuel ⚔️ - Comparing: DuckDB, Postgres\n"));
        assert!(text.contains("Average Execution Time : 0.075 seconds"));
        assert!(text.contains("Performance Difference : 100.00%"));
        assert!(text.contains("Database Performance Metrics"));
        assert!(text.contains("Postgres | Postgres | localhost | 5432"));
        assert!(text.contains("[warning] Database 'DuckDB' is already in the list."));
    }

    #[test]
    fn title_is_underlined_and_quiet_sessions_skip_notifications() {
        let mut session = DashboardSession::new(DashboardConfig::default()).unwrap();
        let text = render_text(&session.snapshot());

        let mut lines = text.lines();
        let title = lines.next().unwrap();
        assert_eq!(lines.next().unwrap(), "=".repeat(title.chars().count()));
        assert_eq!(text.matches("Notifications").count(), 0);
    }

    #[test]
    fn renders_empty_chart() {
        let mut session = DashboardSession::new(DashboardConfig::default()).unwrap();
        session.select(Vec::<String>::new());
        let text = render_text(&session.snapshot());
        assert!(text.contains("No Data to Display"));
        assert!(!text.contains("avg_query_time"));
    }
}
