//! Plain-text rendering of analysis results. Charts become borderless tables
//! with a proportional bar column.

use std::io::{self, Write};

use analysis::{Count, LabelActivity, LabelCloseTime, MonthlyHistogram, Summary};
use comfy_table::{presets::NOTHING, Cell, CellAlignment, ContentArrangement, Table};

const BAR_WIDTH: f64 = 40.0;
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH).round().max(1.0) as usize;
    "#".repeat(cells)
}

fn table() -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right<T: ToString>(content: T) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

fn write_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    writeln!(out, "{table}")
}

pub fn counts<W: Write>(out: &mut W, title: &str, rows: &[Count]) -> io::Result<()> {
    writeln!(out, "{title}")?;
    if rows.is_empty() {
        return writeln!(out, "  (none)");
    }
    let max = rows.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    let mut table = table();
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.key),
            right(row.count),
            Cell::new(bar(row.count as f64, max)),
        ]);
    }
    write_table(out, &table)
}

pub fn summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    match &summary.user {
        Some(user) => writeln!(
            out,
            "Found {} events across {} issues for {}.",
            summary.total_events, summary.issue_count, user
        )?,
        None => writeln!(
            out,
            "Found {} events across {} issues.",
            summary.total_events, summary.issue_count
        )?,
    }
    writeln!(out)?;
    counts(
        out,
        &format!("Top {} issue creators", summary.top_creators.len()),
        &summary.top_creators,
    )?;
    writeln!(out)?;
    counts(out, "Issue state distribution", &summary.states)?;
    writeln!(out)?;
    counts(
        out,
        &format!("Top {} labels", summary.top_labels.len()),
        &summary.top_labels,
    )?;
    writeln!(out)?;

    let Some(resolution) = &summary.resolution else {
        return writeln!(
            out,
            "No closed issues with valid dates found for time-to-resolution analysis."
        );
    };
    writeln!(
        out,
        "Average time to resolve issues: {:.2} days ({} issues)",
        resolution.average_days, resolution.samples
    )?;
    let max = resolution.histogram.iter().map(|b| b.count).max().unwrap_or(0) as f64;
    let mut table = table();
    table.set_header(vec!["from (days)", "to (days)", "issues", ""]);
    for bin in &resolution.histogram {
        table.add_row(vec![
            right(format!("{:.1}", bin.start)),
            right(format!("{:.1}", bin.end)),
            right(bin.count),
            Cell::new(bar(bin.count as f64, max)),
        ]);
    }
    write_table(out, &table)
}

pub fn months<W: Write>(out: &mut W, histogram: &MonthlyHistogram) -> io::Result<()> {
    writeln!(out, "Opened/closed issues per month")?;
    let max = histogram
        .opened
        .iter()
        .chain(histogram.closed.iter())
        .copied()
        .max()
        .unwrap_or(0) as f64;
    let mut table = table();
    table.set_header(vec!["month", "opened", "closed", ""]);
    for (idx, name) in MONTHS.iter().enumerate() {
        let opened = histogram.opened[idx];
        let closed = histogram.closed[idx];
        table.add_row(vec![
            Cell::new(name),
            right(opened),
            right(closed),
            Cell::new(format!(
                "o {}\nc {}",
                bar(opened as f64, max),
                bar(closed as f64, max)
            )),
        ]);
    }
    write_table(out, &table)
}

pub fn close_times<W: Write>(out: &mut W, times: &[LabelCloseTime]) -> io::Result<()> {
    writeln!(out, "Average close time per label (days)")?;
    if times.is_empty() {
        return writeln!(out, "  (no closed issues with close dates)");
    }
    let max = times.iter().map(|t| t.average_days()).fold(0.0, f64::max);
    let mut table = table();
    table.set_header(vec!["label", "days", "issues", ""]);
    for time in times {
        table.add_row(vec![
            Cell::new(&time.label),
            right(format!("{:.2}", time.average_days())),
            right(time.issues),
            Cell::new(bar(time.average_days(), max)),
        ]);
    }
    write_table(out, &table)
}

pub fn activity<W: Write>(out: &mut W, activity: &LabelActivity) -> io::Result<()> {
    match activity.average_days_to_close {
        Some(days) => writeln!(out, "Average time to close (days): {days:.2}")?,
        None => writeln!(
            out,
            "No closed issues found. Average time to close cannot be calculated."
        )?,
    }
    writeln!(out)?;
    writeln!(out, "Issues opened and closed by user and label")?;
    if activity.by_creator_label.is_empty() {
        writeln!(out, "  (none)")?;
    } else {
        let mut table = table();
        table.set_header(vec!["creator", "label", "opened", "closed"]);
        for cell in &activity.by_creator_label {
            table.add_row(vec![
                Cell::new(&cell.creator),
                Cell::new(&cell.label),
                right(cell.opened),
                right(cell.closed),
            ]);
        }
        write_table(out, &table)?;
    }
    writeln!(out)?;
    counts(out, "Label frequency", &activity.label_frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(text: &str, first: &str) -> Vec<String> {
        text.lines()
            .map(|line| line.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .find(|words| words.first().map(String::as_str) == Some(first))
            .unwrap_or_default()
    }

    #[test]
    fn bar_scales_to_max() {
        assert_eq!(bar(10.0, 10.0).len(), 40);
        assert_eq!(bar(5.0, 10.0).len(), 20);
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(0.01, 10.0), "#");
    }

    #[test]
    fn counts_render_one_row_per_key() {
        let mut buf = Vec::new();
        counts(
            &mut buf,
            "Labels",
            &[
                Count { key: "bug".into(), count: 2 },
                Count { key: "docs".into(), count: 1 },
            ],
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("Labels"));
        assert_eq!(cells(&text, "bug"), vec!["bug", "2", "#".repeat(40).as_str()]);
        assert_eq!(cells(&text, "docs"), vec!["docs", "1", "#".repeat(20).as_str()]);
    }

    #[test]
    fn empty_counts_say_none() {
        let mut buf = Vec::new();
        counts(&mut buf, "Closers", &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Closers\n  (none)\n");
    }

    #[test]
    fn close_times_table_has_days_column() {
        let mut buf = Vec::new();
        close_times(
            &mut buf,
            &[LabelCloseTime { label: "ui".into(), issues: 3, average_seconds: 172_800 }],
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(cells(&text, "label"), vec!["label", "days", "issues"]);
        assert_eq!(cells(&text, "ui"), vec!["ui", "2.00", "3", "#".repeat(40).as_str()]);
    }
}
