//! Number formatting and the text dashboard printed by `chdash summary`.

use crate::app::pipeline::DashboardRun;
use crate::chart::build_titled_chart;
use crate::domain::{DashboardConfig, Metric, ResampledDataset};
use crate::plot::render_ascii_chart;
use crate::report::{StatCard, stat_cards};

/// Size knobs for the text dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLayout {
    pub chart_width: usize,
    pub chart_height: usize,
    /// Maximum table rows before the rest is elided.
    pub max_rows: usize,
}

impl Default for SummaryLayout {
    fn default() -> Self {
        Self {
            chart_width: 60,
            chart_height: 8,
            max_rows: 50,
        }
    }
}

/// Abbreviated form of a count: `(1.5K)`, `(3.0M)`, `(1.0B)`; empty below 1,000.
pub fn format_abbreviated(value: u64) -> String {
    let v = value as f64;
    if value >= 1_000_000_000 {
        format!("({:.1}B)", v / 1_000_000_000.0)
    } else if value >= 1_000_000 {
        format!("({:.1}M)", v / 1_000_000.0)
    } else if value >= 1_000 {
        format!("({:.1}K)", v / 1_000.0)
    } else {
        String::new()
    }
}

/// Exact value with thousands separators: `1234567` -> `1,234,567`.
pub fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format the full dashboard: header, stat sections with charts, data table.
pub fn format_dashboard(run: &DashboardRun, config: &DashboardConfig, layout: &SummaryLayout) -> String {
    let mut out = String::new();

    out.push_str("=== YouTube Analytics Dashboard ===\n");
    out.push_str(&format!("Source: {} ({} rows)\n", run.source.label(), run.dataset_rows));
    if let Some(warning) = &run.warning {
        out.push_str(&format!("Warning: {warning} (showing sample data)\n"));
    }
    let range = run
        .range
        .map(|r| format!("{} .. {}", r.start, r.end))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "Range: {range} | Time frame: {} | Chart: {} | Theme: {}\n",
        config.bucket.display_name(),
        config.chart_kind.display_name(),
        config.theme.display_name(),
    ));

    if config.sections.all_time {
        out.push_str("\nAll-Time Statistics\n");
        let cards = stat_cards(&run.all_time, false);
        out.push_str(&format_stat_cards(&cards));
        out.push_str(&format_card_charts(&cards, &run.resampled, config, layout));
    }

    if config.sections.selected {
        out.push_str("\nSelected Duration Metrics\n");
        let cards = stat_cards(&run.selected, true);
        out.push_str(&format_stat_cards(&cards));
        out.push_str(&format_card_charts(&cards, &run.resampled, config, layout));
    }

    if config.sections.table {
        out.push_str("\nDetailed Data\n");
        out.push_str(&format_data_table(&run.resampled, layout.max_rows));
    }

    out
}

/// One line per card: title, exact value, abbreviation.
pub fn format_stat_cards(cards: &[StatCard]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(
            format!("  {:<24} {:>16} {}", card.title, card.exact, card.abbreviated)
                .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn format_card_charts(
    cards: &[StatCard],
    data: &ResampledDataset,
    config: &DashboardConfig,
    layout: &SummaryLayout,
) -> String {
    let mut out = String::new();
    for card in cards {
        let spec = build_titled_chart(data, card.metric, config.chart_kind, config.theme, &card.title);
        out.push('\n');
        out.push_str(&render_ascii_chart(&spec, layout.chart_width, layout.chart_height));
    }
    out
}

/// Tabular view of the resampled rows.
pub fn format_data_table(data: &ResampledDataset, max_rows: usize) -> String {
    let mut out = String::new();
    if data.is_empty() {
        out.push_str("(no rows in selected range)\n");
        return out;
    }

    let titles = data.has_titles();

    let mut header = format!("{:<10}", "Date");
    let mut rule = format!("{:-<10}", "");
    for metric in Metric::ALL {
        header.push_str(&format!(" {:>12}", metric.column_name()));
        rule.push_str(&format!(" {:-<12}", ""));
    }
    if titles {
        header.push_str(&format!(" {:<24}", "Video Title"));
        rule.push_str(&format!(" {:-<24}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(rule.trim_end());
    out.push('\n');

    for row in data.rows.iter().take(max_rows) {
        let mut line = format!("{:<10}", row.date.format("%Y-%m-%d"));
        for metric in Metric::ALL {
            line.push_str(&format!(" {:>12}", format_with_commas(row.metrics.get(metric))));
        }
        if titles {
            line.push_str(&format!(" {:<24}", truncate(row.video_title.as_deref().unwrap_or(""), 24)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if data.len() > max_rows {
        out.push_str(&format!("... {} more rows\n", data.len() - max_rows));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
