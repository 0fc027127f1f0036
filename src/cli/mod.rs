//! Command-line parsing for the channel analytics dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline: flags are turned into one `DashboardConfig` and handed on.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{ChartKind, DashboardConfig, ExportFormat, Metric, Sections, ThemeName, TimeBucket};
use crate::io::ingest::parse_date;
use crate::report::SummaryLayout;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "chdash", version, about = "YouTube channel analytics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the dashboard (stat cards, charts, data table) to stdout.
    Summary(SummaryArgs),
    /// Write the filtered, resampled data as CSV, Excel or JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `chdash summary`, but renders results in a
    /// terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Data source and filter options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct FilterArgs {
    /// Channel metrics CSV. Without it the generated sample data is used.
    #[arg(short = 'f', long, env = "CHDASH_FILE", value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// First day of the selected range (clamped to the data).
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the selected range (clamped to the data).
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Time frame to aggregate by.
    #[arg(short = 'b', long, value_enum, default_value_t = TimeBucket::Daily)]
    pub bucket: TimeBucket,

    /// Chart type.
    #[arg(short = 'c', long, value_enum, default_value_t = ChartKind::Bar)]
    pub chart: ChartKind,

    /// Colour theme.
    #[arg(long, value_enum, env = "CHDASH_THEME", default_value_t = ThemeName::Default)]
    pub theme: ThemeName,
}

impl FilterArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            start: self.start,
            end: self.end,
            bucket: self.bucket,
            chart_kind: self.chart,
            theme: self.theme,
            ..DashboardConfig::default()
        }
    }
}

/// Options for the text dashboard.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Hide the all-time statistics section.
    #[arg(long)]
    pub no_all_time: bool,

    /// Hide the selected-duration metrics section.
    #[arg(long)]
    pub no_selected: bool,

    /// Hide the detailed data table.
    #[arg(long)]
    pub no_table: bool,

    /// Maximum rows printed in the data table.
    #[arg(long, default_value_t = 50)]
    pub max_rows: usize,
}

impl SummaryArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            sections: Sections {
                all_time: !self.no_all_time,
                selected: !self.no_selected,
                table: !self.no_table,
            },
            ..self.filter.to_config()
        }
    }

    pub fn layout(&self) -> SummaryLayout {
        SummaryLayout {
            chart_width: self.width,
            chart_height: self.height,
            max_rows: self.max_rows,
        }
    }
}

/// Options for the interactive dashboard.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Metric plotted in the chart panel (cycle with `m`).
    #[arg(short = 'm', long, value_enum, default_value_t = Metric::Subscribers)]
    pub metric: Metric,
}

impl TuiArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            metric: self.metric,
            ..self.filter.to_config()
        }
    }
}

/// Options for exporting data.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Export format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output path (defaults to `youtube_data.<ext>` in the current directory).
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            export_format: self.format,
            ..self.filter.to_config()
        }
    }

    pub fn out_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn summary_flags_build_config() {
        let cli = parse(&[
            "chdash",
            "summary",
            "--start",
            "2019-02-01",
            "--end",
            "03/15/2019",
            "-b",
            "weekly",
            "-c",
            "line",
            "--theme",
            "dark",
            "--no-table",
            "--max-rows",
            "5",
        ]);
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };

        let config = args.to_config();
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2019, 2, 1));
        assert_eq!(config.end, NaiveDate::from_ymd_opt(2019, 3, 15));
        assert_eq!(config.bucket, TimeBucket::Weekly);
        assert_eq!(config.chart_kind, ChartKind::Line);
        assert_eq!(config.theme, ThemeName::Dark);
        assert!(config.sections.all_time);
        assert!(config.sections.selected);
        assert!(!config.sections.table);
        assert_eq!(args.layout().max_rows, 5);
    }

    #[test]
    fn export_defaults_to_format_file_name() {
        let cli = parse(&["chdash", "export", "--format", "excel"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.to_config().export_format, ExportFormat::Excel);
        assert_eq!(args.out_path(), PathBuf::from("youtube_data.xlsx"));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["chdash", "summary", "--start", "not-a-date"]).is_err());
    }

    #[test]
    fn tui_takes_filter_flags() {
        let cli = parse(&["chdash", "tui", "-b", "quarterly", "-c", "pie"]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.filter.bucket, TimeBucket::Quarterly);
        assert_eq!(args.filter.chart, ChartKind::Pie);
        assert_eq!(args.to_config().metric, Metric::Subscribers);
    }

    #[test]
    fn tui_metric_flag_lands_in_config() {
        let cli = parse(&["chdash", "tui", "--metric", "watch-hours", "-b", "monthly"]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        let config = args.to_config();
        assert_eq!(config.metric, Metric::WatchHours);
        assert_eq!(config.bucket, TimeBucket::Monthly);

        let cli = parse(&["chdash", "tui", "-m", "likes"]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.to_config().metric, Metric::Likes);
    }

    #[test]
    fn unknown_metric_is_rejected() {
        assert!(Cli::try_parse_from(["chdash", "tui", "--metric", "dislikes"]).is_err());
    }
}
