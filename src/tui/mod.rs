//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the date range, time frame, chart type,
//! theme, metric and export format, then renders the stat cards and a chart of
//! the resampled data. Every settings change re-runs the pipeline.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{DashboardRun, run_dashboard};
use crate::chart::{ChartSpec, build_chart, hex_to_rgb, metric_color};
use crate::cli::TuiArgs;
use crate::cli::picker::{discover_csv_files, next_csv_file, pretty_path, validate_csv_path};
use crate::domain::{ChartKind, DashboardConfig};
use crate::error::AppError;
use crate::io::export::write_export;
use crate::io::ingest::{LoadOutcome, load_path};
use crate::report::{StatCard, format_abbreviated, stat_cards};

mod plotters_chart;

use plotters_chart::MetricPlottersChart;

/// Settings rows, in display order.
const FIELDS: [&str; 7] = ["Start", "End", "Time frame", "Chart", "Theme", "Metric", "Export"];

const PAGE_DAYS: i64 = 30;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let file = args.filter.file.as_deref().map(validate_csv_path).transpose()?;
    let loaded = load_path(file.as_deref());

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(loaded, file, args.to_config());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    loaded: LoadOutcome,
    file: Option<PathBuf>,
    config: DashboardConfig,
    selected_field: usize,
    status: String,
    run: DashboardRun,
}

impl App {
    fn new(loaded: LoadOutcome, file: Option<PathBuf>, config: DashboardConfig) -> Self {
        let run = run_dashboard(&loaded, &config);
        let mut app = Self {
            loaded,
            file,
            config,
            selected_field: 0,
            status: String::new(),
            run,
        };
        app.recompute();
        app.status = app.load_status();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELDS.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageUp => self.shift_selected_date(PAGE_DAYS),
            KeyCode::PageDown => self.shift_selected_date(-PAGE_DAYS),
            KeyCode::Char('m') => {
                self.config.metric = self.config.metric.next();
                self.status = format!("metric: {}", self.config.metric.column_name());
            }
            KeyCode::Char('f') => {
                self.config.export_format = self.config.export_format.next();
                self.status = format!("export format: {}", self.config.export_format.display_name());
            }
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('u') => self.load_next_file(),
            KeyCode::Char('s') => self.load_sample(),
            _ => {}
        }

        false
    }

    fn adjust_field(&mut self, delta: i64) {
        let forward = delta >= 0;
        match self.selected_field {
            0 | 1 => {
                self.shift_selected_date(delta);
                return;
            }
            2 => {
                self.config.bucket = if forward { self.config.bucket.next() } else { self.config.bucket.prev() };
                self.status = format!("time frame: {}", self.config.bucket.display_name());
            }
            3 => {
                self.config.chart_kind = if forward {
                    self.config.chart_kind.next()
                } else {
                    self.config.chart_kind.prev()
                };
                self.status = format!("chart: {}", self.config.chart_kind.display_name());
            }
            4 => {
                self.config.theme = if forward { self.config.theme.next() } else { self.config.theme.prev() };
                self.status = format!("theme: {}", self.config.theme.display_name());
            }
            5 => {
                self.config.metric = if forward { self.config.metric.next() } else { self.config.metric.prev() };
                self.status = format!("metric: {}", self.config.metric.column_name());
            }
            6 => {
                self.config.export_format = self.config.export_format.next();
                self.status = format!("export format: {}", self.config.export_format.display_name());
            }
            _ => {}
        }
        self.recompute();
    }

    /// Move the selected Start/End date by `days`.
    fn shift_selected_date(&mut self, days: i64) {
        let Some(range) = self.run.range else {
            self.status = "No data loaded.".to_string();
            return;
        };

        match self.selected_field {
            0 => self.config.start = Some(shift_date(range.start, days)),
            1 => self.config.end = Some(shift_date(range.end, days)),
            _ => {
                self.status = "Select Start or End to move a date.".to_string();
                return;
            }
        }
        self.recompute();

        if let Some(r) = self.run.range {
            self.status = format!("range: {} .. {} ({} rows)", r.start, r.end, self.run.resampled.len());
        }
    }

    /// Re-run the pipeline and pin the config dates to the clamped range.
    fn recompute(&mut self) {
        self.run = run_dashboard(&self.loaded, &self.config);
        if let Some(r) = self.run.range {
            self.config.start = Some(r.start);
            self.config.end = Some(r.end);
        }
    }

    fn load_next_file(&mut self) {
        let files = discover_csv_files();
        let Some(next) = next_csv_file(&files, self.file.as_deref()) else {
            self.status = "No .csv files found in the current directory.".to_string();
            return;
        };
        self.replace_dataset(load_path(Some(&next)), Some(next));
    }

    fn load_sample(&mut self) {
        self.replace_dataset(load_path(None), None);
    }

    fn replace_dataset(&mut self, loaded: LoadOutcome, file: Option<PathBuf>) {
        self.loaded = loaded;
        self.file = file;
        // A new dataset starts on its full range.
        self.config.start = None;
        self.config.end = None;
        self.recompute();
        self.status = self.load_status();
    }

    fn load_status(&self) -> String {
        if let Some(warning) = &self.loaded.warning {
            return format!("warning: {warning}; showing sample data");
        }
        let name = self
            .file
            .as_deref()
            .map(pretty_path)
            .unwrap_or_else(|| self.loaded.dataset.source.label().to_string());
        format!("loaded {name} ({} rows)", self.loaded.dataset.len())
    }

    fn export(&mut self) {
        let format = self.config.export_format;
        let path = Path::new(format.file_name());
        self.status = match write_export(path, &self.run.resampled, format) {
            Ok(()) => format!(
                "exported {} rows to {} ({})",
                self.run.resampled.len(),
                path.display(),
                format.mime_type()
            ),
            Err(err) => format!("export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(6),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_cards(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("chdash", Style::default().fg(Color::Cyan)),
            Span::raw(" | YouTube channel analytics"),
        ]));

        let range = self
            .run
            .range
            .map(|r| format!("{} .. {}", r.start, r.end))
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!(
                "source: {} ({} rows) | range: {range} | time frame: {} | rows: {}",
                self.run.source.label(),
                self.run.dataset_rows,
                self.config.bucket.display_name(),
                self.run.resampled.len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(warning) = &self.run.warning {
            lines.push(Line::from(Span::styled(
                format!("warning: {warning}; showing sample data"),
                Style::default().fg(Color::Red),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_cards(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        draw_card_block(frame, chunks[0], "All-Time Statistics", &stat_cards(&self.run.all_time, false));
        draw_card_block(
            frame,
            chunks[1],
            "Selected Duration Metrics",
            &stat_cards(&self.run.selected, true),
        );
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec = build_chart(&self.run.resampled, self.config.metric, self.config.chart_kind, self.config.theme);
        let background = hex_color(spec.theme.background);
        let foreground = hex_color(spec.theme.foreground);

        let block = Block::default()
            .title(format!("{} [{}]", spec.title, spec.kind.display_name()))
            .borders(Borders::ALL)
            .style(Style::default().bg(background).fg(foreground));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        if spec.is_empty() {
            let msg = Paragraph::new("No data in selected range.")
                .style(Style::default().fg(Color::Yellow).bg(background));
            frame.render_widget(msg, inner);
            return;
        }

        if spec.kind == ChartKind::Pie {
            draw_pie(frame, inner, &spec);
            return;
        }

        let Some(series) = chart_series(&spec) else {
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = MetricPlottersChart {
            kind: spec.kind,
            points: &series.points,
            bar_half_width: series.bar_half_width,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            series_color: rgb(spec.series_color(0, 1)),
            axis_color: rgb(spec.theme.axis),
            x_label: spec.x_label,
            y_label: spec.y_label,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            let ticks = AxisTicks {
                origin: series.origin,
                x_bounds: series.x_bounds,
                y_bounds: series.y_bounds,
                x_label: spec.x_label,
                y_label: spec.y_label,
                style: Style::default().fg(hex_color(spec.theme.axis)).bg(background),
            };
            draw_axis_ticks(frame, inner, chart_rect, insets, &ticks);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let values = [
            date(self.config.start),
            date(self.config.end),
            self.config.bucket.display_name().to_string(),
            self.config.chart_kind.display_name().to_string(),
            self.config.theme.display_name().to_string(),
            self.config.metric.column_name().to_string(),
            self.config.export_format.display_name().to_string(),
        ];

        let items: Vec<ListItem> = FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| ListItem::new(format!("{name}: {value}")))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ±30d  m metric  u next csv  s sample  e export  f format  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_card_block(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, cards: &[StatCard]) {
    let lines: Vec<Line> = cards
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(
                    format!("{:<24}", card.title),
                    Style::default().fg(hex_color(metric_color(card.metric))),
                ),
                Span::styled(
                    format!("{:>14}", card.exact),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", card.abbreviated), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let p = Paragraph::new(Text::from(lines)).block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(p, area);
}

/// Pie charts are drawn as one labelled share bar per slice.
fn draw_pie(frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
    let slices = spec.slices();
    let bar_width = (area.width as usize).saturating_sub(20).max(1);
    let background = hex_color(spec.theme.background);

    let lines: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let filled = ((slice.share * bar_width as f64).round() as usize).min(bar_width);
            let color = hex_color(spec.series_color(idx, slices.len()));
            Line::from(vec![
                Span::raw(format!("{:<11}", slice.label)),
                Span::styled(format!("{:<bar_width$}", "█".repeat(filled)), Style::default().fg(color)),
                Span::raw(format!(" {:>5.1}%", slice.share * 100.0)),
            ])
        })
        .collect();

    let p = Paragraph::new(Text::from(lines)).style(Style::default().bg(background));
    frame.render_widget(p, area);
}

fn hex_color(hex: &str) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

fn rgb(hex: &str) -> RGBColor {
    let (r, g, b) = hex_to_rgb(hex).unwrap_or((255, 255, 255));
    RGBColor(r, g, b)
}

fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(chrono::Duration::days(days)).unwrap_or(date)
}

/// Plot-ready series: x is days since `origin`, y is the metric value.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    origin: NaiveDate,
    points: Vec<(f64, f64)>,
    bar_half_width: f64,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(spec: &ChartSpec) -> Option<ChartSeries> {
    let origin = spec.points.first()?.date;
    let points: Vec<(f64, f64)> = spec
        .points
        .iter()
        .map(|p| ((p.date - origin).num_days() as f64, p.value as f64))
        .collect();

    let x_last = points.last().map(|p| p.0).unwrap_or(0.0);
    // Typical spacing between points; one day for a single point.
    let step = if points.len() > 1 {
        x_last / (points.len() as f64 - 1.0)
    } else {
        1.0
    };
    let step = step.max(1.0);

    let y_max = spec.max_value().max(1) as f64;

    Some(ChartSeries {
        origin,
        points,
        bar_half_width: step * 0.4,
        x_bounds: [-step * 0.5, x_last + step * 0.5],
        y_bounds: [0.0, y_max * 1.05],
    })
}

fn fmt_axis_y(v: f64) -> String {
    let abbreviated = format_abbreviated(v.max(0.0) as u64);
    if abbreviated.is_empty() {
        format!("{v:.0}")
    } else {
        abbreviated.trim_matches(|c| c == '(' || c == ')').to_string()
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

struct AxisTicks<'a> {
    origin: NaiveDate,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'a str,
    y_label: &'a str,
    style: Style,
}

fn draw_axis_ticks(frame: &mut ratatui::Frame<'_>, inner: Rect, chart: Rect, insets: AxisInsets, ticks: &AxisTicks<'_>) {
    let count = 3usize;
    let [x0, x1] = ticks.x_bounds;
    let [y0, y1] = ticks.y_bounds;

    for i in 0..count {
        let u = i as f64 / (count as f64 - 1.0);
        let days = (x0 + u * (x1 - x0)).round() as i64;
        let label = shift_date(ticks.origin, days).format("%Y-%m-%d").to_string();
        let label_len = label.len() as u16;
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        // Keep the first and last labels inside the plot area.
        let start = x
            .saturating_sub(label_len / 2)
            .max(inner.x)
            .min((inner.x + inner.width).saturating_sub(label_len));
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(ticks.style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..count {
        let u = i as f64 / (count as f64 - 1.0);
        let label = fmt_axis_y(y0 + u * (y1 - y0));
        let label_len = label.len() as u16;
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(ticks.style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(ticks.x_label)
        .alignment(Alignment::Center)
        .style(ticks.style);
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(ticks.y_label).style(ticks.style.add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.min(insets.left + chart.width),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
