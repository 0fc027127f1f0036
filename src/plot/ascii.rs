//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - bars: `#`
//! - line: `*`
//! - area fill under the line: `.`
//! - pie: one `#` share bar per slice, with its percentage

use crate::chart::ChartSpec;
use crate::domain::ChartKind;
use crate::report::format::format_with_commas;

/// Render a chart spec as text, title line first.
pub fn render_ascii_chart(spec: &ChartSpec, width: usize, height: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} [{}]\n", spec.title, spec.kind.display_name()));

    if spec.is_empty() {
        out.push_str("(no data in selected range)\n");
        return out;
    }

    match spec.kind {
        ChartKind::Pie => render_pie(spec, width, &mut out),
        ChartKind::Bar | ChartKind::Line | ChartKind::Area => render_xy(spec, width, height, &mut out),
    }
    out
}

fn render_xy(spec: &ChartSpec, width: usize, height: usize, out: &mut String) {
    let width = width.max(10);
    let height = height.max(3);
    let y_max = spec.max_value().max(1);

    let mut grid = vec![vec![' '; width]; height];
    match spec.kind {
        ChartKind::Bar => draw_bars(&mut grid, spec, y_max),
        ChartKind::Area => {
            draw_polyline(&mut grid, spec, y_max);
            fill_below(&mut grid);
        }
        _ => draw_polyline(&mut grid, spec, y_max),
    }

    let first = spec.points.first().map(|p| p.label.as_str()).unwrap_or("");
    let last = spec.points.last().map(|p| p.label.as_str()).unwrap_or("");
    out.push_str(&format!(
        "{}: {first} .. {last} | {}: 0 .. {}\n",
        spec.x_label,
        spec.y_label,
        format_with_commas(spec.max_value()),
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
}

fn draw_bars(grid: &mut [Vec<char>], spec: &ChartSpec, y_max: u64) {
    let height = grid.len();
    let width = grid[0].len();
    let n = spec.points.len();

    // Column -> tallest bar drawn there.
    let mut columns = vec![0usize; width];
    if n <= width {
        // Each point owns a slot; leave a one-column gap when slots are wide enough.
        let slot = width / n;
        let bar = if slot >= 2 { slot - 1 } else { 1 };
        for (i, p) in spec.points.iter().enumerate() {
            let filled = bar_height(p.value, y_max, height);
            for col in columns.iter_mut().skip(i * slot).take(bar) {
                *col = (*col).max(filled);
            }
        }
    } else {
        for (i, p) in spec.points.iter().enumerate() {
            let x = map_x(i, n, width);
            columns[x] = columns[x].max(bar_height(p.value, y_max, height));
        }
    }

    for (x, filled) in columns.into_iter().enumerate() {
        for row in grid.iter_mut().skip(height - filled) {
            row[x] = '#';
        }
    }
}

fn draw_polyline(grid: &mut [Vec<char>], spec: &ChartSpec, y_max: u64) {
    let height = grid.len();
    let width = grid[0].len();
    let n = spec.points.len();

    let mut prev = None;
    for (i, p) in spec.points.iter().enumerate() {
        let x = map_x(i, n, width);
        let y = map_y(p.value, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '*');
        } else {
            grid[y][x] = '*';
        }
        prev = Some((x, y));
    }
}

/// Fill every cell below the top-most line cell of each column.
fn fill_below(grid: &mut [Vec<char>]) {
    let width = grid[0].len();
    for x in 0..width {
        let Some(top) = grid.iter().position(|row| row[x] == '*') else {
            continue;
        };
        for row in grid.iter_mut().skip(top + 1) {
            if row[x] == ' ' {
                row[x] = '.';
            }
        }
    }
}

fn render_pie(spec: &ChartSpec, width: usize, out: &mut String) {
    let bar_width = width.saturating_sub(18).max(1);
    for slice in spec.slices() {
        let filled = (slice.share * bar_width as f64).round() as usize;
        let bar = "#".repeat(filled.min(bar_width));
        out.push_str(&format!(
            "{:<10} {bar:<bar_width$} {:>5.1}%\n",
            slice.label,
            slice.share * 100.0
        ));
    }
}

fn bar_height(value: u64, y_max: u64, height: usize) -> usize {
    let u = (value as f64 / y_max as f64).clamp(0.0, 1.0);
    (u * height as f64).round() as usize
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(value: u64, y_max: u64, height: usize) -> usize {
    let height = height.max(2);
    let u = (value as f64 / y_max as f64).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
