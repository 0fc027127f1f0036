//! Plotters-powered metric chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis rendering
//! - filled areas and bars come for free
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Style},
    widgets::Widget,
};

use crate::domain::ChartKind;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call; see
/// `chart_series` in the parent module.
pub struct MetricPlottersChart<'a> {
    /// Bar, Line or Area. Pie charts are drawn without Plotters.
    pub kind: ChartKind,
    /// `(days since first point, value)` pairs in date order.
    pub points: &'a [(f64, f64)],
    /// Half the width of one bar, in x units.
    pub bar_half_width: f64,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub series_color: RGBColor,
    pub axis_color: RGBColor,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for MetricPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(TuiColor::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Tick labels are drawn by the parent module in terminal cells.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(0)
                .y_labels(0)
                .label_style(("sans-serif", 10).into_font().color(&self.axis_color))
                .axis_style(self.axis_color.stroke_width(1))
                .draw()?;

            match self.kind {
                ChartKind::Bar => {
                    let half = self.bar_half_width;
                    let fill = self.series_color.filled();
                    chart.draw_series(
                        self.points
                            .iter()
                            .map(|&(x, y)| Rectangle::new([(x - half, 0.0), (x + half, y)], fill)),
                    )?;
                }
                ChartKind::Area => {
                    chart.draw_series(
                        AreaSeries::new(self.points.iter().copied(), 0.0, self.series_color.mix(0.35).filled())
                            .border_style(self.series_color.stroke_width(1)),
                    )?;
                }
                ChartKind::Line | ChartKind::Pie => {
                    chart.draw_series(LineSeries::new(
                        self.points.iter().copied(),
                        self.series_color.stroke_width(1),
                    ))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart<'a>(points: &'a [(f64, f64)]) -> MetricPlottersChart<'a> {
        MetricPlottersChart {
            kind: ChartKind::Area,
            points,
            bar_half_width: 0.4,
            x_bounds: [-0.5, 2.5],
            y_bounds: [0.0, 10.0],
            series_color: RGBColor(0x2c, 0xa0, 0x2c),
            axis_color: RGBColor(0x2a, 0x3f, 0x5f),
            x_label: "Date",
            y_label: "Watch Hours",
        }
    }

    #[test]
    fn small_area_shows_resize_hint() {
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);
        chart(&[(0.0, 1.0), (1.0, 5.0)]).render(area, &mut buf);

        let first_row: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(first_row.starts_with("Chart area too small"));
        assert_eq!(buf[(0, 0)].fg, TuiColor::Yellow);
    }

    #[test]
    fn degenerate_bounds_draw_nothing() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let mut widget = chart(&[(0.0, 1.0)]);
        widget.y_bounds = [0.0, 0.0];
        widget.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
