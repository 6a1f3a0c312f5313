use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::PlotConfig;
use crate::error::{Result, VizError};
use crate::render::{Heatmap, LegendPosition, LineChart, Renderer};

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const PALETTE: [RGBColor; 4] = [BLUE, RED, GREEN, MAGENTA];

// Viridis anchor colours at 0, 1/4, 1/2, 3/4 and 1
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const COLORBAR_STEPS: usize = 64;

/// Draws charts into PNG files with the `plotters` bitmap backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngRenderer {
    width: u32,
    height: u32,
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_line_chart(&self, chart: &LineChart, path: &Path) -> DrawResult<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let ((x_min, x_max), (y_min, y_max)) = chart.bounds();
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;

        for (idx, series) in chart.series.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            let points: Vec<(f64, f64)> = series.points.iter()
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();

            let drawn = ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
            if let Some(label) = &series.label {
                drawn
                    .label(label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            }

            // Markers keep single-epoch series visible
            ctx.draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
        }

        if chart.series.iter().any(|s| s.label.is_some()) {
            ctx.configure_series_labels()
                .position(series_label_position(chart.legend))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_heatmap(&self, map: &Heatmap, path: &Path) -> DrawResult<()> {
        let (rows, cols) = map.values.dim();
        if rows == 0 || cols == 0 {
            return Err("heatmap has no cells".into());
        }
        let span = map.v_max - map.v_min;
        if !(span > 0.0) {
            return Err(format!("empty colour scale [{}, {}]", map.v_min, map.v_max).into());
        }

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled(&map.title, ("sans-serif", 20))?;

        let bar_width = (self.width / 7).max(70);
        let split = self.width.saturating_sub(bar_width) as i32;
        let (matrix_area, bar_area) = body.split_horizontally(split);

        let mut chart = ChartBuilder::on(&matrix_area)
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..cols as f64, 0f64..rows as f64)?;

        chart.configure_mesh()
            .disable_mesh()
            .x_label_formatter(&|_| String::new())
            .y_label_formatter(&|_| String::new())
            .x_desc(map.x_label.as_str())
            .y_desc(map.y_label.as_str())
            .draw()?;

        // Row 0 is drawn at the top
        let cells = map.values.indexed_iter().map(|((r, c), &value)| {
            let top = (rows - r) as f64;
            let norm = ((value - map.v_min) / span).clamp(0.0, 1.0);
            Rectangle::new([(c as f64, top - 1.0), (c as f64 + 1.0, top)], viridis(norm).filled())
        });
        chart.draw_series(cells)?;

        let annotations = map.values.indexed_iter().map(|((r, c), &value)| {
            let norm = ((value - map.v_min) / span).clamp(0.0, 1.0);
            let ink = if norm < 0.5 { WHITE } else { BLACK };
            let style = ("sans-serif", 22).into_font()
                .color(&ink)
                .pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(format!("{:.2}", value), (c as f64 + 0.5, (rows - r) as f64 - 0.5), style)
        });
        chart.draw_series(annotations)?;

        // Tick names are placed in backend pixels so they sit at cell centres
        let tick_font = ("sans-serif", 15).into_font();
        for (c, name) in map.x_ticks.iter().enumerate().take(cols) {
            let (px, py) = chart.backend_coord(&(c as f64 + 0.5, 0.0));
            let style = tick_font.color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(name.as_str(), (px, py + 6), style))?;
        }
        for (r, name) in map.y_ticks.iter().enumerate().take(rows) {
            let (px, py) = chart.backend_coord(&(0.0, (rows - r) as f64 - 0.5));
            let style = tick_font.color(&BLACK).pos(Pos::new(HPos::Right, VPos::Center));
            root.draw(&Text::new(name.as_str(), (px - 6, py), style))?;
        }

        let mut bar = ChartBuilder::on(&bar_area)
            .margin_top(15)
            .margin_bottom(65)
            .margin_right(10)
            .y_label_area_size(40)
            .build_cartesian_2d(0f64..1f64, map.v_min..map.v_max)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .draw()?;

        bar.draw_series((0..COLORBAR_STEPS).map(|i| {
            let lo = map.v_min + span * i as f64 / COLORBAR_STEPS as f64;
            let hi = map.v_min + span * (i + 1) as f64 / COLORBAR_STEPS as f64;
            let norm = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
            Rectangle::new([(0.0, lo), (1.0, hi)], viridis(norm).filled())
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::from_config(&PlotConfig::default())
    }
}

impl Renderer for PngRenderer {
    fn line_chart(&self, chart: &LineChart, path: &Path) -> Result<()> {
        self.draw_line_chart(chart, path).map_err(|e| VizError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn heatmap(&self, heatmap: &Heatmap, path: &Path) -> Result<()> {
        self.draw_heatmap(heatmap, path).map_err(|e| VizError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn series_label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Colour for `t` in [0, 1] by linear interpolation between viridis anchors
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = VIRIDIS[idx];
    let (r1, g1, b1) = VIRIDIS[idx + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
