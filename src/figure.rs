// SPDX-License-Identifier: Apache-2.0
use crate::cfg::{Cfg, Mode};
use crate::layout::{axis_refs, Grid};
use crate::select::Series;
use plotly::common::{Anchor, Mode as TraceMode, Title};
use plotly::layout::{Annotation, Axis, AxisType, GridPattern, Layout, LayoutGrid, RowOrder};

const LATENCY_LABEL: &str = "latency (µs)";
const ROW_HEIGHT_PX: usize = 320;
// Extra room between stacked subplots for their titles
const ROW_GAP: f64 = 0.35;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

type Subplot<X> = (Box<plotly::Scatter<X, f64>>, Axis, Axis);

fn subplot_title(cfg: &Cfg, series: &Series) -> String {
    match &cfg.subtitle {
        Some(s) => s.clone(),
        None => format!("pid={}", series.pid),
    }
}

fn with_axes(layout: Layout, i: usize, x: Axis, y: Axis) -> Layout {
    match i {
        0 => layout.x_axis(x).y_axis(y),
        1 => layout.x_axis2(x).y_axis2(y),
        2 => layout.x_axis3(x).y_axis3(y),
        3 => layout.x_axis4(x).y_axis4(y),
        4 => layout.x_axis5(x).y_axis5(y),
        5 => layout.x_axis6(x).y_axis6(y),
        6 => layout.x_axis7(x).y_axis7(y),
        _ => layout.x_axis8(x).y_axis8(y),
    }
}

fn y_limit(cfg: &Cfg, y: Axis) -> Axis {
    match cfg.ylim {
        Some(lim) => y.range(vec![0.0, lim as f64]),
        None => y,
    }
}

fn raster_subplot(cfg: &Cfg, series: &Series, xref: &str, yref: &str) -> Subplot<String> {
    let trace = plotly::Scatter::new(
        series
            .points
            .iter()
            .map(|(t, _)| t.format(TIME_FORMAT).to_string())
            .collect(),
        series.delays(),
    )
    .mode(TraceMode::Markers)
    .name(&format!("pid={}", series.pid))
    .show_legend(false)
    .x_axis(xref)
    .y_axis(yref);
    let mut x = Axis::new().title(Title::with_text("Time")).type_(AxisType::Date);
    if let (Some(lim), Some(start)) = (cfg.xlim, series.first_time()) {
        let end = start + chrono::Duration::seconds(lim as i64);
        x = x.range(vec![
            start.format(TIME_FORMAT).to_string(),
            end.format(TIME_FORMAT).to_string(),
        ]);
    }
    let y = y_limit(cfg, Axis::new().title(Title::with_text(LATENCY_LABEL)));
    (trace, x, y)
}

fn cdf_subplot(cfg: &Cfg, series: &Series, xref: &str, yref: &str) -> Subplot<f64> {
    let points = crate::stats::cdf(&series.delays());
    let trace = plotly::Scatter::new(
        points.iter().map(|p| p.delay).collect(),
        points.iter().map(|p| p.cdf).collect(),
    )
    .mode(TraceMode::Lines)
    .name(&format!("pid={}", series.pid))
    .show_legend(false)
    .x_axis(xref)
    .y_axis(yref);
    let mut x = Axis::new().title(Title::with_text(LATENCY_LABEL));
    if let Some(lim) = cfg.xlim {
        x = x.range(vec![0.0, lim as f64]);
    }
    let y = y_limit(cfg, Axis::new().tick_format(".2%"));
    (trace, x, y)
}

/// Lays out one subplot per series and renders them according to `cfg.mode`.
pub fn build(series: &[Series], cfg: &Cfg) -> Result<plotly::Plot, crate::Error> {
    let grid = Grid::for_count(series.len())?;
    log::debug!("{} subplots in a {}x{} grid", series.len(), grid.rows, grid.cols);
    let mut plot = plotly::Plot::new();
    let mut layout = Layout::new()
        .grid(
            LayoutGrid::new()
                .rows(grid.rows)
                .columns(grid.cols)
                .pattern(GridPattern::Independent)
                .row_order(RowOrder::TopToBottom)
                .y_gap(ROW_GAP),
        )
        .height(ROW_HEIGHT_PX * grid.rows);
    if let Some(title) = &cfg.title {
        layout = layout.title(Title::with_text(title));
    }
    let mut annotations = Vec::new();
    for (i, s) in series.iter().enumerate() {
        let (xref, yref) = axis_refs(i);
        let (x, y) = match cfg.mode {
            Mode::Raster => {
                let (trace, x, y) = raster_subplot(cfg, s, &xref, &yref);
                plot.add_trace(trace);
                annotations.push(
                    Annotation::new()
                        .text(&subplot_title(cfg, s))
                        .x_ref(&format!("{xref} domain"))
                        .y_ref(&format!("{yref} domain"))
                        .x(0.5)
                        .y(1.0)
                        .x_anchor(Anchor::Center)
                        .y_anchor(Anchor::Bottom)
                        .show_arrow(false),
                );
                (x, y)
            }
            Mode::Cdf => {
                let (trace, x, y) = cdf_subplot(cfg, s, &xref, &yref);
                plot.add_trace(trace);
                (x, y)
            }
        };
        layout = with_axes(layout, i, x, y);
    }
    if !annotations.is_empty() {
        layout = layout.annotations(annotations);
    }
    plot.set_layout(layout);
    Ok(plot)
}

/// Writes the figure as a standalone HTML file.
pub fn save(plot: &plotly::Plot, path: impl AsRef<std::path::Path>) -> Result<(), crate::Error> {
    let path = path.as_ref();
    std::fs::write(path, plot.to_html())?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
