//! Chart rendering and data processing utilities.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::app::SkySenseApp;
use crate::state::{series_color, CHART_TITLE, X_AXIS_LABEL, Y_AXIS_LABEL, Y_MAX, Y_MIN};

impl SkySenseApp {
    /// Render the main chart from the cached series
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(CHART_TITLE);
        });
        ui.add_space(4.0);

        let (x_min, x_max) = self.time_range();
        let reset_view = std::mem::take(&mut self.reset_view);
        let color_blind_mode = self.settings.color_blind_mode;
        let line_width = self.settings.line_width;
        let cache = &self.chart_cache;

        let mut plot = Plot::new("skysense_chart")
            .x_axis_label(X_AXIS_LABEL)
            .y_axis_label(Y_AXIS_LABEL)
            // Epoch seconds, printed in full rather than with an offset
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .allow_double_click_reset(false);

        if self.settings.show_legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            if reset_view {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, Y_MIN], [x_max, Y_MAX]));
            }

            // Cache is in draw order: later lines render on top
            for (id, points) in cache {
                let plot_points: PlotPoints = points.iter().copied().collect();
                let color = series_color(*id, color_blind_mode);

                plot_ui.line(
                    Line::new(id.label(), plot_points)
                        .color(egui::Color32::from_rgb(color[0], color[1], color[2]))
                        .width(line_width),
                );
            }
        });
    }
}

/// LTTB (Largest Triangle Three Buckets) downsampling.
///
/// Reduces a series to at most `target_points` while preserving its visual
/// shape. The first and last points are always kept.
pub fn downsample_lttb(times: &[f64], values: &[f64], target_points: usize) -> Vec<[f64; 2]> {
    let n = times.len().min(values.len());

    if n <= target_points || target_points < 3 {
        return times
            .iter()
            .zip(values.iter())
            .map(|(t, v)| [*t, *v])
            .collect();
    }

    let mut sampled = Vec::with_capacity(target_points);
    sampled.push([times[0], values[0]]);

    let bucket_size = (n - 2) as f64 / (target_points - 2) as f64;
    let bucket_bound = |i: usize| ((i as f64 * bucket_size).floor() as usize + 1).min(n - 1);

    let mut anchor = 0usize;

    for bucket in 0..(target_points - 2) {
        let start = bucket_bound(bucket);
        let end = bucket_bound(bucket + 1).max(start + 1).min(n - 1);

        // Average of the following bucket is the third triangle vertex
        let next_end = bucket_bound(bucket + 2).max(end + 1).min(n);
        let (avg_t, avg_v) = if end < next_end {
            let count = (next_end - end) as f64;
            let sum_t: f64 = times[end..next_end].iter().sum();
            let sum_v: f64 = values[end..next_end].iter().sum();
            (sum_t / count, sum_v / count)
        } else {
            (times[n - 1], values[n - 1])
        };

        let (anchor_t, anchor_v) = (times[anchor], values[anchor]);
        let mut best_area = -1.0f64;
        let mut best = start;

        for j in start..end {
            let area = ((anchor_t - avg_t) * (values[j] - anchor_v)
                - (anchor_t - times[j]) * (avg_v - anchor_v))
                .abs();
            if area > best_area {
                best_area = area;
                best = j;
            }
        }

        sampled.push([times[best], values[best]]);
        anchor = best;
    }

    sampled.push([times[n - 1], values[n - 1]]);
    sampled
}
