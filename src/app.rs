use eframe::egui;
use std::path::{Path, PathBuf};

use crate::parsers::{SeriesCollection, SeriesId};
use crate::settings::ViewerSettings;
use crate::state::MAX_CHART_POINTS;
use crate::ui::chart::downsample_lttb;

/// Main application state
pub struct SkySenseApp {
    /// Path of the detection log being shown
    pub(crate) path: PathBuf,
    /// Parsed records; never modified after load
    pub(crate) series: SeriesCollection,
    /// Downsampled points for every series, in draw order
    pub(crate) chart_cache: Vec<(SeriesId, Vec<[f64; 2]>)>,
    pub(crate) settings: ViewerSettings,
    /// Whether settings changes are written back to disk
    pub(crate) persist_settings: bool,
    /// Restore the fixed axis bounds on the next frame
    pub(crate) reset_view: bool,
}

impl SkySenseApp {
    pub fn new(
        path: &Path,
        series: SeriesCollection,
        settings: ViewerSettings,
        persist_settings: bool,
    ) -> Self {
        let chart_cache = Self::build_chart_cache(&series);

        Self {
            path: path.to_path_buf(),
            series,
            chart_cache,
            settings,
            persist_settings,
            reset_view: true,
        }
    }

    /// Project the records into per-series point lists for the plot
    fn build_chart_cache(series: &SeriesCollection) -> Vec<(SeriesId, Vec<[f64; 2]>)> {
        let times = series.times_as_f64();

        SeriesId::all()
            .map(|id| {
                let values = series.channel(id);
                (id, downsample_lttb(&times, &values, MAX_CHART_POINTS))
            })
            .collect()
    }

    /// Horizontal bounds of the chart: first to last timestamp
    pub(crate) fn time_range(&self) -> (f64, f64) {
        let first = self.series.first_timestamp() as f64;
        let last = self.series.last_timestamp() as f64;
        if last > first {
            (first, last)
        } else {
            // Keep the plot bounds non-degenerate for single-instant logs
            (first, first + 1.0)
        }
    }

    /// Display name for the loaded file
    pub(crate) fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub(crate) fn save_settings(&self) {
        if !self.persist_settings {
            return;
        }
        if let Err(e) = self.settings.save() {
            tracing::error!("Failed to save settings: {}", e);
        }
    }

    /// Render the settings toolbar above the chart
    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut changed = false;

            changed |= ui
                .checkbox(&mut self.settings.show_legend, "Legend")
                .changed();
            changed |= ui
                .checkbox(&mut self.settings.color_blind_mode, "Color blind mode")
                .changed();

            ui.separator();
            ui.label("Line width");
            changed |= ui
                .add(egui::Slider::new(&mut self.settings.line_width, 0.5..=4.0).step_by(0.5))
                .changed();

            ui.separator();
            if ui.button("Reset view").clicked() {
                self.reset_view = true;
            }

            if changed {
                self.save_settings();
            }
        });
    }

    /// Render the record summary below the chart
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(self.file_name()).strong());
            ui.separator();
            ui.label(format!("{} records", self.series.len()));
            ui.separator();
            ui.label(format!(
                "{} .. {}",
                self.series.first_timestamp(),
                self.series.last_timestamp()
            ));
        });
    }
}

impl eframe::App for SkySenseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());

        egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_toolbar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_status(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui);
        });
    }
}
