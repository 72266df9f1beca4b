use std::time::{Duration, Instant};
use eframe::egui;
use solarplot::data::export;
use solarplot::data::log_parser::ParseDiagnostics;
use solarplot::{PipelineConfig, PowerSeries};
use crate::ui::power_panel::{self, ChartData};
use crate::ui::theme::Theme;

/// The solar power viewer. Every reload is a full run of the pipeline.
pub struct SolarPlotApp {
    pub config: PipelineConfig,
    pub theme: Theme,
    series: PowerSeries,
    chart: ChartData,
    diagnostics: ParseDiagnostics,
    last_reload: Instant,
    last_reload_label: String,
    /// An error message to display until dismissed.
    pub error_message: Option<String>,
}

impl SolarPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: PipelineConfig) -> Self {
        let theme = Theme::default();

        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(18.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(theme.visuals());

        let mut app = Self {
            config,
            theme,
            series: PowerSeries::default(),
            chart: ChartData::default(),
            diagnostics: ParseDiagnostics::default(),
            last_reload: Instant::now(),
            last_reload_label: String::new(),
            error_message: None,
        };
        app.reload();
        app
    }

    /// Re-read and reprocess the whole log.
    fn reload(&mut self) {
        let output = solarplot::run(&self.config);
        self.chart = ChartData::from_series(&output.series);
        self.series = output.series;
        self.diagnostics = output.diagnostics;
        self.last_reload = Instant::now();
        self.last_reload_label = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }

    fn open_log_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Log Files", &["log", "txt"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.config.log_path = path;
            self.reload();
        }
    }

    fn export_csv_dialog(&mut self) {
        if self.series.is_empty() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("solar_power.csv")
            .add_filter("CSV Files", &["csv"])
            .save_file()
        {
            if let Err(e) = export::export_csv(&self.series, &path) {
                tracing::error!("Failed to export CSV: {e}");
                self.error_message = Some(e);
            }
        }
    }

    /// Apply edited settings, keeping the old ones if they do not validate.
    fn apply_settings(&mut self, candidate: PipelineConfig) {
        match candidate.validate() {
            Ok(()) => {
                self.config = candidate;
                self.reload();
            }
            Err(e) => self.error_message = Some(e),
        }
    }

    fn status_text(&self) -> String {
        let diag = &self.diagnostics;
        if diag.missing_file {
            return format!("{} not found", self.config.log_path.display());
        }
        if let Some(e) = &diag.read_error {
            return e.clone();
        }
        format!(
            "{} points | {} lines, {} skipped | updated {}",
            self.series.len(),
            diag.lines_read,
            diag.total_skipped(),
            self.last_reload_label
        )
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open log\u{2026}").clicked() {
                self.open_log_dialog();
            }
            if ui.button("\u{27F3} Reload").clicked() {
                self.reload();
            }
            if ui
                .add_enabled(!self.series.is_empty(), egui::Button::new("Export CSV\u{2026}"))
                .clicked()
            {
                self.export_csv_dialog();
            }
            if ui.button(self.theme.toggle().label()).clicked() {
                self.theme = self.theme.toggle();
                ui.ctx().set_visuals(self.theme.visuals());
            }

            ui.separator();

            let mut candidate = self.config.clone();
            ui.label("Days");
            let days_changed = ui
                .add(egui::DragValue::new(&mut candidate.plot_days).range(0..=365))
                .changed();
            ui.label("Smoothing");
            let window_changed = ui
                .add(egui::DragValue::new(&mut candidate.smoothing_window).range(1..=99))
                .changed();
            if days_changed || window_changed {
                self.apply_settings(candidate);
            }

            ui.separator();
            ui.label(self.status_text());
        });
    }
}

impl eframe::App for SolarPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.config.refresh_interval_secs > 0 {
            let interval = Duration::from_secs(self.config.refresh_interval_secs);
            let elapsed = self.last_reload.elapsed();
            if elapsed >= interval {
                self.reload();
                ctx.request_repaint_after(interval);
            } else {
                ctx.request_repaint_after(interval - elapsed);
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            power_panel::show_power_panel(
                ui,
                &self.chart,
                &self.theme,
                self.config.plot_days,
                self.config.smoothing_window,
            );
        });

        if let Some(msg) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&msg);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}
