use eframe::egui;
use egui_plot::{HLine, Legend, Line, Plot, PlotPoints, PlotUi};
use solarplot::data::datetime::{
    format_plot_seconds, parse_display_timestamp, to_plot_seconds,
};
use solarplot::processing::projector::MAX_DISPLAY_KW;
use solarplot::PowerSeries;
use crate::ui::theme::Theme;

/// Series arranged for plotting: X is unix seconds, Y is kW.
#[derive(Default)]
pub struct ChartData {
    pub x: Vec<f64>,
    pub ac: Vec<[f64; 2]>,
    pub dc: Vec<[f64; 2]>,
    pub derived: Vec<[f64; 2]>,
    pub smoothed: Vec<[f64; 2]>,
}

impl ChartData {
    /// Rebuild plot coordinates from the projected timestamp strings.
    pub fn from_series(series: &PowerSeries) -> Self {
        let x: Vec<f64> = series
            .timestamps
            .iter()
            .map(|ts| parse_display_timestamp(ts).map_or(f64::NAN, |t| to_plot_seconds(&t)))
            .collect();

        let zip = |y: &[f64]| -> Vec<[f64; 2]> {
            x.iter()
                .zip(y)
                .filter(|(xv, yv)| xv.is_finite() && yv.is_finite())
                .map(|(&xv, &yv)| [xv, yv])
                .collect()
        };

        Self {
            ac: zip(&series.ac_kw),
            dc: zip(&series.dc_kw),
            derived: zip(&series.derived_kw),
            smoothed: zip(&series.smoothed_kw),
            x,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Shared layout for both charts: linked time axes and a 0..5 kW floor.
fn show_plot(ui: &mut egui::Ui, id: &str, height: f32, add: impl FnOnce(&mut PlotUi)) {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .link_axis("power_x", egui::Vec2b::new(true, false))
        .link_cursor("power_x", egui::Vec2b::new(true, false))
        .include_y(0.0)
        .include_y(MAX_DISPLAY_KW)
        .y_axis_label("Power (kW)")
        .x_axis_formatter(|mark, _range| format_plot_seconds(mark.value))
        .label_formatter(|name, value| {
            let time = format_plot_seconds(value.x);
            if name.is_empty() {
                time
            } else {
                format!("{name}\n{time}\n{:.3} kW", value.y)
            }
        })
        .show(ui, add);
}

/// Draw the direct-measurement chart above the energy-derived chart.
pub fn show_power_panel(
    ui: &mut egui::Ui,
    chart: &ChartData,
    theme: &Theme,
    plot_days: u32,
    smoothing_window: usize,
) {
    if chart.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("Waiting for data...");
        });
        return;
    }

    let height = ((ui.available_height() - 60.0) / 2.0).max(150.0);

    ui.heading(format!("Direct Power Measurements (Last {plot_days} Days)"));
    show_plot(ui, "direct_power", height, |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from(chart.ac.clone()))
                .name("AC Power (kW)")
                .color(theme.ac_color())
                .width(1.5),
        );
        plot_ui.line(
            Line::new(PlotPoints::from(chart.dc.clone()))
                .name("DC Power (kW)")
                .color(theme.dc_color())
                .width(1.5),
        );
    });

    ui.add_space(8.0);
    ui.heading("Power Calculated from Energy Differences (\u{0394}E/\u{0394}t)");
    show_plot(ui, "derived_power", height, |plot_ui| {
        plot_ui.hline(HLine::new(0.0).color(ui_axis_color(theme)));
        plot_ui.line(
            Line::new(PlotPoints::from(chart.derived.clone()))
                .name("Instantaneous Power")
                .color(theme.derived_raw_color())
                .width(1.0),
        );
        plot_ui.line(
            Line::new(PlotPoints::from(chart.smoothed.clone()))
                .name(format!("Smoothed (window={smoothing_window})"))
                .color(theme.derived_color())
                .width(2.0),
        );
    });
}

fn ui_axis_color(theme: &Theme) -> egui::Color32 {
    theme.visuals().text_color().gamma_multiply(0.3)
}
