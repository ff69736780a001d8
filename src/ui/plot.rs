use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Plot};
use railway_dashboard::data::aggregate::{AggregateResult, BoxStats, StationRevenue};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
const BAR_COLOR: Color32 = Color32::from_rgb(200, 30, 30);

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

pub fn kpi_cards(ui: &mut Ui, agg: &AggregateResult) {
    ui.columns(3, |cols| {
        kpi_card(&mut cols[0], "Total Revenue", format!("£{:.0}", agg.total_revenue));
        kpi_card(&mut cols[1], "Average Ticket Price", format!("£{:.2}", agg.average_price));
        kpi_card(
            &mut cols[2],
            "Delayed Journeys",
            format!("{:.2}%", agg.delayed_percentage),
        );
    });
}

fn kpi_card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).color(Color32::GRAY));
            ui.label(RichText::new(value).size(28.0).strong());
        });
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Bar chart of a station revenue rollup, one bar per station.
pub fn station_revenue_chart(ui: &mut Ui, id: &str, title: &str, rollup: &[StationRevenue]) {
    let total: f64 = rollup.iter().map(|s| s.revenue).sum();
    ui.strong(format!("{title}  (£{total:.0})"));

    let bars: Vec<Bar> = rollup
        .iter()
        .enumerate()
        .map(|(i, s)| Bar::new(i as f64, s.revenue).name(&s.station).fill(BAR_COLOR))
        .collect();
    let names: Vec<String> = rollup.iter().map(|s| s.station.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label("Revenue (£)")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&names, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}

/// Box plot of ticket prices per class.
pub fn class_price_box_plot(ui: &mut Ui, state: &AppState) {
    let groups = &state.aggregates.price_by_class;
    ui.strong(format!(
        "Ticket Price Distribution by Class  ({} records)",
        state.visible_indices.len()
    ));

    let boxes: Vec<BoxElem> = groups
        .iter()
        .enumerate()
        .filter_map(|(i, group)| {
            let stats = BoxStats::from_values(&group.prices)?;
            let color = state.class_colors.color_for(&group.class);
            Some(
                BoxElem::new(
                    i as f64,
                    BoxSpread::new(
                        stats.lower_whisker,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.upper_whisker,
                    ),
                )
                .name(&group.class)
                .fill(color.gamma_multiply(0.4))
                .stroke(egui::Stroke::new(1.5, color)),
            )
        })
        .collect();
    let names: Vec<String> = groups.iter().map(|g| g.class.clone()).collect();

    Plot::new("class_prices")
        .height(CHART_HEIGHT)
        .y_axis_label("Price (£)")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&names, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

/// Share of journeys per status, as bars labelled with their percentage.
pub fn status_chart(ui: &mut Ui, state: &AppState) {
    let agg = &state.aggregates;
    ui.strong(format!(
        "Journey Status Distribution  ({} types)",
        agg.distinct_statuses()
    ));

    let total: usize = agg.status_distribution.iter().map(|s| s.count).sum();
    let bars: Vec<Bar> = agg
        .status_distribution
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let pct = if total == 0 {
                0.0
            } else {
                s.count as f64 / total as f64 * 100.0
            };
            Bar::new(i as f64, s.count as f64)
                .name(format!("{} ({pct:.1}%)", s.status))
                .fill(state.status_colors.color_for(&s.status))
        })
        .collect();
    let names: Vec<String> = agg
        .status_distribution
        .iter()
        .map(|s| s.status.clone())
        .collect();

    Plot::new("status_distribution")
        .height(CHART_HEIGHT)
        .y_axis_label("Journeys")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&names, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}

/// Label integer grid marks with the category drawn there.
fn category_label(names: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    names.get(value as usize).cloned().unwrap_or_default()
}
