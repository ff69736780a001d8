use eframe::egui;

use crate::state::AppState;
use crate::ui::{map, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RailwayDashboardApp {
    pub state: AppState,
}

impl RailwayDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RailwayDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + map options ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, map, records ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let state = &self.state;

                    ui.heading("Key Performance Indicators");
                    plot::kpi_cards(ui, &state.aggregates);
                    ui.add_space(8.0);

                    ui.heading("Visualizations");
                    ui.columns(2, |cols| {
                        plot::station_revenue_chart(
                            &mut cols[0],
                            "departure_revenue",
                            "Revenue by Departure Station",
                            &state.aggregates.departure_revenue,
                        );
                        plot::class_price_box_plot(&mut cols[1], state);
                    });
                    ui.columns(2, |cols| {
                        plot::status_chart(&mut cols[0], state);
                        plot::station_revenue_chart(
                            &mut cols[1],
                            "arrival_revenue",
                            "Top 10 Arrival Stations by Revenue",
                            &state.aggregates.arrival_revenue,
                        );
                    });
                    ui.add_space(8.0);

                    ui.heading("Geographical Map with Routes");
                    map::route_map(ui, state);
                    ui.add_space(8.0);

                    ui.heading("Records");
                    table::record_table(ui, state);
                });
        });
    }
}
