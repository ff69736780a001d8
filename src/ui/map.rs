use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};
use railway_dashboard::data::geo::{departure_points, routes};

use crate::state::AppState;

const MAP_HEIGHT: f32 = 420.0;
const ROUTE_COLOR: Color32 = Color32::from_rgb(255, 0, 0);

// ---------------------------------------------------------------------------
// Route map (central panel)
// ---------------------------------------------------------------------------

/// Departure stations and journey lines of the visible records, drawn on a
/// longitude/latitude plane centred on Great Britain.
pub fn route_map(ui: &mut Ui, state: &AppState) {
    let points = departure_points(state.visible_records());
    let routes = routes(state.visible_records());

    // 1° of longitude is ~0.6° of latitude at British latitudes.
    Plot::new("route_map")
        .height(MAP_HEIGHT)
        .data_aspect(1.6)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(-6.0)
        .include_x(2.0)
        .include_y(50.0)
        .include_y(58.0)
        .show(ui, |plot_ui| {
            if state.show_routes {
                // Many tickets share a route; draw each distinct line once.
                let mut drawn = Vec::new();
                for route in &routes {
                    let key = (route.from.lon, route.from.lat, route.to.lon, route.to.lat);
                    if drawn.contains(&key) {
                        continue;
                    }
                    drawn.push(key);
                    let line = PlotPoints::from(vec![
                        [route.from.lon, route.from.lat],
                        [route.to.lon, route.to.lat],
                    ]);
                    plot_ui.line(Line::new(line).color(ROUTE_COLOR).width(2.0));
                }
            }
            if state.show_points {
                let pts: PlotPoints = points.iter().map(|p| [p.lon, p.lat]).collect();
                plot_ui.points(
                    Points::new(pts)
                        .radius(5.0)
                        .color(ROUTE_COLOR)
                        .name("Departure stations"),
                );
            }
        });
}
