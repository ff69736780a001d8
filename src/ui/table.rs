use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use railway_dashboard::data::model::{Column as DataColumn, EnrichedRecord};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

const TEXT_COLUMNS: [DataColumn; 5] = [
    DataColumn::PurchaseType,
    DataColumn::TicketClass,
    DataColumn::DepartureStation,
    DataColumn::ArrivalDestination,
    DataColumn::JourneyStatus,
];

/// Table of the visible records, capped at `state.table_rows` rows.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&EnrichedRecord> = state.visible_records().take(state.table_rows).collect();
    if rows.len() < state.visible_indices.len() {
        ui.label(format!(
            "Showing the first {} of {} records",
            rows.len(),
            state.visible_indices.len()
        ));
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(90.0), TEXT_COLUMNS.len())
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for column in TEXT_COLUMNS {
                header.col(|ui| {
                    ui.strong(column.header());
                });
            }
            header.col(|ui| {
                ui.strong("Price");
            });
            header.col(|ui| {
                ui.strong("Located");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let record = rows[row.index()];
                for column in TEXT_COLUMNS {
                    row.col(|ui| {
                        ui.label(record.ticket.text(column).unwrap_or("–"));
                    });
                }
                row.col(|ui| {
                    match record.ticket.price {
                        Some(p) => ui.label(format!("£{p:.2}")),
                        None => ui.label("–"),
                    };
                });
                row.col(|ui| {
                    ui.label(located_label(record));
                });
            });
        });
}

fn located_label(record: &EnrichedRecord) -> &'static str {
    match (record.departure.is_some(), record.arrival.is_some()) {
        (true, true) => "both",
        (true, false) => "departure",
        (false, true) => "arrival",
        (false, false) => "none",
    }
}
