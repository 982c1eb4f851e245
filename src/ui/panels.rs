use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::MUTED_TEXT;
use crate::data::filter::{CountryFilter, SortKey};
use crate::state::{AppState, ExportStatus, LoadStatus, UiEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Control changes are pushed onto `events`.
pub fn side_panel(ui: &mut Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };
    let bounds = dataset.options.years;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Country ----
            ui.strong("Country");
            egui::ComboBox::from_id_salt("country_filter")
                .selected_text(state.criteria.country.label())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    let all = CountryFilter::All;
                    if ui
                        .selectable_label(state.criteria.country == all, all.label())
                        .clicked()
                    {
                        events.push(UiEvent::CountryChanged(all));
                    }
                    for country in &dataset.options.countries {
                        let option = CountryFilter::Only(country.clone());
                        if ui
                            .selectable_label(state.criteria.country == option, country)
                            .clicked()
                        {
                            events.push(UiEvent::CountryChanged(option));
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Release year ----
            ui.strong("Release year");
            let mut year_min = state.criteria.year_min;
            if ui
                .add(egui::Slider::new(&mut year_min, bounds.min..=bounds.max).text("from"))
                .changed()
            {
                events.push(UiEvent::YearMinChanged(year_min));
            }
            let mut year_max = state.criteria.year_max;
            if ui
                .add(egui::Slider::new(&mut year_max, bounds.min..=bounds.max).text("to"))
                .changed()
            {
                events.push(UiEvent::YearMaxChanged(year_max));
            }
            ui.label(&state.year_range_text);
            ui.add_space(8.0);

            // ---- Sort ----
            ui.strong("Sort by");
            let selected = state.sort.map_or("Load order", SortKey::label);
            egui::ComboBox::from_id_salt("sort_by")
                .selected_text(selected)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for key in SortKey::ALL {
                        if ui
                            .selectable_label(state.sort == Some(key), key.label())
                            .clicked()
                        {
                            events.push(UiEvent::SortChanged(Some(key)));
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// File menu requests, handled by the app after the frame's widgets are drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Open(PathBuf),
    ExportView(PathBuf),
}

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> Option<MenuAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.is_loading(), egui::Button::new("Open…"))
                .clicked()
            {
                action = open_file_dialog().map(MenuAction::Open);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Export view as CSV…"))
                .clicked()
            {
                action = export_file_dialog().map(MenuAction::ExportView);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.status {
            LoadStatus::Idle => {}
            LoadStatus::Loading(source) => {
                ui.spinner();
                ui.label(format!("Loading {source}…"));
            }
            LoadStatus::Ready => {
                if let Some(ds) = &state.dataset {
                    ui.label(format!(
                        "{} films loaded, {} visible",
                        ds.len(),
                        state.visible_indices.len()
                    ));
                }
            }
            LoadStatus::Failed(detail) => {
                ui.label(RichText::new(format!("Error: {detail}")).color(Color32::RED));
            }
        }

        match &state.export {
            None => {}
            Some(ExportStatus::Saved { films, path }) => {
                ui.separator();
                ui.label(RichText::new(format!("Exported {films} films to {path}")).color(MUTED_TEXT));
            }
            Some(ExportStatus::Failed(detail)) => {
                ui.separator();
                ui.label(RichText::new(format!("Export failed: {detail}")).color(Color32::RED));
            }
        }
    });

    action
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open film data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

fn export_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export filtered films")
        .set_file_name("films_view.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
}
