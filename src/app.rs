use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::{anyhow, Result};
use eframe::egui::{self, RichText, Ui};

use crate::color::MUTED_TEXT;
use crate::config::DashboardConfig;
use crate::data::loader::{spawn_load, DataSource};
use crate::data::model::FilmDataset;
use crate::state::{AppState, LoadStatus, UiEvent, LOAD_ERROR_MESSAGE};
use crate::ui::panels::{self, MenuAction};
use crate::ui::{chart, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FilmDashApp {
    pub state: AppState,

    /// Background load in flight.
    pending: Option<Receiver<Result<FilmDataset>>>,
}

impl FilmDashApp {
    /// Create the app and start loading `source` in the background.
    pub fn new(config: DashboardConfig, source: DataSource) -> Self {
        let mut app = Self {
            state: AppState::new(config),
            pending: None,
        };
        app.start_load(source);
        app
    }

    fn start_load(&mut self, source: DataSource) {
        log::info!("Loading films from {source}");
        self.state.begin_loading(source.to_string());
        self.pending = Some(spawn_load(source));
    }

    fn poll_load(&mut self) {
        let Some(receiver) = &self.pending else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(anyhow!("loader thread exited without a result")),
        };
        self.pending = None;

        match result {
            Ok(dataset) => self.state.set_dataset(dataset),
            Err(e) => self.state.set_load_error(&e),
        }
    }

    fn handle_menu(&mut self, action: MenuAction) {
        match action {
            MenuAction::Open(path) => self.start_load(DataSource::File(path)),
            MenuAction::ExportView(path) => {
                self.state.export_view(&path);
            }
        }
    }
}

impl eframe::App for FilmDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();
        if self.state.is_loading() {
            ctx.request_repaint();
        }

        let mut events: Vec<UiEvent> = Vec::new();

        // ---- Top panel: menu bar ----
        let menu_action = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui: &mut Ui| panels::top_bar(ui, &self.state))
            .inner;

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui: &mut Ui| {
                panels::side_panel(ui, &self.state, &mut events);
            });

        // ---- Central panel: chart above table ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| match self.state.status {
            LoadStatus::Failed(_) => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading(LOAD_ERROR_MESSAGE);
                });
            }
            LoadStatus::Idle | LoadStatus::Loading(_) => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new("Loading films…").color(MUTED_TEXT));
                });
            }
            LoadStatus::Ready => {
                chart::box_office_chart(ui, &mut self.state, &mut events);
                ui.separator();
                table::films_table(ui, &self.state.table);
            }
        });

        for event in events {
            self.state.handle_event(event);
        }
        if let Some(action) = menu_action {
            self.handle_menu(action);
        }
    }
}
