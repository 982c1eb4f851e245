use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::export::save_csv;
use crate::data::filter::{filtered_indices, CountryFilter, FilterCriteria, SortKey};
use crate::data::model::{Film, FilmDataset};
use crate::ui::chart::ChartModel;
use crate::ui::table::TableView;

// ---------------------------------------------------------------------------
// Events emitted by the controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    YearMinChanged(i32),
    YearMaxChanged(i32),
    CountryChanged(CountryFilter),
    SortChanged(Option<SortKey>),
    /// Width available to the chart changed.
    Resized(f32),
}

/// Which views an event rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderScope {
    pub table: bool,
    pub chart: bool,
}

impl RenderScope {
    pub const NONE: RenderScope = RenderScope { table: false, chart: false };
    pub const CHART: RenderScope = RenderScope { table: false, chart: true };
    pub const BOTH: RenderScope = RenderScope { table: true, chart: true };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    Idle,
    /// Background load in flight; holds the source label.
    Loading(String),
    Ready,
    /// Load or validation failed; holds the error chain.
    Failed(String),
}

/// Outcome of the last view export, shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Saved { films: usize, path: String },
    Failed(String),
}

/// Shown in place of the views when loading fails.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data. Please try again later.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until the first load completes).
    pub dataset: Option<FilmDataset>,

    /// Year range and country currently selected.
    pub criteria: FilterCriteria,

    /// Active sort; `None` keeps load order.
    pub sort: Option<SortKey>,

    /// Indices of films passing the current filters, in sort order.
    pub visible_indices: Vec<usize>,

    /// Text next to the year sliders, always the post-clamp range.
    pub year_range_text: String,

    pub table: TableView,
    pub chart: ChartModel,

    /// `egui` time at which the bar animation started; reset on every chart rebuild.
    pub chart_anim_start: Option<f64>,

    /// Last width the chart was laid out for.
    pub chart_width: Option<f32>,

    pub status: LoadStatus,

    /// Cleared when a new load starts.
    pub export: Option<ExportStatus>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let sort = config.initial_sort;
        Self {
            config,
            dataset: None,
            criteria: FilterCriteria {
                year_min: 0,
                year_max: 0,
                country: CountryFilter::All,
            },
            sort,
            visible_indices: Vec::new(),
            year_range_text: String::new(),
            table: TableView::default(),
            chart: ChartModel::default(),
            chart_anim_start: None,
            chart_width: None,
            status: LoadStatus::Idle,
            export: None,
        }
    }

    pub fn begin_loading(&mut self, source: impl Into<String>) {
        self.status = LoadStatus::Loading(source.into());
        self.export = None;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading(_))
    }

    /// Ingest a newly loaded dataset: reset filters to the full span and render.
    pub fn set_dataset(&mut self, dataset: FilmDataset) {
        self.criteria = FilterCriteria::full_span(dataset.options.years);
        self.year_range_text = self.criteria.range_text();
        self.dataset = Some(dataset);
        self.status = LoadStatus::Ready;
        self.refilter();
        self.render(RenderScope::BOTH);
    }

    /// Enter the error state; the views are replaced by [`LOAD_ERROR_MESSAGE`].
    pub fn set_load_error(&mut self, error: &anyhow::Error) {
        log::error!("Failed to load films: {error:#}");
        self.status = LoadStatus::Failed(format!("{error:#}"));
        self.dataset = None;
        self.visible_indices.clear();
        self.table = TableView::default();
        self.chart = ChartModel::default();
    }

    /// Apply one control change and rebuild the affected views.
    pub fn handle_event(&mut self, event: UiEvent) -> RenderScope {
        let Some(bounds) = self.dataset.as_ref().map(|ds| ds.options.years) else {
            return RenderScope::NONE;
        };
        log::debug!("{event:?}");

        let scope = match event {
            UiEvent::YearMinChanged(year) => {
                self.criteria.year_min = bounds.clamp(year);
                if self.criteria.year_min > self.criteria.year_max {
                    self.criteria.year_max = self.criteria.year_min;
                }
                self.year_range_text = self.criteria.range_text();
                self.refilter();
                RenderScope::BOTH
            }
            UiEvent::YearMaxChanged(year) => {
                self.criteria.year_max = bounds.clamp(year);
                if self.criteria.year_max < self.criteria.year_min {
                    self.criteria.year_min = self.criteria.year_max;
                }
                self.year_range_text = self.criteria.range_text();
                self.refilter();
                RenderScope::BOTH
            }
            UiEvent::CountryChanged(country) => {
                self.criteria.country = country;
                self.refilter();
                RenderScope::BOTH
            }
            UiEvent::SortChanged(sort) => {
                self.sort = sort;
                self.refilter();
                RenderScope::BOTH
            }
            UiEvent::Resized(width) => {
                let previous = self.chart_width.replace(width);
                if previous.is_some() && previous != Some(width) && !self.visible_indices.is_empty() {
                    RenderScope::CHART
                } else {
                    RenderScope::NONE
                }
            }
        };

        self.render(scope);
        scope
    }

    /// Recompute `visible_indices` after a criteria or sort change.
    fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(&ds.films, &self.criteria, self.sort);
            log::debug!(
                "{} of {} films visible ({})",
                self.visible_indices.len(),
                ds.len(),
                self.year_range_text
            );
        }
    }

    fn render(&mut self, scope: RenderScope) {
        let Some(ds) = &self.dataset else {
            return;
        };
        if scope.table {
            self.table = TableView::build(&ds.films, &self.visible_indices);
        }
        if scope.chart {
            self.chart = ChartModel::build(&ds.films, &self.visible_indices, &self.config);
            self.chart_anim_start = None;
        }
    }

    /// Write the current view to `path` as CSV and keep the outcome for the status bar.
    pub fn export_view(&mut self, path: &Path) -> &ExportStatus {
        let films: Vec<Film> = self.visible_films().cloned().collect();
        let status = match save_csv(&films, path) {
            Ok(()) => {
                log::info!("Exported {} films to {}", films.len(), path.display());
                ExportStatus::Saved {
                    films: films.len(),
                    path: path.display().to_string(),
                }
            }
            Err(e) => {
                log::error!("Export to {} failed: {e:#}", path.display());
                ExportStatus::Failed(format!("{e:#}"))
            }
        };
        self.export.insert(status)
    }

    /// Films in the current view, in view order.
    pub fn visible_films(&self) -> impl Iterator<Item = &Film> + '_ {
        let films: &[Film] = match &self.dataset {
            Some(ds) => &ds.films,
            None => &[],
        };
        self.visible_indices.iter().map(move |&i| &films[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::film;

    fn loaded() -> AppState {
        let mut films = vec![
            film("Amélie", Some(2001), 174e6, "France"),
            film("Titanic", Some(1997), 2264e6, "USA"),
            film("Lucy", Some(2014), 463e6, "France"),
            film("Avatar", Some(2009), 2923e6, "USA"),
            film("Taken", Some(2008), 226e6, "France"),
            film("Home Alone", Some(1990), 476e6, "USA"),
            film("Joker", Some(2019), 1078e6, "USA"),
            film("Lost reel", None, 1e6, "France"),
        ];
        for i in 0..12 {
            films.push(film(&format!("Sequel {i}"), Some(2020), 1e6 * i as f64, "USA"));
        }
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(FilmDataset::new(films).unwrap());
        state
    }

    fn titles(state: &AppState) -> Vec<&str> {
        state.visible_films().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn load_applies_full_span_and_initial_sort() {
        let state = loaded();
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(state.year_range_text, "1990 - 2020");
        assert_eq!(state.visible_indices.len(), 19);
        assert_eq!(titles(&state)[..2], ["Avatar", "Titanic"]);
        assert_eq!(state.chart.bar_count(), 15);
        assert_eq!(state.table.rows().len(), 19);
    }

    #[test]
    fn raising_min_above_max_drags_max_along() {
        let mut state = loaded();
        state.handle_event(UiEvent::YearMaxChanged(2005));
        let scope = state.handle_event(UiEvent::YearMinChanged(2010));
        assert_eq!(scope, RenderScope::BOTH);
        assert_eq!((state.criteria.year_min, state.criteria.year_max), (2010, 2010));
        assert_eq!(state.year_range_text, "2010 - 2010");
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn lowering_max_below_min_drags_min_along() {
        let mut state = loaded();
        state.handle_event(UiEvent::YearMinChanged(2008));
        state.handle_event(UiEvent::YearMaxChanged(1995));
        assert_eq!((state.criteria.year_min, state.criteria.year_max), (1995, 1995));
        assert_eq!(state.year_range_text, "1995 - 1995");
    }

    #[test]
    fn year_inputs_are_clamped_to_dataset_span() {
        let mut state = loaded();
        state.handle_event(UiEvent::YearMinChanged(1800));
        state.handle_event(UiEvent::YearMaxChanged(2100));
        assert_eq!(state.year_range_text, "1990 - 2020");
    }

    #[test]
    fn country_and_sort_refilter_both_views() {
        let mut state = loaded();
        state.handle_event(UiEvent::YearMinChanged(2000));
        state.handle_event(UiEvent::YearMaxChanged(2010));
        let scope = state.handle_event(UiEvent::CountryChanged(CountryFilter::Only("France".into())));
        assert_eq!(scope, RenderScope::BOTH);
        assert_eq!(titles(&state), ["Taken", "Amélie"]);

        state.handle_event(UiEvent::SortChanged(Some(SortKey::YearAsc)));
        assert_eq!(titles(&state), ["Amélie", "Taken"]);
        assert_eq!(state.table.rows().len(), 2);
        assert_eq!(state.chart.bar_count(), 2);
    }

    #[test]
    fn unknown_sort_keeps_load_order() {
        let mut state = loaded();
        state.handle_event(UiEvent::CountryChanged(CountryFilter::Only("France".into())));
        state.handle_event(UiEvent::SortChanged(SortKey::from_id("popularity")));
        assert_eq!(titles(&state), ["Amélie", "Lucy", "Taken"]);
    }

    #[test]
    fn empty_result_renders_placeholders() {
        let mut state = loaded();
        state.handle_event(UiEvent::CountryChanged(CountryFilter::Only("Japan".into())));
        assert_eq!(state.table, TableView::Empty);
        assert_eq!(state.chart, ChartModel::Empty);
    }

    #[test]
    fn resize_rebuilds_chart_only_when_needed() {
        let mut state = loaded();
        assert_eq!(state.handle_event(UiEvent::Resized(800.0)), RenderScope::NONE);

        state.chart_anim_start = Some(1.0);
        assert_eq!(state.handle_event(UiEvent::Resized(800.0)), RenderScope::NONE);
        assert_eq!(state.chart_anim_start, Some(1.0));

        assert_eq!(state.handle_event(UiEvent::Resized(640.0)), RenderScope::CHART);
        assert_eq!(state.chart_anim_start, None);

        state.handle_event(UiEvent::CountryChanged(CountryFilter::Only("Japan".into())));
        assert_eq!(state.handle_event(UiEvent::Resized(900.0)), RenderScope::NONE);
    }

    #[test]
    fn events_before_load_are_ignored() {
        let mut state = AppState::new(DashboardConfig::default());
        assert_eq!(state.handle_event(UiEvent::YearMinChanged(2000)), RenderScope::NONE);
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn export_outcome_is_kept_for_the_status_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded();
        state.handle_event(UiEvent::CountryChanged(CountryFilter::Only("France".into())));

        let path = dir.path().join("view.csv");
        let status = state.export_view(&path).clone();
        assert_eq!(
            status,
            ExportStatus::Saved {
                films: 3,
                path: path.display().to_string()
            }
        );
        assert!(std::fs::read_to_string(&path).unwrap().contains("Amélie"));

        let missing_dir = dir.path().join("no_such_dir").join("view.csv");
        assert!(matches!(state.export_view(&missing_dir), ExportStatus::Failed(_)));
        assert!(matches!(state.export, Some(ExportStatus::Failed(_))));

        state.begin_loading("films_data.json");
        assert_eq!(state.export, None);
    }

    #[test]
    fn load_error_clears_views() {
        let mut state = loaded();
        state.set_load_error(&anyhow::anyhow!("connection refused"));
        assert_eq!(state.status, LoadStatus::Failed("connection refused".into()));
        assert!(state.dataset.is_none());
        assert_eq!(state.visible_films().count(), 0);
    }
}
