//! film_dash
//!
//! Desktop dashboard for the highest-grossing films dataset: filter by
//! country and release-year range, sort, and browse the result as a table
//! and a horizontal box office bar chart.
//!
//! The egui-free pieces (loading, filtering, the table and chart models and
//! the [`state::AppState`] controller) are usable on their own:
//!
//! ```no_run
//! use film_dash::config::DashboardConfig;
//! use film_dash::data::filter::CountryFilter;
//! use film_dash::data::loader::{load_source, DataSource};
//! use film_dash::state::{AppState, UiEvent};
//!
//! let dataset = load_source(&DataSource::parse("films_data.json"))?;
//! let mut state = AppState::new(DashboardConfig::default());
//! state.set_dataset(dataset);
//! state.handle_event(UiEvent::CountryChanged(CountryFilter::Only("France".into())));
//! for film in state.visible_films() {
//!     println!("{} ({:?})", film.title, film.release_year);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod format;
pub mod state;
pub mod ui;
