use clap::Parser;

use crate::data::filter::SortKey;
use crate::data::loader::DataSource;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(
    name = "film-dash",
    version,
    about = "Explore the highest-grossing films by country, release year and box office"
)]
pub struct Cli {
    /// JSON, CSV or Parquet file, or an http(s) URL serving the JSON format.
    #[arg(long, default_value = "films_data.json")]
    pub data: String,

    /// Initial sort: box_office_desc, box_office_asc, year_desc, year_asc, title_asc.
    #[arg(long, default_value = "box_office_desc")]
    pub sort: String,

    /// Maximum number of bars in the chart.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u16).range(1..))]
    pub top: u16,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

impl Cli {
    pub fn source(&self) -> DataSource {
        DataSource::parse(&self.data)
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        let initial_sort = SortKey::from_id(&self.sort);
        if initial_sort.is_none() {
            log::warn!("Unknown sort key {:?}; keeping load order", self.sort);
        }
        DashboardConfig {
            chart_top_n: usize::from(self.top),
            initial_sort,
            ..DashboardConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

/// Layout and animation constants for the dashboard views.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Bars drawn, taken from the head of the sorted view.
    pub chart_top_n: usize,
    pub chart_height: f32,
    /// Width reserved for the title axis.
    pub label_width: f32,
    /// Space kept free between wrapped titles and the bars.
    pub label_padding: f32,
    /// Seconds for one bar to grow to full length.
    pub bar_duration_s: f64,
    /// Extra delay per bar, in seconds.
    pub bar_stagger_s: f64,
    pub initial_sort: Option<SortKey>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_top_n: 15,
            chart_height: 500.0,
            label_width: 200.0,
            label_padding: 20.0,
            bar_duration_s: 0.8,
            bar_stagger_s: 0.05,
            initial_sort: Some(SortKey::BoxOfficeDesc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let cli = Cli::parse_from(["film-dash"]);
        let config = cli.dashboard_config();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(cli.source(), DataSource::parse("films_data.json"));
    }

    #[test]
    fn unknown_sort_keeps_load_order() {
        let cli = Cli::parse_from(["film-dash", "--sort", "rating", "--top", "5"]);
        let config = cli.dashboard_config();
        assert_eq!(config.initial_sort, None);
        assert_eq!(config.chart_top_n, 5);
    }

    #[test]
    fn zero_bars_is_rejected() {
        assert!(Cli::try_parse_from(["film-dash", "--top", "0"]).is_err());
    }
}
