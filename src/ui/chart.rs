use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Plot};

use crate::color::{YearGradient, HIGHLIGHT_STROKE, MUTED_TEXT, OLDEST_BAR};
use crate::config::DashboardConfig;
use crate::data::model::Film;
use crate::format::{format_usd, format_usd_tick, format_year};
use crate::state::{AppState, UiEvent};

pub const NO_DATA: &str = "No data available for the current filters";
pub const X_AXIS_TITLE: &str = "Box Office Revenue (USD)";

/// Bar thickness as a fraction of one title slot.
const BAR_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// Everything needed to draw one bar, computed without egui_plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    /// Index of the film in the full dataset.
    pub film_index: usize,
    /// Film title, wrapped to the label column when drawn.
    pub title: String,
    pub value: f64,
    pub color: Color32,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartModel {
    /// Nothing to plot; a centered message replaces the axes.
    #[default]
    Empty,
    Bars { bars: Vec<ChartBar>, x_max: f64 },
}

impl ChartModel {
    /// Take the head of the sorted view (up to `chart_top_n` films) and lay it out.
    /// The chart never re-sorts.
    pub fn build(films: &[Film], visible: &[usize], config: &DashboardConfig) -> Self {
        let shown: Vec<usize> = visible.iter().copied().take(config.chart_top_n).collect();
        if shown.is_empty() {
            return ChartModel::Empty;
        }

        let x_max = shown
            .iter()
            .map(|&i| films[i].box_office_or_zero())
            .fold(0.0, f64::max);
        let gradient = YearGradient::spanning(shown.iter().filter_map(|&i| films[i].release_year));

        let bars = shown
            .iter()
            .map(|&i| {
                let film = &films[i];
                let color = match (gradient, film.release_year) {
                    (Some(g), Some(year)) => g.color_for(year),
                    _ => OLDEST_BAR,
                };
                ChartBar {
                    film_index: i,
                    title: film.title.clone(),
                    value: film.box_office_or_zero(),
                    color,
                    tooltip: tooltip_text(film),
                }
            })
            .collect();

        ChartModel::Bars {
            bars,
            x_max: if x_max > 0.0 { x_max } else { 1.0 },
        }
    }

    pub fn bar_count(&self) -> usize {
        match self {
            ChartModel::Empty => 0,
            ChartModel::Bars { bars, .. } => bars.len(),
        }
    }
}

/// Title, `year • director`, and the full dollar figure.
pub fn tooltip_text(film: &Film) -> String {
    format!(
        "{}\n{} • {}\n{}",
        film.title,
        format_year(film.release_year),
        film.director,
        format_usd(film.box_office_or_zero())
    )
}

/// Width a wrapped title may occupy left of the bars.
fn label_wrap_width(config: &DashboardConfig) -> f32 {
    (config.label_width - config.label_padding).max(0.0)
}

/// Greedy word wrap at `max_width`, using `measure` for the rendered width of
/// a line. Words wider than a line keep a line of their own.
pub fn wrap_label(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Geometry and animation
// ---------------------------------------------------------------------------

/// Vertical slot of the `i`-th bar; the first bar sits at the top.
pub fn slot(i: usize, n: usize) -> f64 {
    (n - 1 - i) as f64
}

/// Bar index for a slot coordinate, if it lands exactly on one.
pub fn slot_index(y: f64, n: usize) -> Option<usize> {
    let r = y.round();
    if (y - r).abs() > 1e-6 || r < 0.0 || r >= n as f64 {
        return None;
    }
    Some(n - 1 - r as usize)
}

/// Bar under the plot coordinate `(x, y)`, given each bar's length.
pub fn bar_at(x: f64, y: f64, values: &[f64]) -> Option<usize> {
    let n = values.len();
    let r = y.round();
    if (y - r).abs() > BAR_WIDTH / 2.0 || r < 0.0 || r >= n as f64 {
        return None;
    }
    let i = n - 1 - r as usize;
    (0.0..=values[i]).contains(&x).then_some(i)
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Fraction of its final length bar `index` has grown to `elapsed` seconds
/// after the chart was built.
pub fn bar_progress(elapsed: f64, index: usize, config: &DashboardConfig) -> f64 {
    let start = index as f64 * config.bar_stagger_s;
    let t = ((elapsed - start) / config.bar_duration_s).clamp(0.0, 1.0);
    ease_cubic_in_out(t)
}

fn animation_length(n: usize, config: &DashboardConfig) -> f64 {
    config.bar_duration_s + config.bar_stagger_s * n.saturating_sub(1) as f64
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draw the box office chart, or the placeholder when nothing matches.
///
/// A change of available width is reported as [`UiEvent::Resized`].
pub fn box_office_chart(ui: &mut Ui, state: &mut AppState, events: &mut Vec<UiEvent>) {
    let width = ui.available_width();
    if state.chart_width != Some(width) {
        events.push(UiEvent::Resized(width));
    }

    let config = &state.config;
    let (bars, x_max) = match &state.chart {
        ChartModel::Bars { bars, x_max } => (bars, *x_max),
        ChartModel::Empty => {
            ui.allocate_ui(egui::vec2(width, config.chart_height), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(NO_DATA).color(MUTED_TEXT));
                });
            });
            return;
        }
    };

    let now = ui.input(|i| i.time);
    let started = *state.chart_anim_start.get_or_insert(now);
    let elapsed = now - started;
    let n = bars.len();
    if elapsed < animation_length(n, config) {
        ui.ctx().request_repaint();
    }

    let font_id = egui::TextStyle::Body.resolve(ui.style());
    let wrap_width = label_wrap_width(config);
    let labels: Vec<String> = ui.fonts(|fonts| {
        let measure = |line: &str| {
            fonts
                .layout_no_wrap(line.to_owned(), font_id.clone(), Color32::PLACEHOLDER)
                .size()
                .x
        };
        bars.iter()
            .map(|b| wrap_label(&b.title, wrap_width, &measure))
            .collect()
    });
    let values: Vec<f64> = bars.iter().map(|b| b.value).collect();

    Plot::new("box_office_chart")
        .height(config.chart_height)
        .y_axis_min_width(config.label_width)
        .x_axis_label(X_AXIS_TITLE)
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_usd_tick(mark.value)
        })
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            slot_index(mark.value, labels.len())
                .map(|i| labels[i].clone())
                .unwrap_or_default()
        })
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .show_grid([true, false])
        .include_x(0.0)
        .include_x(x_max * 1.05)
        .include_y(-0.5)
        .include_y(n as f64 - 0.5)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            let hovered = plot_ui
                .pointer_coordinate()
                .and_then(|p| bar_at(p.x, p.y, &values));

            let chart_bars: Vec<Bar> = bars
                .iter()
                .enumerate()
                .map(|(i, bar)| {
                    let grown = bar.value * bar_progress(elapsed, i, config);
                    let plot_bar = Bar::new(slot(i, n), grown)
                        .name(&bar.tooltip)
                        .width(BAR_WIDTH);
                    if hovered == Some(i) {
                        plot_bar
                            .fill(bar.color.gamma_multiply(0.8))
                            .stroke(Stroke::new(2.0, HIGHLIGHT_STROKE))
                    } else {
                        plot_bar.fill(bar.color)
                    }
                })
                .collect();

            plot_ui.bar_chart(
                BarChart::new(chart_bars)
                    .horizontal()
                    .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone())),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NEWEST_BAR;
    use crate::data::model::film;

    fn many(n: usize) -> Vec<Film> {
        (0..n)
            .map(|i| film(&format!("Film {i}"), Some(1990 + i as i32), (i + 1) as f64 * 1e8, "USA"))
            .collect()
    }

    #[test]
    fn caps_at_top_n_in_view_order() {
        let films = many(20);
        let visible: Vec<usize> = (0..20).rev().collect();
        let model = ChartModel::build(&films, &visible, &DashboardConfig::default());
        let ChartModel::Bars { bars, x_max } = &model else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 15);
        let shown: Vec<usize> = bars.iter().map(|b| b.film_index).collect();
        assert_eq!(shown, visible[..15].to_vec());
        assert_eq!(*x_max, 20e8);
    }

    #[test]
    fn colours_follow_displayed_year_span() {
        let films = many(3);
        let model = ChartModel::build(&films, &[0, 1, 2], &DashboardConfig::default());
        let ChartModel::Bars { bars, .. } = &model else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].color, OLDEST_BAR);
        assert_eq!(bars[2].color, NEWEST_BAR);
    }

    #[test]
    fn empty_view_has_no_bars() {
        let films = many(3);
        let model = ChartModel::build(&films, &[], &DashboardConfig::default());
        assert_eq!(model, ChartModel::Empty);
        assert_eq!(model.bar_count(), 0);
    }

    #[test]
    fn zero_revenue_still_has_a_scale() {
        let films = vec![film("Flop", Some(2000), 0.0, "USA")];
        let model = ChartModel::build(&films, &[0], &DashboardConfig::default());
        assert!(matches!(model, ChartModel::Bars { x_max, .. } if x_max == 1.0));
    }

    /// Seven points per character, like a narrow monospace font.
    fn monospace(line: &str) -> f32 {
        line.chars().count() as f32 * 7.0
    }

    #[test]
    fn wraps_titles_on_word_boundaries() {
        let width = label_wrap_width(&DashboardConfig::default());
        assert_eq!(width, 180.0);
        assert_eq!(
            wrap_label("Harry Potter and the Deathly Hallows – Part 2", width, monospace),
            "Harry Potter and the\nDeathly Hallows – Part 2"
        );
        assert_eq!(wrap_label("Avatar", width, monospace), "Avatar");
        assert_eq!(
            wrap_label("Supercalifragilistic word", 35.0, monospace),
            "Supercalifragilistic\nword"
        );
    }

    #[test]
    fn wide_glyphs_wrap_sooner() {
        let wide_w = |line: &str| {
            line.chars()
                .map(|c| if c == 'W' { 14.0 } else { 7.0 })
                .sum::<f32>()
        };
        assert_eq!(wrap_label("WWWW WWWW", 100.0, monospace), "WWWW WWWW");
        assert_eq!(wrap_label("WWWW WWWW", 100.0, wide_w), "WWWW\nWWWW");
    }

    #[test]
    fn tooltip_lists_details() {
        let f = film("Avatar", Some(2009), 2_923_706_026.0, "USA");
        assert_eq!(
            tooltip_text(&f),
            "Avatar\n2009 • Director of Avatar\n$2,923,706,026"
        );
    }

    #[test]
    fn first_bar_is_on_top() {
        assert_eq!(slot(0, 3), 2.0);
        assert_eq!(slot(2, 3), 0.0);
        assert_eq!(slot_index(2.0, 3), Some(0));
        assert_eq!(slot_index(0.5, 3), None);
        assert_eq!(slot_index(3.0, 3), None);
        assert_eq!(slot_index(-1.0, 3), None);
    }

    #[test]
    fn hit_testing_respects_bar_length_and_thickness() {
        let values = [10.0, 5.0];
        assert_eq!(bar_at(4.0, 1.1, &values), Some(0));
        assert_eq!(bar_at(4.0, 0.0, &values), Some(1));
        assert_eq!(bar_at(6.0, 0.0, &values), None);
        assert_eq!(bar_at(4.0, 0.5, &values), None);
        assert_eq!(bar_at(-1.0, 1.0, &values), None);
    }

    #[test]
    fn bars_grow_with_stagger() {
        let config = DashboardConfig::default();
        assert_eq!(bar_progress(0.0, 0, &config), 0.0);
        assert!((bar_progress(0.4, 0, &config) - 0.5).abs() < 1e-9);
        assert_eq!(bar_progress(0.8, 0, &config), 1.0);
        assert_eq!(bar_progress(0.05, 1, &config), 0.0);
        assert!(bar_progress(0.8, 1, &config) < 1.0);
        assert_eq!(bar_progress(0.9, 1, &config), 1.0);
        assert!((animation_length(15, &config) - 1.5).abs() < 1e-9);
    }
}
