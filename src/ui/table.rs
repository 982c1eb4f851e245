use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::MUTED_TEXT;
use crate::data::model::Film;
use crate::format::{format_usd, format_year};

pub const COLUMNS: [&str; 5] = ["Title", "Year", "Director", "Box Office", "Country"];
pub const NO_RESULTS: &str = "No films match your current filters";

// ---------------------------------------------------------------------------
// Table model
// ---------------------------------------------------------------------------

/// One display row with every cell already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub title: String,
    pub year: String,
    pub director: String,
    pub box_office: String,
    pub country: String,
}

impl TableRow {
    pub fn from_film(film: &Film) -> Self {
        TableRow {
            title: film.title.clone(),
            year: format_year(film.release_year),
            director: film.director.clone(),
            box_office: format_usd(film.box_office_or_zero()),
            country: film.country.clone(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            &self.title,
            &self.year,
            &self.director,
            &self.box_office,
            &self.country,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableView {
    /// Single full-width placeholder row.
    #[default]
    Empty,
    Rows(Vec<TableRow>),
}

impl TableView {
    /// Project the visible films, in view order.
    pub fn build(films: &[Film], visible: &[usize]) -> Self {
        if visible.is_empty() {
            return TableView::Empty;
        }
        TableView::Rows(
            visible
                .iter()
                .map(|&i| TableRow::from_film(&films[i]))
                .collect(),
        )
    }

    /// Film rows in view order; empty for the placeholder.
    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableView::Empty => &[],
            TableView::Rows(rows) => rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

pub fn films_table(ui: &mut Ui, view: &TableView) {
    let rows = view.rows();
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    TableBuilder::new(ui)
        .id_salt("films_table")
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(260.0).at_least(120.0).clip(true))
        .column(Column::auto().at_least(50.0))
        .column(Column::initial(180.0).at_least(80.0).clip(true))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder().at_least(80.0))
        .header(text_height, |mut header| {
            for name in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(text_height, rows.len(), |mut row| {
                let cells = rows[row.index()].cells();
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });

    if matches!(view, TableView::Empty) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(NO_RESULTS).color(MUTED_TEXT));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::film;

    #[test]
    fn rows_follow_view_order() {
        let films = vec![
            film("Avatar", Some(2009), 2_923_706_026.0, "United States"),
            film("Titanic", Some(1997), 2_264_743_305.4, "United States"),
        ];
        let view = TableView::build(&films, &[1, 0]);
        let TableView::Rows(rows) = &view else {
            panic!("expected rows");
        };
        assert_eq!(view.rows().len(), 2);
        assert_eq!(rows[0].title, "Titanic");
        assert_eq!(rows[0].box_office, "$2,264,743,305");
        assert_eq!(rows[0].year, "1997");
        assert_eq!(rows[1].director, "Director of Avatar");
        assert_eq!(rows[1].cells().len(), COLUMNS.len());
    }

    #[test]
    fn empty_view_is_one_placeholder_row() {
        let films = vec![film("Avatar", Some(2009), 1.0, "United States")];
        let view = TableView::build(&films, &[]);
        assert_eq!(view, TableView::Empty);
        assert!(view.rows().is_empty());
    }
}
