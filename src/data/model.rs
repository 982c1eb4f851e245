use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Film – one row of the dataset
// ---------------------------------------------------------------------------

/// A single film record as published in `films_data.json`.
///
/// `release_year` and `box_office` may be `null` in the source data; a film
/// without a year never passes the year filter, and a missing box office
/// counts as zero wherever a number is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default, deserialize_with = "text_or_null")]
    pub director: String,
    #[serde(default, deserialize_with = "box_office_value")]
    pub box_office: Option<f64>,
    #[serde(default, deserialize_with = "text_or_null")]
    pub country: String,
}

impl Film {
    /// Box office in USD, `0.0` when unknown.
    pub fn box_office_or_zero(&self) -> f64 {
        self.box_office.unwrap_or(0.0)
    }
}

/// Box office may arrive as a number or as display text like `"$2,923,706,026"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBoxOffice {
    Number(f64),
    Text(String),
}

fn box_office_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawBoxOffice> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawBoxOffice::Number(v)) => Some(v),
        Some(RawBoxOffice::Text(s)) => clean_box_office(&s),
        None => None,
    })
}

fn text_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a box office display string into dollars.
///
/// Everything before the first `$` is dropped, then every character other
/// than ASCII digits and `.` is stripped. Returns `None` when nothing
/// numeric is left.
pub fn clean_box_office(text: &str) -> Option<f64> {
    let from_dollar = match text.find('$') {
        Some(pos) => &text[pos..],
        None => text,
    };
    let digits: String = from_dollar
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("dataset contains no films")]
    Empty,
    #[error("no film in the dataset has a release year")]
    NoReleaseYears,
}

// ---------------------------------------------------------------------------
// FilmDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Inclusive range of release years present in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

/// Values offered by the filter controls, derived once after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Distinct countries, sorted.
    pub countries: Vec<String>,
    /// Year span over films that have a release year.
    pub years: YearBounds,
}

impl FilterOptions {
    pub fn from_films(films: &[Film]) -> Result<Self, DatasetError> {
        if films.is_empty() {
            return Err(DatasetError::Empty);
        }

        let countries: BTreeSet<&str> = films.iter().map(|f| f.country.as_str()).collect();

        let mut years = films.iter().filter_map(|f| f.release_year);
        let first = years.next().ok_or(DatasetError::NoReleaseYears)?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));

        Ok(FilterOptions {
            countries: countries.into_iter().map(str::to_string).collect(),
            years: YearBounds { min, max },
        })
    }
}

/// The full parsed dataset with its pre-computed filter options.
#[derive(Debug, Clone)]
pub struct FilmDataset {
    /// All films in load order. Never mutated after construction.
    pub films: Vec<Film>,
    pub options: FilterOptions,
}

impl FilmDataset {
    /// Validate the loaded films and derive the filter options.
    pub fn new(films: Vec<Film>) -> Result<Self, DatasetError> {
        let options = FilterOptions::from_films(&films)?;
        Ok(FilmDataset { films, options })
    }

    /// Number of films.
    pub fn len(&self) -> usize {
        self.films.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn film(title: &str, year: Option<i32>, box_office: f64, country: &str) -> Film {
    Film {
        title: title.to_string(),
        release_year: year,
        director: format!("Director of {title}"),
        box_office: Some(box_office),
        country: country.to_string(),
    }
}
