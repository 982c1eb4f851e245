use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::{Film, YearBounds};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Country selector value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountryFilter {
    #[default]
    All,
    Only(String),
}

impl CountryFilter {
    pub fn matches(&self, country: &str) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Only(selected) => selected == country,
        }
    }

    /// Text shown in the country selector.
    pub fn label(&self) -> &str {
        match self {
            CountryFilter::All => "All countries",
            CountryFilter::Only(country) => country,
        }
    }
}

/// Year range and country currently selected in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year_min: i32,
    pub year_max: i32,
    pub country: CountryFilter,
}

impl FilterCriteria {
    /// Criteria that let every dated film through.
    pub fn full_span(years: YearBounds) -> Self {
        FilterCriteria {
            year_min: years.min,
            year_max: years.max,
            country: CountryFilter::All,
        }
    }

    /// A film passes when it has a release year inside `[year_min, year_max]`
    /// and its country matches the selector.
    pub fn matches(&self, film: &Film) -> bool {
        let year_match = film
            .release_year
            .is_some_and(|y| self.year_min <= y && y <= self.year_max);
        year_match && self.country.matches(&film.country)
    }

    /// Range text shown next to the sliders, e.g. `1994 - 2019`.
    pub fn range_text(&self) -> String {
        format!("{} - {}", self.year_min, self.year_max)
    }
}

// ---------------------------------------------------------------------------
// Sort keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    BoxOfficeDesc,
    BoxOfficeAsc,
    YearDesc,
    YearAsc,
    TitleAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::BoxOfficeDesc,
        SortKey::BoxOfficeAsc,
        SortKey::YearDesc,
        SortKey::YearAsc,
        SortKey::TitleAsc,
    ];

    /// Stable identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            SortKey::BoxOfficeDesc => "box_office_desc",
            SortKey::BoxOfficeAsc => "box_office_asc",
            SortKey::YearDesc => "year_desc",
            SortKey::YearAsc => "year_asc",
            SortKey::TitleAsc => "title_asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::BoxOfficeDesc => "Box office (high to low)",
            SortKey::BoxOfficeAsc => "Box office (low to high)",
            SortKey::YearDesc => "Year (newest first)",
            SortKey::YearAsc => "Year (oldest first)",
            SortKey::TitleAsc => "Title (A-Z)",
        }
    }

    /// Look up a key by identifier. Unknown identifiers yield `None`, which
    /// the engine treats as "keep the current order".
    pub fn from_id(id: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|k| k.id() == id.trim())
    }

    pub fn compare(self, a: &Film, b: &Film) -> Ordering {
        match self {
            SortKey::BoxOfficeDesc => b.box_office_or_zero().total_cmp(&a.box_office_or_zero()),
            SortKey::BoxOfficeAsc => a.box_office_or_zero().total_cmp(&b.box_office_or_zero()),
            SortKey::YearDesc => b.release_year.cmp(&a.release_year),
            SortKey::YearAsc => a.release_year.cmp(&b.release_year),
            SortKey::TitleAsc => compare_titles(&a.title, &b.title),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Letters with accents and case folded away, e.g. `Éclair` → `eclair`.
fn base_letters(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercased canonical decomposition; accents still present.
fn accented_letters(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Title collation in three levels: base letters, then accents, then case
/// (lowercase first). `Éclair` sorts with the `E`s, before `Léon` and `Lucy`.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented_letters(a).cmp(&accented_letters(b)))
        .then_with(|| b.cmp(a))
}

// ---------------------------------------------------------------------------
// Filter / sort engine
// ---------------------------------------------------------------------------

/// Stable in-place sort of `indices` (into `films`). `None` leaves the order untouched.
pub fn sort_indices(films: &[Film], indices: &mut [usize], key: Option<SortKey>) {
    if let Some(key) = key {
        indices.sort_by(|&a, &b| key.compare(&films[a], &films[b]));
    }
}

/// Return indices of films passing `criteria`, ordered by `sort`.
pub fn filtered_indices(
    films: &[Film],
    criteria: &FilterCriteria,
    sort: Option<SortKey>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = films
        .iter()
        .enumerate()
        .filter(|(_, film)| criteria.matches(film))
        .map(|(i, _)| i)
        .collect();
    sort_indices(films, &mut indices, sort);
    indices
}
