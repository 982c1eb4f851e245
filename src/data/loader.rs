use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{clean_box_office, Film, FilmDataset};

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Where the film table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and validate a dataset from any supported source.
pub fn load_source(source: &DataSource) -> Result<FilmDataset> {
    let films = match source {
        DataSource::File(path) => load_file(path)?,
        DataSource::Url(url) => fetch_url(url)?,
    };
    let dataset = FilmDataset::new(films).with_context(|| format!("validating {source}"))?;
    log::info!(
        "Loaded {} films from {source} ({} countries, {}-{})",
        dataset.len(),
        dataset.options.countries.len(),
        dataset.options.years.min,
        dataset.options.years.max,
    );
    Ok(dataset)
}

/// Run [`load_source`] on a background thread. The receiver yields exactly one result.
pub fn spawn_load(source: DataSource) -> mpsc::Receiver<Result<FilmDataset>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let result = load_source(&source);
        let _ = sender.send(result);
    });
    receiver
}

/// Load film records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "title": ..., "release_year": ..., ... }, ...]`
/// * `.csv`     – header row with the same column names
/// * `.parquet` – one column per field
pub fn load_file(path: &Path) -> Result<Vec<Film>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Film>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    parse_json(&text)
}

/// Parse the records-oriented JSON array written by the dataset scraper.
pub fn parse_json(text: &str) -> Result<Vec<Film>> {
    let films: Vec<Film> = serde_json::from_str(text).context("parsing JSON")?;
    let missing = films.iter().filter(|f| f.box_office.is_none()).count();
    if missing > 0 {
        log::warn!("{missing} films have no usable box office value");
    }
    Ok(films)
}

fn fetch_url(url: &str) -> Result<Vec<Film>> {
    let http = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("film-dash/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;
    let text = http
        .get(url)
        .send()
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?
        .text()
        .context("reading response body")?;
    parse_json(&text)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Box office is read as text so that both `2923706026` and
/// `"$2,923,706,026"` are accepted.
#[derive(Debug, Deserialize)]
struct CsvFilm {
    title: String,
    release_year: Option<i32>,
    #[serde(default)]
    director: String,
    #[serde(default)]
    box_office: String,
    #[serde(default)]
    country: String,
}

fn load_csv(path: &Path) -> Result<Vec<Film>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let mut films = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvFilm>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let box_office = clean_box_office(&row.box_office);
        if box_office.is_none() {
            log::warn!("CSV row {row_no}: blank or unreadable box office for {:?}", row.title);
        }
        films.push(Film {
            title: row.title,
            release_year: row.release_year,
            director: row.director,
            box_office,
            country: row.country,
        });
    }
    Ok(films)
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file with `title`, `release_year`, `director`,
/// `box_office` and `country` columns. Only `title` is mandatory.
fn load_parquet(path: &Path) -> Result<Vec<Film>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut films = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i).clone());

        let title = column("title").context("Parquet file missing 'title' column")?;
        let year = column("release_year");
        let director = column("director");
        let box_office = column("box_office");
        let country = column("country");

        for row in 0..batch.num_rows() {
            let film = Film {
                title: string_at(&title, row)?,
                release_year: match &year {
                    Some(col) => int_at(col, row)?
                        .map(i32::try_from)
                        .transpose()
                        .with_context(|| format!("Row {row}: release_year out of range"))?,
                    None => None,
                },
                director: match &director {
                    Some(col) => string_at(col, row)?,
                    None => String::new(),
                },
                box_office: match &box_office {
                    Some(col) => float_at(col, row)?,
                    None => None,
                },
                country: match &country {
                    Some(col) => string_at(col, row)?,
                    None => String::new(),
                },
            };
            films.push(film);
        }
    }

    Ok(films)
}

// -- Arrow helpers --

fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    if let Some(arr) = col.as_string_opt::<i32>() {
        Ok(arr.value(row).to_string())
    } else if let Some(arr) = col.as_string_opt::<i64>() {
        Ok(arr.value(row).to_string())
    } else {
        bail!("expected a string column, got {:?}", col.data_type())
    }
}

fn int_at(col: &ArrayRef, row: usize) -> Result<Option<i64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    if let Some(arr) = col.as_primitive_opt::<Int32Type>() {
        Ok(Some(arr.value(row) as i64))
    } else if let Some(arr) = col.as_primitive_opt::<Int64Type>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = col.as_primitive_opt::<Float64Type>() {
        Ok(Some(arr.value(row) as i64))
    } else {
        bail!("expected an integer column, got {:?}", col.data_type())
    }
}

fn float_at(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    if let Some(arr) = col.as_primitive_opt::<Float64Type>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = col.as_primitive_opt::<Float32Type>() {
        Ok(Some(arr.value(row) as f64))
    } else if let Some(arr) = col.as_primitive_opt::<Int64Type>() {
        Ok(Some(arr.value(row) as f64))
    } else if let Some(arr) = col.as_primitive_opt::<Int32Type>() {
        Ok(Some(arr.value(row) as f64))
    } else {
        Ok(clean_box_office(&string_at(col, row)?))
    }
}
