use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::WriterBuilder;
use parquet::arrow::ArrowWriter;

use super::model::Film;

const HEADER: [&str; 5] = ["title", "release_year", "director", "box_office", "country"];

/// Write films to `path`, picking the format from the extension.
pub fn save_films(films: &[Film], path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => save_csv(films, path),
        "json" => save_json(films, path),
        "parquet" | "pq" => save_parquet(films, path),
        other => bail!("Unsupported export extension: .{other}"),
    }
}

/// Save films as CSV with header.
///
/// Text cells that a spreadsheet would evaluate as a formula are prefixed
/// with a single quote.
pub fn save_csv(films: &[Film], path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(HEADER)?;
    for film in films {
        wtr.write_record([
            defuse_formula(&film.title),
            film.release_year.map(|y| y.to_string()).unwrap_or_default(),
            defuse_formula(&film.director),
            film.box_office.map(|v| v.to_string()).unwrap_or_default(),
            defuse_formula(&film.country),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save films as a pretty JSON array in the same shape the loader reads.
pub fn save_json(films: &[Film], path: &Path) -> Result<()> {
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(films)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save films as a single-batch Parquet file.
pub fn save_parquet(films: &[Film], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("release_year", DataType::Int32, true),
        Field::new("director", DataType::Utf8, false),
        Field::new("box_office", DataType::Float64, true),
        Field::new("country", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(films.iter().map(|f| f.title.as_str()))),
        Arc::new(Int32Array::from_iter(films.iter().map(|f| f.release_year))),
        Arc::new(StringArray::from_iter_values(films.iter().map(|f| f.director.as_str()))),
        Arc::new(Float64Array::from_iter(films.iter().map(|f| f.box_office))),
        Arc::new(StringArray::from_iter_values(films.iter().map(|f| f.country.as_str()))),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn defuse_formula(cell: &str) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{cell}"),
        _ => cell.to_string(),
    }
}
