use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

use film_dash::data::loader::load_file;
use film_dash::data::model::FilmDataset;

#[test]
fn dashboard_shows_help() {
    let mut cmd = Command::cargo_bin("film-dash").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--data"))
        .stdout(predicate::str::contains("--sort"));
}

#[test]
fn generated_samples_load_in_every_format() {
    let dir = tempdir().unwrap();
    for name in ["films.json", "films.csv", "films.parquet"] {
        let path = dir.path().join(name);
        let mut cmd = Command::cargo_bin("generate_sample").unwrap();
        cmd.arg(&path).args(["--count", "40", "--seed", "7"]);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Wrote 40 films"));

        let films = load_file(&path).unwrap();
        assert_eq!(films.len(), 40, "{name}");
        assert!(films.iter().any(|f| f.release_year.is_none()));
        let dataset = FilmDataset::new(films).unwrap();
        assert!(dataset.options.years.min >= 1975);
        assert!(dataset.options.years.max <= 2023);
    }
}

#[test]
fn generator_is_deterministic() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    for path in [&a, &b] {
        Command::cargo_bin("generate_sample")
            .unwrap()
            .arg(path)
            .assert()
            .success();
    }
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}
