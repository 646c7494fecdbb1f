use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "---\ntitle: \"Publications\"\n---\n\n\
This page was auto-generated using data from Google Scholar.\n\n";

fn write_profile(dir: &Path, id: &str, year: &str) -> std::io::Result<()> {
    let body = format!(
        r#"{{"publications": [{{"bib": {{"title": "Paper", "pub_year": "{year}",
            "author": "John Smith", "venue": "Nature"}}}}]}}"#
    );
    fs::write(dir.join(format!("{id}.json")), body)
}

#[test]
fn no_surviving_publications_leaves_output_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    write_profile(dir.path(), "a", "2010")?;
    let output = dir.path().join("out.qmd");
    fs::write(&output, "prior")?;

    let mut cmd = Command::cargo_bin("citelist")?;
    cmd.arg("-i")
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .args(["a", "nosuch"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No publications survived filtering;"))
        .stderr(predicate::str::contains("was not written."));

    assert_eq!(fs::read_to_string(&output)?, "prior");
    Ok(())
}

#[test]
fn writes_rendered_page() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    write_profile(dir.path(), "a", "2020")?;
    let output = dir.path().join("site").join("out.qmd");

    let mut cmd = Command::cargo_bin("citelist")?;
    cmd.arg("-i")
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .args(["a", "nosuch"]);
    cmd.assert().success();

    let expected = format!("{HEADER}### 2020\n\nSmith, J. (2020). Paper. *Nature*.\n\n");
    assert_eq!(fs::read_to_string(&output)?, expected);
    Ok(())
}

#[test]
fn stdout_flag_prints_page() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    write_profile(dir.path(), "a", "2021")?;

    let mut cmd = Command::cargo_bin("citelist")?;
    cmd.arg("-i").arg(dir.path()).args(["--stdout", "--title", "Papers", "a"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("---\ntitle: \"Papers\"\n---\n\n"))
        .stdout(predicate::str::contains(
            "### 2021\n\nSmith, J. (2021). Paper. *Nature*.\n\n",
        ));
    Ok(())
}
