use anyhow::Result;
use ironfold::io::glob::{expand_glob, expand_glob_required};
use ironfold::io::jsonl::read_counts_jsonl;
use ironfold::testing::write_file;
use std::fs;
use tempfile::tempdir;

#[test]
fn glob_results_are_sorted_files() -> Result<()> {
    let dir = tempdir()?;
    for name in ["c.txt", "a.txt", "b.txt", "skip.log"] {
        write_file(dir.path(), name, "x")?;
    }
    fs::create_dir(dir.path().join("d.txt"))?;

    let files = expand_glob(&format!("{}/*.txt", dir.path().display()))?;
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name()?.to_str())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    Ok(())
}

#[test]
fn required_glob_rejects_no_matches() -> Result<()> {
    let dir = tempdir()?;
    let pattern = format!("{}/*.txt", dir.path().display());
    assert!(expand_glob(&pattern)?.is_empty());
    let err = expand_glob_required(&pattern).unwrap_err();
    assert!(err.to_string().contains("matched no files"));
    Ok(())
}

#[test]
fn invalid_pattern_is_an_error() {
    assert!(expand_glob("[").is_err());
}

#[test]
fn jsonl_reader_sums_repeated_words() -> Result<()> {
    let dir = tempdir()?;
    let path = write_file(
        dir.path(),
        "counts.jsonl",
        "{\"word\":\"a\",\"count\":2}\n\n{\"word\":\"a\",\"count\":3}\n{\"word\":\"b\",\"count\":1}\n",
    )?;
    let counts = read_counts_jsonl(&path)?;
    assert_eq!(counts.get("a"), Some(&5));
    assert_eq!(counts.get("b"), Some(&1));
    Ok(())
}

#[test]
fn jsonl_reader_reports_bad_lines() -> Result<()> {
    let dir = tempdir()?;
    let path = write_file(dir.path(), "bad.jsonl", "{\"word\":\"a\",\"count\":1}\nnot json\n")?;
    let err = read_counts_jsonl(&path).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err:#}");
    Ok(())
}
