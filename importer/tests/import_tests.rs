use importer::{import, ImportOptions};
use jobcore::persist::{load_jobs, load_meta, DataPaths};
use jobcore::{Section, SuggestionSet, DEFAULT_SEEDS};
use std::fs;
use tempfile::tempdir;
use time::macros::date;

fn opts() -> ImportOptions {
    ImportOptions { today: date!(2026 - 01 - 01), closing_window_days: 10 }
}

#[test]
fn imports_directory_of_json_and_jsonl() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sheets");
    fs::create_dir_all(&input).unwrap();
    fs::write(
        input.join("a.json"),
        r#"[
            {"Job Title": "SBI Clerk", "Category": "Bank", "Location": "India", "Last Date": "2026-03-01"},
            {"Job Title": "Nagaland Police", "Category": "Police", "Location": "Nagaland", "Last Date": "2026-03-01"}
        ]"#,
    )
    .unwrap();
    fs::write(
        input.join("b.jsonl"),
        "{\"title\": \"RRB Group D\", \"category\": \"RRB\", \"last date\": \"05-01-2026\"}\n\n42\n",
    )
    .unwrap();
    fs::write(input.join("notes.txt"), "ignored").unwrap();

    let out = dir.path().join("data");
    let report = import(&input, &out, &opts()).unwrap();
    assert_eq!(report.rows, 4);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.featured, 1);
    assert_eq!(report.northeast, 1);
    assert_eq!(report.closing, 1);

    let paths = DataPaths::new(&out);
    let jobs = load_jobs(&paths).unwrap();
    let ids: Vec<u32> = jobs.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(jobs.jobs()[0].section, Some(Section::Featured));
    assert_eq!(jobs.jobs()[0].tag.as_deref(), Some("Hot"));
    assert_eq!(jobs.jobs()[2].last_date, "2026-01-05");
    assert!(jobs.jobs()[2].is_urgent);
    assert_eq!(load_meta(&paths).unwrap().num_jobs, 3);

    let suggestions = SuggestionSet::generate(jobs.jobs(), DEFAULT_SEEDS);
    assert!(suggestions.contains("SBI Clerk"));
    assert!(suggestions.contains("Nagaland jobs"));
    assert!(suggestions.contains("Government of India"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(import(&dir.path().join("nope"), &dir.path().join("out"), &opts()).is_err());
}
