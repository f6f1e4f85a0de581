//! Turn spreadsheet-exported rows into the normalized job file the board loads.

pub mod columns;
pub mod normalize;

use anyhow::{anyhow, Result};
use columns::{ColumnMap, Field};
use jobcore::persist::{save_jobs, save_meta, DataPaths, MetaFile};
use jobcore::{ImportantDates, Job, JobId, Section};
use lazy_static::lazy_static;
use normalize::{
    determine_section, determine_tag, is_closing_soon, iso_date, normalize_category, normalize_qualification,
    normalize_state, parse_date,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use time::{Date, Duration};
use walkdir::WalkDir;

pub const DEFAULT_LAST_DATE: &str = "2026-01-31";
pub const DEFAULT_CLOSING_WINDOW_DAYS: i64 = 10;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"\d[\d,]*").expect("valid regex");
}

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    pub today: Date,
    pub closing_window_days: i64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub rows: usize,
    pub skipped: usize,
    pub featured: usize,
    pub northeast: usize,
    pub all_india: usize,
    pub closing: usize,
}

/// Convert one row. `id` is the 1-based row number across all inputs.
pub fn convert_row(id: JobId, row: &Map<String, Value>, opts: &ImportOptions) -> Job {
    let cols = ColumnMap::for_row(row);
    let text = |field: Field, default: &str| cols.text(row, field).unwrap_or_else(|| default.to_string());

    let title = text(Field::Title, &format!("Job Opportunity {id}"));
    let organization = text(Field::Organization, "Government of India");
    let posts = cols.text(row, Field::Posts).and_then(|raw| parse_posts(&raw)).unwrap_or(100);

    let raw_last_date = cols.text(row, Field::LastDate);
    let parsed_last_date = raw_last_date.as_deref().and_then(parse_date);
    let last_date = match (&raw_last_date, parsed_last_date) {
        (_, Some(d)) => iso_date(d),
        (Some(raw), None) => raw.clone(),
        (None, None) => DEFAULT_LAST_DATE.to_string(),
    };

    let state = normalize_state(&text(Field::State, "All India")).to_string();
    let qualification = normalize_qualification(&text(Field::Qualification, "Graduate")).to_string();
    let category = normalize_category(&text(Field::Category, "PSC")).to_string();

    let is_urgent = is_closing_soon(parsed_last_date, opts.today, opts.closing_window_days);
    let section = determine_section(&state, &category, is_urgent);
    let tag = determine_tag(&state, &category, is_urgent);

    let apply_link = text(Field::ApplyLink, "https://example.com");
    let official_website = text(Field::OfficialWebsite, &apply_link);
    // Dates past the calendar's range are left out rather than guessed.
    let offset = |days: i64| opts.today.checked_add(Duration::days(days)).map(iso_date);

    Job {
        id,
        title,
        organization: Some(organization),
        category,
        state,
        qualification,
        posts,
        last_date: last_date.clone(),
        tag: Some(tag.to_string()),
        section: Some(section),
        is_urgent,
        age_limit: Some(text(Field::AgeLimit, "18-35 years")),
        salary: Some(text(Field::Salary, "₹20,000 - ₹50,000")),
        application_fee: Some(text(Field::ApplicationFee, "₹500")),
        eligibility_criteria: Some(text(Field::Eligibility, "As per notification")),
        syllabus: Some(text(Field::Syllabus, "As per official notification")),
        exam_pattern: Some(text(Field::ExamPattern, "Written Test + Interview")),
        important_dates: Some(ImportantDates {
            notification: offset(-15),
            start_date: offset(-10),
            last_date: Some(last_date),
            exam_date: offset(45),
        }),
        apply_link: Some(apply_link),
        official_website: Some(official_website),
    }
}

/// First run of digits, thousands separators allowed: `"1,200 posts"` is 1200.
pub fn parse_posts(raw: &str) -> Option<u32> {
    NUMBER.find(raw).and_then(|m| m.as_str().replace(',', "").parse().ok())
}

/// JSON and JSONL files under `input`, or `input` itself when it is a file.
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Rows of a JSON array, a single JSON object, or one object per JSONL line.
pub fn read_rows(file: &Path) -> Result<Vec<Value>> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut rows = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            rows.push(serde_json::from_str(&line)?);
        }
        return Ok(rows);
    }
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Array(arr) => Ok(arr),
        obj @ Value::Object(_) => Ok(vec![obj]),
        other => Err(anyhow!("{}: expected an array or object, found {}", file.display(), other)),
    }
}

pub fn import(input: &Path, output: &Path, opts: &ImportOptions) -> Result<ImportReport> {
    let files = collect_input_files(input);
    if files.is_empty() {
        return Err(anyhow!("no JSON/JSONL input found at {}", input.display()));
    }

    let mut report = ImportReport::default();
    let mut jobs = Vec::new();
    let mut next_id: JobId = 1;
    for file in files {
        let rows = read_rows(&file)?;
        tracing::info!(file = %file.display(), rows = rows.len(), "reading rows");
        for row in rows {
            let id = next_id;
            next_id += 1;
            report.rows += 1;
            let Value::Object(map) = row else {
                tracing::warn!(row = id, "skipping row that is not an object");
                report.skipped += 1;
                continue;
            };
            let job = convert_row(id, &map, opts);
            match job.section {
                Some(Section::Featured) => report.featured += 1,
                Some(Section::Northeast) => report.northeast += 1,
                Some(Section::AllIndia) => report.all_india += 1,
                Some(Section::Closing) | None => {}
            }
            if job.is_urgent {
                report.closing += 1;
            }
            jobs.push(job);
        }
    }

    let paths = DataPaths::new(output);
    save_jobs(&paths, &jobs)?;
    let meta = MetaFile {
        num_jobs: jobs.len() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&paths, &meta)?;
    Ok(report)
}
