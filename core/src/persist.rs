use crate::job::{Job, JobCollection};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_jobs: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn jobs(&self) -> PathBuf { self.root.join("jobs.json") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_jobs(paths: &DataPaths, jobs: &[Job]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let f = File::create(paths.jobs()).with_context(|| format!("creating {}", paths.jobs().display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, jobs)?;
    w.flush()?;
    Ok(())
}

/// Load the job file. A missing file is an empty collection, not an error;
/// a file that exists but does not parse is.
pub fn load_jobs(paths: &DataPaths) -> Result<JobCollection> {
    load_jobs_file(&paths.jobs())
}

pub fn load_jobs_file(path: &Path) -> Result<JobCollection> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "job file not found, starting with no jobs");
        return Ok(JobCollection::empty());
    }
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let jobs: Vec<Job> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), num_jobs = jobs.len(), "loaded jobs");
    Ok(JobCollection::new(jobs))
}

pub fn save_meta(paths: &DataPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &DataPaths) -> Result<MetaFile> {
    let f = File::open(paths.meta()).with_context(|| format!("opening {}", paths.meta().display()))?;
    let meta: MetaFile = serde_json::from_reader(BufReader::new(f))?;
    Ok(meta)
}

/// One suggestion seed per line; blank lines and `#` comments are skipped.
pub fn load_seed_list(path: &Path) -> Result<Vec<String>> {
    let f = File::open(path).with_context(|| format!("opening seed list {}", path.display()))?;
    let mut seeds = Vec::new();
    for line in BufReader::new(f).lines() {
        let line = line?;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') { continue; }
        seeds.push(s.to_string());
    }
    Ok(seeds)
}
