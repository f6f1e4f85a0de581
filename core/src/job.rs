use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type JobId = u32;

/// Display grouping a job is filed under by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Featured,
    Northeast,
    AllIndia,
    Closing,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Featured => "featured",
            Section::Northeast => "northeast",
            Section::AllIndia => "all-india",
            Section::Closing => "closing",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportantDates {
    pub notification: Option<String>,
    pub start_date: Option<String>,
    pub last_date: Option<String>,
    pub exam_date: Option<String>,
}

/// One job posting. Keys follow the camelCase layout of the published data files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub category: String,
    pub state: String,
    pub qualification: String,
    #[serde(default)]
    pub posts: u32,
    /// `YYYY-MM-DD` when produced by the importer, free text otherwise.
    #[serde(default)]
    pub last_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_criteria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syllabus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important_dates: Option<ImportantDates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_website: Option<String>,
}

impl Job {
    /// Fields covered by free-text search, absent optionals as "".
    pub fn searchable_fields(&self) -> [&str; 7] {
        [
            &self.title,
            self.organization.as_deref().unwrap_or(""),
            &self.category,
            &self.state,
            &self.qualification,
            self.age_limit.as_deref().unwrap_or(""),
            self.salary.as_deref().unwrap_or(""),
        ]
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    pub fn in_section(&self, section: Section) -> bool {
        self.section == Some(section)
    }
}

/// The session's read-only job set, in source order.
#[derive(Debug, Clone, Default)]
pub struct JobCollection {
    jobs: Vec<Job>,
}

impl JobCollection {
    pub fn new(jobs: Vec<Job>) -> Self {
        let mut seen = HashSet::with_capacity(jobs.len());
        let duplicates = jobs.iter().filter(|j| !seen.insert(j.id)).count();
        if duplicates > 0 {
            tracing::warn!(duplicates, "job collection contains repeated ids");
        }
        Self { jobs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }
}

impl From<Vec<Job>> for JobCollection {
    fn from(jobs: Vec<Job>) -> Self {
        Self::new(jobs)
    }
}
