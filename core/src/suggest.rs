use crate::job::Job;
use crate::labels::{state_label, Qualification};
use serde::Serialize;
use std::collections::HashSet;

/// Built-in suggestions offered before any job data is considered.
pub const DEFAULT_SEEDS: &[&str] = &[
    "10th pass jobs",
    "12th pass jobs",
    "Graduate jobs",
    "Railway",
    "UPSC",
    "SSC",
    "Banking",
    "Police",
    "Teaching",
    "Defense",
    "Nagaland",
    "Assam",
    "Manipur",
    "All India",
];

/// Deduplicated autocomplete candidates, kept in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SuggestionSet {
    entries: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl SuggestionSet {
    /// Seeds verbatim, then per job: title, organization, upper-cased
    /// category, `<state> jobs` and the qualification suggestion if known.
    pub fn generate<S: AsRef<str>>(jobs: &[Job], seeds: &[S]) -> Self {
        let mut set = Self::default();
        for seed in seeds {
            set.insert(seed.as_ref().to_string());
        }
        for job in jobs {
            set.insert(job.title.clone());
            if let Some(org) = job.organization.as_deref().filter(|o| !o.is_empty()) {
                set.insert(org.to_string());
            }
            set.insert(job.category.to_uppercase());
            set.insert(format!("{} jobs", state_label(&job.state)));
            if let Some(q) = Qualification::parse(&job.qualification) {
                set.insert(q.suggestion().to_string());
            }
        }
        tracing::debug!(suggestions = set.len(), jobs = jobs.len(), "suggestions generated");
        set
    }

    fn insert(&mut self, entry: String) {
        if self.seen.insert(entry.clone()) {
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.seen.contains(entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Every entry containing `typed`, case-insensitively, in set order.
    /// Nothing is offered for empty input.
    pub fn matching(&self, typed: &str) -> Vec<&str> {
        if typed.is_empty() {
            return Vec::new();
        }
        let needle = typed.to_lowercase();
        self.iter().filter(|s| s.to_lowercase().contains(&needle)).collect()
    }
}
