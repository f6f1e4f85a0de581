use crate::job::Job;
use serde::{Deserialize, Serialize};

/// Active selection criteria. `None` and `Some("")` both mean unset.
///
/// `search` holds the normalized (trimmed, lower-cased) query; the raw text a
/// user typed is only ever handed to the search memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub state: Option<String>,
    pub qualification: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(self, state: &str) -> Self {
        Self { state: non_empty(state), ..self }
    }

    pub fn with_qualification(self, qualification: &str) -> Self {
        Self { qualification: non_empty(qualification), ..self }
    }

    pub fn with_category(self, category: &str) -> Self {
        Self { category: non_empty(category), ..self }
    }

    pub fn with_search(self, query: &str) -> Self {
        Self { search: normalize_query(query), ..self }
    }

    pub fn state(&self) -> Option<&str> {
        active(&self.state)
    }

    pub fn qualification(&self) -> Option<&str> {
        active(&self.qualification)
    }

    pub fn category(&self) -> Option<&str> {
        active(&self.category)
    }

    pub fn search(&self) -> Option<&str> {
        active(&self.search)
    }

    /// True iff any of the four predicates is set.
    pub fn is_active(&self) -> bool {
        self.state().is_some()
            || self.qualification().is_some()
            || self.category().is_some()
            || self.search().map_or(false, |q| !q.trim().is_empty())
    }
}

/// Trim and case-fold a free-text query; whitespace-only input is no query.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A [`FilterState`] with its search term folded once, ready to test jobs.
#[derive(Debug, Clone)]
pub struct CompiledFilter<'f> {
    state: Option<&'f str>,
    qualification: Option<&'f str>,
    category: Option<&'f str>,
    search: Option<String>,
}

impl<'f> CompiledFilter<'f> {
    pub fn new(filters: &'f FilterState) -> Self {
        Self {
            state: filters.state(),
            qualification: filters.qualification(),
            category: filters.category(),
            search: filters.search().and_then(normalize_query),
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(state) = self.state {
            if job.state != state {
                return false;
            }
        }
        if let Some(qualification) = self.qualification {
            if job.qualification != qualification {
                return false;
            }
        }
        if let Some(category) = self.category {
            if job.category != category {
                return false;
            }
        }
        match &self.search {
            Some(term) => job
                .searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(term.as_str())),
            None => true,
        }
    }
}

/// Jobs satisfying every active predicate, in collection order.
pub fn apply_filters<'a>(jobs: &'a [Job], filters: &FilterState) -> Vec<&'a Job> {
    let compiled = CompiledFilter::new(filters);
    jobs.iter().filter(|job| compiled.matches(job)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u32, title: &str, state: &str) -> Job {
        Job {
            id,
            title: title.into(),
            state: state.into(),
            category: "ssc".into(),
            qualification: "graduate".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_strings_are_unset() {
        let f = FilterState::new().with_state("").with_search("   ");
        assert!(!f.is_active());
        assert_eq!(f, FilterState::default());
    }

    #[test]
    fn query_is_trimmed_and_folded() {
        assert_eq!(normalize_query("  RailWay "), Some("railway".to_string()));
        assert_eq!(normalize_query("\t\n"), None);
    }

    #[test]
    fn state_match_is_case_sensitive() {
        let jobs = vec![job(1, "A", "assam"), job(2, "B", "Assam")];
        let out = apply_filters(&jobs, &FilterState::new().with_state("assam"));
        assert_eq!(out.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn search_reaches_salary_and_age_limit() {
        let mut a = job(1, "Clerk", "assam");
        a.salary = Some("Rs 25,000".into());
        let mut b = job(2, "Typist", "assam");
        b.age_limit = Some("18-27 Years".into());
        let jobs = vec![a, b];
        assert_eq!(apply_filters(&jobs, &FilterState::new().with_search("25,000")).len(), 1);
        assert_eq!(apply_filters(&jobs, &FilterState::new().with_search("years"))[0].id, 2);
    }

    #[test]
    fn hand_built_state_is_normalized_at_match_time() {
        let jobs = vec![job(1, "Railway Clerk", "assam")];
        let f = FilterState { search: Some("  RAILWAY ".into()), ..Default::default() };
        assert_eq!(apply_filters(&jobs, &f).len(), 1);
    }
}
