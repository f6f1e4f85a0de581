use crate::filter::{non_empty, normalize_query, CompiledFilter, FilterState};
use crate::job::{Job, JobCollection};
use crate::view::EmptyReason;
use std::sync::Arc;

/// How long the last search is remembered when no retention is given.
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Receives every recomputed result, synchronously, right after a mutation.
pub trait Presenter {
    fn present(&mut self, visible: &[&Job], filters: &FilterState);
}

/// Durable slot for the last raw search text (a browser cookie, a file, ...).
pub trait SearchMemory {
    fn remember(&mut self, raw_query: &str, retention_days: u32);
}

/// Owns the [`FilterState`] and keeps the visible subset in step with it.
///
/// Each setter mutates the state, re-runs the filter over the whole
/// collection and notifies the presenter before returning.
pub struct FilterController {
    jobs: Arc<JobCollection>,
    filters: FilterState,
    visible: Vec<usize>,
    presenter: Option<Box<dyn Presenter + Send>>,
    memory: Option<Box<dyn SearchMemory + Send>>,
    retention_days: u32,
}

impl FilterController {
    pub fn new(jobs: Arc<JobCollection>) -> Self {
        let visible = (0..jobs.len()).collect();
        Self {
            jobs,
            filters: FilterState::default(),
            visible,
            presenter: None,
            memory: None,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + Send + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn with_memory(mut self, memory: impl SearchMemory + Send + 'static, retention_days: u32) -> Self {
        self.memory = Some(Box::new(memory));
        self.retention_days = retention_days;
        self
    }

    pub fn set_state_filter(&mut self, state: &str) {
        self.filters.state = non_empty(state);
        self.recompute();
    }

    pub fn set_qualification_filter(&mut self, qualification: &str) {
        self.filters.qualification = non_empty(qualification);
        self.recompute();
    }

    pub fn set_category_filter(&mut self, category: &str) {
        self.filters.category = non_empty(category);
        self.recompute();
    }

    /// Also used to replay a persisted query at startup. A non-blank query is
    /// written to the search memory verbatim.
    pub fn set_search_query(&mut self, raw: &str) {
        self.filters.search = normalize_query(raw);
        if self.filters.search.is_some() {
            if let Some(memory) = self.memory.as_mut() {
                memory.remember(raw, self.retention_days);
            }
        }
        self.recompute();
    }

    /// Replace all four predicates at once, recomputing a single time.
    ///
    /// With `raw_search`, the search term comes from that text and a
    /// non-blank one is remembered verbatim. Without it, `filters.search`
    /// is taken as is and nothing is remembered (replaying a stored query).
    pub fn apply(&mut self, filters: FilterState, raw_search: Option<&str>) {
        self.filters = filters;
        if let Some(raw) = raw_search {
            self.filters.search = normalize_query(raw);
            if self.filters.search.is_some() {
                if let Some(memory) = self.memory.as_mut() {
                    memory.remember(raw, self.retention_days);
                }
            }
        }
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.filters = FilterState::default();
        self.recompute();
    }

    pub fn is_active(&self) -> bool {
        self.filters.is_active()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn jobs(&self) -> &JobCollection {
        &self.jobs
    }

    pub fn visible(&self) -> Vec<&Job> {
        let all = self.jobs.jobs();
        self.visible.iter().map(|&i| &all[i]).collect()
    }

    /// `None` while at least one job is visible.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if self.visible.is_empty() {
            Some(EmptyReason::classify(self.jobs.len(), &self.filters))
        } else {
            None
        }
    }

    fn recompute(&mut self) {
        let compiled = CompiledFilter::new(&self.filters);
        self.visible = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| compiled.matches(job))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(visible = self.visible.len(), active = self.filters.is_active(), "filters recomputed");
        if let Some(presenter) = self.presenter.as_mut() {
            let all = self.jobs.jobs();
            let visible: Vec<&Job> = self.visible.iter().map(|&i| &all[i]).collect();
            presenter.present(&visible, &self.filters);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Vec<u32>>>>);

    impl Presenter for Recorder {
        fn present(&mut self, visible: &[&Job], _filters: &FilterState) {
            self.0.lock().unwrap().push(visible.iter().map(|j| j.id).collect());
        }
    }

    #[derive(Clone, Default)]
    struct Memory(Arc<Mutex<Vec<(String, u32)>>>);

    impl SearchMemory for Memory {
        fn remember(&mut self, raw_query: &str, retention_days: u32) {
            self.0.lock().unwrap().push((raw_query.to_string(), retention_days));
        }
    }

    fn collection() -> Arc<JobCollection> {
        Arc::new(JobCollection::new(vec![
            Job { id: 1, title: "Railway Clerk".into(), state: "assam".into(), qualification: "10th".into(), category: "railway".into(), ..Default::default() },
            Job { id: 2, title: "Bank PO".into(), state: "all-india".into(), qualification: "graduate".into(), category: "banking".into(), ..Default::default() },
        ]))
    }

    #[test]
    fn every_mutation_notifies_presenter() {
        let recorder = Recorder::default();
        let mut c = FilterController::new(collection()).with_presenter(recorder.clone());
        c.set_category_filter("banking");
        c.set_category_filter("");
        c.reset();
        assert_eq!(*recorder.0.lock().unwrap(), vec![vec![2], vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn raw_query_is_remembered_only_when_non_blank() {
        let memory = Memory::default();
        let mut c = FilterController::new(collection()).with_memory(memory.clone(), 7);
        c.set_search_query("  Bank ");
        c.set_search_query("   ");
        assert_eq!(*memory.0.lock().unwrap(), vec![("  Bank ".to_string(), 7)]);
        assert!(!c.is_active());
    }

    #[test]
    fn empty_reason_distinguishes_no_data_from_no_match() {
        let mut empty = FilterController::new(Arc::new(JobCollection::empty()));
        assert_eq!(empty.empty_reason(), Some(EmptyReason::NoData));
        empty.set_state_filter("assam");
        assert_eq!(empty.empty_reason(), Some(EmptyReason::NoData));

        let mut c = FilterController::new(collection());
        assert_eq!(c.empty_reason(), None);
        c.set_search_query("nothing like this");
        assert_eq!(c.empty_reason(), Some(EmptyReason::NoMatches));
    }

    #[test]
    fn apply_replaces_all_predicates() {
        let mut c = FilterController::new(collection());
        c.set_state_filter("assam");
        c.apply(FilterState::new().with_qualification("graduate"), None);
        assert_eq!(c.filters().state(), None);
        assert_eq!(c.visible().iter().map(|j| j.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn apply_remembers_the_typed_query_verbatim() {
        let memory = Memory::default();
        let recorder = Recorder::default();
        let mut c = FilterController::new(collection())
            .with_memory(memory.clone(), 7)
            .with_presenter(recorder.clone());
        c.apply(FilterState::new().with_state("all-india"), Some("  Bank PO "));
        assert_eq!(c.filters().search(), Some("bank po"));
        assert_eq!(*memory.0.lock().unwrap(), vec![("  Bank PO ".to_string(), 7)]);
        assert_eq!(*recorder.0.lock().unwrap(), vec![vec![2]]);
    }

    #[test]
    fn apply_without_raw_query_replays_silently() {
        let memory = Memory::default();
        let mut c = FilterController::new(collection()).with_memory(memory.clone(), 7);
        c.apply(FilterState::new().with_search("bank"), None);
        assert_eq!(c.visible().iter().map(|j| j.id).collect::<Vec<_>>(), vec![2]);
        assert!(memory.0.lock().unwrap().is_empty());

        c.apply(FilterState::new(), Some("   "));
        assert!(!c.is_active());
        assert!(memory.0.lock().unwrap().is_empty());
    }
}
