//! Display-ready projections of jobs, sections and the active filters.
//!
//! Nothing here emits layout markup beyond the `<mark>` highlight around the
//! matched search term; rendering belongs to the consumer.

use crate::filter::FilterState;
use crate::job::{Job, JobId, Section};
use crate::labels::{qualification_label, state_label, ALL_INDIA};
use regex::RegexBuilder;
use serde::Serialize;
use time::macros::format_description;
use time::Date;

/// Why a list came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Nothing to show even without filters.
    NoData,
    /// Filters are active and excluded everything.
    NoMatches,
}

impl EmptyReason {
    pub fn classify(collection_len: usize, filters: &FilterState) -> Self {
        if collection_len > 0 && filters.is_active() {
            EmptyReason::NoMatches
        } else {
            EmptyReason::NoData
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStyle {
    Urgent,
    Northeast,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobView {
    pub id: JobId,
    pub title: String,
    pub title_html: String,
    pub organization: Option<String>,
    pub posts: u32,
    pub last_date: String,
    pub state: String,
    pub qualification: String,
    pub tag: String,
    pub tag_style: Option<TagStyle>,
    pub urgent: bool,
    pub age_limit: Option<String>,
    pub salary: Option<String>,
}

impl JobView {
    pub fn from_job(job: &Job, filters: &FilterState) -> Self {
        let tag_style = if job.is_urgent {
            Some(TagStyle::Urgent)
        } else if job.has_tag("Northeast") {
            Some(TagStyle::Northeast)
        } else {
            None
        };
        let title_html = match filters.search() {
            Some(term) => highlight(&job.title, term),
            None => escape_html(&job.title),
        };
        Self {
            id: job.id,
            title: job.title.clone(),
            title_html,
            organization: job.organization.clone(),
            posts: job.posts,
            last_date: format_last_date(&job.last_date),
            state: state_label(&job.state),
            qualification: qualification_label(&job.qualification).to_string(),
            tag: job.tag.clone().unwrap_or_else(|| "New".to_string()),
            tag_style,
            urgent: job.is_urgent,
            age_limit: job.age_limit.clone(),
            salary: job.salary.clone(),
        }
    }
}

pub fn job_views(jobs: &[&Job], filters: &FilterState) -> Vec<JobView> {
    jobs.iter().map(|job| JobView::from_job(job, filters)).collect()
}

/// `2026-01-31` becomes `Jan 31, 2026`; anything unparseable is returned as is.
pub fn format_last_date(raw: &str) -> String {
    if !raw.contains('-') {
        return raw.to_string();
    }
    let parse = format_description!("[year]-[month]-[day]");
    let display = format_description!("[month repr:short] [day padding:none], [year]");
    Date::parse(raw.trim(), parse)
        .ok()
        .and_then(|d| d.format(display).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Wrap every case-insensitive literal occurrence of `term` in `<mark>`.
/// The rest of the text is HTML-escaped, so the result is safe to embed.
pub fn highlight(text: &str, term: &str) -> String {
    let term = term.trim();
    let pat = match RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build() {
        Ok(pat) if !term.is_empty() => pat,
        _ => return escape_html(text),
    };
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in pat.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const FEATURED_LIMIT: usize = 6;
const REGIONAL_LIMIT: usize = 4;
const FILTERED_LIMIT: usize = 8;
const SEARCH_FEATURED_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub key: &'static str,
    pub jobs: Vec<JobView>,
    pub empty: Option<EmptyReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionsView {
    pub active: bool,
    pub summary: Option<String>,
    pub featured: SectionView,
    pub northeast: SectionView,
    pub all_india: SectionView,
    pub closing_soon: SectionView,
}

impl SectionsView {
    /// Group an already filtered list. Unfiltered pages use the curated
    /// section rules; filtered pages widen each section and, while a search
    /// term is set, show the head of the whole result as "featured".
    pub fn build(visible: &[&Job], collection_len: usize, filters: &FilterState) -> Self {
        let ctx = SectionContext { visible, collection_len, filters };
        if !filters.is_active() {
            return Self {
                active: false,
                summary: None,
                featured: ctx.section("featured", Some(FEATURED_LIMIT), |j| {
                    j.in_section(Section::Featured) || j.has_tag("Hot")
                }),
                northeast: ctx.section("northeast", Some(REGIONAL_LIMIT), |j| j.in_section(Section::Northeast)),
                all_india: ctx.section("all-india", Some(REGIONAL_LIMIT), |j| j.in_section(Section::AllIndia)),
                closing_soon: ctx.section("closing", None, |j| j.in_section(Section::Closing) || j.is_urgent),
            };
        }

        let featured = if filters.search().is_some() {
            ctx.section("featured", Some(SEARCH_FEATURED_LIMIT), |_| true)
        } else {
            ctx.section("featured", Some(FILTERED_LIMIT), |j| {
                j.in_section(Section::Featured) || j.has_tag("Hot")
            })
        };
        Self {
            active: true,
            summary: filter_summary(filters),
            featured,
            northeast: ctx.section("northeast", Some(FILTERED_LIMIT), |j| {
                j.in_section(Section::Northeast) || j.has_tag("Northeast")
            }),
            all_india: ctx.section("all-india", Some(FILTERED_LIMIT), |j| {
                j.in_section(Section::AllIndia) || j.state == ALL_INDIA
            }),
            closing_soon: ctx.section("closing", Some(FILTERED_LIMIT), |j| j.is_urgent || j.has_tag("Urgent")),
        }
    }
}

struct SectionContext<'a, 'j> {
    visible: &'a [&'j Job],
    collection_len: usize,
    filters: &'a FilterState,
}

impl SectionContext<'_, '_> {
    fn section(&self, key: &'static str, limit: Option<usize>, keep: impl Fn(&Job) -> bool) -> SectionView {
        let mut picked: Vec<&Job> = self.visible.iter().copied().filter(|j| keep(*j)).collect();
        if let Some(n) = limit {
            picked.truncate(n);
        }
        SectionView {
            key,
            jobs: job_views(&picked, self.filters),
            empty: picked
                .is_empty()
                .then(|| EmptyReason::classify(self.collection_len, self.filters)),
        }
    }
}

/// `Showing filtered results: Assam + 10th Pass + RAILWAY + "clerk"`, or
/// `None` when nothing is active.
pub fn filter_summary(filters: &FilterState) -> Option<String> {
    if !filters.is_active() {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(state) = filters.state() {
        parts.push(state_label(state));
    }
    if let Some(q) = filters.qualification() {
        parts.push(qualification_label(q).to_string());
    }
    if let Some(category) = filters.category() {
        parts.push(category.to_uppercase());
    }
    if let Some(term) = filters.search() {
        parts.push(format!("\"{}\"", term));
    }
    Some(format!("Showing filtered results: {}", parts.join(" + ")))
}
