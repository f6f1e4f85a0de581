//! Filtering, suggestion and view-model core for the job board.
//!
//! The job collection is loaded once and never mutated. A [`FilterController`]
//! owns the active [`FilterState`] and recomputes the visible subset after
//! every mutation; presentation layers consume [`view`] types and never touch
//! the raw records.

pub mod controller;
pub mod filter;
pub mod job;
pub mod labels;
pub mod persist;
pub mod quiz;
pub mod suggest;
pub mod view;

pub use controller::{FilterController, Presenter, SearchMemory, DEFAULT_RETENTION_DAYS};
pub use filter::{apply_filters, CompiledFilter, FilterState};
pub use job::{ImportantDates, Job, JobCollection, JobId, Section};
pub use labels::{qualification_label, state_label, Qualification};
pub use suggest::{SuggestionSet, DEFAULT_SEEDS};
pub use view::{EmptyReason, JobView, SectionsView};
