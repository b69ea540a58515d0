//! Relay core: data model and posted-URL cache, no I/O.
mod cache;
mod entry;

pub use cache::{normalize_url, PostedCache};
pub use entry::{FeedEntry, Submission};
