//! Popular repositories by language
//!
//! [`PopularLoader`] fetches each language at most once per session and
//! feeds completions into a [`ListingStore`] through a pure reducer.

pub mod loader;
pub mod store;

pub use loader::{PopularLoader, RequestOutcome};
pub use store::{ListingState, ListingStore, PopularAction, reduce};
