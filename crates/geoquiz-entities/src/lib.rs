//! geoquiz-entities: Country/territory classification for the quiz dataset.
//!
//! The quiz app ships a single `countries.json` dataset. Every record is
//! tagged as a sovereign `country` or a `territory` by exact name lookup in a
//! shared reference list (`data/territories.json`), aggregate counts are
//! recomputed, and the file is rewritten atomically with a bumped version.
//!
//! The classification core ([`classify()`], [`annotate()`], [`stamp()`]) is
//! pure; [`store`] and [`pipeline`] are the I/O shell around it.

pub mod entity;
pub mod reference;
pub mod record;
pub mod classify;
pub mod metadata;
pub mod dataset;
pub mod store;
pub mod pipeline;
pub mod query;
pub mod config;
pub mod error;

pub use entity::*;
pub use reference::*;
pub use record::*;
pub use classify::*;
pub use metadata::*;
pub use dataset::*;
pub use store::*;
pub use pipeline::*;
pub use query::*;
pub use config::*;
pub use error::{DatasetError, Result};
