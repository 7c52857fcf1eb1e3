//! Archive-to-report pipeline for monoclonal selection runs.
//!
//! The core path is [`pipeline::extract_and_classify`] followed by
//! [`clonesift_report::emit`]. Everything else here is collaborator plumbing:
//! order URL handling, the HTTP fetch, and the downstream analysis binary.

pub use error::{Error, Result};

pub mod analysis;
pub mod command;
pub mod config;
mod error;
pub mod fetch;
pub mod order;
pub mod pipeline;
pub mod ui;
