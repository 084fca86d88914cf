//! Output generation: publish commands, JSON reports and diagnostic dumps.
//!
//! # Submodules
//!
//! - [`command`]: formats stories as `/publish_news` lines
//! - [`json`]: writes merged command lists as dated JSON reports
//! - [`dump`]: saves captured markup and payloads for offline debugging

pub mod command;
pub mod dump;
pub mod json;
