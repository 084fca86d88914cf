//! # Mundo News
//!
//! Extracts gameweek review stories from FPL Mundo league pages and turns
//! them into `/publish_news` command lines.
//!
//! The page delivers its stories inconsistently: sometimes as Elementor post
//! cards, sometimes as loose heading-delimited sections, sometimes only in
//! background JSON responses. Extraction is a cascade of three strategies
//! ([`scrapers`]) driven by [`pipeline`], which keeps the first four unique
//! stories in priority order.
//!
//! ## Architecture
//!
//! 1. **Acquisition** ([`source`]): a captured page and its JSON payloads
//! 2. **Extraction** ([`pipeline`]): cards, then headings, then JSON payloads
//! 3. **Output** ([`outputs`]): command lines, JSON reports, diagnostic dumps

pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod source;
pub mod utils;
