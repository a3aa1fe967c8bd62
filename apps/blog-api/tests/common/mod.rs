//! Shared infrastructure for the blog API integration suite.
//!
//! - [`fixtures`] - randomized blog post data
//! - [`harness`] - server/database lifecycle and the scenario runner

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
