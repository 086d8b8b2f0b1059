//! Core library for muletools
//!
//! This crate implements the **Functional Core** of the muletools
//! application, following the Functional Core - Imperative Shell
//! architectural pattern.
//!
//! All transformation logic for the MuleSoft documentation scraper lives
//! here as pure functions: markup goes in, structured version data comes
//! out. Network I/O, configuration, the CLI, and the MCP protocol adapter
//! live in the `muletools` binary crate (the Imperative Shell).
//!
//! Everything in this crate is deterministic and testable with fixture
//! markup, no mocking required:
//!
//! - [`tables`]: document-tree parsing and landmark-based table location
//! - [`version`]: version-token classification and channel/ordering logic
//! - [`matrix`]: compatibility-matrix construction from extracted tables
//! - [`java`]: runtime-to-JDK support pairing
//!
//! The one seam worth knowing about: [`tables::find_tables`] extracts
//! matched tables into owned cell text, so every step after the initial
//! parse operates on plain data with no ties to the document tree.

pub mod java;
pub mod matrix;
pub mod tables;
pub mod version;
