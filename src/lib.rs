//! # seqview - Terminal DNA Sequence Viewer
//!
//! A terminal-based viewer for single DNA sequences using ratatui.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `model`: The sequence store and application state
//! - `layout`: Flat-position / grid-coordinate mapping and the column ruler
//! - `highlight`: Highlighted regions, match navigation, and export
//! - `search`: Regex pattern matching over the sequence
//! - `transform`: Reverse, complement, and reverse-complement
//! - `fasta`: Single-record FASTA loading and saving
//! - `event`: Keyboard event handling (Vim-style navigation)
//! - `ui`: TUI rendering with ratatui
//! - `controller`: Orchestration of state transitions
//!
//! ## Future Extensions
//!
//! The architecture is designed to support:
//! - RNA and quality-shaded color schemes
//! - Restriction-site catalogs for the search engine
//! - Annotation tracks alongside the highlight overlay
//! - Export of the visible window as FASTA

pub mod controller;
pub mod event;
pub mod fasta;
pub mod highlight;
pub mod layout;
pub mod model;
pub mod search;
pub mod transform;
pub mod ui;
