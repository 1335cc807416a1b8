//! # daybook_core
//!
//! The headless core of a journaling app: notes recorded per calendar date,
//! with inline rich-text styling, tags, mood, weather, location and priority,
//! kept in a local SQLite database.
//!
//! ## Features
//!
//! - **Rich-text spans**: bold/italic/underline/color ranges over note text,
//!   updated by style commands and resolved into paintable runs
//! - **Fail-soft styling**: corrupt style or tag data degrades to plain text,
//!   never to an error
//! - **Note Store**: date-indexed SQLite storage with live query feeds
//! - **Planner**: selected-date state, week view feed and note commands
//! - **Search**: tag collection and tag/text filtering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daybook_core::config::StoreConfig;
//! use daybook_core::planner::Planner;
//! use daybook_core::store::NoteStore;
//! use daybook_core::style::{Selection, StyleCommand};
//!
//! # async fn run() -> daybook_core::DaybookResult<()> {
//! let store = NoteStore::open(&StoreConfig::from_env()?).await?;
//! let planner = Planner::new(store);
//!
//! let id = planner.add_note("Finished the first draft").await?;
//! let note = planner.store().get(id).await?.expect("just inserted");
//!
//! let mut editor = planner.open_editor(&note);
//! editor.select(Selection::new(0, 8));
//! editor.apply(StyleCommand::SetBold(true));
//! planner.save_editor(&editor, &note).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`style`]**: the span model (update, serialization, resolution)
//! - **[`editor`]**: one note's editing state on top of the span model
//! - **[`domain`]**: notes, tags and their metadata
//! - **[`store`]**: SQLite persistence and live feeds
//! - **[`planner`]**: the state controller a UI talks to
//! - **[`search`]**: tag and text filtering
//! - **[`config`]**: where the database lives
//! - **[`error`]**: unified error handling
//!
//! ## Error Handling
//!
//! Fallible operations return [`DaybookResult<T>`], wrapping [`DaybookError`].
//! Sub-module errors convert automatically, so `?` works throughout. The span
//! model itself never fails: bad input is clamped, ignored or dropped.

pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod planner;
pub mod search;
pub mod store;
pub mod style;

/// Re-exports the most commonly used types for convenience.
pub use error::{DaybookError, DaybookResult};
