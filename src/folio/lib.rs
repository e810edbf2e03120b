//! # Folio Architecture
//!
//! Folio is a portfolio content manager: items grouped by category and tag,
//! a public site that only ever shows published work, editor forms that
//! answer either with a full page or with a JSON fragment, and a small
//! account module. The admin CLI and the web server are two clients of the
//! same library.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────┐   ┌───────────────────────────────┐
//! │  Web Layer (web/)            │   │  CLI Layer (cli/, main.rs)    │
//! │  - routes, sessions, status  │   │  - admin commands, terminal   │
//! │  - page / fragment adapters  │   │    output, exit codes         │
//! └──────────────────────────────┘   └───────────────────────────────┘
//!                 │                                 │
//!                 └────────────────┬────────────────┘
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns store and media root     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Forms (forms/)             │
//! │  - Validation, visibility rules, mutations                  │
//! │  - Every operation returns one neutral `CmdResult`          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, ItemQuery visibility views              │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Visibility
//!
//! Public listings never filter drafts out after the fact. They start from
//! [`store::ItemQuery::published`], which cannot yield an unpublished item.
//! Editor views and the refreshed listing returned by mutations start from
//! [`store::ItemQuery::all`]. The year archive also starts from `all`.
//!
//! ## One Result, Two Presentations
//!
//! Create, update and delete return a [`commands::CmdResult`] carrying either
//! the refreshed listing or the submitted values with field errors. The web
//! layer turns the same result into a redirect or re-rendered page for a
//! normal request, and into `{form_is_valid, html_form, html_portfolio_list}`
//! for an `XMLHttpRequest`.
//!
//! ## No Output in Core
//!
//! From `api.rs` inward, code returns Rust types and never writes to
//! stdout/stderr or exits the process. Logging goes through `tracing`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`forms`]: Submitted data and field-scoped validation
//! - [`store`]: Storage abstraction, queries and implementations
//! - [`model`]: Core data types (`Item`, `Category`, `Tag`, `Client`, `User`)
//! - [`paging`]: Page slicing for listings
//! - [`media`]: Uploaded file storage
//! - [`config`]: Site configuration
//! - [`web`]: The salvo web application
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod init;
pub mod media;
pub mod model;
pub mod paging;
pub mod store;
pub mod web;
