//! Core library for sparkapi
//!
//! This crate implements the **Functional Core** of the sparkapi client, following the
//! Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The sparkapi project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`sparkapi_core`** (this crate): attribute mapping, pagination and endpoint
//!   wrappers with zero I/O
//! - **`sparkapi`**: the HTTP transport, configuration and the CLI (the Imperative Shell)
//!
//! All network access goes through the [`transport::Transport`] trait. The shell
//! provides the blocking HTTP implementation; tests use an in-memory one.
//!
//! # Module Organization
//!
//! - [`attribute`]: write-once named attributes and their values
//! - [`timestamp`]: the API's fixed-format UTC timestamps
//! - [`model`]: mapping JSON objects onto immutable models and back
//! - [`resources`]: typed variants (rooms, people, memberships, ...)
//! - [`transport`]: request/response types and the transport trait
//! - [`endpoints`]: resource paths and expected status codes
//! - [`pagination`]: lazy iteration over paged collections
//! - [`api`]: one method per remote operation
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use sparkapi_core::resources::{Resource, Room};
//! use serde_json::json;
//!
//! let room = Room::from_json(json!({
//!     "id": "abc",
//!     "title": "Project Unicorn",
//!     "created": "2016-04-21T19:01:55.966Z"
//! }))?;
//!
//! assert_eq!(room.title()?, "Project Unicorn");
//! assert_eq!(room.created()?.to_string(), "2016-04-21T19:01:55.966Z");
//! assert_eq!(room.to_json()?["title"], "Project Unicorn");
//! ```

pub mod api;
pub mod attribute;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod pagination;
pub mod resources;
pub mod timestamp;
pub mod transport;

pub use api::SparkApi;
pub use error::{Error, Result};
pub use model::Model;
