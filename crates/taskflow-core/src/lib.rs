//! # taskflow-core
//!
//! Foundation types and errors for the TaskFlow API client.
//!
//! This crate provides the shared vocabulary the client crate depends on:
//!
//! - **Auth**: [`auth::Credentials`], [`auth::UserRecord`], [`auth::Session`]
//! - **Tasks**: [`tasks::Task`], [`tasks::TaskStatus`], [`tasks::Category`],
//!   [`tasks::TaskStats`]
//! - **List normalization**: [`list::ListResponse`] collapsing paginated and
//!   bare-array list bodies
//! - **Errors**: [`errors::ApiError`] hierarchy via `thiserror`, plus the
//!   ordered user-facing message fallback
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `taskflow-client`.

#![deny(unsafe_code)]

pub mod auth;
pub mod error_parsing;
pub mod errors;
pub mod list;
pub mod tasks;

pub use errors::ApiError;
pub use list::ListResponse;
