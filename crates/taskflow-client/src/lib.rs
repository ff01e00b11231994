//! # taskflow-client
//!
//! Client-side state management for the TaskFlow REST API.
//!
//! Two state containers sit atop a shared HTTP client:
//!
//! - [`SessionStore`] — credential lifecycle: login, logout, durable token
//!   persistence, token validation.
//! - [`TaskStore`] — task and category collections, fetched and mutated
//!   via REST calls, with local state updated optimistically from each
//!   mutation's response body.
//!
//! Both hold a clone of [`ApiClient`], which owns the base URL and the
//!   bearer token and injects both into every request.
//!
//! # Usage
//!
//! ```no_run
//! use taskflow_client::{ApiClient, ClientConfig, SessionStore, TaskStore};
//! use taskflow_core::auth::Credentials;
//!
//! # async fn run() -> Result<(), taskflow_core::ApiError> {
//! let config = ClientConfig::new("https://taskflow.example.com");
//! let client = ApiClient::new(&config)?;
//! let mut session = SessionStore::new(client.clone(), &config);
//! let mut tasks = TaskStore::new(client);
//!
//! session.initialize();
//! if !session.check_auth().await {
//!     session
//!         .login(&Credentials {
//!             username: "alice".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//! }
//! let all = tasks.fetch_tasks().await?;
//! println!("{} tasks", all.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod session;
pub mod storage;
pub mod tasks;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use session::SessionStore;
pub use storage::SessionStorage;
pub use tasks::TaskStore;
