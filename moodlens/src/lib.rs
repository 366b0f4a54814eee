//! moodlens: client core for a remote sentiment, emotion and aspect
//! analysis service.
//!
//! The crate holds everything the browser dashboard and the terminal client
//! share: wire types and their validation, the [`AnalysisApi`] contract, the
//! persisted history, input checks, heuristic insights and JSON exports.
//! Front ends plug in an HTTP [`Transport`] and a [`KeyValueStore`].
//!
//! # Quick Start
//!
//! ```no_run
//! use moodlens::{MemoryStorage, RawResponse, ServiceClient, Session, Transport};
//!
//! struct MyTransport;
//!
//! impl Transport for MyTransport {
//!     async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, String> {
//!         // Send `body` to `url` with your HTTP client of choice
//!         # let _ = (url, body);
//!         # unimplemented!()
//!     }
//! }
//!
//! # async fn run() -> moodlens::Result<()> {
//! let client = ServiceClient::new("http://localhost:8000/api", MyTransport);
//! let mut session = Session::new(client, MemoryStorage::new(), || 0);
//!
//! let analysis = session.analyze("The screen is great, the battery is not").await?;
//! println!("{}", analysis.sentiment.sentiment);
//! # Ok(())
//! # }
//! ```

pub mod analyze;
pub mod api;
pub mod config;
pub mod display;
mod error;
pub mod export;
pub mod history;
pub mod insights;
pub mod prefs;
pub mod samples;
pub mod schema;
pub mod session;
pub mod stats;
pub mod storage;
pub mod types;

pub use api::{AnalysisApi, Endpoint, RawResponse, ServiceClient, Transport};
pub use config::ClientConfig;
pub use error::{AnalysisError, ConfigError, ExportError, Result, StorageError};
pub use export::Export;
pub use history::{AnalysisHistoryItem, HistoryStore};
pub use insights::{AspectSummary, Insights};
pub use session::Session;
pub use stats::HistoryStats;
pub use storage::{KeyValueStore, MemoryStorage};
pub use types::*;
