//! # radarr-autograb
//!
//! Automated best-release selection and grabbing for Radarr.
//!
//! Given a movie id, the crate fetches the candidate releases from the Radarr
//! v3 API with bounded retry, ranks them by custom-format score with a
//! point-based fallback heuristic, and issues the grab command for the
//! winner. Progress and failures are reported on an event channel that UIs
//! can subscribe to.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Stateless** - Nothing is persisted; every invocation stands alone
//! - **Explicit policies** - Retry and scoring knobs are injected config,
//!   not hidden globals
//!
//! ## Quick Start
//!
//! ```no_run
//! use radarr_autograb::{AutoGrabber, Config, MovieId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.radarr.base_url = "http://localhost:7878".to_string();
//!     config.radarr.api_key = "secret".to_string();
//!
//!     let grabber = AutoGrabber::new(config)?;
//!
//!     // Subscribe to events
//!     let mut events = grabber.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let outcome = grabber.grab_movie(MovieId::new(42)).await?;
//!     println!("Grabbed: {}", outcome.release.title);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Radarr v3 API client and the release-source capability trait
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Grab workflow orchestration
pub mod grabber;
/// Predicate-driven retry with exponential backoff
pub mod retry;
/// Point-based release scoring fallback
pub mod scoring;
/// Two-tier best-release selection policy
pub mod selector;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use client::{RadarrClient, ReleaseSource};
pub use config::{Config, RadarrConfig, RetryConfig, ScoringConfig};
pub use error::{Error, Result};
pub use grabber::AutoGrabber;
pub use scoring::calculate_release_score;
pub use selector::find_best_release;
pub use types::{Event, GrabOutcome, MovieId, Release};
