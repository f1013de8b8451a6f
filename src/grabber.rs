//! Grab workflow orchestration
//!
//! [`AutoGrabber`] sequences the fetch, selection, and grab stages and
//! reports progress and failures on a broadcast event channel. Every failure
//! emits an [`Event::Error`] before the error is returned; the returned
//! error is the authoritative termination signal.

use crate::client::{RadarrClient, ReleaseSource};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::retry::retry_until;
use crate::selector::find_best_release;
use crate::types::{Event, GrabOutcome, MovieId, Release};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event channel capacity; slow subscribers past this lag receive
/// `RecvError::Lagged`
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Automated best-release grabber (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct AutoGrabber {
    /// Release listing and grab capability
    source: Arc<dyn ReleaseSource>,
    /// Configuration (wrapped in Arc for sharing across clones)
    config: Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
}

impl AutoGrabber {
    /// Create a grabber backed by a [`RadarrClient`] built from the config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let source = Arc::new(RadarrClient::new(&config.radarr)?);
        Ok(Self::with_source(config, source))
    }

    /// Create a grabber with an injected release source
    ///
    /// Used by tests and by consumers that already own a client.
    pub fn with_source(config: Config, source: Arc<dyn ReleaseSource>) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            config: Arc::new(config),
            event_tx,
        }
    }

    /// Subscribe to workflow events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers the event is silently dropped; the
    /// workflow does not depend on anyone listening.
    fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Fetch releases, select the best one, and grab it
    ///
    /// The single entry point of the workflow. Invocations are independent;
    /// concurrent calls for the same movie are not coordinated and may race
    /// at the Radarr API.
    pub async fn grab_movie(&self, movie_id: MovieId) -> Result<GrabOutcome> {
        let releases = self.fetch_releases(movie_id).await?;

        let Some(best) = find_best_release(&releases, &self.config.scoring) else {
            self.emit_event(Event::Error {
                message: "No suitable release found.".into(),
            });
            return Err(Error::NoSuitableRelease);
        };

        let used_fallback = best.custom_score() == 0;
        tracing::info!(
            movie_id = %movie_id,
            release_title = %best.title,
            custom_format_score = best.custom_score(),
            used_fallback = used_fallback,
            "best release selected"
        );

        self.download_release(best).await?;

        Ok(GrabOutcome {
            release: best.clone(),
            candidates: releases.len(),
            used_fallback,
        })
    }

    /// Fetch the candidate list, retrying while it comes back empty
    async fn fetch_releases(&self, movie_id: MovieId) -> Result<Vec<Release>> {
        self.emit_event(Event::Progress {
            message: "(1/2) Checking for best releases...".into(),
        });

        let result = retry_until(
            &self.config.retry,
            || self.source.get_releases(movie_id),
            |releases: &Vec<Release>| !releases.is_empty(),
        )
        .await;

        match result {
            Ok(releases) if !releases.is_empty() => Ok(releases),
            Ok(_) => {
                tracing::warn!(movie_id = %movie_id, "no releases found after retries");
                self.emit_event(Event::Error {
                    message: "No releases found for this movie.".into(),
                });
                Err(Error::Fetch {
                    message: "no releases found for this movie".into(),
                })
            }
            Err(e) => {
                let cause = match e {
                    Error::Fetch { message } => message,
                    other => other.to_string(),
                };
                tracing::warn!(movie_id = %movie_id, error = %cause, "release fetch failed");
                self.emit_event(Event::Error {
                    message: format!("Error fetching releases: {cause}"),
                });
                Err(Error::Fetch { message: cause })
            }
        }
    }

    /// Issue the grab command for the selected release
    async fn download_release(&self, release: &Release) -> Result<()> {
        self.emit_event(Event::Progress {
            message: "(2/2) Downloading best release...".into(),
        });

        // Missing identifiers are defaulted rather than treated as failures;
        // Radarr rejects a grab it cannot route
        let guid = release.guid.as_deref().unwrap_or("");
        let indexer_id = release.indexer_id.unwrap_or(-1);

        match self.source.grab_release(guid, indexer_id).await {
            Ok(true) => {
                tracing::info!(release_title = %release.title, "grab command accepted");
                self.emit_event(Event::Grabbed {
                    title: release.title.clone(),
                });
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(release_title = %release.title, "grab command rejected");
                self.emit_event(Event::Error {
                    message: format!("Failed to grab release: {}", release.title),
                });
                Err(Error::GrabRejected {
                    title: release.title.clone(),
                })
            }
            Err(e) => {
                let cause = match e {
                    Error::Grab { message } => message,
                    other => other.to_string(),
                };
                tracing::warn!(release_title = %release.title, error = %cause, "grab command failed");
                self.emit_event(Event::Error {
                    message: format!("Error during grabbing release: {cause}"),
                });
                Err(Error::Grab { message: cause })
            }
        }
    }
}
