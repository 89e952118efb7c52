use crate::cue::{Cue, CueIndex};
use crate::loader::{Loader, Source};

use std::error::Error as _;
use std::sync::{Arc, OnceLock};

use tokio::task::JoinHandle;
use tracing::{error, warn};

/// Preview cues for one player session.
///
/// Starts out empty and is filled at most once, when the cue sheet has
/// been fetched and parsed. Readers either see nothing or the complete
/// index; lookups against an empty track simply find no cue.
#[derive(Debug, Default)]
pub struct PreviewTrack {
    index: OnceLock<CueIndex>,
}

impl PreviewTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands the index back if the track was already filled.
    pub fn publish(&self, index: CueIndex) -> Result<(), CueIndex> {
        self.index.set(index)
    }

    pub fn index(&self) -> Option<&CueIndex> {
        self.index.get()
    }

    pub fn is_ready(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn lookup(&self, t: f64) -> Option<&Cue> {
        self.index.get()?.lookup(t)
    }

    /// Fetch, parse and publish. A failed fetch is logged and leaves the
    /// track empty, which turns the preview off.
    pub async fn load_from(&self, loader: &Loader, source: &Source) -> bool {
        let index = match loader.load(source).await {
            Ok(index) => index,
            Err(err) => {
                error!(
                    %source,
                    error = %err,
                    cause = ?err.source(),
                    "failed to load preview cues"
                );
                return false;
            }
        };
        if self.publish(index).is_err() {
            warn!(%source, "preview cues already loaded, discarding");
            return false;
        }
        true
    }

    pub fn spawn_load(self: &Arc<Self>, loader: Loader, source: Source) -> JoinHandle<()> {
        let track = Arc::clone(self);
        tokio::spawn(async move {
            track.load_from(&loader, &source).await;
        })
    }
}
