use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use common::storage::StorageError;
use remote::RemoteError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("attachment upload failed: {0}")]
    Upload(#[from] StorageError),
    #[error("submission failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Where a form currently is in its submit lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Serializes submissions for one form instance.
///
/// At most one submission runs at a time: a second submit while one is in
/// flight is rejected outright, it never queues. Terminal states can be
/// configured to revert to `Idle` after a delay, for forms whose UI shows
/// a transient confirmation.
pub struct Submitter {
    tx: watch::Sender<SubmitState>,
    reset_after: Option<Duration>,
}

impl Submitter {
    pub fn new() -> Self {
        Self {
            tx: watch::channel(SubmitState::Idle).0,
            reset_after: None,
        }
    }

    pub fn with_reset(reset_after: Duration) -> Self {
        Self {
            tx: watch::channel(SubmitState::Idle).0,
            reset_after: Some(reset_after),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.tx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<SubmitState> {
        self.tx.subscribe()
    }

    /// Claim the in-flight slot. The check and the transition are a single
    /// guarded send, so two racing submits cannot both pass.
    pub fn begin(&self) -> Result<(), FormError> {
        let mut claimed = false;
        self.tx.send_if_modified(|state| {
            if matches!(state, SubmitState::Submitting) {
                return false;
            }
            *state = SubmitState::Submitting;
            claimed = true;
            true
        });
        if claimed { Ok(()) } else { Err(FormError::InFlight) }
    }

    pub fn succeed(&self) {
        self.finish(SubmitState::Succeeded);
    }

    pub fn fail(&self, error: &FormError) {
        self.finish(SubmitState::Failed(error.to_string()));
    }

    fn finish(&self, terminal: SubmitState) {
        let _ = self.tx.send(terminal.clone());
        if let Some(delay) = self.reset_after {
            let tx = self.tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // Only revert if nothing else has moved the state since.
                tx.send_if_modified(|state| {
                    if *state == terminal {
                        *state = SubmitState::Idle;
                        debug!("Submit state reverted to idle");
                        return true;
                    }
                    false
                });
            });
        }
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new()
    }
}

/// First-missing-wins presence check over required text fields, reported
/// under the field's wire name.
pub(crate) fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}
