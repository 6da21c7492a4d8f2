// src/screens/lifecycle.rs

use std::future::Future;

use tokio::sync::Mutex;

use super::ScreenError;
use crate::client::{FetchError, FetchResult};

/// Screen state that carries a selection plus populated form fields.
pub trait Selection {
    fn clear_selection(&mut self);
}

/// Runs one create/update/delete against upstream and then reloads the
/// affected collections in full. Local views are never patched in place.
///
/// * Upstream unreachable: nothing is reloaded and the selection is kept,
///   since there is no fresher data to show.
/// * Upstream answered (success or an error status): reload, then clear the
///   selection once the reload has finished. The mutation error wins over a
///   reload error when both fail.
pub async fn commit<S, M, R>(
    state: &Mutex<S>,
    action: &str,
    mutation: M,
    reload: R,
) -> Result<(), ScreenError>
where
    S: Selection,
    M: Future<Output = FetchResult<()>>,
    R: Future<Output = Result<(), ScreenError>>,
{
    let outcome = mutation.await;
    match &outcome {
        Err(e @ FetchError::Transport { .. }) => {
            tracing::warn!("{} failed: {}", action, e);
            return Err(e.clone().into());
        }
        Err(e) => tracing::warn!("{} rejected upstream, reloading: {}", action, e),
        Ok(()) => tracing::info!("{} succeeded, reloading", action),
    }

    let reloaded = reload.await;
    state.lock().await.clear_selection();
    outcome?;
    reloaded
}
