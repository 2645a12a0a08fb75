// src/utils/scope.rs

use std::future::Future;

use tokio::sync::watch;

/// Lifetime of a view. Work started through one of its handles yields
/// nothing once the scope is closed, so late responses never reach state
/// that has been torn down.
///
/// Dropping the scope closes it.
#[derive(Debug)]
pub struct Scope {
    closed: watch::Sender<bool>,
}

/// Cheap, cloneable handle used to run work inside a [`Scope`].
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    closed: watch::Receiver<bool>,
}

impl Scope {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self { closed }
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            closed: self.closed.subscribe(),
        }
    }

    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.close();
    }
}

impl ScopeHandle {
    pub fn is_closed(&self) -> bool {
        // A dropped scope counts as closed.
        *self.closed.borrow() || self.closed.has_changed().is_err()
    }

    /// Drives `fut` to completion unless the scope closes first.
    ///
    /// Returns `None` when the scope was already closed, closed while `fut`
    /// was pending, or closed before the output could be handed back.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_closed() {
            return None;
        }

        let mut closed = self.closed.clone();
        tokio::select! {
            biased;
            _ = async {
                let _ = closed.wait_for(|closed| *closed).await;
            } => None,
            out = fut => (!self.is_closed()).then_some(out),
        }
    }
}
