// SPDX-License-Identifier: MPL-2.0
//! Background category listing.
//!
//! A [`CategoryLoader`] runs [`list_files`] on a Tokio task and delivers its
//! progress and result through a bounded channel, so the interactive side
//! never blocks on the network. The handle owns the cancellation token:
//! cancelling it (or dropping the handle) stops the task at its next page or
//! descent, and no event is delivered afterwards.

use crate::application::cancellation::{self, CancellationToken};
use crate::application::port::CommonsApi;
use crate::application::query::{list_files, ListProgress};
use crate::domain::commons::{CategoryName, FileTitle};
use crate::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Capacity of the event channel. Progress is dropped when it is full.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Events sent from the loader task to the interactive side.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// Advisory progress; may be skipped under backpressure.
    Progress(ListProgress),

    /// The sorted, de-duplicated file list. Never empty.
    Loaded(Vec<FileTitle>),

    /// The listing failed. Always the last event.
    Failed(Error),
}

impl LoadEvent {
    /// Whether no further events follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

/// Handle to a running category listing.
pub struct CategoryLoader {
    category: CategoryName,
    token: CancellationToken,
    event_rx: mpsc::Receiver<LoadEvent>,
}

impl CategoryLoader {
    /// Starts listing `category` down to `max_depth` subcategory levels.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(api: Arc<dyn CommonsApi>, category: CategoryName, max_depth: u32) -> Self {
        let token = cancellation::new_token();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let task_token = Arc::clone(&token);
        let task_category = category.clone();
        tokio::spawn(async move {
            Self::run(api, task_category, max_depth, task_token, event_tx).await;
        });

        Self {
            category,
            token,
            event_rx,
        }
    }

    async fn run(
        api: Arc<dyn CommonsApi>,
        category: CategoryName,
        max_depth: u32,
        token: CancellationToken,
        event_tx: mpsc::Sender<LoadEvent>,
    ) {
        let progress_tx = event_tx.clone();
        let progress_token = Arc::clone(&token);
        let result = list_files(api.as_ref(), &category, max_depth, &token, move |progress| {
            if !cancellation::is_cancelled(&progress_token) {
                let _ = progress_tx.try_send(LoadEvent::Progress(progress));
            }
        })
        .await;

        let event = match result {
            Ok(files) => {
                log::info!("Loaded {} files from {}", files.len(), category);
                LoadEvent::Loaded(files)
            }
            Err(Error::Cancelled) => {
                log::debug!("Listing of {} cancelled", category);
                return;
            }
            Err(err) => {
                log::error!("Listing of {} failed: {}", category, err);
                LoadEvent::Failed(err)
            }
        };

        if cancellation::is_cancelled(&token) {
            return;
        }
        // The receiver is gone when the handle was dropped.
        let _ = event_tx.send(event).await;
    }

    /// The category being listed.
    #[must_use]
    pub fn category(&self) -> &CategoryName {
        &self.category
    }

    /// Stops the task. Calling it again, or after completion, does nothing.
    pub fn cancel(&mut self) {
        cancellation::cancel(&self.token);
        self.event_rx.close();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        cancellation::is_cancelled(&self.token)
    }

    /// Receives the next event (non-blocking).
    ///
    /// Returns `None` if no event is available or the loader was cancelled.
    pub fn try_recv_event(&mut self) -> Option<LoadEvent> {
        if self.is_cancelled() {
            return None;
        }
        self.event_rx.try_recv().ok()
    }

    /// Receives the next event.
    ///
    /// Returns `None` once the task has finished and every event was
    /// delivered, or as soon as the loader is cancelled.
    pub async fn recv_event(&mut self) -> Option<LoadEvent> {
        if self.is_cancelled() {
            return None;
        }
        self.event_rx.recv().await
    }
}

impl Drop for CategoryLoader {
    fn drop(&mut self) {
        cancellation::cancel(&self.token);
    }
}

impl std::fmt::Debug for CategoryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryLoader")
            .field("category", &self.category)
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{file, subcat, FakeCommons};
    use std::time::Duration;

    fn category(name: &str) -> CategoryName {
        CategoryName::parse(name).unwrap()
    }

    async fn collect(loader: &mut CategoryLoader) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Some(event) = loader.recv_event().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn delivers_progress_then_loaded() {
        let api = Arc::new(FakeCommons::new().with_category(
            "Sunsets",
            vec![vec![file("B.jpg"), file("A.jpg")], vec![file("C.png")]],
        ));
        let mut loader = CategoryLoader::spawn(api, category("Sunsets"), 0);

        let events = collect(&mut loader).await;
        let last = events.last().cloned();
        assert_eq!(
            last,
            Some(LoadEvent::Loaded(vec![
                FileTitle::new("A.jpg"),
                FileTitle::new("B.jpg"),
                FileTitle::new("C.png"),
            ]))
        );
        assert!(events[..events.len() - 1]
            .iter()
            .all(|e| matches!(e, LoadEvent::Progress(_))));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    }

    #[tokio::test]
    async fn missing_category_fails_instead_of_loading_nothing() {
        let api = Arc::new(FakeCommons::new());
        let mut loader = CategoryLoader::spawn(api, category("Nope"), 1);

        let events = collect(&mut loader).await;
        assert_eq!(
            events.last(),
            Some(&LoadEvent::Failed(Error::CategoryNotFound(
                "Nope".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let api = Arc::new(FakeCommons::new().failing_with(Error::Transport("offline".into())));
        let mut loader = CategoryLoader::spawn(api, category("Sunsets"), 1);

        let events = collect(&mut loader).await;
        assert!(matches!(
            events.last(),
            Some(LoadEvent::Failed(Error::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn cancel_stops_all_further_events() {
        let api = Arc::new(
            FakeCommons::new()
                .with_category("Root", vec![vec![file("A.jpg"), subcat("Child")]])
                .with_category("Child", vec![vec![file("B.jpg")]])
                .with_delay(Duration::from_millis(20)),
        );
        let mut loader = CategoryLoader::spawn(api, category("Root"), 1);

        loader.cancel();
        loader.cancel();
        assert!(loader.is_cancelled());
        assert_eq!(loader.recv_event().await, None);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(loader.try_recv_event(), None);
    }

    #[tokio::test]
    async fn cancel_after_completion_is_harmless() {
        let api = Arc::new(FakeCommons::new().with_category("Root", vec![vec![file("A.jpg")]]));
        let mut loader = CategoryLoader::spawn(api, category("Root"), 0);
        let _ = collect(&mut loader).await;

        loader.cancel();
        assert!(loader.is_cancelled());
        assert_eq!(loader.recv_event().await, None);
    }

    #[tokio::test]
    async fn dropping_the_handle_stops_requests() {
        let api = Arc::new(
            FakeCommons::new()
                .with_category(
                    "Root",
                    vec![vec![subcat("A"), subcat("B"), subcat("C"), subcat("D")]],
                )
                .with_category("A", vec![vec![file("1.jpg")]])
                .with_category("B", vec![vec![file("2.jpg")]])
                .with_category("C", vec![vec![file("3.jpg")]])
                .with_category("D", vec![vec![file("4.jpg")]])
                .with_delay(Duration::from_millis(20)),
        );
        let loader = CategoryLoader::spawn(api.clone(), category("Root"), 1);
        tokio::time::sleep(Duration::from_millis(30)).await;
        drop(loader);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let settled = api.request_count();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(api.request_count(), settled);
        assert!(settled < 5);
    }
}
