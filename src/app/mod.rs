// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between user commands and the
//! background category loader.
//!
//! The `App` struct owns the gallery, the running loader (at most one) and the
//! Commons backend, and translates messages into outputs. Rendering lives in
//! `view`, the input/event loop in `subscription`.

mod message;
pub mod paths;
pub mod subscription;
mod update;
pub mod view;

pub use message::{Flags, Message, Output};
pub use update::fallback_url;

use crate::application::port::CommonsApi;
use crate::application::query::Gallery;
use crate::category_loader::{CategoryLoader, LoadEvent};
use crate::config::Settings;
use crate::domain::commons::CategoryName;
use std::fmt;
use std::sync::Arc;
use update::UpdateContext;

/// Root application state.
pub struct App {
    api: Arc<dyn CommonsApi>,
    settings: Settings,
    gallery: Gallery,
    /// The running load, if any. Replaced on every new load.
    loader: Option<CategoryLoader>,
    /// The category most recently requested.
    category: Option<CategoryName>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("category", &self.category)
            .field("gallery_len", &self.gallery.len())
            .field("loading", &self.is_loading())
            .finish()
    }
}

impl App {
    #[must_use]
    pub fn new(api: Arc<dyn CommonsApi>, settings: Settings) -> Self {
        Self {
            api,
            settings,
            gallery: Gallery::default(),
            loader: None,
            category: None,
        }
    }

    /// Applies one message and returns what to show.
    ///
    /// Must be called from within a Tokio runtime: loading a category spawns
    /// a task.
    pub async fn update(&mut self, message: Message) -> Vec<Output> {
        let mut ctx = self.context();
        match message {
            Message::LoadCategory(raw) => update::handle_load_category(&mut ctx, &raw),
            Message::Loader(event) => update::handle_loader_event(&mut ctx, event).await,
            Message::Next => update::handle_navigate_next(&mut ctx).await,
            Message::Previous => update::handle_navigate_previous(&mut ctx).await,
            Message::JumpTo(raw) => update::handle_jump_to(&mut ctx, &raw).await,
            Message::Refresh => update::handle_refresh(&mut ctx).await,
            Message::Cancel => update::handle_cancel(&mut ctx),
            Message::Help => vec![Output::Help],
            Message::Quit => {
                update::handle_cancel(&mut ctx);
                vec![Output::Quit]
            }
        }
    }

    /// Waits for the next event of the running loader.
    ///
    /// Pends forever while nothing is loading, so it can sit in a `select!`
    /// next to the input stream.
    pub async fn next_loader_event(&mut self) -> LoadEvent {
        loop {
            let Some(loader) = self.loader.as_mut() else {
                return std::future::pending().await;
            };
            match loader.recv_event().await {
                Some(event) => return event,
                // Task ended without a terminal event: cancelled or panicked.
                None => self.loader = None,
            }
        }
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn category(&self) -> Option<&CategoryName> {
        self.category.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    fn context(&mut self) -> UpdateContext<'_> {
        UpdateContext {
            api: &self.api,
            settings: &self.settings,
            gallery: &mut self.gallery,
            loader: &mut self.loader,
            category: &mut self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::query::ListProgress;
    use crate::domain::commons::statement::PROP_COPYRIGHT_LICENSE;
    use crate::domain::commons::{FileTitle, Rank, SnakValue, Statement, Statements};
    use crate::error::{Error, InputError};
    use crate::test_utils::{file, image_info, FakeCommons};
    use std::collections::HashMap;
    use std::time::Duration;

    fn fake_with(names: &[&str]) -> FakeCommons {
        let members = names.iter().map(|n| file(n)).collect();
        let mut api = FakeCommons::new().with_category("Gallery", vec![members]);
        for (i, name) in names.iter().enumerate() {
            api = api.with_file(name, image_info(i as u64 + 1, name));
        }
        api
    }

    fn app_with(api: FakeCommons) -> App {
        App::new(Arc::new(api), Settings::default())
    }

    /// Loads "Gallery" and drives the loader until it finishes.
    async fn load(app: &mut App) -> Vec<Output> {
        let mut outputs = app.update(Message::LoadCategory("Gallery".into())).await;
        while app.is_loading() {
            let event = app.next_loader_event().await;
            outputs.extend(app.update(Message::Loader(event)).await);
        }
        outputs
    }

    fn displayed_position(outputs: &[Output]) -> Option<usize> {
        outputs.iter().find_map(|o| match o {
            Output::Display { navigation, .. } => navigation.position,
            _ => None,
        })
    }

    #[tokio::test]
    async fn load_displays_first_file() {
        let mut app = app_with(fake_with(&["B.jpg", "A.jpg", "C.jpg"]));
        let outputs = load(&mut app).await;

        assert_eq!(
            outputs.first(),
            Some(&Output::Loading {
                category: "Gallery".into()
            })
        );
        assert!(outputs.contains(&Output::Loaded {
            category: "Gallery".into(),
            count: 3
        }));
        assert_eq!(displayed_position(&outputs), Some(1));
        assert_eq!(
            app.gallery().current(),
            Some(&FileTitle::new("A.jpg"))
        );
    }

    #[tokio::test]
    async fn empty_category_name_is_rejected() {
        let mut app = app_with(FakeCommons::new());
        let outputs = app.update(Message::LoadCategory("   ".into())).await;
        assert_eq!(
            outputs,
            vec![Output::Error(InputError::EmptyCategory.into())]
        );
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn next_and_previous_wrap_around() {
        let mut app = app_with(fake_with(&["A.jpg", "B.jpg", "C.jpg"]));
        load(&mut app).await;

        let outputs = app.update(Message::Previous).await;
        assert_eq!(displayed_position(&outputs), Some(3));
        let outputs = app.update(Message::Next).await;
        assert_eq!(displayed_position(&outputs), Some(1));
    }

    #[tokio::test]
    async fn navigation_is_ignored_with_a_single_file() {
        let mut app = app_with(fake_with(&["A.jpg"]));
        load(&mut app).await;

        assert!(app.update(Message::Next).await.is_empty());
        assert!(app.update(Message::Previous).await.is_empty());
        assert_eq!(app.gallery().current_index(), Some(0));
    }

    #[tokio::test]
    async fn jump_out_of_range_reports_and_keeps_cursor() {
        let names: Vec<String> = (0..10).map(|i| format!("{i}.jpg")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut app = app_with(fake_with(&refs));
        load(&mut app).await;
        app.update(Message::Next).await;

        let outputs = app.update(Message::JumpTo("500".into())).await;
        assert_eq!(
            outputs,
            vec![Output::Error(
                InputError::JumpOutOfRange {
                    requested: 500,
                    len: 10
                }
                .into()
            )]
        );
        assert_eq!(app.gallery().current_index(), Some(1));

        let outputs = app.update(Message::JumpTo("10".into())).await;
        assert_eq!(displayed_position(&outputs), Some(10));
    }

    #[tokio::test]
    async fn jump_with_garbage_is_input_error() {
        let mut app = app_with(fake_with(&["A.jpg", "B.jpg"]));
        load(&mut app).await;

        let outputs = app.update(Message::JumpTo("abc".into())).await;
        assert!(matches!(
            outputs.as_slice(),
            [Output::Error(Error::InvalidInput(InputError::InvalidJumpTarget(_)))]
        ));
    }

    #[tokio::test]
    async fn missing_category_is_reported_and_gallery_stays_empty() {
        let mut app = app_with(FakeCommons::new());
        let outputs = load(&mut app).await;

        assert!(outputs.contains(&Output::Error(Error::CategoryNotFound(
            "Gallery".into()
        ))));
        assert!(app.gallery().is_empty());
    }

    #[tokio::test]
    async fn display_failure_keeps_list_and_offers_link() {
        // Listed but without image info.
        let api = FakeCommons::new().with_category("Gallery", vec![vec![file("A.jpg"), file("B.jpg")]]);
        let mut app = app_with(api);
        let outputs = load(&mut app).await;

        let failed = outputs.iter().find_map(|o| match o {
            Output::DisplayFailed {
                title,
                error,
                fallback_url,
                ..
            } => Some((title.clone(), error.clone(), fallback_url.clone())),
            _ => None,
        });
        let (title, error, url) = failed.unwrap();
        assert_eq!(title, "A.jpg");
        assert_eq!(error, Error::FileNotFound("A.jpg".into()));
        assert_eq!(url, "https://commons.wikimedia.org/wiki/File:A.jpg");
        assert_eq!(app.gallery().len(), 2);
    }

    #[tokio::test]
    async fn license_without_author_is_displayed() {
        let mut statements = Statements::default();
        statements.insert(
            PROP_COPYRIGHT_LICENSE,
            Statement {
                rank: Rank::Normal,
                value: Some(SnakValue::Entity("Q18199165".into())),
                qualifiers: HashMap::new(),
            },
        );
        let api = fake_with(&["A.jpg"])
            .with_statements("M1", statements)
            .with_label("Q18199165", "en", "CC BY-SA 4.0");
        let mut app = app_with(api);
        let outputs = load(&mut app).await;

        let info = outputs
            .iter()
            .find_map(|o| match o {
                Output::Display { info, .. } => Some(info.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(info.license, "CC BY-SA 4.0");
        assert_eq!(info.author, "");
    }

    #[tokio::test]
    async fn cancel_stops_the_load_and_is_idempotent() {
        let api = fake_with(&["A.jpg"]).with_delay(Duration::from_millis(50));
        let mut app = app_with(api);
        app.update(Message::LoadCategory("Gallery".into())).await;
        assert!(app.is_loading());

        assert_eq!(app.update(Message::Cancel).await, vec![Output::Cancelled]);
        assert_eq!(app.update(Message::Cancel).await, vec![Output::Cancelled]);
        assert!(!app.is_loading());

        let waited = tokio::time::timeout(Duration::from_millis(200), app.next_loader_event()).await;
        assert!(waited.is_err(), "no event may arrive after cancel");
        assert!(app.gallery().is_empty());
    }

    #[tokio::test]
    async fn stray_loader_events_after_cancel_are_ignored() {
        let mut app = app_with(fake_with(&["A.jpg"]));
        app.update(Message::Cancel).await;
        let outputs = app
            .update(Message::Loader(LoadEvent::Loaded(vec![FileTitle::new("Z.jpg")])))
            .await;
        assert!(outputs.is_empty());
        assert!(app.gallery().is_empty());
    }

    #[tokio::test]
    async fn new_load_replaces_previous_gallery() {
        let api = fake_with(&["A.jpg", "B.jpg"]).with_category("Other", vec![vec![file("Z.png")]]);
        let mut app = app_with(api);
        load(&mut app).await;
        assert_eq!(app.gallery().len(), 2);

        app.update(Message::LoadCategory("Other".into())).await;
        assert!(app.gallery().is_empty());
        while app.is_loading() {
            let event = app.next_loader_event().await;
            app.update(Message::Loader(event)).await;
        }
        assert_eq!(app.gallery().len(), 1);
        assert_eq!(app.category().map(CategoryName::display_name), Some("Other"));
    }

    #[tokio::test]
    async fn refresh_on_empty_gallery_does_nothing() {
        let mut app = app_with(FakeCommons::new());
        assert!(app.update(Message::Refresh).await.is_empty());
    }

    #[tokio::test]
    async fn progress_is_forwarded() {
        let mut app = app_with(fake_with(&["A.jpg"]));
        let outputs = load(&mut app).await;
        assert!(outputs.contains(&Output::Progress(ListProgress::LoadingCategory(
            "Gallery".into()
        ))));
    }
}
