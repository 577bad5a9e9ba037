// SPDX-License-Identifier: MPL-2.0
//! Category listing: paginated, recursive, cycle-safe and de-duplicated.
//!
//! Subcategories are walked breadth-first so every category is fetched at
//! most once, and always with the largest remaining depth it can be reached
//! with. The visited set is keyed by normalized category title, which makes
//! cyclic category graphs terminate.

use crate::application::cancellation::{is_cancelled, CancellationToken};
use crate::application::port::CommonsApi;
use crate::domain::commons::{CategoryName, FileTitle, Namespace};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Advisory progress notifications emitted while listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListProgress {
    /// The listing of the named category started.
    LoadingCategory(String),
    /// Number of qualifying files collected so far.
    FilesFound(usize),
}

/// Lists the image files of `category`, descending `max_depth` levels of
/// subcategories.
///
/// Returns the titles sorted and de-duplicated. `progress` is called from the
/// listing task; it must not block.
///
/// # Errors
///
/// - [`Error::Cancelled`] once `cancel` is triggered; no further requests are made
/// - [`Error::Transport`] / [`Error::MalformedResponse`] from the backend
/// - [`Error::CategoryNotFound`] when nothing qualifies and the category page is missing
/// - [`Error::NoImages`] when nothing qualifies otherwise
pub async fn list_files<A, F>(
    api: &A,
    category: &CategoryName,
    max_depth: u32,
    cancel: &CancellationToken,
    mut progress: F,
) -> Result<Vec<FileTitle>>
where
    A: CommonsApi + ?Sized,
    F: FnMut(ListProgress) + Send,
{
    progress(ListProgress::LoadingCategory(
        category.display_name().to_string(),
    ));

    let mut files: BTreeSet<FileTitle> = BTreeSet::new();
    let mut visited: HashSet<CategoryName> = HashSet::new();
    let mut queue: VecDeque<(CategoryName, u32)> = VecDeque::new();

    visited.insert(category.clone());
    queue.push_back((category.clone(), max_depth));

    let mut descents = 0usize;
    while let Some((current, depth)) = queue.pop_front() {
        if is_cancelled(cancel) {
            return Err(Error::Cancelled);
        }
        if descents > 0 {
            progress(ListProgress::FilesFound(files.len()));
        }
        descents += 1;

        let mut continuation = None;
        let mut page_index = 0usize;
        loop {
            if is_cancelled(cancel) {
                return Err(Error::Cancelled);
            }
            let page = api
                .category_members(&current, continuation.as_ref())
                .await?;
            log::debug!(
                "{} page {}: {} members",
                current,
                page_index,
                page.members.len()
            );

            for member in page.members {
                match member.namespace {
                    Namespace::File => {
                        let title = FileTitle::new(&member.title);
                        if title.is_supported_image() {
                            files.insert(title);
                        }
                    }
                    Namespace::Subcategory if depth > 0 => {
                        match CategoryName::parse(&member.title) {
                            Ok(sub) => {
                                if visited.insert(sub.clone()) {
                                    queue.push_back((sub, depth - 1));
                                }
                            }
                            Err(_) => log::warn!("Skipping unnamed subcategory in {}", current),
                        }
                    }
                    _ => {}
                }
            }

            match page.continuation {
                Some(next) if !next.is_empty() => {
                    continuation = Some(next);
                    page_index += 1;
                    progress(ListProgress::FilesFound(files.len()));
                }
                _ => break,
            }
        }
    }

    if is_cancelled(cancel) {
        return Err(Error::Cancelled);
    }

    if files.is_empty() {
        return Err(classify_empty(api, category, cancel).await);
    }

    log::debug!(
        "{}: {} files across {} categories",
        category,
        files.len(),
        visited.len()
    );
    Ok(files.into_iter().collect())
}

/// Tells a missing category apart from an empty one.
///
/// A failed probe is reported as an empty category.
async fn classify_empty<A>(api: &A, category: &CategoryName, cancel: &CancellationToken) -> Error
where
    A: CommonsApi + ?Sized,
{
    let name = category.display_name().to_string();
    match api.category_exists(category).await {
        _ if is_cancelled(cancel) => Error::Cancelled,
        Ok(false) => Error::CategoryNotFound(name),
        Ok(true) => Error::NoImages(name),
        Err(err) => {
            log::warn!("Existence probe for {} failed: {}", category, err);
            Error::NoImages(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cancellation::{cancel, new_token};
    use crate::test_utils::{file, subcat, FakeCommons};
    use std::sync::{Arc, Mutex};

    fn names(titles: &[FileTitle]) -> Vec<&str> {
        titles.iter().map(FileTitle::bare_name).collect()
    }

    async fn list(api: &FakeCommons, name: &str, depth: u32) -> Result<Vec<FileTitle>> {
        let category = CategoryName::parse(name).unwrap();
        list_files(api, &category, depth, &new_token(), |_| {}).await
    }

    #[tokio::test]
    async fn duplicate_across_pages_is_returned_once_sorted() {
        let api = FakeCommons::new().with_category(
            "Example",
            vec![
                vec![file("B.jpg"), file("A.jpg")],
                vec![file("B.jpg")],
            ],
        );

        let titles = list(&api, "Example", 0).await.unwrap();
        assert_eq!(names(&titles), vec!["A.jpg", "B.jpg"]);
        assert_eq!(api.member_request_count(), 2);
    }

    #[tokio::test]
    async fn pagination_is_transparent() {
        let paged = FakeCommons::new().with_category(
            "Paged",
            vec![
                vec![file("1.jpg"), file("2.png")],
                vec![file("3.gif")],
                vec![file("4.svg"), file("5.webp")],
            ],
        );
        let single = FakeCommons::new().with_category(
            "Paged",
            vec![vec![
                file("1.jpg"),
                file("2.png"),
                file("3.gif"),
                file("4.svg"),
                file("5.webp"),
            ]],
        );

        let from_pages = list(&paged, "Paged", 0).await.unwrap();
        let from_single = list(&single, "Paged", 0).await.unwrap();
        assert_eq!(from_pages, from_single);
        assert_eq!(from_pages.len(), 5);
    }

    #[tokio::test]
    async fn filters_non_image_extensions_and_other_namespaces() {
        let api = FakeCommons::new().with_category(
            "Mixed",
            vec![vec![
                file("Photo.JPG"),
                file("Clip.webm"),
                file("Scan.pdf"),
                crate::domain::commons::CategoryMember::new(Namespace::Other(0), "Gallery"),
            ]],
        );

        let titles = list(&api, "Mixed", 0).await.unwrap();
        assert_eq!(names(&titles), vec!["Photo.JPG"]);
    }

    #[tokio::test]
    async fn depth_zero_ignores_subcategories() {
        let api = FakeCommons::new()
            .with_category("Root", vec![vec![file("Root.jpg"), subcat("Child")]])
            .with_category("Child", vec![vec![file("Child.jpg")]]);

        let titles = list(&api, "Root", 0).await.unwrap();
        assert_eq!(names(&titles), vec!["Root.jpg"]);
        assert_eq!(api.member_request_count(), 1);
    }

    #[tokio::test]
    async fn recursion_respects_depth() {
        let api = FakeCommons::new()
            .with_category("Root", vec![vec![file("Root.jpg"), subcat("Child")]])
            .with_category("Child", vec![vec![file("Child.jpg"), subcat("Grandchild")]])
            .with_category("Grandchild", vec![vec![file("Grandchild.jpg")]]);

        let titles = list(&api, "Root", 1).await.unwrap();
        assert_eq!(names(&titles), vec!["Child.jpg", "Root.jpg"]);

        let titles = list(&api, "Root", 2).await.unwrap();
        assert_eq!(
            names(&titles),
            vec!["Child.jpg", "Grandchild.jpg", "Root.jpg"]
        );
    }

    #[tokio::test]
    async fn cycles_terminate_and_files_appear_once() {
        let api = FakeCommons::new()
            .with_category("A", vec![vec![file("Shared.jpg"), subcat("B")]])
            .with_category("B", vec![vec![file("Shared.jpg"), file("B.png"), subcat("A")]]);

        let titles = list(&api, "A", 5).await.unwrap();
        assert_eq!(names(&titles), vec!["B.png", "Shared.jpg"]);
        assert_eq!(api.member_request_count(), 2);
    }

    #[tokio::test]
    async fn category_reachable_twice_is_fetched_with_largest_depth() {
        // Root -> Long -> Deep, and Root -> Deep directly.
        let api = FakeCommons::new()
            .with_category("Root", vec![vec![subcat("Long"), subcat("Deep")]])
            .with_category("Long", vec![vec![subcat("Deep")]])
            .with_category("Deep", vec![vec![file("Deep.jpg"), subcat("Leaf")]])
            .with_category("Leaf", vec![vec![file("Leaf.jpg")]]);

        let titles = list(&api, "Root", 2).await.unwrap();
        assert_eq!(names(&titles), vec!["Deep.jpg", "Leaf.jpg"]);
    }

    #[tokio::test]
    async fn listing_is_idempotent() {
        let api = FakeCommons::new()
            .with_category("Root", vec![vec![file("Z.jpg"), subcat("Child")], vec![file("A.jpg")]])
            .with_category("Child", vec![vec![file("M.png")]]);

        let first = list(&api, "Root", 1).await.unwrap();
        let second = list(&api, "Root", 1).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_existing_category_is_no_images() {
        let api = FakeCommons::new().with_category("Empty", vec![vec![file("Notes.pdf")]]);

        let err = list(&api, "Empty", 1).await.unwrap_err();
        assert_eq!(err, Error::NoImages("Empty".to_string()));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn missing_category_is_category_not_found() {
        let api = FakeCommons::new();

        let err = list(&api, "Nowhere", 1).await.unwrap_err();
        assert_eq!(err, Error::CategoryNotFound("Nowhere".to_string()));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn transport_failure_is_distinct_from_empty() {
        let api = FakeCommons::new().failing_with(Error::Transport("unreachable".into()));

        let err = list(&api, "Anything", 1).await.unwrap_err();
        assert_eq!(err, Error::Transport("unreachable".into()));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn cancelled_before_start_makes_no_requests() {
        let api = FakeCommons::new().with_category("Root", vec![vec![file("A.jpg")]]);
        let token = new_token();
        cancel(&token);

        let category = CategoryName::parse("Root").unwrap();
        let err = list_files(&api, &category, 1, &token, |_| {}).await.unwrap_err();
        assert_eq!(err, Error::Cancelled);
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_mid_pagination_stops_requests() {
        let api = FakeCommons::new().with_category(
            "Root",
            vec![vec![file("1.jpg")], vec![file("2.jpg")], vec![file("3.jpg")]],
        );
        let token = new_token();
        let trigger = token.clone();

        let category = CategoryName::parse("Root").unwrap();
        let err = list_files(&api, &category, 0, &token, |p| {
            if matches!(p, ListProgress::FilesFound(_)) {
                cancel(&trigger);
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err, Error::Cancelled);
        assert_eq!(api.member_request_count(), 1);
    }

    #[tokio::test]
    async fn reports_progress_for_pages_and_descents() {
        let api = FakeCommons::new()
            .with_category("Root", vec![vec![file("A.jpg"), subcat("Child")], vec![file("B.jpg")]])
            .with_category("Child", vec![vec![file("C.jpg")]]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let category = CategoryName::parse("Root").unwrap();
        list_files(&api, &category, 1, &new_token(), move |p| {
            sink.lock().unwrap().push(p);
        })
        .await
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], ListProgress::LoadingCategory("Root".to_string()));
        assert!(seen.contains(&ListProgress::FilesFound(2)));
    }
}
