//! What the results list shows after each keystroke.

use super::common::{argo_psql_index, ready_controller, ready_controller_with, sample_index};
use blogsift::testing::RecordingView;
use blogsift::{
    EngineOptions, HtmlResultsList, RenderedList, ResultLink, SearchController, NO_RESULTS_TEXT,
};

#[test]
fn test_typing_builds_up_results() {
    let mut controller = ready_controller(argo_psql_index());
    for prefix in ["a", "ar"] {
        controller.on_input(prefix);
        assert_eq!(controller.view().current(), RenderedList::Empty);
    }

    controller.on_input("arg");
    controller.on_input("argo");
    assert_eq!(
        controller.view().current(),
        RenderedList::Links(vec![ResultLink {
            title: "ArgoCD Setup".to_string(),
            permalink: "/posts/argocd".to_string(),
        }])
    );
}

#[test]
fn test_no_match_shows_placeholder() {
    let mut controller = ready_controller(argo_psql_index());
    controller.on_input("xyz123");
    assert_eq!(controller.view().current(), RenderedList::NoResults);
    assert_eq!(controller.view().current().len(), 1);
}

#[test]
fn test_clearing_input_empties_list() {
    let mut controller = ready_controller(sample_index());
    controller.on_input("postgres");
    assert!(!controller.view().current().links().is_empty());

    controller.on_input("");
    assert_eq!(controller.view().current(), RenderedList::Empty);
}

#[test]
fn test_every_input_rerenders() {
    let mut controller = ready_controller(sample_index());
    for query in ["pos", "post", "postg", "po", ""] {
        assert!(controller.on_input(query));
    }
    assert_eq!(controller.view().renders(), 5);
}

#[test]
fn test_links_follow_engine_order() {
    let mut controller = ready_controller(sample_index());
    controller.on_input("postgres");
    let expected = controller.query("postgres").unwrap().permalinks();
    let shown: Vec<String> = controller
        .view()
        .current()
        .links()
        .iter()
        .map(|l| l.permalink.clone())
        .collect();
    assert_eq!(shown, expected);
}

#[test]
fn test_limit_applies_to_rendered_list() {
    let mut controller = ready_controller_with(
        sample_index(),
        EngineOptions {
            limit: Some(1),
            ..EngineOptions::default()
        },
    );
    controller.on_input("postgres");
    assert_eq!(controller.view().current().len(), 1);
}

#[test]
fn test_input_ignored_until_ready() {
    let mut controller =
        SearchController::new(EngineOptions::default(), RecordingView::default()).unwrap();
    assert!(!controller.on_input("argo"));
    controller.begin_loading().unwrap();
    assert!(!controller.on_input("argo"));
    assert_eq!(controller.view().renders(), 0);
}

#[test]
fn test_html_view_renders_links_and_placeholder() {
    let mut controller =
        SearchController::new(EngineOptions::default(), HtmlResultsList::new()).unwrap();
    controller.begin_loading().unwrap();
    controller.finish_loading(Ok(argo_psql_index())).unwrap();

    controller.on_input("argo");
    let html = controller.view().html().to_string();
    assert_eq!(html.matches("<li").count(), 1);
    assert!(html.contains("href=\""));
    assert!(html.contains("argocd"));
    assert!(html.contains("ArgoCD Setup"));

    controller.on_input("xyz123");
    assert!(controller.view().html().contains(NO_RESULTS_TEXT));
    assert!(!controller.view().html().contains("href"));

    controller.on_input("");
    assert_eq!(controller.view().html(), "");
    assert_eq!(controller.view().generation(), 3);
}
