//! Controller invariants over generated keystroke sequences.

use super::common::{ready_controller, sample_index};
use blogsift::testing::RecordingView;
use blogsift::{EngineOptions, IndexError, RenderedList, SearchController, MIN_QUERY_CHARS};
use proptest::prelude::*;

fn failed_controller() -> SearchController<RecordingView> {
    let mut controller =
        SearchController::new(EngineOptions::default(), RecordingView::default()).unwrap();
    controller.begin_loading().unwrap();
    let _ = controller.finish_loading(Err(IndexError::Status {
        location: "/index.json".to_string(),
        status: 500,
    }));
    controller
}

proptest! {
    /// Up to two characters never lists anything, whatever came before.
    #[test]
    fn prop_short_query_clears(before in "[a-z]{3,10}", query in "\\PC{0,2}") {
        let mut controller = ready_controller(sample_index());
        controller.on_input(&before);
        controller.on_input(&query);
        prop_assert_eq!(controller.view().current(), RenderedList::Empty);
    }

    /// Three or more characters always renders links or the placeholder.
    #[test]
    fn prop_long_query_renders(query in "\\PC{3,16}") {
        prop_assume!(query.chars().count() >= MIN_QUERY_CHARS);
        let mut controller = ready_controller(sample_index());
        prop_assert!(controller.on_input(&query));
        prop_assert!(!controller.view().current().is_empty());
    }

    /// After a failed load nothing is ever rendered.
    #[test]
    fn prop_failed_never_renders(inputs in prop::collection::vec(any::<String>(), 0..20)) {
        let mut controller = failed_controller();
        for input in &inputs {
            prop_assert!(!controller.on_input(input));
        }
        prop_assert_eq!(controller.view().renders(), 0);
    }

    /// The list only depends on the latest input.
    #[test]
    fn prop_latest_input_wins(history in prop::collection::vec("[a-z]{0,8}", 0..8), last in "[a-z]{3,8}") {
        let mut typed = ready_controller(sample_index());
        for input in &history {
            typed.on_input(input);
        }
        typed.on_input(&last);

        let mut direct = ready_controller(sample_index());
        direct.on_input(&last);
        prop_assert_eq!(typed.view().current(), direct.view().current());
    }
}
