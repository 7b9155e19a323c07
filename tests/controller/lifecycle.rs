//! `Uninitialized → Loading → Ready | Failed`

use super::common::{sample_index, FailingIndexSource, StaticIndexSource};
use blogsift::testing::RecordingView;
use blogsift::{ControllerError, EngineOptions, IndexError, SearchController, SearchStatus};

fn fresh() -> SearchController<RecordingView> {
    SearchController::new(EngineOptions::default(), RecordingView::default()).unwrap()
}

#[test]
fn test_manual_transitions() {
    let mut controller = fresh();
    assert_eq!(controller.status(), SearchStatus::Uninitialized);

    controller.begin_loading().unwrap();
    assert_eq!(controller.status(), SearchStatus::Loading);
    assert!(controller.engine().is_none());

    controller.finish_loading(Ok(sample_index())).unwrap();
    assert_eq!(controller.status(), SearchStatus::Ready);
    assert!(controller.engine().is_some());
}

#[test]
fn test_failure_is_terminal() {
    let mut controller = fresh();
    controller.begin_loading().unwrap();
    let err = IndexError::fetch("/index.json", "connection refused");
    assert!(controller.finish_loading(Err(err)).is_err());
    assert_eq!(controller.status(), SearchStatus::Failed);

    assert!(matches!(
        controller.begin_loading(),
        Err(ControllerError::AlreadyStarted {
            state: SearchStatus::Failed
        })
    ));
    assert!(matches!(
        controller.finish_loading(Ok(sample_index())),
        Err(ControllerError::NotLoading { .. })
    ));
    assert_eq!(controller.status(), SearchStatus::Failed);
}

#[tokio::test]
async fn test_initialize_once() {
    let mut controller = fresh();
    controller
        .initialize(&StaticIndexSource::sample())
        .await
        .unwrap();
    assert_eq!(controller.status(), SearchStatus::Ready);

    let again = controller.initialize(&FailingIndexSource).await;
    assert!(matches!(again, Err(ControllerError::AlreadyStarted { .. })));
    assert_eq!(controller.status(), SearchStatus::Ready);
}

#[tokio::test]
async fn test_failed_initialize_returns_error() {
    let mut controller = fresh();
    let err = controller.initialize(&FailingIndexSource).await.unwrap_err();
    assert!(err.to_string().contains("404"));
    assert_eq!(controller.status(), SearchStatus::Failed);
}

#[test]
fn test_status_display() {
    assert_eq!(SearchStatus::Uninitialized.to_string(), "uninitialized");
    assert_eq!(SearchStatus::Failed.to_string(), "failed");
    assert_eq!(
        serde_json::to_string(&SearchStatus::Ready).unwrap(),
        "\"ready\""
    );
}
