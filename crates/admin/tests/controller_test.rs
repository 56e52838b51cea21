mod common;

use admin::{
    controller::{
        LoaderOutcome, ProductController, REQUIRED_FIELDS_MESSAGE, STORE_FAILURE_MESSAGE,
        SubmissionMode, SubmissionState,
    },
    domain::response::product::Product,
};
use common::{RecordingStore, StoreCall, form};
use std::sync::Arc;

fn controller(store: &Arc<RecordingStore>) -> ProductController {
    ProductController::new(store.clone())
}

fn monitor() -> Product {
    Product {
        id: 7,
        name: "Monitor".into(),
        price: 200.0,
        availability: true,
    }
}

#[tokio::test]
async fn create_calls_store_once_then_redirects_home() {
    let store = Arc::new(RecordingStore::default());
    let submitted = form(&[("name", "Monitor"), ("price", "200")]);

    let submission = controller(&store).create_action(submitted.clone()).await;

    assert_eq!(store.calls(), vec![StoreCall::Create(submitted)]);
    assert_eq!(submission.redirect_location(), Some("/"));
    assert_eq!(
        submission.transitions(),
        &[
            SubmissionState::Validating,
            SubmissionState::Redirecting("/".into())
        ]
    );
}

#[tokio::test]
async fn create_with_empty_name_shows_required_message() {
    let store = Arc::new(RecordingStore::default());

    let submission = controller(&store)
        .create_action(form(&[("name", ""), ("price", "200")]))
        .await;

    assert!(store.calls().is_empty());
    assert_eq!(submission.error_message(), Some(REQUIRED_FIELDS_MESSAGE));
}

#[tokio::test]
async fn edit_with_empty_availability_shows_required_message() {
    let store = Arc::new(RecordingStore::default());

    let submission = controller(&store)
        .edit_action(
            7,
            form(&[("name", "Monitor"), ("price", "200"), ("availability", "")]),
        )
        .await;

    assert!(store.calls().is_empty());
    assert_eq!(submission.error_message(), Some(REQUIRED_FIELDS_MESSAGE));
}

#[tokio::test]
async fn edit_updates_then_redirects_home() {
    let store = Arc::new(RecordingStore::default());
    let submitted = form(&[("name", "Monitor"), ("price", "250"), ("availability", "true")]);

    let submission = controller(&store).edit_action(7, submitted.clone()).await;

    assert_eq!(store.calls(), vec![StoreCall::Update(7, submitted)]);
    assert_eq!(submission.redirect_location(), Some("/"));
}

#[tokio::test]
async fn store_failure_is_displayed_instead_of_redirecting() {
    let store = Arc::new(RecordingStore::failing());

    let submission = controller(&store)
        .create_action(form(&[("name", "Monitor"), ("price", "200")]))
        .await;

    assert_eq!(store.calls().len(), 1);
    assert_eq!(submission.error_message(), Some(STORE_FAILURE_MESSAGE));
    assert_eq!(submission.redirect_location(), None);
}

#[tokio::test]
async fn toggle_patches_once_and_stays_on_page() {
    let store = Arc::new(RecordingStore::default());

    let submission = controller(&store)
        .toggle_availability_action(form(&[("id", "5")]))
        .await;

    assert_eq!(store.calls(), vec![StoreCall::UpdateAvailability(5)]);
    assert_eq!(submission.mode(), SubmissionMode::Fetch);
    assert_eq!(submission.state(), &SubmissionState::Idle);
    assert!(
        submission
            .transitions()
            .iter()
            .all(|s| !matches!(s, SubmissionState::Redirecting(_)))
    );
}

#[tokio::test]
async fn toggle_with_invalid_id_makes_no_call() {
    let store = Arc::new(RecordingStore::default());

    let submission = controller(&store)
        .toggle_availability_action(form(&[("id", "cinco")]))
        .await;

    assert!(store.calls().is_empty());
    assert_eq!(submission.state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn declined_delete_makes_no_call_and_no_transition() {
    let store = Arc::new(RecordingStore::default());

    let submission = controller(&store)
        .delete_action(7, |_: &str| false)
        .await;

    assert!(store.calls().is_empty());
    assert_eq!(submission.state(), &SubmissionState::Idle);
    assert!(submission.transitions().is_empty());
}

#[tokio::test]
async fn confirmed_delete_calls_store_once_then_redirects_home() {
    let store = Arc::new(RecordingStore::default());

    let submission = controller(&store)
        .delete_action(7, |prompt: &str| prompt.contains("eliminar"))
        .await;

    assert_eq!(store.calls(), vec![StoreCall::Delete(7)]);
    assert_eq!(submission.redirect_location(), Some("/"));
}

#[tokio::test]
async fn edit_loader_returns_product_or_redirects() {
    let store = Arc::new(RecordingStore::with_products(vec![monitor()]));
    let controller = controller(&store);

    assert_eq!(
        controller.edit_loader(7).await,
        LoaderOutcome::Data(monitor())
    );
    assert_eq!(
        controller.edit_loader(8).await,
        LoaderOutcome::Redirect("/".into())
    );
}

#[tokio::test]
async fn edit_loader_redirects_when_store_fails() {
    let store = Arc::new(RecordingStore::failing());

    assert_eq!(
        controller(&store).edit_loader(7).await,
        LoaderOutcome::Redirect("/".into())
    );
}

#[tokio::test]
async fn products_loader_propagates_store_errors() {
    let store = Arc::new(RecordingStore::failing());

    assert!(controller(&store).products_loader().await.is_err());
}
