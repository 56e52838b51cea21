use crate::{
    controller::{
        DELETE_PROMPT, LoaderOutcome, ProductController, ROOT_PATH, Submission, SubmissionState,
    },
    domain::requests::product::FormData,
    state::AppState,
    view::{ConfirmDeletePage, EditProductPage, NewProductPage, ProductsPage, render},
};
use axum::{
    Extension, Form, Router,
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;

pub async fn products_page(
    Extension(controller): Extension<ProductController>,
) -> Result<Html<String>, HttpError> {
    let products = controller.products_loader().await?;
    render(&ProductsPage::new(&products))
}

/// In-place toggle: no redirect, the list is loaded again and re-rendered.
pub async fn toggle_availability(
    Extension(controller): Extension<ProductController>,
    Form(form): Form<FormData>,
) -> Result<Html<String>, HttpError> {
    controller.toggle_availability_action(form).await;
    products_page(Extension(controller)).await
}

pub async fn new_product_page() -> Result<Html<String>, HttpError> {
    render(&NewProductPage::default())
}

pub async fn create_product(
    Extension(controller): Extension<ProductController>,
    Form(form): Form<FormData>,
) -> Result<Response, HttpError> {
    let submission = controller.create_action(form.clone()).await;
    submission_response(&submission, |message| {
        render(&NewProductPage::with_error(&form, message))
    })
}

/// Ids that are not integers can never name a product; those requests go back
/// to the list like any other failed lookup.
fn product_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn back_to_list() -> Result<Response, HttpError> {
    Ok(Redirect::to(ROOT_PATH).into_response())
}

pub async fn edit_product_page(
    Extension(controller): Extension<ProductController>,
    Path(raw_id): Path<String>,
) -> Result<Response, HttpError> {
    let Some(id) = product_id(&raw_id) else {
        return back_to_list();
    };

    match controller.edit_loader(id).await {
        LoaderOutcome::Data(product) => Ok(render(&EditProductPage::new(&product))?.into_response()),
        LoaderOutcome::Redirect(location) => Ok(Redirect::to(&location).into_response()),
    }
}

pub async fn update_product(
    Extension(controller): Extension<ProductController>,
    Path(raw_id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Response, HttpError> {
    let Some(id) = product_id(&raw_id) else {
        return back_to_list();
    };

    let submission = controller.edit_action(id, form.clone()).await;
    submission_response(&submission, |message| {
        render(&EditProductPage::with_error(id, &form, message))
    })
}

pub async fn confirm_delete_page(Path(raw_id): Path<String>) -> Result<Response, HttpError> {
    let Some(id) = product_id(&raw_id) else {
        return back_to_list();
    };

    Ok(render(&ConfirmDeletePage::new(id, DELETE_PROMPT))?.into_response())
}

/// Only a form carrying `confirmed=true` deletes; anything else is a declined
/// confirmation and answers `204 No Content` so the browser stays put.
pub async fn delete_product(
    Extension(controller): Extension<ProductController>,
    Path(raw_id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Response, HttpError> {
    let Some(id) = product_id(&raw_id) else {
        return back_to_list();
    };

    let confirmed = form.get("confirmed") == Some("true");
    let submission = controller
        .delete_action(id, move |_: &str| confirmed)
        .await;
    submission_response(&submission, |message| {
        render(&ConfirmDeletePage::with_error(id, DELETE_PROMPT, message))
    })
}

fn submission_response(
    submission: &Submission,
    on_error: impl FnOnce(&str) -> Result<Html<String>, HttpError>,
) -> Result<Response, HttpError> {
    match submission.state() {
        SubmissionState::Redirecting(location) => Ok(Redirect::to(location).into_response()),
        SubmissionState::ErrorDisplayed(message) => Ok(on_error(message)?.into_response()),
        SubmissionState::Idle | SubmissionState::Validating => {
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

pub fn product_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(products_page).post(toggle_availability))
        .route(
            "/productos/nuevo",
            get(new_product_page).post(create_product),
        )
        .route(
            "/productos/{id}/editar",
            get(edit_product_page).post(update_product),
        )
        .route(
            "/productos/{id}/eliminar",
            get(confirm_delete_page).post(delete_product),
        )
        .layer(Extension(app_state.di_container.product_controller.clone()))
}
