use super::{
    LoaderOutcome, REQUIRED_FIELDS_MESSAGE, ROOT_PATH, STORE_FAILURE_MESSAGE, Submission,
    SubmissionMode,
};
use crate::{
    abstract_trait::product::DynProductStore,
    domain::{requests::product::FormData, response::product::Product},
    schema::coerce,
};
use shared::errors::ServiceError;
use tracing::{info, warn};

pub const DELETE_PROMPT: &str = "¿Está seguro que desea eliminar este producto?";

/// Interactive yes/no question asked before a destructive submission.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone)]
pub struct ProductController {
    store: DynProductStore,
}

impl ProductController {
    pub fn new(store: DynProductStore) -> Self {
        Self { store }
    }

    pub async fn products_loader(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.find_all().await
    }

    /// Unknown ids and failed lookups send the user back to the list.
    pub async fn edit_loader(&self, id: i64) -> LoaderOutcome<Product> {
        match self.store.find_by_id(id).await {
            Ok(Some(product)) => LoaderOutcome::Data(product),
            Ok(None) => LoaderOutcome::Redirect(ROOT_PATH.to_string()),
            Err(err) => {
                warn!("Could not load product {id} for editing: {err}");
                LoaderOutcome::Redirect(ROOT_PATH.to_string())
            }
        }
    }

    pub async fn create_action(&self, form: FormData) -> Submission {
        let mut submission = Submission::new(SubmissionMode::Navigate);
        if form.has_empty_field() {
            submission.fail(REQUIRED_FIELDS_MESSAGE);
            return submission;
        }

        submission.validate();
        match self.store.create_product(&form).await {
            Ok(()) => submission.complete(ROOT_PATH),
            Err(err) => {
                warn!("Create action failed: {err}");
                submission.fail(STORE_FAILURE_MESSAGE);
            }
        }
        submission
    }

    pub async fn edit_action(&self, id: i64, form: FormData) -> Submission {
        let mut submission = Submission::new(SubmissionMode::Navigate);
        if form.has_empty_field() {
            submission.fail(REQUIRED_FIELDS_MESSAGE);
            return submission;
        }

        submission.validate();
        match self.store.update_product(&form, id).await {
            Ok(()) => submission.complete(ROOT_PATH),
            Err(err) => {
                warn!("Edit action for product {id} failed: {err}");
                submission.fail(STORE_FAILURE_MESSAGE);
            }
        }
        submission
    }

    /// Declining the confirmation leaves the submission untouched in `Idle`.
    pub async fn delete_action(&self, id: i64, confirm: impl Confirm) -> Submission {
        let mut submission = Submission::new(SubmissionMode::Navigate);
        if !confirm.confirm(DELETE_PROMPT) {
            info!("Deletion of product {id} cancelled");
            return submission;
        }

        submission.validate();
        match self.store.delete_product(id).await {
            Ok(()) => submission.complete(ROOT_PATH),
            Err(err) => {
                warn!("Delete action for product {id} failed: {err}");
                submission.fail(STORE_FAILURE_MESSAGE);
            }
        }
        submission
    }

    /// Same-page toggle. The caller re-runs [`Self::products_loader`] afterwards.
    pub async fn toggle_availability_action(&self, form: FormData) -> Submission {
        let mut submission = Submission::new(SubmissionMode::Fetch);
        submission.validate();

        let raw_id = form.get("id").unwrap_or_default();
        let Some(id) = coerce::integer(raw_id).as_i64() else {
            warn!("Ignoring availability toggle with invalid id {raw_id:?}");
            submission.settle();
            return submission;
        };

        match self.store.update_availability(id).await {
            Ok(()) => submission.complete(ROOT_PATH),
            Err(err) => {
                warn!("Availability toggle for product {id} failed: {err}");
                submission.settle();
            }
        }
        submission
    }
}
