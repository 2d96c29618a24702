//! List pages
//!
//! A list page owns the fetched rows of one entity kind together with the
//! inline error shown above them. Edit and delete go through the page so the
//! local list can be patched and refreshed once the server accepts the change.

use std::{
    fmt::{self, Debug},
    sync::Arc,
};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    api::{ApiError, InventoryApi},
    pages::{Confirm, FlowError, FormError, ListView, Outcome},
    projection::Tabular,
};

/// An entity kind that has its own list page.
#[async_trait]
pub trait Listed: Tabular + Clone + PartialEq + Send + Sync {
    /// Edit form bound to this entity.
    type Form: for<'a> From<&'a Self> + Default + Send;

    /// Singular noun used in logs and errors.
    const NOUN: &'static str;

    /// Inline error shown when the list cannot be fetched.
    const FETCH_ERROR: &'static str;

    /// Server-assigned id.
    fn id(&self) -> i64;

    /// Question asked before deleting this entity.
    fn delete_prompt(&self) -> String;

    /// Full replacement built from an edit form.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] for the first violated input constraint.
    fn from_form(form: &Self::Form, original: &Self) -> Result<Self, FormError>;

    /// Fetch every entity of this kind.
    async fn fetch(api: &dyn InventoryApi) -> Result<Vec<Self>, ApiError>;

    /// Delete the entity with `id`.
    async fn remove(api: &dyn InventoryApi, id: i64) -> Result<(), ApiError>;

    /// Replace the entity with `id`.
    async fn replace(api: &dyn InventoryApi, id: i64, entity: &Self) -> Result<Self, ApiError>;
}

/// List page state for one entity kind.
pub struct ListPage<E> {
    api: Arc<dyn InventoryApi>,
    view: ListView<E>,
    error: Option<String>,
}

impl<E: Debug> Debug for ListPage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPage")
            .field("view", &self.view)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<E: Listed> ListPage<E> {
    /// Page with no rows fetched yet.
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self {
            api,
            view: ListView::new(),
            error: None,
        }
    }

    /// Current rows, search and sort.
    pub fn view(&self) -> &ListView<E> {
        &self.view
    }

    /// Mutable access for search and header clicks.
    pub fn view_mut(&mut self) -> &mut ListView<E> {
        &mut self.view
    }

    /// Inline error from the last failed operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Listed entity with `id`.
    pub fn find(&self, id: i64) -> Option<&E> {
        self.view.entities().iter().find(|entity| entity.id() == id)
    }

    /// Refetch the list. On failure the current rows stay and the fetch
    /// error is shown.
    pub async fn refresh(&mut self) -> bool {
        match E::fetch(self.api.as_ref()).await {
            Ok(entities) => {
                self.view.replace(entities);
                self.error = None;
                true
            }
            Err(error) => {
                warn!(%error, "failed to fetch {} list", E::NOUN);
                self.error = Some(E::FETCH_ERROR.to_string());
                false
            }
        }
    }

    /// Delete the listed entity with `id` once `confirm` agrees.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the id is not listed or the request fails.
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Result<Outcome, FlowError> {
        let entity = self.listed(id)?;

        if !confirm.confirm(&entity.delete_prompt()) {
            return Ok(Outcome::Cancelled);
        }

        if let Err(error) = E::remove(self.api.as_ref(), id).await {
            return Err(self.fail(error.into()));
        }

        info!(id, "deleted {}", E::NOUN);

        self.view.remove(&entity);
        self.refresh().await;

        Ok(Outcome::Completed)
    }

    /// Edit form prefilled from the listed entity with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotListed`] when the id is not listed.
    pub fn edit_form(&self, id: i64) -> Result<E::Form, FlowError> {
        self.find(id)
            .map(<E::Form>::from)
            .ok_or(FlowError::NotListed { entity: E::NOUN, id })
    }

    /// Submit `form` as the full replacement of the entity with `id`.
    ///
    /// The form is cleared before the request is sent.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the id is not listed, the form is invalid
    /// or the request fails.
    pub async fn submit_edit(&mut self, id: i64, form: &mut E::Form) -> Result<Outcome, FlowError> {
        let original = self.listed(id)?;

        let edited = match E::from_form(form, &original) {
            Ok(edited) => edited,
            Err(error) => return Err(self.fail(error.into())),
        };

        *form = E::Form::default();

        if let Err(error) = E::replace(self.api.as_ref(), id, &edited).await {
            return Err(self.fail(error.into()));
        }

        info!(id, "updated {}", E::NOUN);

        self.view.patch(&original, &edited);
        self.refresh().await;

        Ok(Outcome::Completed)
    }

    fn listed(&mut self, id: i64) -> Result<E, FlowError> {
        match self.find(id).cloned() {
            Some(entity) => Ok(entity),
            None => Err(self.fail(FlowError::NotListed { entity: E::NOUN, id })),
        }
    }

    fn fail(&mut self, error: FlowError) -> FlowError {
        self.error = Some(error.to_string());
        error
    }
}
