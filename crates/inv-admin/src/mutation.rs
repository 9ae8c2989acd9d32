//! The submit and delete cycle shared by the entity pages.

use inv_client::{ClientError, InventoryApi};
use inv_model::{FieldError, Id, Resource, ValidationErrorBody};

use crate::{
    error::{AdminError, ValidationFailure},
    form::{Draft, Form, FormMode},
    session::PageSession,
};

/// Outcome of a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created(Id),
    Updated(Id),
}

impl Saved {
    pub fn id(self) -> Id {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingDelete(Option<Id>);

impl PendingDelete {
    pub fn arm(&mut self, id: Id) {
        self.0 = Some(id);
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }

    pub fn target(&self) -> Option<Id> {
        self.0
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Validate the form and send it as a create or an update, depending on its mode.
///
/// Client-side failures never reach the network. On success the form is
/// closed and a success message names the mode the form was in when it was
/// submitted. The caller is responsible for reloading its collection.
pub async fn submit<A, D>(
    session: &mut PageSession<A>,
    form: &mut Form<D>,
) -> Result<Saved, AdminError>
where
    A: InventoryApi,
    D: Draft,
{
    let label = <D::Entity as Resource>::LABEL;
    let mode = form.mode();
    form.annotations_mut().clear();

    let input = match form.draft().validate(mode) {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(label, fields = errors.len(), "Form rejected before sending");
            return Err(annotate(form, errors));
        }
    };

    let result = match mode {
        FormMode::Create => session.api().create::<D::Entity>(&input).await,
        FormMode::Edit(id) => session.api().update::<D::Entity>(id, &input).await,
    };

    match result {
        Ok(entity) => {
            form.close();
            let (saved, verb) = match mode {
                FormMode::Create => (Saved::Created(entity.id()), "created"),
                FormMode::Edit(id) => (Saved::Updated(id), "updated"),
            };
            tracing::info!(label, id = saved.id(), "{} {verb}", capitalized(label));
            session.success(format!("{} {verb} successfully!", capitalized(label)));
            Ok(saved)
        }
        Err(ClientError::Validation(body)) => Err(reject(session, form, body)),
        Err(e) => {
            tracing::error!(label, "Failed to save {label}: {e}");
            session.error(format!("Failed to save {label}: {e}"));
            Err(AdminError::Mutation(e))
        }
    }
}

fn annotate<D: Draft>(form: &mut Form<D>, errors: Vec<FieldError>) -> AdminError {
    form.annotations_mut().apply(&errors);
    AdminError::Validation(ValidationFailure::from_fields(errors))
}

/// Show a backend `400`: next to the fields when it names any, in the banner otherwise.
fn reject<A, D>(session: &mut PageSession<A>, form: &mut Form<D>, body: ValidationErrorBody) -> AdminError
where
    A: InventoryApi,
    D: Draft,
{
    tracing::warn!(
        label = <D::Entity as Resource>::LABEL,
        "Backend rejected input: {}",
        body.summary()
    );
    if body.field_errors.is_empty() {
        session.error(body.message.clone().unwrap_or_else(|| "Invalid data".to_string()));
    } else {
        form.annotations_mut().apply(&body.field_errors);
    }
    AdminError::Validation(ValidationFailure {
        message: body.message,
        fields: body.field_errors,
    })
}

/// Send a delete for record `id` of collection `R`.
pub async fn delete<A, R>(session: &mut PageSession<A>, id: Id) -> Result<(), AdminError>
where
    A: InventoryApi,
    R: Resource,
{
    match session.api().delete::<R>(id).await {
        Ok(()) => {
            tracing::info!(label = R::LABEL, id, "{} deleted", capitalized(R::LABEL));
            session.success(format!("{} deleted successfully!", capitalized(R::LABEL)));
            Ok(())
        }
        Err(e) => {
            tracing::error!(label = R::LABEL, id, "Failed to delete {}: {e}", R::LABEL);
            session.error(format!("Failed to delete {}: {e}", R::LABEL));
            Err(AdminError::Mutation(e))
        }
    }
}
