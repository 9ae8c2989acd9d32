//! Create/edit form state shared by every entity page.

use std::collections::BTreeMap;

use inv_model::{FieldError, Id, Resource};

/// Whether a submit creates a new record or updates an existing one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(Id),
}

impl FormMode {
    pub fn is_create(self) -> bool {
        matches!(self, Self::Create)
    }

    /// Record being edited
    pub fn target(self) -> Option<Id> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }
}

/// Raw form input for one entity, validated into its write payload.
pub trait Draft: Default + Clone + Send {
    type Entity: Resource;

    /// Prefill from an existing record. Write-only fields start empty.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Check the input against the entity's rules, yielding at most one
    /// error per field.
    fn validate(
        &self,
        mode: FormMode,
    ) -> Result<<Self::Entity as Resource>::Input, Vec<FieldError>>;
}

/// Per-field error messages currently shown next to form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAnnotations(BTreeMap<String, String>);

impl FieldAnnotations {
    /// Annotate each named field, replacing any message it already had.
    pub fn apply(&mut self, errors: &[FieldError]) {
        for error in errors {
            self.0.insert(error.field.clone(), error.message.clone());
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The modal form of an entity page
#[derive(Debug, Clone, Default)]
pub struct Form<D> {
    mode: FormMode,
    draft: D,
    annotations: FieldAnnotations,
    open: bool,
}

impl<D: Draft> Form<D> {
    /// Open an empty form in create mode.
    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.draft = D::default();
        self.annotations.clear();
        self.open = true;
    }

    /// Open the form prefilled from `entity`, in edit mode.
    pub fn open_edit(&mut self, entity: &D::Entity) {
        self.mode = FormMode::Edit(entity.id());
        self.draft = D::from_entity(entity);
        self.annotations.clear();
        self.open = true;
    }

    /// Close the form. Mode goes back to create so a stale edit target can't leak.
    pub fn close(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn annotations(&self) -> &FieldAnnotations {
        &self.annotations
    }

    pub(crate) fn annotations_mut(&mut self) -> &mut FieldAnnotations {
        &mut self.annotations
    }
}
