use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::registry::{EntityDescriptor, Registry};
use crate::auth::CurrentUser;
use crate::db::{enums::PermissionAction, record::Record};
use crate::error::{AppError, Result};
use crate::forms::{FormData, FormView};

/// Result of an add-or-change request
#[derive(Debug)]
pub enum EditOutcome {
    /// Submitted data was valid and the record was written
    Saved { record: Record, created: bool },
    /// Form for display: unbound, or bound with field errors
    Form {
        form: FormView,
        instance: Option<Record>,
    },
}

/// `The Song "Intro" was added successfully.`
pub fn success_message(record: &Record, created: bool) -> String {
    format!(
        "The {} \"{}\" was {} successfully.",
        record.kind().verbose_name(),
        record,
        if created { "added" } else { "changed" }
    )
}

/// Malformed identifiers are indistinguishable from missing records
fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::not_found(format!("No record with id {}", raw)))
}

/// Edits, deletes and clones records of any registered entity type
pub struct CrudDispatcher<'a> {
    db: &'a DatabaseConnection,
    registry: &'a Registry,
}

impl<'a> CrudDispatcher<'a> {
    pub fn new(db: &'a DatabaseConnection, registry: &'a Registry) -> Self {
        Self { db, registry }
    }

    async fn load(&self, descriptor: &EntityDescriptor, raw_id: &str) -> Result<Record> {
        let id = parse_id(raw_id)?;
        tracing::debug!(model = descriptor.model_name(), %id, "Looking up record");
        descriptor
            .records(self.db)
            .find(descriptor.kind, id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("{} {} not found", descriptor.verbose_name(), id))
            })
    }

    /// Resolve the target of an edit and check the caller may perform it
    async fn authorize(
        &self,
        user: &CurrentUser,
        namespace: &str,
        model_name: &str,
        id: Option<&str>,
    ) -> Result<(&'a EntityDescriptor, Option<Record>)> {
        let descriptor = self.registry.resolve(namespace, model_name)?;

        let (instance, action) = match id {
            Some(raw_id) => (Some(self.load(descriptor, raw_id).await?), PermissionAction::Change),
            None => (None, PermissionAction::Add),
        };

        user.require(&descriptor.permission(action))?;
        Ok((descriptor, instance))
    }

    /// Fail exactly as `edit` would before looking at any submitted data
    pub async fn authorize_edit(
        &self,
        user: &CurrentUser,
        namespace: &str,
        model_name: &str,
        id: Option<&str>,
    ) -> Result<()> {
        self.authorize(user, namespace, model_name, id).await.map(|_| ())
    }

    /// Add a record (no `id`) or change an existing one
    ///
    /// Without `data` the form is returned for display and nothing is
    /// written. With `data`, a valid submission is saved once; an invalid
    /// one comes back with its field errors.
    pub async fn edit(
        &self,
        user: &CurrentUser,
        namespace: &str,
        model_name: &str,
        id: Option<&str>,
        data: Option<FormData>,
    ) -> Result<EditOutcome> {
        let (descriptor, instance) = self.authorize(user, namespace, model_name, id).await?;

        let mut form = descriptor.form(instance.clone(), data);
        if form.is_bound() {
            if form.is_valid(self.db).await? {
                let record = form.save(self.db).await?;
                tracing::info!(
                    model = descriptor.model_name(),
                    id = %record.id(),
                    user = user.username().unwrap_or_default(),
                    created = instance.is_none(),
                    "Record saved"
                );
                return Ok(EditOutcome::Saved {
                    record,
                    created: instance.is_none(),
                });
            }
            tracing::debug!(
                model = descriptor.model_name(),
                errors = ?form.errors(),
                "Submission rejected"
            );
        }

        Ok(EditOutcome::Form {
            form: form.view(self.db).await?,
            instance,
        })
    }

    /// Permanently remove a record and its dependents; returns its id
    pub async fn delete(
        &self,
        user: &CurrentUser,
        namespace: &str,
        model_name: &str,
        id: &str,
    ) -> Result<Uuid> {
        let descriptor = self.registry.resolve(namespace, model_name)?;
        user.require(&descriptor.permission(PermissionAction::Delete))?;

        let record = self.load(descriptor, id).await?;
        descriptor.records(self.db).delete(&record).await?;

        tracing::info!(
            model = descriptor.model_name(),
            id = %record.id(),
            user = user.username().unwrap_or_default(),
            "Record deleted"
        );
        Ok(record.id())
    }

    /// Copy a record under a fresh id with a bumped revision marker; returns
    /// the new id
    ///
    /// Cloning creates a record, so it needs the add permission.
    pub async fn clone_object(
        &self,
        user: &CurrentUser,
        namespace: &str,
        model_name: &str,
        id: &str,
    ) -> Result<Uuid> {
        let descriptor = self.registry.resolve(namespace, model_name)?;
        user.require(&descriptor.permission(PermissionAction::Add))?;

        let source = self.load(descriptor, id).await?;
        let copy = descriptor.records(self.db).duplicate(&source).await?;

        tracing::info!(
            model = descriptor.model_name(),
            source = %source.id(),
            id = %copy.id(),
            user = user.username().unwrap_or_default(),
            "Record cloned"
        );
        Ok(copy.id())
    }
}
