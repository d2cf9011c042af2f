use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::auth::Permission;
use crate::db::{
    enums::{EntityKind, PermissionAction, CATALOG_NAMESPACE},
    record::Record,
    repositories::RecordRepository,
};
use crate::error::{AppError, Result};
use crate::forms::{AlbumForm, ArtistForm, FormConstructor, FormData, ModelForm, SongForm};

/// Everything the dispatcher needs to operate on one entity type
#[derive(Clone)]
pub struct EntityDescriptor {
    pub namespace: &'static str,
    pub kind: EntityKind,
    form: FormConstructor,
}

impl EntityDescriptor {
    pub fn new(namespace: &'static str, kind: EntityKind, form: FormConstructor) -> Self {
        Self {
            namespace,
            kind,
            form,
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn verbose_name(&self) -> &'static str {
        self.kind.verbose_name()
    }

    pub fn permission(&self, action: PermissionAction) -> Permission {
        Permission::new(self.namespace, action, self.kind)
    }

    pub fn form(&self, instance: Option<Record>, data: Option<FormData>) -> Box<dyn ModelForm> {
        (self.form)(instance, data)
    }

    pub fn records(&self, db: &DatabaseConnection) -> RecordRepository {
        RecordRepository::new(db.clone())
    }
}

impl std::fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("namespace", &self.namespace)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Entity types addressable by `(namespace, model name)`
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<&'static str, HashMap<&'static str, EntityDescriptor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding artists, albums and songs
    pub fn with_catalog() -> Self {
        let mut registry = Self::new();
        registry.register(EntityDescriptor::new(
            CATALOG_NAMESPACE,
            EntityKind::Artist,
            ArtistForm::boxed,
        ));
        registry.register(EntityDescriptor::new(
            CATALOG_NAMESPACE,
            EntityKind::Album,
            AlbumForm::boxed,
        ));
        registry.register(EntityDescriptor::new(
            CATALOG_NAMESPACE,
            EntityKind::Song,
            SongForm::boxed,
        ));
        registry
    }

    /// Add or replace the descriptor of an entity type
    pub fn register(&mut self, descriptor: EntityDescriptor) {
        self.entries
            .entry(descriptor.namespace)
            .or_default()
            .insert(descriptor.model_name(), descriptor);
    }

    pub fn resolve(&self, namespace: &str, model_name: &str) -> Result<&EntityDescriptor> {
        self.entries
            .get(namespace)
            .and_then(|models| models.get(model_name))
            .ok_or_else(|| {
                AppError::not_found(format!("No model registered as {}.{}", namespace, model_name))
            })
    }

    pub fn descriptor_for(&self, kind: EntityKind) -> Option<&EntityDescriptor> {
        self.iter().find(|d| d.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entries.values().flat_map(|models| models.values())
    }
}
