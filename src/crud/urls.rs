//! Canonical URLs of the generic object routes

use uuid::Uuid;

use super::registry::EntityDescriptor;
use crate::db::record::Record;

pub fn add_url(descriptor: &EntityDescriptor) -> String {
    format!("/objects/{}/{}/add", descriptor.namespace, descriptor.model_name())
}

pub fn change_url(descriptor: &EntityDescriptor, id: Uuid) -> String {
    format!(
        "/objects/{}/{}/{}/change",
        descriptor.namespace,
        descriptor.model_name(),
        id
    )
}

pub fn delete_url(descriptor: &EntityDescriptor, id: Uuid) -> String {
    format!(
        "/objects/{}/{}/{}/delete",
        descriptor.namespace,
        descriptor.model_name(),
        id
    )
}

pub fn clone_url(descriptor: &EntityDescriptor, id: Uuid) -> String {
    format!(
        "/objects/{}/{}/{}/clone",
        descriptor.namespace,
        descriptor.model_name(),
        id
    )
}

/// Change URL of an existing record
pub fn change_object_url(descriptor: &EntityDescriptor, record: &Record) -> String {
    change_url(descriptor, record.id())
}
