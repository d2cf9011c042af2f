use std::fmt;

use crate::db::enums::{EntityKind, PermissionAction, CATALOG_NAMESPACE};

/// A permission on one entity type, e.g. `backend.add_song`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub namespace: &'static str,
    pub action: PermissionAction,
    pub kind: EntityKind,
}

impl Permission {
    pub fn new(namespace: &'static str, action: PermissionAction, kind: EntityKind) -> Self {
        Self {
            namespace,
            action,
            kind,
        }
    }

    /// Permission on a catalog entity
    pub fn catalog(action: PermissionAction, kind: EntityKind) -> Self {
        Self::new(CATALOG_NAMESPACE, action, kind)
    }

    /// Canonical `<namespace>.<action>_<model>` string
    pub fn codename(&self) -> String {
        self.to_string()
    }

    /// Parse a stored codename back into a catalog permission; `None` when
    /// it names no known model or action
    pub fn parse(codename: &str) -> Option<Self> {
        let (namespace, rest) = codename.split_once('.')?;
        if namespace != CATALOG_NAMESPACE {
            return None;
        }
        let (action, model) = rest.split_once('_')?;
        Some(Self::catalog(
            PermissionAction::from_str(action)?,
            EntityKind::from_str(model)?,
        ))
    }

    /// All add/change/delete permissions of the catalog
    pub fn all_catalog() -> Vec<Self> {
        EntityKind::ALL
            .iter()
            .flat_map(|kind| {
                [
                    PermissionAction::Add,
                    PermissionAction::Change,
                    PermissionAction::Delete,
                ]
                .into_iter()
                .map(move |action| Self::catalog(action, *kind))
            })
            .collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}_{}",
            self.namespace,
            self.action.as_str(),
            self.kind.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codename_format() {
        let permission = Permission::catalog(PermissionAction::Add, EntityKind::Song);
        assert_eq!(permission.codename(), "backend.add_song");

        let permission = Permission::catalog(PermissionAction::Change, EntityKind::Artist);
        assert_eq!(permission.codename(), "backend.change_artist");

        let permission = Permission::catalog(PermissionAction::Delete, EntityKind::Album);
        assert_eq!(permission.codename(), "backend.delete_album");
    }

    #[test]
    fn test_parse_round_trip() {
        for permission in Permission::all_catalog() {
            assert_eq!(Permission::parse(&permission.codename()), Some(permission));
        }
        assert_eq!(Permission::all_catalog().len(), 9);
    }

    #[test]
    fn test_parse_rejects_unknown_codenames() {
        assert_eq!(Permission::parse("frontend.add_song"), None);
        assert_eq!(Permission::parse("backend.view_song"), None);
        assert_eq!(Permission::parse("backend.add_track"), None);
        assert_eq!(Permission::parse("backend"), None);
        assert_eq!(Permission::parse(""), None);
    }
}
