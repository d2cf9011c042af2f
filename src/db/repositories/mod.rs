use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::auth::{token, AuthenticatedUser, CurrentUser, Permission};
use crate::db::entities::{album, artist, song, user, user_permission};
use crate::db::enums::EntityKind;
use crate::db::record::Record;
use crate::error::Result;
use crate::forms::fields::DESCRIPTION_MAX_LENGTH;
use crate::revision::increment_revision_within;

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Description)
            .all(&self.db)
            .await?)
    }
}

pub struct AlbumRepository {
    db: DatabaseConnection,
}

impl AlbumRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<album::Model>> {
        Ok(album::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_with_artist(
        &self,
        id: Uuid,
    ) -> Result<Option<(album::Model, Option<artist::Model>)>> {
        Ok(album::Entity::find_by_id(id)
            .find_also_related(artist::Entity)
            .one(&self.db)
            .await?)
    }

    pub async fn list(&self) -> Result<Vec<album::Model>> {
        Ok(album::Entity::find()
            .order_by_asc(album::Column::Description)
            .all(&self.db)
            .await?)
    }

    pub async fn list_with_artists(&self) -> Result<Vec<(album::Model, Option<artist::Model>)>> {
        Ok(album::Entity::find()
            .order_by_asc(album::Column::Description)
            .find_also_related(artist::Entity)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_artist(&self, artist_id: Uuid) -> Result<Vec<album::Model>> {
        Ok(album::Entity::find()
            .filter(album::Column::ArtistId.eq(artist_id))
            .order_by_asc(album::Column::Year)
            .order_by_asc(album::Column::Description)
            .all(&self.db)
            .await?)
    }
}

pub struct SongRepository {
    db: DatabaseConnection,
}

impl SongRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<song::Model>> {
        Ok(song::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Songs of one album, ascending by position
    pub async fn find_by_album(&self, album_id: Uuid) -> Result<Vec<song::Model>> {
        Ok(song::Entity::find()
            .filter(song::Column::AlbumId.eq(album_id))
            .order_by_asc(song::Column::Position)
            .order_by_asc(song::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_with_albums(&self) -> Result<Vec<(song::Model, Option<album::Model>)>> {
        Ok(song::Entity::find()
            .order_by_asc(song::Column::Position)
            .order_by_asc(song::Column::Id)
            .find_also_related(album::Entity)
            .all(&self.db)
            .await?)
    }
}

/// Kind-agnostic access to catalog records, used by the CRUD dispatcher
pub struct RecordRepository {
    db: DatabaseConnection,
}

impl RecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, kind: EntityKind, id: Uuid) -> Result<Option<Record>> {
        let record = match kind {
            EntityKind::Artist => artist::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Record::Artist),
            EntityKind::Album => album::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Record::Album),
            EntityKind::Song => song::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Record::Song),
        };
        Ok(record)
    }

    /// Remove a record; dependents go with it through the cascading foreign keys
    pub async fn delete(&self, record: &Record) -> Result<u64> {
        let result = match record {
            Record::Artist(m) => artist::Entity::delete_by_id(m.id).exec(&self.db).await?,
            Record::Album(m) => album::Entity::delete_by_id(m.id).exec(&self.db).await?,
            Record::Song(m) => song::Entity::delete_by_id(m.id).exec(&self.db).await?,
        };
        Ok(result.rows_affected)
    }

    /// Insert a copy of `record` under a fresh id with a bumped revision marker
    ///
    /// The copied description is shortened where needed to stay within the
    /// column limit. Children are not copied. Only reachable through the dispatcher, which
    /// checks the caller's add permission first.
    pub(crate) async fn duplicate(&self, record: &Record) -> Result<Record> {
        let copy = match record {
            Record::Artist(m) => Record::Artist(
                artist::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    description: Set(increment_revision_within(&m.description, DESCRIPTION_MAX_LENGTH)),
                    notes: Set(m.notes.clone()),
                }
                .insert(&self.db)
                .await?,
            ),
            Record::Album(m) => Record::Album(
                album::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    description: Set(increment_revision_within(&m.description, DESCRIPTION_MAX_LENGTH)),
                    artist_id: Set(m.artist_id),
                    year: Set(m.year),
                }
                .insert(&self.db)
                .await?,
            ),
            Record::Song(m) => Record::Song(
                song::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    description: Set(increment_revision_within(&m.description, DESCRIPTION_MAX_LENGTH)),
                    album_id: Set(m.album_id),
                    position: Set(m.position),
                }
                .insert(&self.db)
                .await?,
            ),
        };
        Ok(copy)
    }
}

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a user with the given grants; returns the user and its bearer
    /// token, which is not recoverable afterwards
    pub async fn create_user(
        &self,
        username: &str,
        is_superuser: bool,
        permissions: &[Permission],
    ) -> Result<(user::Model, String)> {
        let token = token::generate_token();

        let txn = self.db.begin().await?;
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            token_hash: Set(token::hash_token(&token)),
            is_superuser: Set(is_superuser),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        for permission in permissions {
            user_permission::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.id),
                codename: Set(permission.codename()),
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        Ok((user, token))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn grant(&self, user_id: Uuid, permission: Permission) -> Result<()> {
        user_permission::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            codename: Set(permission.codename()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    pub async fn set_active(&self, user: user::Model, is_active: bool) -> Result<user::Model> {
        let mut active: user::ActiveModel = user.into();
        active.is_active = Set(is_active);
        Ok(active.update(&self.db).await?)
    }

    /// Resolve a bearer token to the caller; unknown tokens and inactive
    /// users are anonymous
    pub async fn find_identity_by_token(&self, token: &str) -> Result<CurrentUser> {
        let Some(user) = user::Entity::find()
            .filter(user::Column::TokenHash.eq(token::hash_token(token)))
            .one(&self.db)
            .await?
        else {
            tracing::debug!("Unknown bearer token");
            return Ok(CurrentUser::Anonymous);
        };

        if !user.is_active {
            tracing::debug!(username = %user.username, "Inactive user treated as anonymous");
            return Ok(CurrentUser::Anonymous);
        }

        let permissions = user
            .find_related(user_permission::Entity)
            .all(&self.db)
            .await?
            .iter()
            .filter_map(|p| Permission::parse(&p.codename))
            .collect();

        Ok(CurrentUser::Authenticated(AuthenticatedUser {
            id: user.id,
            username: user.username,
            is_superuser: user.is_superuser,
            permissions,
        }))
    }
}
