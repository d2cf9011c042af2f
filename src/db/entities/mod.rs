pub mod artist;
pub mod album;
pub mod song;
pub mod user;
pub mod user_permission;

pub use artist::Entity as Artist;
pub use album::Entity as Album;
pub use song::Entity as Song;
pub use user::Entity as User;
pub use user_permission::Entity as UserPermission;
