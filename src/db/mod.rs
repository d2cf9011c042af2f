pub mod entities;
pub mod enums;
pub mod record;
pub mod repositories;

pub use entities::*;
pub use enums::*;
pub use record::Record;
