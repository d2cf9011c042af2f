//! Generic add/change/delete/clone over every registered entity type

pub mod dispatcher;
pub mod registry;
pub mod urls;

pub use dispatcher::{CrudDispatcher, EditOutcome};
pub use registry::{EntityDescriptor, Registry};
