pub mod error;
pub mod memory;
pub mod query;
pub mod traits;

pub use error::RemoteError;
pub use memory::MemoryCollections;
pub use query::{Direction, Filter, Query};
pub use traits::{Collections, Snapshot, Subscription};
