//! PostgreSQL implementations of the store traits.
//!
//! Each repository wraps a cloned `PgPool` and uses runtime `query_as`
//! with a shared `COLUMNS` constant per table.

pub mod asset_repo;
pub mod location_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use asset_repo::AssetRepo;
pub use location_repo::LocationRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
