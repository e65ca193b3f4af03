//! Domain services sitting between handlers and the stores.
//!
//! Each service receives its stores as `Arc<dyn ...Store>` through its
//! constructor; [`AppState::new`](crate::state::AppState::new) wires the
//! PostgreSQL repositories, tests wire the in-memory doubles.

pub mod asset;
pub mod location;
pub mod ticket;
pub mod user;

#[cfg(test)]
pub(crate) mod memory;

pub use asset::AssetService;
pub use location::LocationService;
pub use ticket::TicketService;
pub use user::UserService;
