pub mod assets;
pub mod auth;
pub mod health;
pub mod locations;
pub mod tickets;
pub mod users;
