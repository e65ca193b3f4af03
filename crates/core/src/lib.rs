//! Domain rules for the asset inventory and maintenance ticket backend.
//!
//! Everything in this crate is pure: enumerations, defaulting rules,
//! quantity arithmetic, the severity-to-deadline table and the role
//! access policy. Persistence lives in `assetdesk-db`, transport in
//! `assetdesk-api`.

#[macro_use]
mod text_enum;

pub mod access;
pub mod asset;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod ticket;
pub mod types;
