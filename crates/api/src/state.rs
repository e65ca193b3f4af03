use std::sync::Arc;

use assetdesk_db::repositories::{AssetRepo, LocationRepo, TicketRepo, UserRepo};
use assetdesk_db::DbPool;

use crate::config::ServerConfig;
use crate::services::{AssetService, LocationService, TicketService, UserService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub assets: AssetService,
    pub tickets: TicketService,
    pub locations: LocationService,
    pub users: UserService,
}

impl AppState {
    /// Wire every service to the PostgreSQL repositories behind `pool`.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let assets = Arc::new(AssetRepo::new(pool.clone()));
        let tickets = Arc::new(TicketRepo::new(pool.clone()));
        let locations = Arc::new(LocationRepo::new(pool.clone()));
        let users = Arc::new(UserRepo::new(pool.clone()));

        Self {
            assets: AssetService::new(assets.clone(), tickets.clone(), locations.clone()),
            tickets: TicketService::new(tickets, assets, users.clone()),
            locations: LocationService::new(locations),
            users: UserService::new(users, config.jwt.clone()),
            config: Arc::new(config),
            pool,
        }
    }
}
