//! In-memory store doubles for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assetdesk_core::asset::AssetStatus;
use assetdesk_core::ticket::{TicketSeverity, TicketStatus};
use assetdesk_core::types::DbId;
use assetdesk_db::models::asset::{Asset, AssetFilter, NewAsset, UpdateAsset};
use assetdesk_db::models::location::{CreateLocation, Location, UpdateLocation};
use assetdesk_db::models::ticket::{NewTicket, Ticket, TicketFilter, UpdateTicket};
use assetdesk_db::models::user::{NewUser, User, UserChanges};
use assetdesk_db::store::{AssetStore, LocationStore, Page, TicketStore, UserStore};
use async_trait::async_trait;
use chrono::Utc;

/// Sort newest first, then slice out one page.
fn paginate<T: Clone>(
    mut rows: Vec<T>,
    created: impl Fn(&T) -> chrono::DateTime<Utc>,
    limit: i64,
    offset: i64,
) -> Page<T> {
    rows.sort_by_key(|r| std::cmp::Reverse(created(r)));
    let total = rows.len() as i64;
    let page = rows
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    (page, total)
}

fn contains_ci(haystack: &str, needle: &Option<String>) -> bool {
    needle
        .as_ref()
        .map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryAssetStore {
    rows: Mutex<HashMap<DbId, Asset>>,
}

impl MemoryAssetStore {
    fn modify(&self, id: DbId, f: impl FnOnce(&mut Asset) -> bool) -> Option<Asset> {
        let mut rows = self.rows.lock().unwrap();
        let asset = rows.get_mut(&id)?;
        if !f(asset) {
            return None;
        }
        asset.updated_at = Utc::now();
        Some(asset.clone())
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn create(&self, input: &NewAsset) -> Result<Asset, sqlx::Error> {
        let now = Utc::now();
        let asset = Asset {
            id: DbId::new_v4(),
            unique_id: input.unique_id.clone(),
            name: input.name.clone(),
            comment: input.comment.clone(),
            detail: input.detail.clone(),
            qty: input.qty,
            brand: input.brand.clone(),
            asset_type: input.asset_type,
            status: input.status,
            category: input.category.clone(),
            location_id: input.location_id,
            location_label: input.location_label.clone(),
            location: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(asset.id, asset.clone());
        Ok(asset)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<Asset>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.unique_id == unique_id)
            .cloned())
    }

    async fn update(&self, id: DbId, input: &UpdateAsset) -> Result<Option<Asset>, sqlx::Error> {
        Ok(self.modify(id, |a| {
            if let Some(v) = &input.name {
                a.name = v.clone();
            }
            if let Some(v) = &input.comment {
                a.comment = v.clone();
            }
            if let Some(v) = &input.detail {
                a.detail = v.clone();
            }
            if let Some(v) = input.qty {
                a.qty = v;
            }
            if let Some(v) = &input.brand {
                a.brand = v.clone();
            }
            if let Some(v) = input.asset_type {
                a.asset_type = v;
            }
            if let Some(v) = input.status {
                a.status = v;
            }
            if let Some(v) = &input.category {
                a.category = v.clone();
            }
            if let Some(v) = input.location_id {
                a.location_id = v;
            }
            if let Some(v) = &input.location_label {
                a.location_label = v.clone();
            }
            true
        }))
    }

    async fn set_status(
        &self,
        id: DbId,
        status: AssetStatus,
    ) -> Result<Option<Asset>, sqlx::Error> {
        Ok(self.modify(id, |a| {
            a.status = status;
            true
        }))
    }

    async fn adjust_quantity(&self, id: DbId, delta: i32) -> Result<Option<Asset>, sqlx::Error> {
        Ok(self.modify(id, |a| match a.qty.checked_add(delta) {
            Some(qty) if qty >= 0 => {
                a.qty = qty;
                true
            }
            _ => false,
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Asset>, sqlx::Error> {
        let rows: Vec<Asset> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| filter.asset_type.map_or(true, |t| a.asset_type == t))
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| contains_ci(&a.category, &filter.category))
            .filter(|a| contains_ci(&a.brand, &filter.brand))
            .cloned()
            .collect();
        Ok(paginate(rows, |a| a.created_at, limit, offset))
    }
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryTicketStore {
    rows: Mutex<HashMap<DbId, Ticket>>,
}

impl MemoryTicketStore {
    fn matching(&self, pred: impl Fn(&Ticket) -> bool) -> Vec<Ticket> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|t| pred(t))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn create(&self, input: &NewTicket) -> Result<Ticket, sqlx::Error> {
        let now = Utc::now();
        let ticket = Ticket {
            id: DbId::new_v4(),
            asset_id: input.asset_id,
            category: input.category.clone(),
            severity: input.severity,
            duration: input.duration,
            due_date: input.due_date,
            reporter_id: input.reporter_id,
            assigned_to: None,
            comment: input.comment.clone(),
            status: input.status,
            resolution_comment: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let Some(t) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &input.category {
            t.category = v.clone();
        }
        if let Some(v) = &input.comment {
            t.comment = v.clone();
        }
        if let Some(v) = input.status {
            t.status = v;
        }
        if let Some(v) = input.assigned_to {
            t.assigned_to = Some(v);
        }
        if let Some(v) = &input.resolution_comment {
            t.resolution_comment = v.clone();
        }
        t.updated_at = Utc::now();
        Ok(Some(t.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        let rows = self.matching(|t| {
            filter.status.map_or(true, |s| t.status == s)
                && filter.asset_id.map_or(true, |a| t.asset_id == a)
                && filter.severity.map_or(true, |s| t.severity == s)
                && contains_ci(&t.category, &filter.category)
        });
        Ok(paginate(rows, |t| t.created_at, limit, offset))
    }

    async fn list_by_asset(
        &self,
        asset_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        let rows = self.matching(|t| t.asset_id == asset_id);
        Ok(paginate(rows, |t| t.created_at, limit, offset))
    }

    async fn list_by_reporter(
        &self,
        reporter_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        let rows = self.matching(|t| t.reporter_id == reporter_id);
        Ok(paginate(rows, |t| t.created_at, limit, offset))
    }

    async fn count_by_asset(&self, asset_id: DbId) -> Result<i64, sqlx::Error> {
        Ok(self.matching(|t| t.asset_id == asset_id).len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryLocationStore {
    rows: Mutex<HashMap<DbId, Location>>,
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn create(&self, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let now = Utc::now();
        let location = Location {
            id: DbId::new_v4(),
            name: input.name.clone(),
            area: input.area.clone(),
            description: input.description.clone(),
            capacity: input.capacity,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(location.id, location.clone());
        Ok(location)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|l| l.name == name)
            .cloned())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let Some(l) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            l.name = v.clone();
        }
        if let Some(v) = &input.area {
            l.area = v.clone();
        }
        if let Some(v) = &input.description {
            l.description = v.clone();
        }
        if let Some(v) = input.capacity {
            l.capacity = v;
        }
        l.updated_at = Utc::now();
        Ok(Some(l.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Page<Location>, sqlx::Error> {
        let rows: Vec<Location> = self.rows.lock().unwrap().values().cloned().collect();
        Ok(paginate(rows, |l| l.created_at, limit, offset))
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<HashMap<DbId, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, input: &NewUser) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        let user = User {
            id: DbId::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update(&self, id: DbId, input: &UserChanges) -> Result<Option<User>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let Some(u) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            u.name = v.clone();
        }
        if let Some(v) = &input.email {
            u.email = v.clone();
        }
        if let Some(v) = &input.password_hash {
            u.password_hash = v.clone();
        }
        if let Some(v) = input.role {
            u.role = v;
        }
        u.updated_at = Utc::now();
        Ok(Some(u.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Page<User>, sqlx::Error> {
        let rows: Vec<User> = self.rows.lock().unwrap().values().cloned().collect();
        Ok(paginate(rows, |u| u.created_at, limit, offset))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// One of each store, shared between the services under test.
#[derive(Clone)]
pub struct Stores {
    pub assets: Arc<MemoryAssetStore>,
    pub tickets: Arc<MemoryTicketStore>,
    pub locations: Arc<MemoryLocationStore>,
    pub users: Arc<MemoryUserStore>,
}

pub fn stores() -> Stores {
    Stores {
        assets: Arc::default(),
        tickets: Arc::default(),
        locations: Arc::default(),
        users: Arc::default(),
    }
}

pub async fn insert_asset(stores: &Stores, unique_id: &str, qty: i32) -> DbId {
    let input = NewAsset {
        unique_id: unique_id.to_string(),
        name: format!("Asset {unique_id}"),
        comment: String::new(),
        detail: String::new(),
        qty,
        brand: String::new(),
        asset_type: Default::default(),
        status: Default::default(),
        category: String::new(),
        location_id: None,
        location_label: String::new(),
    };
    stores.assets.create(&input).await.unwrap().id
}

/// Insert a user with an unusable password hash.
pub async fn insert_user(stores: &Stores, email: &str) -> DbId {
    let input = NewUser {
        name: email.to_string(),
        email: email.to_string(),
        password_hash: "unused".to_string(),
        role: Default::default(),
    };
    stores.users.create(&input).await.unwrap().id
}

pub async fn insert_ticket(stores: &Stores, asset_id: DbId, reporter_id: DbId) -> DbId {
    let input = NewTicket {
        asset_id,
        category: "hardware".to_string(),
        severity: TicketSeverity::Low,
        duration: TicketSeverity::Low.duration_hours(),
        due_date: Utc::now(),
        reporter_id,
        comment: String::new(),
        status: TicketStatus::Open,
    };
    stores.tickets.create(&input).await.unwrap().id
}
