//! User roles.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users.sql`.

text_enum! {
    /// Role carried in the access token and used by [`crate::access`].
    pub enum Role: "role" {
        Admin => "admin",
        Employee => "employee",
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Employee
    }
}
