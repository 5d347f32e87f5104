use thiserror::Error;
use uuid::Uuid;

use crate::types::{Administrator, Appointment, Client, Notification, Slot};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("record not found")]
    NotFound,
}

/// Create/read/update/delete per entity, implemented by the in-memory store
/// and the PostgreSQL store. The services mint identifiers and enforce all
/// business rules; a backend only persists what it is handed.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn insert_client(&self, client: &Client) -> Result<(), StorageError>;
    fn client(&self, id: Uuid) -> Result<Option<Client>, StorageError>;

    fn insert_admin(&self, admin: &Administrator) -> Result<(), StorageError>;
    fn admin(&self, id: Uuid) -> Result<Option<Administrator>, StorageError>;

    fn insert_slot(&self, slot: &Slot) -> Result<(), StorageError>;
    fn slot(&self, id: Uuid) -> Result<Option<Slot>, StorageError>;
    fn slots(&self) -> Result<Vec<Slot>, StorageError>;
    fn update_slot(&self, slot: &Slot) -> Result<(), StorageError>;
    fn remove_slot(&self, id: Uuid) -> Result<(), StorageError>;

    fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StorageError>;
    fn appointment(&self, id: Uuid) -> Result<Option<Appointment>, StorageError>;
    fn appointments(&self) -> Result<Vec<Appointment>, StorageError>;
    fn update_appointment(&self, appointment: &Appointment) -> Result<(), StorageError>;
    /// Removes the given appointments, returning how many actually existed.
    fn remove_appointments(&self, ids: &[Uuid]) -> Result<usize, StorageError>;

    fn insert_notification(&self, notification: &Notification) -> Result<(), StorageError>;
    fn notification(&self, id: Uuid) -> Result<Option<Notification>, StorageError>;
    fn notifications(&self) -> Result<Vec<Notification>, StorageError>;
    fn update_notification(&self, notification: &Notification) -> Result<(), StorageError>;
    fn remove_notifications(&self, ids: &[Uuid]) -> Result<usize, StorageError>;
}
