use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::backend::{BookingBackend, StorageError};
use crate::local_store::LocalStore;
use crate::types::{Administrator, Appointment, Client, Notification, Slot};

/// Backend wrapper for HTTP tests: data lives in a real in-memory store,
/// while every trait call bumps a counter so tests can assert whether the
/// backend was reached at all.
#[derive(Default)]
pub struct MockBackendInner {
    pub calls_to_insert_client: AtomicU64,
    pub calls_to_insert_admin: AtomicU64,
    pub calls_to_insert_slot: AtomicU64,
    pub calls_to_update_slot: AtomicU64,
    pub calls_to_remove_slot: AtomicU64,
    pub calls_to_slots: AtomicU64,
    pub calls_to_insert_appointment: AtomicU64,
    pub calls_to_update_appointment: AtomicU64,
    pub calls_to_remove_appointments: AtomicU64,
    pub calls_to_appointments: AtomicU64,
    pub calls_to_insert_notification: AtomicU64,
    pub calls_to_update_notification: AtomicU64,
    pub calls_to_remove_notifications: AtomicU64,
    pub calls_to_notifications: AtomicU64,
    pub store: LocalStore,
}

#[derive(Clone, Default)]
pub struct MockBackend(pub Arc<MockBackendInner>);

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn count(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

impl BookingBackend for MockBackend {
    fn insert_client(&self, client: &Client) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_insert_client);
        self.0.store.insert_client(client)
    }

    fn client(&self, id: Uuid) -> Result<Option<Client>, StorageError> {
        self.0.store.client(id)
    }

    fn insert_admin(&self, admin: &Administrator) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_insert_admin);
        self.0.store.insert_admin(admin)
    }

    fn admin(&self, id: Uuid) -> Result<Option<Administrator>, StorageError> {
        self.0.store.admin(id)
    }

    fn insert_slot(&self, slot: &Slot) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_insert_slot);
        self.0.store.insert_slot(slot)
    }

    fn slot(&self, id: Uuid) -> Result<Option<Slot>, StorageError> {
        self.0.store.slot(id)
    }

    fn slots(&self) -> Result<Vec<Slot>, StorageError> {
        Self::count(&self.0.calls_to_slots);
        self.0.store.slots()
    }

    fn update_slot(&self, slot: &Slot) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_update_slot);
        self.0.store.update_slot(slot)
    }

    fn remove_slot(&self, id: Uuid) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_remove_slot);
        self.0.store.remove_slot(id)
    }

    fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_insert_appointment);
        self.0.store.insert_appointment(appointment)
    }

    fn appointment(&self, id: Uuid) -> Result<Option<Appointment>, StorageError> {
        self.0.store.appointment(id)
    }

    fn appointments(&self) -> Result<Vec<Appointment>, StorageError> {
        Self::count(&self.0.calls_to_appointments);
        self.0.store.appointments()
    }

    fn update_appointment(&self, appointment: &Appointment) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_update_appointment);
        self.0.store.update_appointment(appointment)
    }

    fn remove_appointments(&self, ids: &[Uuid]) -> Result<usize, StorageError> {
        Self::count(&self.0.calls_to_remove_appointments);
        self.0.store.remove_appointments(ids)
    }

    fn insert_notification(&self, notification: &Notification) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_insert_notification);
        self.0.store.insert_notification(notification)
    }

    fn notification(&self, id: Uuid) -> Result<Option<Notification>, StorageError> {
        self.0.store.notification(id)
    }

    fn notifications(&self) -> Result<Vec<Notification>, StorageError> {
        Self::count(&self.0.calls_to_notifications);
        self.0.store.notifications()
    }

    fn update_notification(&self, notification: &Notification) -> Result<(), StorageError> {
        Self::count(&self.0.calls_to_update_notification);
        self.0.store.update_notification(notification)
    }

    fn remove_notifications(&self, ids: &[Uuid]) -> Result<usize, StorageError> {
        Self::count(&self.0.calls_to_remove_notifications);
        self.0.store.remove_notifications(ids)
    }
}
