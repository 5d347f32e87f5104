use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::backend::{BookingBackend, StorageError};
use crate::types::{Administrator, Appointment, Client, Notification, Slot};

/// In-memory backend. Cloning shares the underlying maps, so every service
/// holding a clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    clients: Arc<Mutex<HashMap<Uuid, Client>>>,
    admins: Arc<Mutex<HashMap<Uuid, Administrator>>>,
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
    appointments: Arc<Mutex<HashMap<Uuid, Appointment>>>,
    notifications: Arc<Mutex<HashMap<Uuid, Notification>>>,
}

impl BookingBackend for LocalStore {
    fn insert_client(&self, client: &Client) -> Result<(), StorageError> {
        let mut clients = self.clients.lock().unwrap();
        clients.insert(client.id, client.clone());
        Ok(())
    }

    fn client(&self, id: Uuid) -> Result<Option<Client>, StorageError> {
        Ok(self.clients.lock().unwrap().get(&id).cloned())
    }

    fn insert_admin(&self, admin: &Administrator) -> Result<(), StorageError> {
        let mut admins = self.admins.lock().unwrap();
        admins.insert(admin.id, admin.clone());
        Ok(())
    }

    fn admin(&self, id: Uuid) -> Result<Option<Administrator>, StorageError> {
        Ok(self.admins.lock().unwrap().get(&id).cloned())
    }

    fn insert_slot(&self, slot: &Slot) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap();
        slots.insert(slot.id, slot.clone());
        Ok(())
    }

    fn slot(&self, id: Uuid) -> Result<Option<Slot>, StorageError> {
        Ok(self.slots.lock().unwrap().get(&id).cloned())
    }

    fn slots(&self) -> Result<Vec<Slot>, StorageError> {
        Ok(self.slots.lock().unwrap().values().cloned().collect())
    }

    fn update_slot(&self, slot: &Slot) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap();
        match slots.get_mut(&slot.id) {
            Some(stored) => {
                *stored = slot.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn remove_slot(&self, id: Uuid) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap();
        if slots.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StorageError> {
        let mut appointments = self.appointments.lock().unwrap();
        appointments.insert(appointment.id, appointment.clone());
        Ok(())
    }

    fn appointment(&self, id: Uuid) -> Result<Option<Appointment>, StorageError> {
        Ok(self.appointments.lock().unwrap().get(&id).cloned())
    }

    fn appointments(&self) -> Result<Vec<Appointment>, StorageError> {
        Ok(self.appointments.lock().unwrap().values().cloned().collect())
    }

    fn update_appointment(&self, appointment: &Appointment) -> Result<(), StorageError> {
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.get_mut(&appointment.id) {
            Some(stored) => {
                *stored = appointment.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn remove_appointments(&self, ids: &[Uuid]) -> Result<usize, StorageError> {
        let mut appointments = self.appointments.lock().unwrap();
        let before = appointments.len();
        for id in ids {
            appointments.remove(id);
        }
        Ok(before - appointments.len())
    }

    fn insert_notification(&self, notification: &Notification) -> Result<(), StorageError> {
        let mut notifications = self.notifications.lock().unwrap();
        notifications.insert(notification.id, notification.clone());
        Ok(())
    }

    fn notification(&self, id: Uuid) -> Result<Option<Notification>, StorageError> {
        Ok(self.notifications.lock().unwrap().get(&id).cloned())
    }

    fn notifications(&self) -> Result<Vec<Notification>, StorageError> {
        Ok(self.notifications.lock().unwrap().values().cloned().collect())
    }

    fn update_notification(&self, notification: &Notification) -> Result<(), StorageError> {
        let mut notifications = self.notifications.lock().unwrap();
        match notifications.get_mut(&notification.id) {
            Some(stored) => {
                *stored = notification.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn remove_notifications(&self, ids: &[Uuid]) -> Result<usize, StorageError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        for id in ids {
            notifications.remove(id);
        }
        Ok(before - notifications.len())
    }
}
