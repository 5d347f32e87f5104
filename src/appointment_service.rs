use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::availability;
use crate::backend::BookingBackend;
use crate::error::{ServiceError, ServiceResult};
use crate::notification_service::NotificationService;
use crate::types::{
    Administrator, Appointment, AppointmentRequest, AppointmentStatus, Client, NewAdministrator,
    NewClient, NewSlot, NotificationKind, Slot, Statistics,
};

/// Sole authority for the appointment lifecycle: slot lookup, conflict
/// detection, status transitions and notification dispatch.
///
/// The conflict check and the subsequent insert are two separate backend
/// calls, so this service is not safe for concurrent callers.
#[derive(Debug, Clone)]
pub struct AppointmentService<B: BookingBackend> {
    store: B,
    notifier: NotificationService<B>,
}

impl<B: BookingBackend> AppointmentService<B> {
    pub fn new(store: B) -> Self {
        let notifier = NotificationService::new(store.clone());
        Self { store, notifier }
    }

    pub fn register_client(&self, new: NewClient) -> ServiceResult<Client> {
        new.validate()?;
        let client = Client {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
        };
        self.store.insert_client(&client)?;
        Ok(client)
    }

    pub fn register_admin(&self, new: NewAdministrator) -> ServiceResult<Administrator> {
        new.validate()?;
        let admin = Administrator {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
        };
        self.store.insert_admin(&admin)?;
        Ok(admin)
    }

    /// Books a pending appointment for the requesting client.
    ///
    /// The (date, time) pair is exclusive across all clients: one active
    /// appointment per pair. The booking is matched to a free slot on the
    /// requested date; there is no fallback to other dates.
    pub fn request_appointment(&self, request: AppointmentRequest) -> ServiceResult<Appointment> {
        request.validate()?;
        let client = self
            .store
            .client(request.client_id)?
            .ok_or_else(|| {
                ServiceError::Validation(format!("unknown client {}", request.client_id))
            })?;

        let taken = self.store.appointments()?.iter().any(|a| {
            a.date == request.date
                && a.time == request.time
                && a.status != AppointmentStatus::Cancelled
        });
        if taken {
            return Err(ServiceError::Conflict(format!(
                "an active appointment already exists for {} at {}",
                request.date, request.time
            )));
        }

        let slots = self.store.slots()?;
        let mut slot = availability::free_slot_for(request.date, &slots)
            .ok_or(ServiceError::NoAvailability)?
            .clone();
        slot.free = false;
        self.store.update_slot(&slot)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            date: request.date,
            time: request.time,
            duration_minutes: request.duration_minutes,
            service_type: request.service_type,
            status: AppointmentStatus::Pending,
            notes: request.notes,
            client_id: client.id,
            slot_id: slot.id,
            admin_id: None,
        };
        self.store.insert_appointment(&appointment)?;
        self.notifier.notify_booked(&appointment)?;
        Ok(appointment)
    }

    /// Pending -> Confirmed, recording the confirming administrator.
    pub fn confirm_appointment(
        &self,
        admin_id: Uuid,
        appointment_id: Uuid,
    ) -> ServiceResult<Appointment> {
        let admin = self
            .store
            .admin(admin_id)?
            .ok_or_else(|| ServiceError::Validation(format!("unknown administrator {admin_id}")))?;
        let mut appointment = self.appointment(appointment_id)?;
        if appointment.status != AppointmentStatus::Pending {
            return Err(ServiceError::InvalidState(format!(
                "cannot confirm a {} appointment",
                appointment.status
            )));
        }

        appointment.status = AppointmentStatus::Confirmed;
        appointment.admin_id = Some(admin.id);
        self.store.update_appointment(&appointment)?;
        self.notifier.notify_confirmed(&appointment)?;
        Ok(appointment)
    }

    /// Pending/Confirmed -> Cancelled, by the owning client.
    pub fn cancel_appointment(
        &self,
        client_id: Uuid,
        appointment_id: Uuid,
    ) -> ServiceResult<Appointment> {
        let mut appointment = self.appointment(appointment_id)?;
        if appointment.client_id != client_id {
            return Err(ServiceError::InvalidState(
                "the appointment belongs to another client".into(),
            ));
        }
        if appointment.status == AppointmentStatus::Cancelled {
            return Err(ServiceError::InvalidState(
                "the appointment is already cancelled".into(),
            ));
        }

        appointment.status = AppointmentStatus::Cancelled;
        self.store.update_appointment(&appointment)?;
        self.notifier.notify_cancelled(&appointment)?;
        Ok(appointment)
    }

    pub fn appointment(&self, id: Uuid) -> ServiceResult<Appointment> {
        self.store
            .appointment(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("appointment {id}")))
    }

    pub fn appointments(&self) -> ServiceResult<Vec<Appointment>> {
        Ok(self.store.appointments()?)
    }

    pub fn appointments_by_client(&self, client_id: Uuid) -> ServiceResult<Vec<Appointment>> {
        let appointments = self.store.appointments()?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.client_id == client_id)
            .collect())
    }

    pub fn appointments_by_date(&self, date: NaiveDate) -> ServiceResult<Vec<Appointment>> {
        let appointments = self.store.appointments()?;
        Ok(appointments.into_iter().filter(|a| a.date == date).collect())
    }

    pub fn appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> ServiceResult<Vec<Appointment>> {
        let appointments = self.store.appointments()?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.status == status)
            .collect())
    }

    /// Deletes cancelled appointments dated before `today - age_days` and
    /// returns how many were removed. Associated notifications are kept;
    /// they have their own retention pass.
    pub fn purge_old_cancelled(&self, age_days: u32) -> ServiceResult<usize> {
        let cutoff = Utc::now().date_naive() - Duration::days(i64::from(age_days));
        let ids: Vec<Uuid> = self
            .store
            .appointments()?
            .into_iter()
            .filter(|a| a.status == AppointmentStatus::Cancelled && a.date < cutoff)
            .map(|a| a.id)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }
        Ok(self.store.remove_appointments(&ids)?)
    }

    pub fn statistics(&self) -> ServiceResult<Statistics> {
        let appointments = self.store.appointments()?;
        let notifications = self.store.notifications()?;

        let by_status = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };
        let by_kind =
            |kind: NotificationKind| notifications.iter().filter(|n| n.kind == kind).count();

        Ok(Statistics {
            total_appointments: appointments.len(),
            pending: by_status(AppointmentStatus::Pending),
            confirmed: by_status(AppointmentStatus::Confirmed),
            cancelled: by_status(AppointmentStatus::Cancelled),
            total_notifications: notifications.len(),
            notifications_sent: notifications.iter().filter(|n| n.sent).count(),
            confirmations: by_kind(NotificationKind::Confirmation),
            alerts: by_kind(NotificationKind::Alert),
            reminders: by_kind(NotificationKind::Reminder),
        })
    }

    pub fn add_slot(&self, new: NewSlot) -> ServiceResult<Slot> {
        Self::validate_slot(&new)?;
        let slot = Slot {
            id: Uuid::new_v4(),
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            zone: new.zone,
            service_type: new.service_type,
            free: true,
        };
        self.store.insert_slot(&slot)?;
        Ok(slot)
    }

    /// Edits a slot, re-running the full validation so an edit cannot
    /// reintroduce an inverted time window. The free flag is untouched.
    pub fn update_slot(&self, id: Uuid, new: NewSlot) -> ServiceResult<Slot> {
        Self::validate_slot(&new)?;
        let mut slot = self.slot(id)?;
        slot.date = new.date;
        slot.start_time = new.start_time;
        slot.end_time = new.end_time;
        slot.zone = new.zone;
        slot.service_type = new.service_type;
        self.store.update_slot(&slot)?;
        Ok(slot)
    }

    pub fn block_slot(&self, id: Uuid) -> ServiceResult<Slot> {
        let mut slot = self.slot(id)?;
        if !slot.free {
            return Err(ServiceError::InvalidState("the slot is already blocked".into()));
        }
        slot.free = false;
        self.store.update_slot(&slot)?;
        Ok(slot)
    }

    pub fn unblock_slot(&self, id: Uuid) -> ServiceResult<Slot> {
        let mut slot = self.slot(id)?;
        if slot.free {
            return Err(ServiceError::InvalidState("the slot is already free".into()));
        }
        slot.free = true;
        self.store.update_slot(&slot)?;
        Ok(slot)
    }

    pub fn remove_slot(&self, id: Uuid) -> ServiceResult<()> {
        let slot = self.slot(id)?;
        if !slot.free {
            return Err(ServiceError::InvalidState(
                "an occupied slot cannot be removed".into(),
            ));
        }
        self.store.remove_slot(id)?;
        Ok(())
    }

    pub fn slots(&self) -> ServiceResult<Vec<Slot>> {
        Ok(self.store.slots()?)
    }

    fn slot(&self, id: Uuid) -> ServiceResult<Slot> {
        self.store
            .slot(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("slot {id}")))
    }

    fn validate_slot(new: &NewSlot) -> ServiceResult<()> {
        new.validate()?;
        if availability::window_minutes(new.start_time, new.end_time) < 0 {
            return Err(ServiceError::Validation(
                "start time must not be after end time".into(),
            ));
        }
        Ok(())
    }
}
