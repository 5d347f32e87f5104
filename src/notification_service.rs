use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::backend::BookingBackend;
use crate::error::{ServiceError, ServiceResult};
use crate::types::{Appointment, Notification, NotificationKind};

/// Builds and emits notification records for appointment events.
/// "Transmission" is a structured log line; the record itself is persisted
/// through the backend so the caller can list it later.
#[derive(Debug, Clone)]
pub struct NotificationService<B: BookingBackend> {
    store: B,
}

impl<B: BookingBackend> NotificationService<B> {
    pub fn new(store: B) -> Self {
        Self { store }
    }

    /// Emits a notification and persists it as sent. Sending an
    /// already-sent notification succeeds without re-emitting.
    pub fn send(&self, mut notification: Notification) -> ServiceResult<Notification> {
        if notification.message.trim().is_empty() {
            return Err(ServiceError::Validation(
                "notification message must not be empty".into(),
            ));
        }
        if notification.sent {
            return Ok(notification);
        }

        notification.sent = true;
        notification.sent_at = Some(Utc::now());
        tracing::info!(
            appointment = %notification.appointment_id,
            kind = %notification.kind,
            "{}",
            notification.message
        );

        if self.store.notification(notification.id)?.is_some() {
            self.store.update_notification(&notification)?;
        } else {
            self.store.insert_notification(&notification)?;
        }
        Ok(notification)
    }

    pub fn notify_booked(&self, appointment: &Appointment) -> ServiceResult<Notification> {
        let message = format!(
            "Your appointment for {} at {} has been booked. Service: {}. Duration: {} minutes.",
            appointment.date, appointment.time, appointment.service_type,
            appointment.duration_minutes
        );
        self.send(Notification::confirmation(appointment.id, message))
    }

    pub fn notify_confirmed(&self, appointment: &Appointment) -> ServiceResult<Notification> {
        let message = format!(
            "Your appointment for {} at {} has been confirmed by an administrator.",
            appointment.date, appointment.time
        );
        self.send(Notification::confirmation(appointment.id, message))
    }

    pub fn notify_cancelled(&self, appointment: &Appointment) -> ServiceResult<Notification> {
        let message = format!(
            "Your appointment for {} at {} has been cancelled. \
             Please contact an administrator to reschedule.",
            appointment.date, appointment.time
        );
        self.send(Notification::alert(appointment.id, message))
    }

    pub fn send_reminder(
        &self,
        appointment_id: Uuid,
        hours_before: i64,
    ) -> ServiceResult<Notification> {
        if hours_before <= 0 {
            return Err(ServiceError::Validation(
                "hours before must be greater than 0".into(),
            ));
        }
        let appointment = self
            .store
            .appointment(appointment_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("appointment {appointment_id}")))?;
        let message = format!(
            "Reminder: your cleaning appointment is scheduled for {} at {} \
             (about {} hours ahead). Service: {}. Please confirm attendance.",
            appointment.date, appointment.time, hours_before, appointment.service_type
        );
        self.send(Notification::reminder(appointment.id, message))
    }

    /// Applies the same message to every appointment in the batch and
    /// returns how many notifications went out. Best-effort: failures are
    /// skipped, already-sent parts of a partial batch stay sent.
    pub fn send_bulk(
        &self,
        appointment_ids: &[Uuid],
        kind: NotificationKind,
        message: &str,
    ) -> ServiceResult<usize> {
        if appointment_ids.is_empty() {
            return Err(ServiceError::Validation(
                "appointment list must not be empty".into(),
            ));
        }
        if message.trim().is_empty() {
            return Err(ServiceError::Validation(
                "notification message must not be empty".into(),
            ));
        }

        let mut sent = 0;
        for id in appointment_ids {
            match self.store.appointment(*id) {
                Ok(Some(_)) => {}
                _ => continue,
            }
            if self
                .send(Notification::new(kind, *id, message.to_owned()))
                .is_ok()
            {
                sent += 1;
            }
        }
        Ok(sent)
    }

    /// Re-attempts every unsent notification, returning how many went out.
    pub fn resend_pending(&self) -> ServiceResult<usize> {
        let pending = self.pending()?;
        let mut resent = 0;
        for notification in pending {
            if self.send(notification).is_ok() {
                resent += 1;
            }
        }
        Ok(resent)
    }

    /// Deletes sent notifications emitted before `today - age_days`.
    pub fn purge_sent(&self, age_days: u32) -> ServiceResult<usize> {
        let cutoff = Utc::now() - Duration::days(i64::from(age_days));
        let ids: Vec<Uuid> = self
            .store
            .notifications()?
            .into_iter()
            .filter(|n| n.sent && n.sent_at.is_some_and(|at| at < cutoff))
            .map(|n| n.id)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }
        Ok(self.store.remove_notifications(&ids)?)
    }

    pub fn notifications(&self) -> ServiceResult<Vec<Notification>> {
        Ok(self.store.notifications()?)
    }

    pub fn notifications_by_appointment(
        &self,
        appointment_id: Uuid,
    ) -> ServiceResult<Vec<Notification>> {
        let notifications = self.store.notifications()?;
        Ok(notifications
            .into_iter()
            .filter(|n| n.appointment_id == appointment_id)
            .collect())
    }

    pub fn notifications_by_kind(&self, kind: NotificationKind) -> ServiceResult<Vec<Notification>> {
        let notifications = self.store.notifications()?;
        Ok(notifications.into_iter().filter(|n| n.kind == kind).collect())
    }

    pub fn pending(&self) -> ServiceResult<Vec<Notification>> {
        let notifications = self.store.notifications()?;
        Ok(notifications.into_iter().filter(|n| !n.sent).collect())
    }
}
