use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::{AsChangeset, Insertable, Queryable};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle states of an appointment. Valid transitions are
/// `Pending -> Confirmed`, `Pending -> Cancelled` and `Confirmed -> Cancelled`;
/// nothing leaves `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Pg> for AppointmentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for AppointmentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match std::str::from_utf8(bytes.as_bytes())? {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unrecognized appointment status: {other}").into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Confirmation,
    Alert,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Confirmation => "confirmation",
            NotificationKind::Alert => "alert",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Pg> for NotificationKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for NotificationKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match std::str::from_utf8(bytes.as_bytes())? {
            "reminder" => Ok(NotificationKind::Reminder),
            "confirmation" => Ok(NotificationKind::Confirmation),
            "alert" => Ok(NotificationKind::Alert),
            other => Err(format!("unrecognized notification kind: {other}").into()),
        }
    }
}

/// A booked cleaning session linking a client, a slot and a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
pub struct Appointment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub service_type: String,
    pub status: AppointmentStatus,
    pub notes: String,
    pub client_id: Uuid,
    pub slot_id: Uuid,
    pub admin_id: Option<Uuid>,
}

/// A publishable window of bookable time in a zone for a service type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::slots)]
pub struct Slot {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub zone: String,
    pub service_type: String,
    pub free: bool,
}

/// A message record tied to an appointment event. `sent_at` is set at the
/// moment the message is actually emitted, not at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::notifications)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub appointment_id: Uuid,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(kind: NotificationKind, appointment_id: Uuid, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            kind,
            appointment_id,
            sent: false,
            sent_at: None,
        }
    }

    pub fn confirmation(appointment_id: Uuid, message: String) -> Self {
        Self::new(NotificationKind::Confirmation, appointment_id, message)
    }

    pub fn alert(appointment_id: Uuid, message: String) -> Self {
        Self::new(NotificationKind::Alert, appointment_id, message)
    }

    pub fn reminder(appointment_id: Uuid, message: String) -> Self {
        Self::new(NotificationKind::Reminder, appointment_id, message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable)]
#[diesel(table_name = crate::schema::clients)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable)]
#[diesel(table_name = crate::schema::administrators)]
pub struct Administrator {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Payload for a client requesting an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppointmentRequest {
    pub client_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[validate(range(min = 1, message = "duration must be at least 1 minute"))]
    pub duration_minutes: i32,
    #[validate(length(min = 1, message = "service type must not be empty"))]
    pub service_type: String,
    #[serde(default)]
    pub notes: String,
}

/// Payload for an administrator publishing or editing a slot. The
/// `start_time <= end_time` invariant is checked by the service on both
/// create and edit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(min = 1, message = "zone must not be empty"))]
    pub zone: String,
    #[validate(length(min = 1, message = "service type must not be empty"))]
    pub service_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewClient {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAdministrator {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Counts by appointment status and notification kind, as rendered by the
/// read-only statistics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_appointments: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub total_notifications: usize,
    pub notifications_sent: usize,
    pub confirmations: usize,
    pub alerts: usize,
    pub reminders: usize,
}
