use crate::backend::BookingBackend;
use crate::error::ServiceError;
use crate::types::{
    Administrator, Appointment, AppointmentRequest, AppointmentStatus, Client, NewAdministrator,
    NewClient, NewSlot, Notification, NotificationKind, Slot, Statistics,
};
use crate::AppState;
use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{extract::Json, http::StatusCode};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfirmAppointmentRequest {
    admin_id: Uuid,
    appointment_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CancelAppointmentRequest {
    client_id: Uuid,
    appointment_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PurgeRequest {
    age_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRef {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpdateSlotRequest {
    id: Uuid,
    #[serde(flatten)]
    slot: NewSlot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemindRequest {
    appointment_id: Uuid,
    hours_before: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BulkNotificationRequest {
    appointment_ids: Vec<Uuid>,
    kind: NotificationKind,
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AppointmentFilter {
    client_id: Option<Uuid>,
    date: Option<NaiveDate>,
    status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationFilter {
    appointment_id: Option<Uuid>,
    kind: Option<NotificationKind>,
    #[serde(default)]
    pending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PurgeResponse {
    removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BulkSendResponse {
    sent: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResendResponse {
    resent: usize,
}

pub async fn start_server<B: BookingBackend>(state: AppState<B>, listener: TcpListener) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/clients", post(register_client))
        .route("/appointments", post(request_appointment).get(list_appointments))
        .route("/appointments/cancel", post(cancel_appointment))
        .route("/slots", get(list_slots));

    let admin = Router::new()
        .route("/admins", post(register_admin))
        .route("/appointments/confirm", post(confirm_appointment))
        .route("/appointments/purge", post(purge_old_cancelled))
        .route("/slots/add", post(add_slot))
        .route("/slots/update", post(update_slot))
        .route("/slots/block", post(block_slot))
        .route("/slots/unblock", post(unblock_slot))
        .route("/slots/remove", post(remove_slot))
        .route("/notifications", get(list_notifications))
        .route("/notifications/remind", post(send_reminder))
        .route("/notifications/bulk", post(send_bulk))
        .route("/notifications/resend", post(resend_pending))
        .route("/notifications/purge", post(purge_notifications))
        .route("/stats", get(statistics))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::<B>));

    let app = Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors);

    axum::serve(listener, app).await.unwrap();
}

async fn admin_auth<B: BookingBackend>(
    State(state): State<AppState<B>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(header) if header.to_str().unwrap_or("") == state.admin_password => {
            Ok(next.run(request).await)
        }
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

async fn register_client<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(new): Json<NewClient>,
) -> Result<Json<Client>, ServiceError> {
    Ok(Json(state.appointments.register_client(new)?))
}

async fn register_admin<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(new): Json<NewAdministrator>,
) -> Result<Json<Administrator>, ServiceError> {
    Ok(Json(state.appointments.register_admin(new)?))
}

async fn request_appointment<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<AppointmentRequest>,
) -> Result<Json<Appointment>, ServiceError> {
    Ok(Json(state.appointments.request_appointment(request)?))
}

async fn confirm_appointment<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<ConfirmAppointmentRequest>,
) -> Result<Json<Appointment>, ServiceError> {
    let appointment = state
        .appointments
        .confirm_appointment(request.admin_id, request.appointment_id)?;
    Ok(Json(appointment))
}

async fn cancel_appointment<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Appointment>, ServiceError> {
    let appointment = state
        .appointments
        .cancel_appointment(request.client_id, request.appointment_id)?;
    Ok(Json(appointment))
}

async fn list_appointments<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<Appointment>>, ServiceError> {
    let appointments = match (filter.client_id, filter.date, filter.status) {
        (Some(client_id), _, _) => state.appointments.appointments_by_client(client_id)?,
        (None, Some(date), _) => state.appointments.appointments_by_date(date)?,
        (None, None, Some(status)) => state.appointments.appointments_by_status(status)?,
        (None, None, None) => state.appointments.appointments()?,
    };
    Ok(Json(appointments))
}

async fn purge_old_cancelled<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<PurgeRequest>,
) -> Result<Json<PurgeResponse>, ServiceError> {
    let removed = state.appointments.purge_old_cancelled(request.age_days)?;
    Ok(Json(PurgeResponse { removed }))
}

async fn list_slots<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<Slot>>, ServiceError> {
    Ok(Json(state.appointments.slots()?))
}

async fn add_slot<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(new): Json<NewSlot>,
) -> Result<Json<Slot>, ServiceError> {
    Ok(Json(state.appointments.add_slot(new)?))
}

async fn update_slot<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<UpdateSlotRequest>,
) -> Result<Json<Slot>, ServiceError> {
    Ok(Json(state.appointments.update_slot(request.id, request.slot)?))
}

async fn block_slot<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(slot): Json<SlotRef>,
) -> Result<Json<Slot>, ServiceError> {
    Ok(Json(state.appointments.block_slot(slot.id)?))
}

async fn unblock_slot<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(slot): Json<SlotRef>,
) -> Result<Json<Slot>, ServiceError> {
    Ok(Json(state.appointments.unblock_slot(slot.id)?))
}

async fn remove_slot<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(slot): Json<SlotRef>,
) -> Result<(StatusCode, String), ServiceError> {
    state.appointments.remove_slot(slot.id)?;
    Ok((StatusCode::OK, "Slot removed successfully".to_string()))
}

async fn statistics<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Statistics>, ServiceError> {
    Ok(Json(state.appointments.statistics()?))
}

async fn list_notifications<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Query(filter): Query<NotificationFilter>,
) -> Result<Json<Vec<Notification>>, ServiceError> {
    let notifications = match (filter.appointment_id, filter.kind) {
        (Some(appointment_id), _) => state
            .notifications
            .notifications_by_appointment(appointment_id)?,
        (None, Some(kind)) => state.notifications.notifications_by_kind(kind)?,
        (None, None) if filter.pending => state.notifications.pending()?,
        (None, None) => state.notifications.notifications()?,
    };
    Ok(Json(notifications))
}

async fn send_reminder<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<RemindRequest>,
) -> Result<Json<Notification>, ServiceError> {
    let notification = state
        .notifications
        .send_reminder(request.appointment_id, request.hours_before)?;
    Ok(Json(notification))
}

async fn send_bulk<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<BulkNotificationRequest>,
) -> Result<Json<BulkSendResponse>, ServiceError> {
    let sent = state.notifications.send_bulk(
        &request.appointment_ids,
        request.kind,
        &request.message,
    )?;
    Ok(Json(BulkSendResponse { sent }))
}

async fn resend_pending<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<ResendResponse>, ServiceError> {
    let resent = state.notifications.resend_pending()?;
    Ok(Json(ResendResponse { resent }))
}

async fn purge_notifications<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<PurgeRequest>,
) -> Result<Json<PurgeResponse>, ServiceError> {
    let removed = state.notifications.purge_sent(request.age_days)?;
    Ok(Json(PurgeResponse { removed }))
}
