use crate::backend::AppointmentBackend;
use crate::error::{BookingError, StoreError};
use crate::types::{Appointment, AppointmentStatus, NewAppointment, TimeOfDay};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9 ().-]{8,20}$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct BookingRequest {
    service_id: String,
    date: NaiveDate,
    time: TimeOfDay,
    #[validate(length(min = 1, max = 120))]
    client_name: String,
    #[validate(email)]
    client_email: String,
    #[validate(regex(path = *PHONE_RE, message = "expected a phone number"))]
    client_phone: String,
}

impl BookingRequest {
    fn into_new_appointment(self) -> NewAppointment {
        NewAppointment {
            service_id: self.service_id,
            date: self.date,
            time: self.time,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusUpdateRequest {
    id: Uuid,
    status: AppointmentStatus,
}

#[derive(Debug, Clone, Deserialize)]
struct SlotsQuery {
    date: NaiveDate,
    service_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DayQuery {
    date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    reason: &'static str,
    message: String,
}

impl BookingError {
    fn reason(&self) -> &'static str {
        match self {
            BookingError::SlotUnavailable => "slot_unavailable",
            BookingError::SlotAlreadyTaken => "slot_already_taken",
            BookingError::UnknownService(_) => "unknown_service",
            BookingError::Store(StoreError::SlotTaken { .. }) => "slot_already_taken",
            BookingError::Store(StoreError::NotFound(_)) => "appointment_not_found",
            BookingError::Store(StoreError::InvalidTransition { .. }) => "invalid_status_change",
            BookingError::Store(StoreError::Database(_)) => "persistence_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::SlotUnavailable | BookingError::SlotAlreadyTaken => StatusCode::CONFLICT,
            BookingError::UnknownService(_) => StatusCode::NOT_FOUND,
            BookingError::Store(StoreError::SlotTaken { .. }) => StatusCode::CONFLICT,
            BookingError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            BookingError::Store(StoreError::InvalidTransition { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            BookingError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            reason: self.reason(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub async fn start_server<T: AppointmentBackend>(state: AppState<T>, listener: TcpListener) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/services", get(get_services))
        .route("/slots", get(get_slots))
        .route("/appointments", post(book_appointment));

    let admin = Router::new()
        .route("/admin/appointments", get(get_appointments))
        .route("/update_status", post(update_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::<T>));

    let app = Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors);

    tracing::info!(address = %listener.local_addr().unwrap(), "listening");
    axum::serve(listener, app).await.unwrap();
}

async fn admin_auth<T: AppointmentBackend>(
    State(state): State<AppState<T>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let rejected = |message: &str| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                reason: "unauthorized",
                message: message.into(),
            }),
        )
    };

    match request.headers().get("x-admin-password") {
        Some(header) if header.to_str().unwrap_or("") == state.admin_password => {
            Ok(next.run(request).await)
        }
        Some(_) => Err(rejected("wrong admin password")),
        None => Err(rejected("missing credentials")),
    }
}

async fn get_services<T: AppointmentBackend>(State(state): State<AppState<T>>) -> impl IntoResponse {
    Json(state.booking_manager.catalog().services().to_vec())
}

async fn get_slots<T: AppointmentBackend>(
    State(state): State<AppState<T>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<TimeOfDay>>, BookingError> {
    let slots = state
        .booking_manager
        .free_slots_for(query.date, &query.service_id)?;
    Ok(Json(slots))
}

async fn book_appointment<T: AppointmentBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<BookingRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        let body = ErrorBody {
            reason: "invalid_client_details",
            message: errors.to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    match state
        .booking_manager
        .attempt_book(request.into_new_appointment())
    {
        Ok(appointment) => (StatusCode::CREATED, Json(appointment)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_appointments<T: AppointmentBackend>(
    State(state): State<AppState<T>>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Vec<Appointment>>, BookingError> {
    Ok(Json(state.booking_manager.appointments_on(query.date)?))
}

async fn update_status<T: AppointmentBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Appointment>, BookingError> {
    Ok(Json(
        state
            .booking_manager
            .update_status(request.id, request.status)?,
    ))
}
