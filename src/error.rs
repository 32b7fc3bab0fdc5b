use crate::types::{AppointmentStatus, TimeOfDay};
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Failures of the persistence backend itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("slot {time} on {date} is already booked")]
    SlotTaken { date: NaiveDate, time: TimeOfDay },

    #[error("appointment {0} does not exist")]
    NotFound(Uuid),

    #[error("status change from {from} to {to} is not allowed")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("database error: {0}")]
    Database(String),
}

/// Rejections a booking attempt can surface to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    /// The requested time was not in the freshly computed free set.
    #[error("the requested time is not available on that date")]
    SlotUnavailable,

    /// The narrow re-check or the insert itself found a booking that landed
    /// between our snapshot and the write.
    #[error("the slot was just booked by another client")]
    SlotAlreadyTaken,

    #[error("unknown service id {0:?}")]
    UnknownService(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An existing appointment references a service the catalog does not know,
/// so its occupied interval cannot be computed. Not a failure of the
/// calculation, but operators need to see it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("appointment {appointment_id} on {date} references unknown service {service_id:?}")]
pub struct IntegrityWarning {
    pub appointment_id: Uuid,
    pub service_id: String,
    pub date: NaiveDate,
}
