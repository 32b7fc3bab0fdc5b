use crate::error::StoreError;
use crate::types::{Appointment, AppointmentStatus, NewAppointment, TimeOfDay};
use chrono::NaiveDate;
use uuid::Uuid;

/// Persistence seam for appointments. Every select excludes cancelled rows;
/// `insert_appointment` is the conditional write that arbitrates the booking
/// race, so implementations must reject a second non-cancelled booking for
/// the same `(date, time)` with `StoreError::SlotTaken`.
pub trait AppointmentBackend: Clone + Send + Sync + 'static {
    /// All non-cancelled appointments on `date`, ascending by start time.
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError>;

    /// Non-cancelled appointments starting exactly at `(date, time)`.
    fn appointments_at(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Persist a new appointment with status `pending`, assigning its id and
    /// creation timestamp.
    fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError>;

    /// Apply an admin status transition. Rows are never deleted; `cancelled`
    /// rows simply stop occupying their slot.
    fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError>;
}
