use crate::availability::free_slots;
use crate::backend::AppointmentBackend;
use crate::catalog::ServiceCatalog;
use crate::error::{BookingError, StoreError};
use crate::types::{Appointment, AppointmentStatus, BusinessHours, NewAppointment, TimeOfDay};
use chrono::NaiveDate;
use uuid::Uuid;

/// Orchestrates the booking protocol on top of an [`AppointmentBackend`]:
/// snapshot read, availability computation, narrow re-check, conditional
/// insert. Holds no appointment state of its own; every call starts from
/// fresh reads.
#[derive(Debug, Clone)]
pub struct BookingManager<T: AppointmentBackend> {
    backend: T,
    catalog: ServiceCatalog,
    hours: BusinessHours,
}

impl<T: AppointmentBackend> BookingManager<T> {
    pub fn new(backend: T, catalog: ServiceCatalog) -> Self {
        Self {
            backend,
            catalog,
            hours: BusinessHours::default(),
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Free start times for `service_id` on `date`, as shown to the client
    /// while picking a slot. Integrity warnings empty the list and go to the
    /// operator log.
    pub fn free_slots_for(
        &self,
        date: NaiveDate,
        service_id: &str,
    ) -> Result<Vec<TimeOfDay>, BookingError> {
        let service = self
            .catalog
            .get(service_id)
            .ok_or_else(|| BookingError::UnknownService(service_id.to_string()))?;

        let existing = self.backend.appointments_on(date)?;
        let availability = free_slots(date, service, &existing, &self.catalog, &self.hours);
        for warning in &availability.warnings {
            tracing::warn!(%warning, "skipping day with unresolvable appointment");
        }
        Ok(availability.slots)
    }

    /// Try to reserve a slot. Two checks run before the write: the full
    /// availability computation over a day snapshot, then a narrow existence
    /// query for exactly `(date, time)` right before inserting. The backend's
    /// own uniqueness check on insert is the final arbiter, so a race lost
    /// after both checks still comes back as [`BookingError::SlotAlreadyTaken`].
    pub fn attempt_book(&self, new: NewAppointment) -> Result<Appointment, BookingError> {
        let slots = self.free_slots_for(new.date, &new.service_id)?;
        if !slots.contains(&new.time) {
            return Err(BookingError::SlotUnavailable);
        }

        let clashing = self.backend.appointments_at(new.date, new.time)?;
        if !clashing.is_empty() {
            tracing::info!(date = %new.date, time = %new.time, "slot taken between checks");
            return Err(BookingError::SlotAlreadyTaken);
        }

        match self.backend.insert_appointment(new) {
            Ok(appointment) => {
                tracing::info!(id = %appointment.id, date = %appointment.date,
                    time = %appointment.time, "appointment booked");
                Ok(appointment)
            }
            Err(StoreError::SlotTaken { .. }) => Err(BookingError::SlotAlreadyTaken),
            Err(err) => {
                tracing::error!(%err, "appointment insert failed");
                Err(err.into())
            }
        }
    }

    /// Day listing for the admin view (non-cancelled, ascending by time).
    pub fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, BookingError> {
        Ok(self.backend.appointments_on(date)?)
    }

    /// Admin status transition; validation happens against the transition
    /// table inside the backend.
    pub fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        Ok(self.backend.update_appointment_status(id, status)?)
    }
}
