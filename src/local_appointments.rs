use crate::backend::AppointmentBackend;
use crate::error::StoreError;
use crate::types::{Appointment, AppointmentStatus, NewAppointment, TimeOfDay};
use chrono::{NaiveDate, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

/// In-memory appointment store. The single mutex makes the check-and-insert
/// in `insert_appointment` atomic, which is what upholds the no-double-booking
/// invariant without a database.
#[derive(Debug, Clone, Default)]
pub struct LocalAppointments {
    appointments: Arc<Mutex<HashMap<Uuid, Appointment>>>,
}

impl AppointmentBackend for LocalAppointments {
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.lock().unwrap();
        let mut result: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| {
                appointment.date == date && appointment.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect();
        result.sort_by_key(|appointment| appointment.time);
        Ok(result)
    }

    fn appointments_at(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.lock().unwrap();
        Ok(appointments
            .values()
            .filter(|appointment| {
                appointment.date == date
                    && appointment.time == time
                    && appointment.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect())
    }

    fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.lock().unwrap();

        let slot_taken = appointments.values().any(|existing| {
            existing.date == new.date
                && existing.time == new.time
                && existing.status != AppointmentStatus::Cancelled
        });
        if slot_taken {
            return Err(StoreError::SlotTaken {
                date: new.date,
                time: new.time,
            });
        }

        let id = Uuid::new_v4();
        let appointment = Appointment {
            id,
            service_id: new.service_id,
            date: new.date,
            time: new.time,
            client_name: new.client_name,
            client_email: new.client_email,
            client_phone: new.client_phone,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };
        appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.lock().unwrap();
        let appointment = appointments.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if !appointment.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                from: appointment.status,
                to: status,
            });
        }
        appointment.status = status;
        Ok(appointment.clone())
    }
}
