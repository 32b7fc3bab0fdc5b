use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::backend::AppointmentBackend;
use crate::error::StoreError;
use crate::types::{Appointment, AppointmentStatus, NewAppointment, TimeOfDay};

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

pub fn time(value: &str) -> TimeOfDay {
    value.parse().unwrap()
}

pub fn appointment(service_id: &str, date: NaiveDate, start: &str) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        service_id: service_id.into(),
        date,
        time: time(start),
        client_name: "Ana Clara".into(),
        client_email: "ana@example.com".into(),
        client_phone: "+55 11 98888-7777".into(),
        status: AppointmentStatus::Pending,
        created_at: Utc::now(),
    }
}

pub fn new_appointment(service_id: &str, date: NaiveDate, start: &str) -> NewAppointment {
    NewAppointment {
        service_id: service_id.into(),
        date,
        time: time(start),
        client_name: "Ana Clara".into(),
        client_email: "ana@example.com".into(),
        client_phone: "+55 11 98888-7777".into(),
    }
}

pub struct MockBackendInner {
    /// When set, every backend call fails with a database error.
    pub fail_database: AtomicBool,
    /// When set, a competing booking appears during the narrow re-check,
    /// simulating a client that landed between snapshot and write.
    pub insert_between_checks: AtomicBool,
    /// When set, the insert itself reports the slot as taken, simulating a
    /// uniqueness violation raised by the store.
    pub conflict_on_insert: AtomicBool,
    pub calls_to_appointments_on: AtomicU64,
    pub calls_to_appointments_at: AtomicU64,
    pub calls_to_insert_appointment: AtomicU64,
    pub calls_to_update_appointment_status: AtomicU64,
    pub rows: Mutex<Vec<Appointment>>,
}

#[derive(Clone)]
pub struct MockBackend(pub Arc<MockBackendInner>);

impl MockBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBackendInner {
            fail_database: AtomicBool::new(false),
            insert_between_checks: AtomicBool::new(false),
            conflict_on_insert: AtomicBool::new(false),
            calls_to_appointments_on: AtomicU64::default(),
            calls_to_appointments_at: AtomicU64::default(),
            calls_to_insert_appointment: AtomicU64::default(),
            calls_to_update_appointment_status: AtomicU64::default(),
            rows: Mutex::default(),
        }))
    }

    fn check_database(&self) -> Result<(), StoreError> {
        if self.0.fail_database.load(Ordering::SeqCst) {
            return Err(StoreError::Database("supposed to fail".into()));
        }
        Ok(())
    }
}

impl AppointmentBackend for MockBackend {
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        self.0
            .calls_to_appointments_on
            .fetch_add(1, Ordering::SeqCst);
        self.check_database()?;

        let rows = self.0.rows.lock().unwrap();
        let mut result: Vec<Appointment> = rows
            .iter()
            .filter(|row| row.date == date && row.status != AppointmentStatus::Cancelled)
            .cloned()
            .collect();
        result.sort_by_key(|row| row.time);
        Ok(result)
    }

    fn appointments_at(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<Vec<Appointment>, StoreError> {
        self.0
            .calls_to_appointments_at
            .fetch_add(1, Ordering::SeqCst);
        self.check_database()?;

        if self.0.insert_between_checks.swap(false, Ordering::SeqCst) {
            let mut competing = appointment("5", date, &time.to_string());
            competing.client_name = "Someone Faster".into();
            self.0.rows.lock().unwrap().push(competing);
        }

        let rows = self.0.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| {
                row.date == date
                    && row.time == time
                    && row.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect())
    }

    fn insert_appointment(&self, new: NewAppointment) -> Result<Appointment, StoreError> {
        self.0
            .calls_to_insert_appointment
            .fetch_add(1, Ordering::SeqCst);
        self.check_database()?;

        let mut rows = self.0.rows.lock().unwrap();
        let conflict = self.0.conflict_on_insert.load(Ordering::SeqCst)
            || rows.iter().any(|row| {
                row.date == new.date
                    && row.time == new.time
                    && row.status != AppointmentStatus::Cancelled
            });
        if conflict {
            return Err(StoreError::SlotTaken {
                date: new.date,
                time: new.time,
            });
        }

        let created = Appointment {
            id: Uuid::new_v4(),
            service_id: new.service_id,
            date: new.date,
            time: new.time,
            client_name: new.client_name,
            client_email: new.client_email,
            client_phone: new.client_phone,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        self.0
            .calls_to_update_appointment_status
            .fetch_add(1, Ordering::SeqCst);
        self.check_database()?;

        let mut rows = self.0.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if !row.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                from: row.status,
                to: status,
            });
        }
        row.status = status;
        Ok(row.clone())
    }
}
