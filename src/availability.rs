use crate::catalog::ServiceCatalog;
use crate::error::IntegrityWarning;
use crate::types::{Appointment, AppointmentStatus, BusinessHours, Service, TimeOfDay};
use chrono::NaiveDate;

/// Result of one free-slot computation. `warnings` carries appointments
/// whose occupied interval could not be determined; when it is non-empty the
/// slot list is empty as well.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub slots: Vec<TimeOfDay>,
    pub warnings: Vec<IntegrityWarning>,
}

/// Compute every start time at which `service` could be booked on `date`
/// without overlapping an existing appointment or running past closing time.
///
/// Pure and deterministic: identical inputs always produce identical output,
/// and invalid bookable windows simply yield an empty list.
pub fn free_slots(
    date: NaiveDate,
    service: &Service,
    existing: &[Appointment],
    catalog: &ServiceCatalog,
    hours: &BusinessHours,
) -> Availability {
    let mut warnings = Vec::new();
    let mut occupied = Vec::new();
    for appointment in existing {
        if appointment.status == AppointmentStatus::Cancelled {
            continue;
        }
        match catalog.get(&appointment.service_id) {
            Some(booked) => {
                let start = appointment.time.minutes();
                occupied.push((start, start + booked.duration_minutes));
            }
            None => warnings.push(IntegrityWarning {
                appointment_id: appointment.id,
                service_id: appointment.service_id.clone(),
                date,
            }),
        }
    }

    // An appointment with an unknown service has no computable interval;
    // it blocks its whole day.
    if !warnings.is_empty() {
        return Availability {
            slots: Vec::new(),
            warnings,
        };
    }

    if hours.slot_granularity_minutes == 0 {
        return Availability {
            slots: Vec::new(),
            warnings,
        };
    }

    let close = hours.end.minutes();
    let mut grid = Vec::new();
    let mut candidate = hours.start.minutes();
    while candidate < close {
        grid.push(candidate);
        candidate += hours.slot_granularity_minutes;
    }

    let duration = service.duration_minutes;
    let slots = grid
        .into_iter()
        .filter(|&start| start + duration <= close)
        .filter(|&start| {
            let end = start + duration;
            !occupied
                .iter()
                .any(|&(taken_start, taken_end)| start < taken_end && taken_start < end)
        })
        .filter_map(TimeOfDay::from_minutes)
        .collect();

    Availability { slots, warnings }
}
