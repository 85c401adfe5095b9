//! Weekly calendar layout for the appointments page.
//!
//! Weeks start on Sunday. Each day has hourly slots from 08:00 to 17:00.
//! Layout is display bucketing only: no overlap or double-booking checks.

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};

use crate::error::CoreError;
use crate::models::appointment::Appointment;

pub const FIRST_SLOT_HOUR: i8 = 8;
pub const LAST_SLOT_HOUR: i8 = 17;

/// Slot start times of a day, in order.
pub fn slots() -> Vec<Time> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| Time::constant(hour, 0, 0, 0))
        .collect()
}

/// The Sunday that starts the week containing `anchor`.
pub fn week_start(anchor: Date) -> Result<Date, CoreError> {
    let offset = i64::from(anchor.weekday().to_sunday_zero_offset());
    Ok(anchor.checked_sub(offset.days())?)
}

/// The seven days (Sunday through Saturday) of the week containing `anchor`.
pub fn week_days(anchor: Date) -> Result<[Date; 7], CoreError> {
    let start = week_start(anchor)?;
    let mut days = [start; 7];
    for (i, day) in days.iter_mut().enumerate().skip(1) {
        *day = start.checked_add((i as i64).days())?;
    }
    Ok(days)
}

/// Half-open instant range `[Sunday 00:00, next Sunday 00:00)` in `tz`.
pub fn week_range(anchor: Date, tz: &TimeZone) -> Result<(Timestamp, Timestamp), CoreError> {
    let start = week_start(anchor)?;
    let end = start.checked_add(7.days())?;
    let from = start.to_zoned(tz.clone())?.timestamp();
    let to = end.to_zoned(tz.clone())?.timestamp();
    Ok((from, to))
}

pub fn previous_week(anchor: Date) -> Result<Date, CoreError> {
    Ok(anchor.checked_sub(7.days())?)
}

pub fn next_week(anchor: Date) -> Result<Date, CoreError> {
    Ok(anchor.checked_add(7.days())?)
}

/// Label for the header of the grid, e.g. `"outubro 2026"`.
pub fn month_label(anchor: Date) -> String {
    const MONTHS: [&str; 12] = [
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
        "setembro", "outubro", "novembro", "dezembro",
    ];
    let month = MONTHS[usize::from(anchor.month().unsigned_abs()) - 1];
    format!("{month} {}", anchor.year())
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a> {
    pub date: Date,
    pub time: Time,
    pub appointments: Vec<&'a Appointment>,
}

/// A week of cells, indexed `[slot][day]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid<'a> {
    pub days: [Date; 7],
    pub slots: Vec<Time>,
    rows: Vec<Vec<Cell<'a>>>,
}

impl<'a> WeekGrid<'a> {
    /// Bucket `appointments` into the week containing `anchor`.
    ///
    /// An appointment lands in a cell only when its local date equals the
    /// cell's day and its local `HH:MM` equals the slot exactly; anything
    /// else (other weeks, off-the-hour times) is left out of the grid.
    pub fn build(
        anchor: Date,
        tz: &TimeZone,
        appointments: &'a [Appointment],
    ) -> Result<Self, CoreError> {
        let days = week_days(anchor)?;
        let slots = slots();
        let mut rows: Vec<Vec<Cell<'a>>> = slots
            .iter()
            .map(|&time| {
                days.iter()
                    .map(|&date| Cell {
                        date,
                        time,
                        appointments: Vec::new(),
                    })
                    .collect()
            })
            .collect();

        for appointment in appointments {
            let local = appointment.scheduled_at.to_zoned(tz.clone()).datetime();
            let Some(day) = days.iter().position(|&d| d == local.date()) else {
                continue;
            };
            let Some(slot) = slots
                .iter()
                .position(|t| t.hour() == local.hour() && t.minute() == local.minute())
            else {
                continue;
            };
            rows[slot][day].appointments.push(appointment);
        }

        Ok(Self { days, slots, rows })
    }

    pub fn cell(&self, date: Date, time: Time) -> Option<&Cell<'a>> {
        let day = self.days.iter().position(|&d| d == date)?;
        let slot = self.slots.iter().position(|&t| t == time)?;
        Some(&self.rows[slot][day])
    }

    pub fn rows(&self) -> &[Vec<Cell<'a>>] {
        &self.rows
    }

    /// Number of appointments placed on the grid.
    pub fn placed(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|cell| cell.appointments.len())
            .sum()
    }
}
