use chrono::{Days, NaiveDate};
use std::ops::RangeInclusive;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{OptionKind, TripError},
    model::{Destination, TripPlan},
};

pub const TRAVELERS: RangeInclusive<u32> = 1..=10;
pub const DEFAULT_TRAVELERS: u32 = 2;
pub const DEFAULT_TRIP_DAYS: u64 = 7;

/// A trip being assembled against one destination's sustainable options.
#[derive(Debug, Clone)]
pub struct TripDraft<'a> {
    destination: &'a Destination,
    start_date: NaiveDate,
    end_date: NaiveDate,
    travelers: u32,
    transportation: Option<String>,
    accommodation: Option<String>,
    activities: Vec<String>,
}

impl<'a> TripDraft<'a> {
    /// One week from `today` for two travelers, preselecting the first
    /// offered transportation, accommodation and activity.
    pub fn new(destination: &'a Destination, today: NaiveDate) -> Self {
        let options = &destination.sustainable_options;

        Self {
            destination,
            start_date: today,
            end_date: today.checked_add_days(Days::new(DEFAULT_TRIP_DAYS)).unwrap_or(today),
            travelers: DEFAULT_TRAVELERS,
            transportation: options.transportation.first().cloned(),
            accommodation: options.accommodation.first().cloned(),
            activities: options.activities.first().cloned().into_iter().collect(),
        }
    }

    pub fn destination(&self) -> &Destination {
        self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn transportation(&self) -> Option<&str> {
        self.transportation.as_deref()
    }

    pub fn accommodation(&self) -> Option<&str> {
        self.accommodation.as_deref()
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Range is checked on `confirm`.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start_date = start;
        self.end_date = end;
    }

    /// Count is checked on `confirm`.
    pub fn set_travelers(&mut self, travelers: u32) {
        self.travelers = travelers;
    }

    pub fn choose_transportation(&mut self, option: &str) -> Result<(), TripError> {
        let chosen = self.offered(OptionKind::Transportation, option)?;
        self.transportation = Some(chosen);
        Ok(())
    }

    pub fn choose_accommodation(&mut self, option: &str) -> Result<(), TripError> {
        let chosen = self.offered(OptionKind::Accommodation, option)?;
        self.accommodation = Some(chosen);
        Ok(())
    }

    /// Add or remove an activity. Selecting one twice keeps a single entry.
    pub fn toggle_activity(&mut self, activity: &str, selected: bool) -> Result<(), TripError> {
        let activity = self.offered(OptionKind::Activity, activity)?;

        if selected {
            if !self.activities.contains(&activity) {
                self.activities.push(activity);
            }
        } else {
            self.activities.retain(|a| *a != activity);
        }

        Ok(())
    }

    pub fn clear_activities(&mut self) {
        self.activities.clear();
    }

    pub fn confirm(self) -> Result<TripPlan, TripError> {
        if self.end_date < self.start_date {
            return Err(TripError::InvalidDateRange { start: self.start_date, end: self.end_date });
        }
        if !TRAVELERS.contains(&self.travelers) {
            return Err(TripError::TravelersOutOfRange(self.travelers));
        }

        let transportation =
            self.transportation.ok_or(TripError::MissingChoice(OptionKind::Transportation))?;
        let accommodation =
            self.accommodation.ok_or(TripError::MissingChoice(OptionKind::Accommodation))?;

        let plan = TripPlan {
            id: Uuid::new_v4(),
            destination_id: self.destination.id.clone(),
            destination_name: self.destination.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            travelers: self.travelers,
            transportation,
            accommodation,
            activities: self.activities,
        };

        info!(
            trip = %plan.id,
            destination = %plan.destination_name,
            travelers = plan.travelers,
            "trip planned"
        );
        Ok(plan)
    }

    fn offered(&self, kind: OptionKind, value: &str) -> Result<String, TripError> {
        let options = &self.destination.sustainable_options;
        let list = match kind {
            OptionKind::Transportation => &options.transportation,
            OptionKind::Accommodation => &options.accommodation,
            OptionKind::Activity => &options.activities,
        };

        list.iter()
            .find(|o| o.eq_ignore_ascii_case(value))
            .cloned()
            .ok_or_else(|| TripError::UnknownOption {
                kind,
                value: value.to_string(),
                destination: self.destination.name.clone(),
            })
    }
}
