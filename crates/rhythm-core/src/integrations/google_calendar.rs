//! Google Calendar as the destination for the day's schedule.
//!
//! Each segment becomes one event with a popup reminder at its start. The
//! final event always runs until midnight of the next day.

use chrono::{FixedOffset, NaiveDate};
use serde_json::{json, Value};

use super::http::ApiClient;
use super::traits::CalendarSink;
use crate::calendar::local_timestamp;
use crate::error::Result;
use crate::schedule::{DaySchedule, Segment, MINUTES_PER_DAY};
use crate::storage::config::GoogleConfig;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// One Google calendar.
pub struct GoogleCalendar {
    api: ApiClient,
    calendar_id: String,
    color_id: Option<String>,
}

impl GoogleCalendar {
    pub fn new(base_url: &str, access_token: &str, calendar_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new("google_calendar", base_url, access_token)?,
            calendar_id: calendar_id.into(),
            color_id: None,
        })
    }

    pub fn with_color(mut self, color_id: Option<String>) -> Self {
        self.color_id = color_id.filter(|c| !c.is_empty());
        self
    }

    pub fn from_config(config: &GoogleConfig) -> Result<Self> {
        Ok(Self::new(
            &config.calendar_base_url,
            &config.access_token,
            config.calendar_id.clone(),
        )?
        .with_color(config.color_id.clone()))
    }

    /// Request body for one segment.
    pub fn event_body(
        &self,
        segment: &Segment,
        date: NaiveDate,
        offset: FixedOffset,
        is_last: bool,
    ) -> Value {
        let end_minute = if is_last {
            MINUTES_PER_DAY as u16
        } else {
            segment.end_minute
        };

        let mut body = json!({
            "summary": segment.label,
            "start": { "dateTime": local_timestamp(date, segment.start_minute, offset) },
            "end": { "dateTime": local_timestamp(date, end_minute, offset) },
            "reminders": {
                "useDefault": false,
                "overrides": [ { "method": "popup", "minutes": 0 } ],
            },
        });
        if let Some(ref color) = self.color_id {
            body["colorId"] = Value::String(color.clone());
        }
        body
    }
}

impl CalendarSink for GoogleCalendar {
    fn load_schedule(
        &self,
        schedule: &DaySchedule,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<usize> {
        let path = format!("calendars/{}/events", self.calendar_id);
        let count = schedule.segments.len();

        for (index, segment) in schedule.segments.iter().enumerate() {
            let body = self.event_body(segment, date, offset, index + 1 == count);
            let _: Value = self.api.post(&path, &body)?;
        }

        tracing::info!(events = count, %date, "loaded schedule into Google Calendar");
        Ok(count)
    }
}
