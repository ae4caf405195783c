//! Broadcast configuration models as owned by the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::HeraldError;

/// Fallback time for Sunday to Thursday when the backend has none.
pub const FALLBACK_SUN_THU: &str = "08:00";
/// Fallback time for Friday when the backend has none.
pub const FALLBACK_FRI: &str = "08:00";
/// Fallback time for Saturday when the backend has none.
pub const FALLBACK_SAT: &str = "20:00";

/// Treats an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Daily send times, passed through verbatim.
///
/// The backend owns the schedule semantics; the console never parses these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sun_thu: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sat: String,
}

impl Schedule {
    pub fn new(sun_thu: impl Into<String>, fri: impl Into<String>, sat: impl Into<String>) -> Self {
        Self {
            sun_thu: sun_thu.into(),
            fri: fri.into(),
            sat: sat.into(),
        }
    }

    pub fn get(&self, slot: ScheduleSlot) -> &str {
        match slot {
            ScheduleSlot::SunThu => &self.sun_thu,
            ScheduleSlot::Fri => &self.fri,
            ScheduleSlot::Sat => &self.sat,
        }
    }

    pub fn set(&mut self, slot: ScheduleSlot, value: impl Into<String>) {
        let value = value.into();
        match slot {
            ScheduleSlot::SunThu => self.sun_thu = value,
            ScheduleSlot::Fri => self.fri = value,
            ScheduleSlot::Sat => self.sat = value,
        }
    }

    /// Fills empty slots with the console's fallback times.
    pub fn with_fallbacks(mut self) -> Self {
        for slot in ScheduleSlot::ALL {
            if self.get(slot).trim().is_empty() {
                self.set(slot, slot.fallback());
            }
        }
        self
    }
}

/// One of the three schedule fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleSlot {
    SunThu,
    Fri,
    Sat,
}

impl ScheduleSlot {
    pub const ALL: [ScheduleSlot; 3] = [ScheduleSlot::SunThu, ScheduleSlot::Fri, ScheduleSlot::Sat];

    /// Wire key of the slot.
    pub fn key(&self) -> &'static str {
        match self {
            ScheduleSlot::SunThu => "sun_thu",
            ScheduleSlot::Fri => "fri",
            ScheduleSlot::Sat => "sat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleSlot::SunThu => "Sunday - Thursday",
            ScheduleSlot::Fri => "Friday",
            ScheduleSlot::Sat => "Saturday",
        }
    }

    pub fn fallback(&self) -> &'static str {
        match self {
            ScheduleSlot::SunThu => FALLBACK_SUN_THU,
            ScheduleSlot::Fri => FALLBACK_FRI,
            ScheduleSlot::Sat => FALLBACK_SAT,
        }
    }
}

impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScheduleSlot {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sun_thu" | "sunthu" | "weekday" => Ok(ScheduleSlot::SunThu),
            "fri" | "friday" => Ok(ScheduleSlot::Fri),
            "sat" | "saturday" => Ok(ScheduleSlot::Sat),
            other => Err(HeraldError::Validation(vec![format!(
                "unknown schedule slot '{}' (expected sun_thu, fri or sat)",
                other
            )])),
        }
    }
}

/// The last-saved configuration, as returned by `GET /config`.
///
/// Absent or null fields decode to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmation_number: String,
    #[serde(rename = "schedules", default, deserialize_with = "null_as_default")]
    pub schedule: Schedule,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "targetGroups", default, deserialize_with = "null_as_default")]
    pub target_group_ids: Vec<String>,
    /// Backend-side reference to the saved image; opaque to the console.
    #[serde(rename = "imagePath", default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// Structured part of `POST /config`: the persisted fields minus the attachment.
///
/// `targetGroups` is always serialized, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    #[serde(rename = "schedules")]
    pub schedule: Schedule,
    pub message: String,
    #[serde(rename = "targetGroups")]
    pub target_group_ids: Vec<String>,
    pub confirmation_number: String,
}

impl ConfigUpdate {
    /// JSON text sent as the `data` form field.
    pub fn to_data_field(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
