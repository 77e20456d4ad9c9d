//! Onboarding submission data models.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Identifier the store generates for a new user row.
pub type UserId = i64;

/// A calendar weekday, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lower-case key used in the wire format.
    pub fn key(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = self.key();
        let mut chars = key.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// Planned vegetarian days, one flag per weekday.
///
/// Absent keys deserialize as `false`. Stored as a single JSON text column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VegDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl VegDays {
    pub fn get(&self, day: Weekday) -> bool {
        match day {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday => self.saturday,
            Weekday::Sunday => self.sunday,
        }
    }

    pub fn set(&mut self, day: Weekday, value: bool) {
        let flag = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *flag = value;
    }

    /// Days flagged as vegetarian, in weekday order.
    pub fn selected(&self) -> Vec<Weekday> {
        Weekday::ALL.into_iter().filter(|d| self.get(*d)).collect()
    }

    /// Serialize to the text form kept in `profiles.veg_days`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One onboarding submission as it travels over the wire.
///
/// The first six fields are required; a body missing any of them does not
/// decode. `preferences`, `allergies` and `vegDays` may be absent or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub whatsapp_number: String,
    pub email: String,
    #[serde(deserialize_with = "whole_number")]
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub target_weight_kg: f64,
    #[serde(default)]
    pub preferences: Option<String>,
    /// Comma-separated allergy labels, as typed.
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub veg_days: Option<VegDays>,
}

impl OnboardingRequest {
    /// Allergy labels after splitting, trimming and dropping empties.
    pub fn allergy_list(&self) -> Vec<String> {
        parse_allergies(self.allergies.as_deref())
    }
}

/// Accepts `30` and `30.0` alike; fractions and out-of-range values fail.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(de::Error::custom(format!("expected a whole number, got {value}")));
    }
    Ok(value as i32)
}

/// Successful submission response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub success: bool,
    pub user_id: UserId,
}

/// Split a comma-separated allergy string into trimmed, non-empty labels.
///
/// Order is preserved and duplicates are kept.
pub fn parse_allergies(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
