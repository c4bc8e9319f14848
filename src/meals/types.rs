//! Core data types for meal tracking
//!
//! - `Meal`: a recorded meal as read from or written to the store
//! - `MealPayload`: the body sent on create and update
//! - `TimeSlot`: the fixed, ordered set of meal slots
//! - `MealField`: names of the editable fields

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single recorded meal
///
/// `id` is absent on drafts and assigned by the store on creation. Everything
/// else is the stored document body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    /// Store-assigned key, `None` until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Slot identifier, normally one of [`TimeSlot::ALL`]
    #[serde(default)]
    pub time: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Energy in kcal
    #[serde(default = "missing_calories", deserialize_with = "deserialize_calories")]
    pub calories: u32,
}

impl Meal {
    /// Create a blank draft (no id, no slot, empty description, 0 kcal)
    pub fn draft() -> Self {
        Self::default()
    }

    /// Create a draft with all fields set
    pub fn new(time: impl Into<String>, description: impl Into<String>, calories: u32) -> Self {
        Self {
            id: None,
            time: time.into(),
            description: description.into(),
            calories,
        }
    }

    /// Builder method: attach the store key
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether this record carries a store key
    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().map(|id| !id.is_empty()).unwrap_or(false)
    }

    /// Display name of the meal's slot
    pub fn time_name(&self) -> &str {
        time_display_name(&self.time)
    }

    /// The body written to the store for this meal
    pub fn payload(&self) -> MealPayload {
        MealPayload::from(self)
    }
}

/// Write body for create and update
///
/// Carries exactly the three stored fields; the id lives in the URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPayload {
    pub time: String,
    pub description: String,
    pub calories: u32,
}

impl From<&Meal> for MealPayload {
    fn from(meal: &Meal) -> Self {
        Self {
            time: meal.time.clone(),
            description: meal.description.clone(),
            calories: meal.calories,
        }
    }
}

/// Slot of the day a meal belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Breakfast,
    Snack,
    Lunch,
    Dinner,
}

impl TimeSlot {
    /// All slots in display order
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Breakfast,
        TimeSlot::Snack,
        TimeSlot::Lunch,
        TimeSlot::Dinner,
    ];

    /// Stable identifier stored in `Meal::time`
    pub fn id(&self) -> &'static str {
        match self {
            TimeSlot::Breakfast => "breakfast",
            TimeSlot::Snack => "snack",
            TimeSlot::Lunch => "lunch",
            TimeSlot::Dinner => "dinner",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeSlot::Breakfast => "Breakfast",
            TimeSlot::Snack => "Snack",
            TimeSlot::Lunch => "Lunch",
            TimeSlot::Dinner => "Dinner",
        }
    }

    /// Look up a slot by its identifier
    pub fn from_id(id: &str) -> Option<TimeSlot> {
        Self::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::from_id(&s.to_lowercase()).ok_or_else(|| {
            format!(
                "Unknown time slot: {}. Use one of: breakfast, snack, lunch, dinner",
                s
            )
        })
    }
}

/// Resolve a stored slot identifier to its display name.
///
/// Unknown identifiers are shown as stored.
pub fn time_display_name(id: &str) -> &str {
    TimeSlot::from_id(id)
        .map(|slot| slot.display_name())
        .unwrap_or(id)
}

/// Editable fields of a meal form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealField {
    Time,
    Description,
    Calories,
}

impl MealField {
    /// Field name as used in the stored document
    pub fn name(&self) -> &'static str {
        match self {
            MealField::Time => "time",
            MealField::Description => "description",
            MealField::Calories => "calories",
        }
    }
}

impl std::fmt::Display for MealField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read `calories` leniently. Stores written by older clients hold the value
/// as a string, sometimes with trailing text.
fn missing_calories() -> u32 {
    tracing::warn!("Missing calories value, using 0");
    0
}

fn deserialize_calories<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(missing_calories());
    };

    Ok(coerce_calories(&raw).unwrap_or_else(|| {
        tracing::warn!(value = %raw, "Unreadable calories value, using 0");
        0
    }))
}

/// Convert a stored calories value to kcal
fn coerce_calories(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).ok()
            } else if n.is_i64() {
                // negative
                None
            } else {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
                    .map(|v| v.trunc() as u32)
            }
        }
        Value::String(s) => parse_leading_integer(s),
        _ => None,
    }
}

/// Parse the integer prefix of a string: leading whitespace and an optional
/// `+` are skipped, parsing stops at the first non-digit.
fn parse_leading_integer(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}
