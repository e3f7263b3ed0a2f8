//! Activity model for painting the weekly grid.
//!
//! Activities are the things a person fills their week with (Sleep, Work, ...)
//! with an associated colour and an icon key for visual identification.
//! Grid cells refer to activities by [`ActivityId`] only.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_ID_SUFFIX: AtomicU64 = AtomicU64::new(1);

/// Opaque activity identifier, unique within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh identifier. Identifiers combine the creation time with a
    /// process-wide counter so two activities created in the same millisecond
    /// still differ.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = NEXT_ID_SUFFIX.fetch_add(1, Ordering::Relaxed);
        Self(format!("act-{:x}-{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque RGB colour, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neutral grey used when a document carries an unreadable colour.
    pub const FALLBACK: RgbColor = RgbColor::new(0x9C, 0xA3, 0xAF);

    pub fn from_hex_str(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(RgbColor::new(r, g, b))
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Serialize for RgbColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RgbColor::from_hex_str(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour '{}'", raw)))
    }
}

/// Icon keys understood by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityIcon {
    Sleep,
    Work,
    Study,
    Meal,
    Exercise,
    Commute,
    Social,
    Leisure,
    Chores,
    #[default]
    Generic,
}

impl ActivityIcon {
    pub const ALL: [ActivityIcon; 10] = [
        ActivityIcon::Sleep,
        ActivityIcon::Work,
        ActivityIcon::Study,
        ActivityIcon::Meal,
        ActivityIcon::Exercise,
        ActivityIcon::Commute,
        ActivityIcon::Social,
        ActivityIcon::Leisure,
        ActivityIcon::Chores,
        ActivityIcon::Generic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ActivityIcon::Sleep => "sleep",
            ActivityIcon::Work => "work",
            ActivityIcon::Study => "study",
            ActivityIcon::Meal => "meal",
            ActivityIcon::Exercise => "exercise",
            ActivityIcon::Commute => "commute",
            ActivityIcon::Social => "social",
            ActivityIcon::Leisure => "leisure",
            ActivityIcon::Chores => "chores",
            ActivityIcon::Generic => "generic",
        }
    }

    /// Resolve a stored key; unknown keys map to [`ActivityIcon::Generic`].
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.key() == key.trim())
            .unwrap_or_default()
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ActivityIcon::Sleep => "🛏",
            ActivityIcon::Work => "💼",
            ActivityIcon::Study => "📚",
            ActivityIcon::Meal => "🍽",
            ActivityIcon::Exercise => "🏃",
            ActivityIcon::Commute => "🚆",
            ActivityIcon::Social => "👥",
            ActivityIcon::Leisure => "🎮",
            ActivityIcon::Chores => "🧹",
            ActivityIcon::Generic => "⬤",
        }
    }
}

/// Something a person spends time on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Immutable identity referenced from grid cells
    pub id: ActivityId,
    /// Display name
    pub name: String,
    /// Fill colour in the grid
    pub colour: RgbColor,
    /// Icon key
    pub icon: ActivityIcon,
}

impl Activity {
    /// Create a new activity with a freshly generated id.
    pub fn new(name: impl Into<String>, colour: RgbColor, icon: ActivityIcon) -> Self {
        Self::with_id(ActivityId::generate(), name, colour, icon)
    }

    pub fn with_id(
        id: ActivityId,
        name: impl Into<String>,
        colour: RgbColor,
        icon: ActivityIcon,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            colour,
            icon,
        }
    }

    /// Validate the activity data.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        validate_name(&self.name)
    }

    /// Get the display string (icon + name) for UI.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.icon.glyph(), self.name)
    }
}

/// Editable display attributes of an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityEdit {
    pub name: Option<String>,
    pub colour: Option<RgbColor>,
    pub icon: Option<ActivityIcon>,
}

impl ActivityEdit {
    pub fn apply_to(self, activity: &mut Activity) -> Result<(), ActivityValidationError> {
        if let Some(ref name) = self.name {
            validate_name(name)?;
        }
        if let Some(name) = self.name {
            activity.name = name.trim().to_string();
        }
        if let Some(colour) = self.colour {
            activity.colour = colour;
        }
        if let Some(icon) = self.icon {
            activity.icon = icon;
        }
        Ok(())
    }
}

pub const MAX_NAME_LEN: usize = 50;

fn validate_name(name: &str) -> Result<(), ActivityValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ActivityValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ActivityValidationError::NameTooLong);
    }
    Ok(())
}

/// Validation errors for Activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    EmptyName,
    NameTooLong,
    DuplicateId(ActivityId),
}

impl std::fmt::Display for ActivityValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Activity name cannot be empty"),
            Self::NameTooLong => write!(f, "Activity name must be 50 characters or less"),
            Self::DuplicateId(id) => write!(f, "Activity id '{}' is already in use", id),
        }
    }
}

impl std::error::Error for ActivityValidationError {}

/// Activities every new plan starts with.
pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new("Sleep", RgbColor::new(0x63, 0x66, 0xF1), ActivityIcon::Sleep),
        Activity::new("Work", RgbColor::new(0x3B, 0x82, 0xF6), ActivityIcon::Work),
        Activity::new("Meals", RgbColor::new(0xF5, 0x9E, 0x0B), ActivityIcon::Meal),
        Activity::new("Exercise", RgbColor::new(0x10, 0xB9, 0x81), ActivityIcon::Exercise),
        Activity::new("Leisure", RgbColor::new(0xEC, 0x48, 0x99), ActivityIcon::Leisure),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ActivityId::generate();
        let b = ActivityId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("act-"));
    }

    #[test]
    fn test_colour_hex_parsing() {
        assert_eq!(RgbColor::from_hex_str("#3B82F6"), Some(RgbColor::new(0x3B, 0x82, 0xF6)));
        assert_eq!(RgbColor::from_hex_str("3b82f6"), Some(RgbColor::new(0x3B, 0x82, 0xF6)));
        assert_eq!(RgbColor::from_hex_str("#FFF"), None);
        assert_eq!(RgbColor::from_hex_str("#GGGGGG"), None);
        assert_eq!(RgbColor::from_hex_str(""), None);
    }

    #[test]
    fn test_colour_serializes_as_hex() {
        let json = serde_json::to_string(&RgbColor::new(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102FF\"");
        let back: RgbColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RgbColor::new(1, 2, 255));
    }

    #[test]
    fn test_icon_from_unknown_key_is_generic() {
        assert_eq!(ActivityIcon::from_key("sleep"), ActivityIcon::Sleep);
        assert_eq!(ActivityIcon::from_key("spaceship"), ActivityIcon::Generic);
    }

    #[test]
    fn test_validate_empty_name() {
        let activity = Activity::new("   ", RgbColor::FALLBACK, ActivityIcon::Generic);
        assert_eq!(activity.validate(), Err(ActivityValidationError::EmptyName));
    }

    #[test]
    fn test_validate_name_too_long() {
        let activity = Activity::new("a".repeat(51), RgbColor::FALLBACK, ActivityIcon::Generic);
        assert_eq!(activity.validate(), Err(ActivityValidationError::NameTooLong));
    }

    #[test]
    fn test_edit_rejects_empty_name_without_partial_update() {
        let mut activity = Activity::new("Work", RgbColor::FALLBACK, ActivityIcon::Work);
        let edit = ActivityEdit {
            name: Some(String::new()),
            colour: Some(RgbColor::new(1, 1, 1)),
            icon: None,
        };
        assert!(edit.apply_to(&mut activity).is_err());
        assert_eq!(activity.name, "Work");
        assert_eq!(activity.colour, RgbColor::FALLBACK);
    }

    #[test]
    fn test_default_activities_are_valid() {
        let defaults = default_activities();
        assert_eq!(defaults.len(), 5);
        for activity in &defaults {
            assert!(activity.validate().is_ok());
        }
        assert_eq!(defaults[0].display_name(), "🛏 Sleep");
    }
}
