//! Normalization of the two historical `details` shapes into one canonical
//! field set.
//!
//! Older submissions stored a flat details object; newer ones store the full
//! nested payload. Every consumer that displays or filters a submission must
//! route through [`DetailsPayload`] first so both generations render the same
//! way.

use super::forms::FormPayload;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder rendered for fields the stored record never captured.
pub const NOT_AVAILABLE: &str = "Not available";

/// Legacy flat `details` shape with field names at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub rera_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub project_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub floors: String,
    #[serde(deserialize_with = "lenient_string")]
    pub flats_per_floor: String,
    #[serde(deserialize_with = "lenient_string")]
    pub possession_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub open_space: String,
    #[serde(deserialize_with = "lenient_string")]
    pub carpet_area: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ceiling_height: String,
    #[serde(deserialize_with = "lenient_string")]
    pub commission: String,
    #[serde(deserialize_with = "lenient_string")]
    pub poc_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub poc_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub poc_role: String,
}

/// The single normalized field set every view renders from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalDetails {
    pub rera_number: String,
    pub project_type: String,
    pub floors: String,
    pub flats_per_floor: String,
    pub possession_date: String,
    pub open_space: String,
    pub carpet_area: String,
    pub ceiling_height: String,
    pub commission: String,
    pub poc_name: String,
    pub poc_number: String,
    pub poc_role: String,
}

/// Explicit two-case union over a stored details value.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsPayload {
    /// Current format: grouped under basics/construction/units/financial/secondary.
    Nested(Box<FormPayload>),
    /// Legacy format with fields at the top level. Null and missing payloads
    /// land here as the empty record.
    Flat(FlatDetails),
}

impl DetailsPayload {
    /// Classifies a stored value by the presence of any nested section key.
    /// Total: malformed values degrade to the empty flat record.
    pub fn from_value(value: &Value) -> Self {
        let is_nested = value
            .as_object()
            .map(|obj| {
                obj.contains_key("basics")
                    || obj.contains_key("construction")
                    || obj.contains_key("secondary")
            })
            .unwrap_or(false);

        if is_nested {
            let payload = serde_json::from_value(value.clone()).unwrap_or_default();
            Self::Nested(Box::new(payload))
        } else {
            let flat = serde_json::from_value(value.clone()).unwrap_or_default();
            Self::Flat(flat)
        }
    }

    /// Maps either shape into the canonical field set. Pure and total.
    pub fn normalize(&self) -> CanonicalDetails {
        match self {
            Self::Flat(flat) => CanonicalDetails {
                rera_number: flat.rera_number.clone(),
                project_type: flat.project_type.clone(),
                floors: flat.floors.clone(),
                flats_per_floor: flat.flats_per_floor.clone(),
                possession_date: flat.possession_date.clone(),
                open_space: flat.open_space.clone(),
                carpet_area: flat.carpet_area.clone(),
                ceiling_height: flat.ceiling_height.clone(),
                commission: flat.commission.clone(),
                poc_name: flat.poc_name.clone(),
                poc_number: flat.poc_number.clone(),
                poc_role: flat.poc_role.clone(),
            },
            Self::Nested(payload) => CanonicalDetails {
                rera_number: payload.basics.rera_number.clone(),
                project_type: payload.basics.project_type.clone(),
                floors: payload.basics.number_of_floors.clone(),
                flats_per_floor: payload.basics.flats_per_floor.clone(),
                possession_date: payload.basics.possession_date.clone(),
                open_space: payload.basics.open_space.clone(),
                carpet_area: payload.construction.carpet_area_percent.clone(),
                ceiling_height: payload.construction.ceiling_height.clone(),
                commission: payload.secondary.commission_percentage.clone(),
                poc_name: payload.secondary.confirmation_person_name.clone(),
                poc_number: payload.secondary.confirmation_person_contact.clone(),
                poc_role: payload.secondary.confirmation_person_role.clone(),
            },
        }
    }
}

/// Render-time fallback: empty fields display a placeholder, never an error.
pub fn display_field(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

/// Accepts strings, numbers, and booleans where legacy records are sloppy
/// about types; anything else degrades to the empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_to_string(&value))
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}
