//! The nested form payload accumulated by the wizard.
//!
//! Every scalar field is a string defaulting to empty. That is a deliberate
//! contract, not laziness: downstream display code expects every key of the
//! nested shape to be present, so conversions fill unaddressed fields with
//! empty strings rather than omitting them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit-type labels offered by both wizard variants.
pub const UNIT_TYPES: [&str; 7] = [
    "1BHK",
    "2BHK",
    "3BHK",
    "4BHK",
    "5BHK",
    "Villa Duplex",
    "Villa Triplex",
];

/// Full nested payload, one sub-record per wizard tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormPayload {
    pub basics: BasicsSection,
    pub construction: ConstructionSection,
    pub units: UnitsSection,
    pub financial: FinancialSection,
    pub secondary: SecondarySection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicsSection {
    pub project_name: String,
    pub builder_name: String,
    pub rera_number: String,
    pub project_type: String,
    pub number_of_floors: String,
    pub flats_per_floor: String,
    pub possession_date: String,
    pub open_space: String,
    pub launch_date: String,
    pub number_of_towers: String,
    pub total_units: String,
    pub construction_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstructionSection {
    pub carpet_area_percent: String,
    pub ceiling_height: String,
    pub price_per_sqft: String,
    pub passenger_lifts: String,
    pub service_lifts: String,
    pub specifications: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitsSection {
    pub unit_configurations: BTreeMap<String, UnitTypeConfig>,
}

/// Per-unit-type configuration: an enabled flag and an ordered list of
/// variant rows. Disabling a type clears its rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitTypeConfig {
    pub enabled: bool,
    pub variants: Vec<UnitVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitVariant {
    pub size: String,
    pub parking_slots: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialSection {
    pub base_price: String,
    pub car_parking_cost: String,
    pub registration_charges: String,
    pub maintenance_charges: String,
    pub other_charges: String,
    pub structure_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondarySection {
    pub commission_type: String,
    pub commission_percentage: String,
    pub cutoff_builder_price: String,
    pub cutoff_relai_price: String,
    pub payout_period: String,
    pub floor_charger: String,
    pub floor_charger_amount: String,
    pub floor_charger_above: String,
    pub facing_charges: String,
    pub facing_charges_amount: String,
    pub plc: String,
    pub plc_conditions: String,
    pub power_backup: String,
    pub ground_vehicle_movement: String,
    pub wow_factor_amenity: String,
    pub confirmation_person_name: String,
    pub confirmation_person_contact: String,
    pub confirmation_person_role: String,
}

/// Yes/no/partial discriminator used by the charges toggles. The stored
/// representation stays a plain string so unanswered toggles serialize as
/// empty rather than a synthetic default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Yes,
    No,
    Partial,
}

impl Toggle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Partial => "partial",
        }
    }
}

/// Mutually exclusive commission modes selected by the radio-style
/// `commissionType` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionMode {
    Commission,
    Cutoff,
}

impl CommissionMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cutoff" => Self::Cutoff,
            _ => Self::Commission,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commission => "commission",
            Self::Cutoff => "cutoff",
        }
    }
}

/// Strips everything but digit characters before storage. Used for the
/// numeric sub-fields that accept keyboard input.
pub(crate) fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

macro_rules! section_patch {
    ($patch:ident for $section:ident { $($field:ident),+ $(,)? }) => {
        /// Shallow field update: provided fields overwrite, absent fields are
        /// left untouched.
        #[derive(Debug, Clone, Default)]
        pub struct $patch {
            $(pub $field: Option<String>,)+
        }

        impl $section {
            pub fn apply(&mut self, patch: $patch) {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )+
            }
        }
    };
}

section_patch!(BasicsPatch for BasicsSection {
    project_name,
    builder_name,
    rera_number,
    project_type,
    number_of_floors,
    flats_per_floor,
    possession_date,
    open_space,
    launch_date,
    number_of_towers,
    total_units,
    construction_status,
});

section_patch!(ConstructionPatch for ConstructionSection {
    carpet_area_percent,
    ceiling_height,
    price_per_sqft,
    passenger_lifts,
    service_lifts,
    specifications,
});

section_patch!(FinancialPatch for FinancialSection {
    base_price,
    car_parking_cost,
    registration_charges,
    maintenance_charges,
    other_charges,
    structure_type,
});

section_patch!(SecondaryPatch for SecondarySection {
    commission_type,
    commission_percentage,
    cutoff_builder_price,
    cutoff_relai_price,
    payout_period,
    floor_charger,
    floor_charger_amount,
    floor_charger_above,
    facing_charges,
    facing_charges_amount,
    plc,
    plc_conditions,
    power_backup,
    ground_vehicle_movement,
    wow_factor_amenity,
    confirmation_person_name,
    confirmation_person_contact,
    confirmation_person_role,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_without_clearing_existing_fields() {
        let mut basics = BasicsSection {
            project_name: "Cloud 9 Residency".to_string(),
            builder_name: "Urban Rise".to_string(),
            ..BasicsSection::default()
        };

        basics.apply(BasicsPatch {
            builder_name: Some("Urban Rise Builders".to_string()),
            rera_number: Some("P024000001XX".to_string()),
            ..BasicsPatch::default()
        });

        assert_eq!(basics.project_name, "Cloud 9 Residency");
        assert_eq!(basics.builder_name, "Urban Rise Builders");
        assert_eq!(basics.rera_number, "P024000001XX");
    }

    #[test]
    fn payload_serializes_every_key_even_when_empty() {
        let json = serde_json::to_value(FormPayload::default()).expect("serialize");
        let secondary = json
            .get("secondary")
            .and_then(|v| v.as_object())
            .expect("secondary object");
        assert_eq!(secondary.get("confirmationPersonName"), Some(&serde_json::json!("")));
        assert_eq!(secondary.get("commissionPercentage"), Some(&serde_json::json!("")));
    }

    #[test]
    fn toggle_and_commission_mode_parse_stored_strings() {
        assert_eq!(Toggle::parse("Yes"), Some(Toggle::Yes));
        assert_eq!(Toggle::parse("partial"), Some(Toggle::Partial));
        assert_eq!(Toggle::parse(""), None);
        assert_eq!(CommissionMode::parse("cutoff"), CommissionMode::Cutoff);
        assert_eq!(CommissionMode::parse("anything else"), CommissionMode::Commission);
    }

    #[test]
    fn digits_only_strips_non_digit_input() {
        assert_eq!(digits_only("1,20,000"), "120000");
        assert_eq!(digits_only("abc"), "");
        assert_eq!(digits_only("12a3"), "123");
    }
}
