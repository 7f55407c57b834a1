//! The short-form wizard variant: a flat field subset that is converted into
//! the full nested shape before being parked as a draft.

use super::forms::{
    BasicsSection, ConstructionSection, FormPayload, SecondarySection, UnitTypeConfig,
    UnitsSection,
};
use super::record::{DraftRecord, SubmissionStatus};
use super::wizard::ValidationError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the short form collects, flat. Field names follow the stored
/// short-form record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortFormRecord {
    pub project_name: String,
    pub builder_name: String,
    pub rera_number: String,
    pub project_type: String,
    pub number_of_floors: String,
    pub flats_per_floor: String,
    pub possession_date: String,
    pub open_space: String,
    pub carpet_area_percent: String,
    pub ceiling_height: String,
    pub floor_charger: String,
    pub floor_charger_amount: String,
    pub floor_charger_above: String,
    pub facing_charges: String,
    pub plc: String,
    pub plc_conditions: String,
    pub power_backup: String,
    pub ground_vehicle_movement: String,
    pub wow_factor_amenity: String,
    pub commission_type: String,
    pub commission_percent: String,
    pub cutoff_their_price: String,
    pub cutoff_relai_price: String,
    pub payout_time_period: String,
    pub poc_name: String,
    pub poc_number: String,
    pub poc_role: String,
    pub unit_configurations: BTreeMap<String, UnitTypeConfig>,
}

impl ShortFormRecord {
    /// Maps the flat record into the full nested shape. Contract: every
    /// full-form-only field the short form never asked about is present with
    /// an empty-string default, never omitted — downstream consumers of the
    /// nested shape must not encounter missing keys.
    pub fn into_payload(self) -> FormPayload {
        FormPayload {
            basics: BasicsSection {
                project_name: self.project_name,
                builder_name: self.builder_name,
                rera_number: self.rera_number,
                project_type: self.project_type,
                number_of_floors: self.number_of_floors,
                flats_per_floor: self.flats_per_floor,
                possession_date: self.possession_date,
                open_space: self.open_space,
                ..BasicsSection::default()
            },
            construction: ConstructionSection {
                carpet_area_percent: self.carpet_area_percent,
                ceiling_height: self.ceiling_height,
                ..ConstructionSection::default()
            },
            units: UnitsSection {
                unit_configurations: self.unit_configurations,
            },
            financial: Default::default(),
            secondary: SecondarySection {
                commission_type: self.commission_type,
                commission_percentage: self.commission_percent,
                cutoff_builder_price: self.cutoff_their_price,
                cutoff_relai_price: self.cutoff_relai_price,
                payout_period: self.payout_time_period,
                floor_charger: self.floor_charger,
                floor_charger_amount: self.floor_charger_amount,
                floor_charger_above: self.floor_charger_above,
                facing_charges: self.facing_charges,
                plc: self.plc,
                plc_conditions: self.plc_conditions,
                power_backup: self.power_backup,
                ground_vehicle_movement: self.ground_vehicle_movement,
                wow_factor_amenity: self.wow_factor_amenity,
                confirmation_person_name: self.poc_name,
                confirmation_person_contact: self.poc_number,
                confirmation_person_role: self.poc_role,
                ..SecondarySection::default()
            },
        }
    }

    /// Converts to a draft record. Only the project name gates the save.
    pub fn into_draft(self, now: DateTime<Local>) -> Result<DraftRecord, ValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(ValidationError {
                missing: vec!["projectName"],
            });
        }

        let project_name = self.project_name.trim().to_string();
        let builder_name = self.builder_name.trim().to_string();
        Ok(DraftRecord {
            id: now.timestamp_millis(),
            project_name,
            builder_name,
            created_at: now.to_rfc3339(),
            status: SubmissionStatus::Draft,
            form_data: self.into_payload(),
        })
    }
}
