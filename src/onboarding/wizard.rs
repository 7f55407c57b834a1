//! The multi-section form wizard.
//!
//! The wizard accumulates one nested payload across five independently
//! editable sections and, on finalize, turns it into a submission record.
//! Sections merge shallow patches; the unit-configuration tab has its own
//! structural operations.

use super::forms::{
    digits_only, BasicsPatch, CommissionMode, ConstructionPatch, FinancialPatch, FormPayload,
    SecondaryPatch, Toggle, UnitTypeConfig, UnitVariant, UNIT_TYPES,
};
use super::record::{SubmissionKind, SubmissionRecord, SubmissionStatus};
use chrono::{DateTime, Local};
use serde_json::Value;

/// Finalize-time validation failure naming the missing fields. Nothing is
/// persisted and the in-progress payload stays editable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please fill in the following required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct FormWizard {
    payload: FormPayload,
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl FormWizard {
    /// Fresh wizard with every offered unit type present and disabled, so the
    /// units tab always renders the full catalog.
    pub fn new() -> Self {
        let mut payload = FormPayload::default();
        for unit_type in UNIT_TYPES {
            payload
                .units
                .unit_configurations
                .insert(unit_type.to_string(), UnitTypeConfig::default());
        }
        Self { payload }
    }

    /// Resumes a draft or opens an admin edit with an existing payload.
    pub fn from_payload(payload: FormPayload) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &FormPayload {
        &self.payload
    }

    pub fn into_payload(self) -> FormPayload {
        self.payload
    }

    pub fn update_basics(&mut self, patch: BasicsPatch) {
        self.payload.basics.apply(patch);
    }

    pub fn update_construction(&mut self, patch: ConstructionPatch) {
        self.payload.construction.apply(patch);
    }

    pub fn update_financial(&mut self, patch: FinancialPatch) {
        self.payload.financial.apply(patch);
    }

    /// Applies a secondary-section patch, then enforces the section's own
    /// rules: digit-only amounts, dependent fields cleared when their toggle
    /// leaves "yes", and only one commission mode's fields kept.
    pub fn update_secondary(&mut self, patch: SecondaryPatch) {
        let secondary = &mut self.payload.secondary;
        secondary.apply(patch);

        for field in [
            &mut secondary.floor_charger_amount,
            &mut secondary.floor_charger_above,
            &mut secondary.facing_charges_amount,
            &mut secondary.payout_period,
            &mut secondary.cutoff_builder_price,
            &mut secondary.cutoff_relai_price,
        ] {
            *field = digits_only(field);
        }

        if Toggle::parse(&secondary.floor_charger) != Some(Toggle::Yes) {
            secondary.floor_charger_amount.clear();
            secondary.floor_charger_above.clear();
        }
        if Toggle::parse(&secondary.facing_charges) != Some(Toggle::Yes) {
            secondary.facing_charges_amount.clear();
        }
        if Toggle::parse(&secondary.plc) != Some(Toggle::Yes) {
            secondary.plc_conditions.clear();
        }

        match CommissionMode::parse(&secondary.commission_type) {
            CommissionMode::Commission => {
                secondary.cutoff_builder_price.clear();
                secondary.cutoff_relai_price.clear();
            }
            CommissionMode::Cutoff => {
                secondary.commission_percentage.clear();
            }
        }
    }

    // Unit configuration operations

    /// Enabling seeds a single empty variant row; disabling clears the list.
    pub fn set_unit_enabled(&mut self, unit_type: &str, enabled: bool) {
        let config = self.unit_config(unit_type);
        config.enabled = enabled;
        if enabled {
            if config.variants.is_empty() {
                config.variants.push(UnitVariant::default());
            }
        } else {
            config.variants.clear();
        }
    }

    pub fn add_unit_variant(&mut self, unit_type: &str) {
        self.unit_config(unit_type).variants.push(UnitVariant::default());
    }

    pub fn remove_unit_variant(&mut self, unit_type: &str, index: usize) {
        let config = self.unit_config(unit_type);
        if index < config.variants.len() {
            config.variants.remove(index);
        }
    }

    pub fn set_unit_size(&mut self, unit_type: &str, index: usize, value: &str) {
        if let Some(variant) = self.unit_config(unit_type).variants.get_mut(index) {
            variant.size = digits_only(value);
        }
    }

    pub fn set_unit_parking(&mut self, unit_type: &str, index: usize, value: &str) {
        if let Some(variant) = self.unit_config(unit_type).variants.get_mut(index) {
            variant.parking_slots = digits_only(value);
        }
    }

    fn unit_config(&mut self, unit_type: &str) -> &mut UnitTypeConfig {
        self.payload
            .units
            .unit_configurations
            .entry(unit_type.to_string())
            .or_default()
    }

    /// Project and builder names must be non-empty after trimming. No other
    /// field is required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.payload.basics.project_name.trim().is_empty() {
            missing.push("projectName");
        }
        if self.payload.basics.builder_name.trim().is_empty() {
            missing.push("builderName");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Builds the submission record: a fresh timestamp-derived identifier,
    /// status `submitted`, date/time from `now`, and the full nested payload
    /// as details so the normalizer's nested branch applies downstream.
    pub fn finalize(&self, now: DateTime<Local>) -> Result<SubmissionRecord, ValidationError> {
        self.validate()?;

        let details = serde_json::to_value(&self.payload).unwrap_or(Value::Null);
        Ok(SubmissionRecord {
            id: now.timestamp_millis(),
            project_name: self.payload.basics.project_name.trim().to_string(),
            builder_name: self.payload.basics.builder_name.trim().to_string(),
            submission_type: SubmissionKind::FullOnboarding,
            status: SubmissionStatus::Submitted,
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%I:%M %p").to_string(),
            details,
        })
    }
}
