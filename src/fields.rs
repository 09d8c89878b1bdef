//! Column selection for page requests
//!
//! The search endpoint returns only the columns named in the request body.
//! [`FieldSelection`] builds that body.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Columns for the minimal selection: identity, power, last update
pub const MINIMAL_COLUMNS: &[&str] = &[
    "id",
    "tiName",
    "cmbLocation",
    "cmbStatus",
    "tiClass",
    "cmbMake",
    "cmbModel",
    "tiItemOriginalPower",
    "lastUpdatedOn",
];

/// Columns for the full selection, grouped as the service documents them
pub const FULL_COLUMNS: &[&str] = &[
    // Core
    "id",
    "cmbLocation",
    "tiClass",
    "cmbStatus",
    "tiName",
    "cmbMake",
    "cmbModel",
    "cmbCabinet",
    "tiSerialNumber",
    "lastUpdatedOn",
    "tiItemOriginalPower",
    "cmbSystemAdminTeam",
    "tiCustomField_Primary Contact",
    // Asset
    "tiSubclass",
    "tiAssetTag",
    "tiFormFactor",
    "tiMounting",
    "tiWidth",
    "tiDepth",
    "tiWeight",
    "tiRUs",
    "cmbUPosition",
    // Power
    "tiPotentialPower",
    "tiEffectivePower",
    "tiPowerCapacity",
    "tiPSRedundancy",
    "tiPurchasePrice",
    "tiContractAmount",
    // Infrastructure
    "cmbPlantBay",
    "cmbCabinetId",
    "cmbRowPosition",
    "cmbRowLabel",
    "tiFloorNodeCode",
    "tiFloorName",
    "tiRoomNodeCode",
    "tiRoomName",
    // Integration
    "tiIntegrationStatus",
    "tiVMwareIntegrationStatus",
    "tiCmdbIntegrationStatus",
    "tiItemBudgetStatus",
    "chkItemAutoPowerBudget",
    "chkDerateAmps",
    // Network
    "ipAddresses",
    "ipAddressPortName",
    "tifreeDataPortCount",
    "tifreePowerPortCount",
    // Technical
    "tiUsers",
    "tiRAM",
    "tiProcesses",
    "tiCpuQuantity",
    "tiCpuType",
    "tiPartNumber",
    // Dates
    "installationDate",
    "lastServiceDate",
    "contractEndDate",
    "purchaseDate",
    "tiPlannedDecommDate",
    // Custom fields
    "tiCustomField_Contact Team Name",
    "tiCustomField_Audit Remarks",
    "tiCustomField_Audit Date",
    "tiCustomField_Audit By",
    "tiCustomField_Warranty Expiration Date",
    "tiCustomField_Asset Status",
    "tiCustomField_PNT/IT",
    // Admin
    "cmbSystemAdmin",
    "cmbCustomer",
    "tiPONumber",
    "tiNotes",
];

/// Which columns to ask the service for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSelection {
    /// Every column the item model maps
    #[default]
    Full,
    /// Identity and power columns only
    Minimal,
    /// Let the service pick; sends an empty body
    ServerDefault,
}

impl FieldSelection {
    /// Column names requested, empty for [`FieldSelection::ServerDefault`]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Full => FULL_COLUMNS,
            Self::Minimal => MINIMAL_COLUMNS,
            Self::ServerDefault => &[],
        }
    }

    /// JSON request body for the search endpoint
    pub fn payload(self) -> Value {
        match self {
            Self::ServerDefault => json!({}),
            _ => {
                let columns: Vec<Value> = self
                    .columns()
                    .iter()
                    .map(|name| json!({ "name": name }))
                    .collect();
                json!({ "selectedColumns": columns })
            }
        }
    }
}

impl std::str::FromStr for FieldSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "all" => Ok(Self::Full),
            "minimal" | "limited" => Ok(Self::Minimal),
            "server_default" | "default" | "none" => Ok(Self::ServerDefault),
            other => Err(format!(
                "unknown field selection '{other}', expected full, minimal or server_default"
            )),
        }
    }
}

#[cfg(test)]
mod field_tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_minimal_payload() {
        let payload = FieldSelection::Minimal.payload();
        let columns = payload["selectedColumns"].as_array().unwrap();
        assert_eq!(columns.len(), MINIMAL_COLUMNS.len());
        assert_eq!(columns[0], json!({"name": "id"}));
    }

    #[test]
    fn test_full_is_superset_of_minimal() {
        let full: HashSet<_> = FULL_COLUMNS.iter().collect();
        assert!(MINIMAL_COLUMNS.iter().all(|c| full.contains(c)));
        assert_eq!(full.len(), FULL_COLUMNS.len(), "no duplicate columns");
    }

    #[test]
    fn test_server_default_payload_is_empty_object() {
        assert_eq!(FieldSelection::ServerDefault.payload(), json!({}));
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!("full".parse::<FieldSelection>(), Ok(FieldSelection::Full));
        assert_eq!(
            "Minimal".parse::<FieldSelection>(),
            Ok(FieldSelection::Minimal)
        );
        assert_eq!(
            "server_default".parse::<FieldSelection>(),
            Ok(FieldSelection::ServerDefault)
        );
        assert!("everything".parse::<FieldSelection>().is_err());
    }
}
