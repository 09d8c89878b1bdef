//! Raw record → Item mapping
//!
//! Field names differ between service generations (`tiName` vs `name`,
//! `cmbPosition` vs `cmbUPosition`), so every logical field resolves through
//! an ordered alias list and the first non-null wire value wins.

use super::item::Item;
use super::value::RawRecord;
use crate::error::{Error, Result};

// ============================================================================
// Wire field aliases
// ============================================================================

pub(crate) const ID: &[&str] = &["id", "itemId", "tiId"];
pub(crate) const NAME: &[&str] = &["tiName", "name", "itemName"];
pub(crate) const CLASS: &[&str] = &["tiClass", "class", "itemClass"];
pub(crate) const SUBCLASS: &[&str] = &["tiSubclass", "subclass"];
pub(crate) const STATUS: &[&str] = &["cmbStatus", "status"];
pub(crate) const LOCATION: &[&str] = &["cmbLocation", "location"];

const CABINET: &[&str] = &["cmbCabinet", "cabinet"];
const CABINET_ID: &[&str] = &["cmbCabinetId"];
const POSITION: &[&str] = &["cmbUPosition", "cmbPosition", "position"];
const HEIGHT: &[&str] = &["tiRUs", "height"];
const PLANT_BAY: &[&str] = &["cmbPlantBay"];
const ROW_LABEL: &[&str] = &["cmbRowLabel"];
const ROW_POSITION: &[&str] = &["cmbRowPosition"];
const FLOOR_NAME: &[&str] = &["tiFloorName"];
const FLOOR_NODE_CODE: &[&str] = &["tiFloorNodeCode"];
const ROOM_NAME: &[&str] = &["tiRoomName"];
const ROOM_NODE_CODE: &[&str] = &["tiRoomNodeCode"];

const MAKE: &[&str] = &["cmbMake", "make"];
const MODEL: &[&str] = &["cmbModel", "model"];
const SERIAL_NUMBER: &[&str] = &["tiSerialNumber", "serialNumber"];
const ASSET_TAG: &[&str] = &["tiAssetTag", "assetTag"];
const PART_NUMBER: &[&str] = &["tiPartNumber"];
const FORM_FACTOR: &[&str] = &["tiFormFactor"];
const MOUNTING: &[&str] = &["tiMounting"];
const WIDTH: &[&str] = &["tiWidth"];
const DEPTH: &[&str] = &["tiDepth"];
const WEIGHT: &[&str] = &["tiWeight"];

const ORIGINAL_POWER: &[&str] = &["tiItemOriginalPower", "originalPower", "power"];
const EFFECTIVE_POWER: &[&str] = &["tiEffectivePower", "effectivePower"];
const POTENTIAL_POWER: &[&str] = &["tiPotentialPower", "potentialPower"];
const POWER_CAPACITY: &[&str] = &["tiPowerCapacity"];
const PS_REDUNDANCY: &[&str] = &["tiPSRedundancy"];
const AUTO_POWER_BUDGET: &[&str] = &["chkItemAutoPowerBudget"];
const DERATE_AMPS: &[&str] = &["chkDerateAmps"];
const BUDGET_STATUS: &[&str] = &["tiItemBudgetStatus"];

const PURCHASE_PRICE: &[&str] = &["tiPurchasePrice"];
const CONTRACT_AMOUNT: &[&str] = &["tiContractAmount"];
const PO_NUMBER: &[&str] = &["tiPONumber"];

const INTEGRATION_STATUS: &[&str] = &["tiIntegrationStatus"];
const VMWARE_INTEGRATION_STATUS: &[&str] = &["tiVMwareIntegrationStatus"];
const CMDB_INTEGRATION_STATUS: &[&str] = &["tiCmdbIntegrationStatus"];

const IP_ADDRESSES: &[&str] = &["ipAddresses"];
const IP_ADDRESS_PORT_NAME: &[&str] = &["ipAddressPortName"];
const FREE_DATA_PORTS: &[&str] = &["tifreeDataPortCount"];
const FREE_POWER_PORTS: &[&str] = &["tifreePowerPortCount"];

const USERS: &[&str] = &["tiUsers"];
const RAM: &[&str] = &["tiRAM"];
const PROCESSES: &[&str] = &["tiProcesses"];
const CPU_QUANTITY: &[&str] = &["tiCpuQuantity"];
const CPU_TYPE: &[&str] = &["tiCpuType"];

const PRIMARY_CONTACT: &[&str] = &["tiCustomField_Primary Contact", "primaryContact"];
const ADMIN_TEAM: &[&str] = &["cmbSystemAdminTeam", "systemAdminTeam"];
const SYSTEM_ADMIN: &[&str] = &["cmbSystemAdmin"];
const CUSTOMER: &[&str] = &["cmbCustomer"];
const NOTES: &[&str] = &["tiNotes"];
const CONTACT_TEAM_NAME: &[&str] = &["tiCustomField_Contact Team Name"];
const AUDIT_REMARKS: &[&str] = &["tiCustomField_Audit Remarks"];
const AUDIT_BY: &[&str] = &["tiCustomField_Audit By"];
const ASSET_STATUS: &[&str] = &["tiCustomField_Asset Status"];
const PNT_IT: &[&str] = &["tiCustomField_PNT/IT"];

const INSTALL_DATE: &[&str] = &["installationDate", "installDate"];
const LAST_SERVICE_DATE: &[&str] = &["lastServiceDate"];
const CONTRACT_END_DATE: &[&str] = &["contractEndDate"];
const PURCHASE_DATE: &[&str] = &["purchaseDate"];
const PLANNED_DECOMM_DATE: &[&str] = &["tiPlannedDecommDate"];
const AUDIT_DATE: &[&str] = &["tiCustomField_Audit Date"];
const WARRANTY_EXPIRATION_DATE: &[&str] = &["tiCustomField_Warranty Expiration Date"];
const LAST_UPDATED: &[&str] = &["lastUpdatedOn", "lastUpdated"];

/// Converts raw wire records into [`Item`]s.
///
/// Only the identifier is required: a record whose id is absent or empty is
/// rejected with [`Error::Mapping`]. Name, class, status and location are
/// accepted empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMapper;

impl RecordMapper {
    /// Create a new mapper
    pub fn new() -> Self {
        Self
    }

    /// Map one raw record
    pub fn map(&self, record: &RawRecord) -> Result<Item> {
        let id = record.first(ID).as_string();
        if id.trim().is_empty() {
            return Err(Error::mapping("id", "missing or empty identifier"));
        }

        let string = |aliases: &[&str]| record.first(aliases).as_string();
        let float = |aliases: &[&str]| record.first(aliases).as_f64();
        let int = |aliases: &[&str]| record.first(aliases).as_i64();
        let flag = |aliases: &[&str]| record.first(aliases).as_bool();
        let date = |aliases: &[&str]| record.first(aliases).as_datetime();
        let optional = |aliases: &[&str]| record.first(aliases).as_non_empty();

        Ok(Item {
            id,
            name: string(NAME),
            item_class: string(CLASS),
            subclass: string(SUBCLASS),
            status: string(STATUS),
            location: string(LOCATION),

            cabinet: string(CABINET),
            cabinet_id: string(CABINET_ID),
            position: string(POSITION),
            height: int(HEIGHT),
            plant_bay: string(PLANT_BAY),
            row_label: string(ROW_LABEL),
            row_position: string(ROW_POSITION),
            floor_name: string(FLOOR_NAME),
            floor_node_code: string(FLOOR_NODE_CODE),
            room_name: string(ROOM_NAME),
            room_node_code: string(ROOM_NODE_CODE),

            make: string(MAKE),
            model: string(MODEL),
            serial_number: string(SERIAL_NUMBER),
            asset_tag: string(ASSET_TAG),
            part_number: string(PART_NUMBER),
            form_factor: string(FORM_FACTOR),
            mounting: string(MOUNTING),
            width: float(WIDTH),
            depth: float(DEPTH),
            weight: float(WEIGHT),

            original_power: float(ORIGINAL_POWER),
            effective_power: float(EFFECTIVE_POWER),
            potential_power: float(POTENTIAL_POWER),
            power_capacity: float(POWER_CAPACITY),
            ps_redundancy: string(PS_REDUNDANCY),
            auto_power_budget: flag(AUTO_POWER_BUDGET),
            derate_amps: flag(DERATE_AMPS),
            budget_status: string(BUDGET_STATUS),

            purchase_price: float(PURCHASE_PRICE),
            contract_amount: float(CONTRACT_AMOUNT),
            po_number: string(PO_NUMBER),

            integration_status: string(INTEGRATION_STATUS),
            vmware_integration_status: string(VMWARE_INTEGRATION_STATUS),
            cmdb_integration_status: string(CMDB_INTEGRATION_STATUS),

            ip_addresses: string(IP_ADDRESSES),
            ip_address_port_name: string(IP_ADDRESS_PORT_NAME),
            free_data_port_count: int(FREE_DATA_PORTS),
            free_power_port_count: int(FREE_POWER_PORTS),

            users: int(USERS),
            ram: int(RAM),
            processes: int(PROCESSES),
            cpu_quantity: int(CPU_QUANTITY),
            cpu_type: string(CPU_TYPE),

            primary_contact: string(PRIMARY_CONTACT),
            admin_team: string(ADMIN_TEAM),
            system_admin: string(SYSTEM_ADMIN),
            customer: string(CUSTOMER),
            notes: string(NOTES),
            contact_team_name: optional(CONTACT_TEAM_NAME),
            audit_remarks: optional(AUDIT_REMARKS),
            audit_by: optional(AUDIT_BY),
            asset_status: optional(ASSET_STATUS),
            pnt_it: optional(PNT_IT),

            install_date: date(INSTALL_DATE),
            last_service_date: date(LAST_SERVICE_DATE),
            contract_end_date: date(CONTRACT_END_DATE),
            purchase_date: date(PURCHASE_DATE),
            planned_decommission_date: date(PLANNED_DECOMM_DATE),
            audit_date: date(AUDIT_DATE),
            warranty_expiration_date: date(WARRANTY_EXPIRATION_DATE),
            last_updated_at: date(LAST_UPDATED),
        })
    }
}
