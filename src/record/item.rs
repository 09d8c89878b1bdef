//! Normalized inventory item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hardware asset tracked by DCTrack, after normalization.
///
/// Identity fields are always present (possibly empty, except `id`);
/// numeric fields default to zero and dates to `None` when the service
/// omits them or sends something unparsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    // Identity
    pub id: String,
    pub name: String,
    pub item_class: String,
    pub subclass: String,
    pub status: String,
    pub location: String,

    // Placement
    pub cabinet: String,
    pub cabinet_id: String,
    pub position: String,
    pub height: i64,
    pub plant_bay: String,
    pub row_label: String,
    pub row_position: String,
    pub floor_name: String,
    pub floor_node_code: String,
    pub room_name: String,
    pub room_node_code: String,

    // Asset
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub asset_tag: String,
    pub part_number: String,
    pub form_factor: String,
    pub mounting: String,
    pub width: f64,
    pub depth: f64,
    pub weight: f64,

    // Power
    pub original_power: f64,
    pub effective_power: f64,
    pub potential_power: f64,
    pub power_capacity: f64,
    pub ps_redundancy: String,
    pub auto_power_budget: bool,
    pub derate_amps: bool,
    pub budget_status: String,

    // Cost
    pub purchase_price: f64,
    pub contract_amount: f64,
    pub po_number: String,

    // Integration
    pub integration_status: String,
    pub vmware_integration_status: String,
    pub cmdb_integration_status: String,

    // Network
    pub ip_addresses: String,
    pub ip_address_port_name: String,
    pub free_data_port_count: i64,
    pub free_power_port_count: i64,

    // Technical
    pub users: i64,
    pub ram: i64,
    pub processes: i64,
    pub cpu_quantity: i64,
    pub cpu_type: String,

    // Administrative
    pub primary_contact: String,
    pub admin_team: String,
    pub system_admin: String,
    pub customer: String,
    pub notes: String,
    pub contact_team_name: Option<String>,
    pub audit_remarks: Option<String>,
    pub audit_by: Option<String>,
    pub asset_status: Option<String>,
    pub pnt_it: Option<String>,

    // Dates
    pub install_date: Option<DateTime<Utc>>,
    pub last_service_date: Option<DateTime<Utc>>,
    pub contract_end_date: Option<DateTime<Utc>>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub planned_decommission_date: Option<DateTime<Utc>>,
    pub audit_date: Option<DateTime<Utc>>,
    pub warranty_expiration_date: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Whether the service reported a nameplate power figure
    pub fn has_power(&self) -> bool {
        self.original_power > 0.0
    }
}
