//! Power and vendor roll-ups over fetched items

use crate::record::Item;
use serde::Serialize;
use std::collections::HashMap;

/// Power statistics for a set of items. Watts throughout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerSummary {
    /// What the items were selected by, usually a location
    pub location: String,
    /// Items considered
    pub asset_count: usize,
    /// Items reporting power above zero
    pub powered_count: usize,
    /// Sum over powered items
    pub total_power: f64,
    /// Mean over powered items, zero when none
    pub average_power: f64,
    /// Largest reading, zero when none
    pub max_power: f64,
    /// Smallest positive reading
    pub min_power: Option<f64>,
    /// Total spread over every item, powered or not
    pub density: f64,
}

impl PowerSummary {
    /// Summarize `items` using their original power figure
    pub fn from_items(location: impl Into<String>, items: &[Item]) -> Self {
        let powered: Vec<f64> = items
            .iter()
            .filter(|item| item.has_power())
            .map(|item| item.original_power)
            .collect();

        let total_power: f64 = powered.iter().sum();
        let average_power = if powered.is_empty() {
            0.0
        } else {
            total_power / powered.len() as f64
        };
        let density = if items.is_empty() {
            0.0
        } else {
            total_power / items.len() as f64
        };

        Self {
            location: location.into(),
            asset_count: items.len(),
            powered_count: powered.len(),
            total_power,
            average_power,
            max_power: powered.iter().copied().fold(0.0, f64::max),
            min_power: powered.iter().copied().reduce(f64::min),
            density,
        }
    }

    /// Total in kilowatts
    pub fn total_kw(&self) -> f64 {
        self.total_power / 1000.0
    }
}

/// One manufacturer's share of a set of items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorShare {
    /// Manufacturer name
    pub make: String,
    /// Items from this manufacturer
    pub count: usize,
    /// Share of all items, 0 to 100
    pub percentage: f64,
}

/// Count items per manufacturer, most common first, ties by name.
///
/// Items without a make are counted in the denominator only.
pub fn vendor_distribution(items: &[Item]) -> Vec<VendorShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items.iter().filter(|item| !item.make.is_empty()) {
        *counts.entry(item.make.as_str()).or_default() += 1;
    }

    let total = items.len() as f64;
    let mut shares: Vec<VendorShare> = counts
        .into_iter()
        .map(|(make, count)| VendorShare {
            make: make.to_string(),
            count,
            percentage: count as f64 * 100.0 / total,
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.make.cmp(&b.make)));
    shares
}

#[cfg(test)]
mod summary_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str, make: &str, power: f64) -> Item {
        Item {
            id: id.to_string(),
            make: make.to_string(),
            original_power: power,
            ..Item::default()
        }
    }

    #[test]
    fn test_power_summary() {
        let items = vec![
            item("1", "Dell", 500.0),
            item("2", "Dell", 300.0),
            item("3", "HPE", 0.0),
            item("4", "Cisco", 200.0),
        ];

        let summary = PowerSummary::from_items("DC1", &items);
        assert_eq!(summary.asset_count, 4);
        assert_eq!(summary.powered_count, 3);
        assert_eq!(summary.total_power, 1000.0);
        assert!((summary.average_power - 333.333).abs() < 0.001);
        assert_eq!(summary.max_power, 500.0);
        assert_eq!(summary.min_power, Some(200.0));
        assert_eq!(summary.density, 250.0);
        assert_eq!(summary.total_kw(), 1.0);
    }

    #[test]
    fn test_power_summary_without_power() {
        let summary = PowerSummary::from_items("DC1", &[item("1", "Dell", 0.0)]);
        assert_eq!(summary.powered_count, 0);
        assert_eq!(summary.average_power, 0.0);
        assert_eq!(summary.max_power, 0.0);
        assert_eq!(summary.min_power, None);
        assert_eq!(summary.density, 0.0);

        let empty = PowerSummary::from_items("none", &[]);
        assert_eq!(empty.asset_count, 0);
        assert_eq!(empty.density, 0.0);
    }

    #[test]
    fn test_vendor_distribution_order() {
        let items = vec![
            item("1", "HPE", 0.0),
            item("2", "Dell", 0.0),
            item("3", "Dell", 0.0),
            item("4", "Cisco", 0.0),
            item("5", "", 0.0),
        ];

        let shares = vendor_distribution(&items);
        let order: Vec<(&str, usize)> = shares.iter().map(|s| (s.make.as_str(), s.count)).collect();
        assert_eq!(order, vec![("Dell", 2), ("Cisco", 1), ("HPE", 1)]);
        assert_eq!(shares[0].percentage, 40.0);
    }

    #[test]
    fn test_vendor_distribution_empty() {
        assert!(vendor_distribution(&[]).is_empty());
    }
}
