//! Aggregator - Derived Traffic View
//!
//! Pure transform from a raw stats snapshot to the display-ready figures.
//! No side effects, no state.

use crate::models::VehicleStats;
use serde::Serialize;

/// Display-ready figures derived from one stats snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficView {
    /// Sum of the four category counts
    pub total: u64,
    /// car + truck + bus
    pub automobiles: u64,
    /// motorcycle
    pub motorcycles: u64,
    /// Vehicles per minute, as supplied upstream
    pub flow_rate: u64,
    /// Unique vehicles, as supplied upstream
    pub total_vehicles: u64,
}

/// Derive the display view from a raw snapshot.
///
/// `total` is always recomputed from the category counts; the upstream
/// unique-vehicle figure is passed through separately and never feeds the
/// breakdown, so the chart buckets stay internally consistent.
pub fn aggregate(stats: &VehicleStats) -> TrafficView {
    TrafficView {
        total: stats.car + stats.motorcycle + stats.bus + stats.truck,
        automobiles: stats.car + stats.truck + stats.bus,
        motorcycles: stats.motorcycle,
        flow_rate: stats.flow_rate,
        total_vehicles: stats.total_vehicles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(car: u64, motorcycle: u64, bus: u64, truck: u64) -> VehicleStats {
        VehicleStats {
            car,
            motorcycle,
            bus,
            truck,
            ..Default::default()
        }
    }

    #[test]
    fn test_total_is_sum_of_categories() {
        let view = aggregate(&counts(2, 5, 0, 1));
        assert_eq!(view.total, 8);
        assert_eq!(view.automobiles, 3);
        assert_eq!(view.motorcycles, 5);
    }

    #[test]
    fn test_buckets_partition_all_categories() {
        let view = aggregate(&counts(7, 3, 2, 4));
        assert_eq!(view.automobiles + view.motorcycles, view.total);
    }

    #[test]
    fn test_upstream_total_never_feeds_the_breakdown() {
        let mut raw = counts(1, 1, 1, 1);
        raw.total_vehicles = 999;
        let view = aggregate(&raw);
        assert_eq!(view.total, 4);
        assert_eq!(view.total_vehicles, 999);
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let view = aggregate(&VehicleStats::default());
        assert_eq!(view.total, 0);
        assert_eq!(view.flow_rate, 0);
        assert_eq!(view.total_vehicles, 0);
    }
}
