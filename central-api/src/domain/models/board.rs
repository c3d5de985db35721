//! Fleet board aggregation: a station's vehicles grouped by category, then by
//! sub-station.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use super::{Station, SubStation, SubStationId, Vehicle, VehicleId, VehicleObservation};

/// Groups of one category, keyed by sub-station name and id. `None` sorts
/// first and holds vehicles parked at the station itself.
type CategoryGroups = BTreeMap<Option<(String, SubStationId)>, Vec<BoardVehicle>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardVehicle {
    pub vehicle: Vehicle,
    pub latest_observation: Option<VehicleObservation>,
}

/// Vehicles of one category housed at the same sub-station. `sub_station` is
/// `None` for vehicles parked at the station itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGroup {
    pub sub_station: Option<SubStation>,
    pub vehicles: Vec<BoardVehicle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCategory {
    pub category: String,
    pub groups: Vec<BoardGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetBoard {
    pub station: Station,
    pub categories: Vec<BoardCategory>,
}

impl FleetBoard {
    /// Build the board for `station`.
    ///
    /// Vehicles that do not belong to the station, or that reference a
    /// sub-station the station does not have, are left out.
    pub fn build(
        station: Station,
        sub_stations: Vec<SubStation>,
        vehicles: Vec<Vehicle>,
        mut latest_observations: HashMap<VehicleId, VehicleObservation>,
    ) -> Self {
        let sub_stations: HashMap<SubStationId, SubStation> = sub_stations
            .into_iter()
            .filter(|s| s.station_id == station.id)
            .map(|s| (s.id, s))
            .collect();

        let mut by_category: BTreeMap<String, CategoryGroups> = BTreeMap::new();

        for vehicle in vehicles {
            if vehicle.station_id != Some(station.id) {
                tracing::debug!(
                    vehicle_id = %vehicle.id,
                    "skipping vehicle without station relation"
                );
                continue;
            }

            let group_key = match vehicle.sub_station_id {
                None => None,
                Some(id) => match sub_stations.get(&id) {
                    Some(sub_station) => Some((sub_station.name.clone(), id)),
                    None => {
                        tracing::debug!(
                            vehicle_id = %vehicle.id,
                            sub_station_id = %id,
                            "skipping vehicle with unknown sub-station"
                        );
                        continue;
                    }
                },
            };

            let latest_observation = latest_observations.remove(&vehicle.id);
            by_category
                .entry(vehicle.category.trim().to_string())
                .or_default()
                .entry(group_key)
                .or_default()
                .push(BoardVehicle {
                    vehicle,
                    latest_observation,
                });
        }

        let categories = by_category
            .into_iter()
            .map(|(category, groups)| BoardCategory {
                category,
                groups: groups
                    .into_iter()
                    .map(|(key, vehicles)| BoardGroup {
                        sub_station: key.and_then(|(_, id)| sub_stations.get(&id).cloned()),
                        vehicles: vehicles
                            .into_iter()
                            .sorted_by(|a, b| a.vehicle.prefix.cmp(&b.vehicle.prefix))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            station,
            categories,
        }
    }

    pub fn vehicle_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.groups.iter())
            .map(|g| g.vehicles.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::models::{ObservationId, StationId};

    fn station(id: i32) -> Station {
        Station {
            id: StationId::new(id),
            name: format!("Station {id}"),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn sub_station(id: i32, station_id: i32, name: &str) -> SubStation {
        SubStation {
            id: SubStationId::new(id),
            station_id: StationId::new(station_id),
            name: name.to_string(),
        }
    }

    fn vehicle(id: i32, prefix: &str, category: &str) -> Vehicle {
        Vehicle::new(id, prefix, category, OffsetDateTime::UNIX_EPOCH).with_station(1)
    }

    #[test]
    fn groups_by_category_then_sub_station() {
        let board = FleetBoard::build(
            station(1),
            vec![sub_station(10, 1, "North"), sub_station(11, 1, "Airport")],
            vec![
                vehicle(1, "ABT-02", "Engine"),
                vehicle(2, "ABT-01", "Engine").with_sub_station(10),
                vehicle(3, "UR-01", "Ambulance").with_sub_station(11),
                vehicle(4, "ABT-03", "Engine").with_sub_station(10),
            ],
            HashMap::new(),
        );

        assert_eq!(board.vehicle_count(), 4);
        let categories: Vec<_> = board.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["Ambulance", "Engine"]);

        let engine = &board.categories[1];
        assert_eq!(engine.groups.len(), 2);
        assert_eq!(engine.groups[0].sub_station, None);
        let north = &engine.groups[1];
        assert_eq!(north.sub_station.as_ref().map(|s| s.name.as_str()), Some("North"));
        let prefixes: Vec<_> = north.vehicles.iter().map(|v| v.vehicle.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["ABT-01", "ABT-03"]);
    }

    #[test]
    fn filters_out_malformed_vehicles() {
        let orphan = Vehicle::new(5, "ASA-01", "Engine", OffsetDateTime::UNIX_EPOCH);
        let foreign =
            Vehicle::new(6, "ASA-02", "Engine", OffsetDateTime::UNIX_EPOCH).with_station(2);
        let dangling = vehicle(7, "ASA-03", "Engine").with_sub_station(99);
        let foreign_sub = vehicle(8, "ASA-04", "Engine").with_sub_station(20);

        let board = FleetBoard::build(
            station(1),
            vec![sub_station(20, 2, "Elsewhere")],
            vec![orphan, foreign, dangling, foreign_sub, vehicle(9, "ASA-05", "Engine")],
            HashMap::new(),
        );

        assert_eq!(board.vehicle_count(), 1);
        assert_eq!(board.categories[0].groups[0].vehicles[0].vehicle.prefix, "ASA-05");
    }

    #[test]
    fn attaches_latest_observation_badge() {
        let observation = VehicleObservation {
            id: ObservationId::new(1),
            vehicle_id: VehicleId::new(1),
            controller_id: None,
            content: "Flat tyre".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let board = FleetBoard::build(
            station(1),
            vec![],
            vec![vehicle(1, "ABT-01", "Engine"), vehicle(2, "ABT-02", "Engine")],
            HashMap::from([(VehicleId::new(1), observation.clone())]),
        );

        let vehicles = &board.categories[0].groups[0].vehicles;
        assert_eq!(vehicles[0].latest_observation, Some(observation));
        assert_eq!(vehicles[1].latest_observation, None);
    }
}
