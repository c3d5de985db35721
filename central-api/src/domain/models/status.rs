//! Operational vehicle statuses and the fixed status cycle.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Operational status of a vehicle.
///
/// The canonical (stored) form is snake_case, e.g. `en_route`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    EnRoute,
    OnScene,
    EnRouteToHospital,
    ReturningToBase,
    Down,
    Reserve,
}

/// Display vocabulary for status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Pt,
}

impl VehicleStatus {
    /// Human-readable label in the given locale.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Available) => "Available",
            (Locale::En, Self::EnRoute) => "En Route",
            (Locale::En, Self::OnScene) => "On Scene",
            (Locale::En, Self::EnRouteToHospital) => "En Route to Hospital",
            (Locale::En, Self::ReturningToBase) => "Returning to Base",
            (Locale::En, Self::Down) => "Down",
            (Locale::En, Self::Reserve) => "Reserve",
            (Locale::Pt, Self::Available) => "Disponível",
            (Locale::Pt, Self::EnRoute) => "QTI",
            (Locale::Pt, Self::OnScene) => "Local",
            (Locale::Pt, Self::EnRouteToHospital) => "QTI PS",
            (Locale::Pt, Self::ReturningToBase) => "Regresso",
            (Locale::Pt, Self::Down) => "Baixada",
            (Locale::Pt, Self::Reserve) => "Reserva",
        }
    }

    /// Reverse of [`VehicleStatus::label`]. Matching is exact.
    pub fn from_label(locale: Locale, label: &str) -> Option<Self> {
        Self::iter().find(|status| status.label(locale) == label)
    }

    /// Parse a canonical value or a label from any locale.
    pub fn parse_any(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        raw.parse::<Self>()
            .ok()
            .or_else(|| Locale::iter().find_map(|locale| Self::from_label(locale, raw)))
    }

    /// Whether the status is one of the lowered states outside the cycle.
    pub fn is_lowered(&self) -> bool {
        matches!(self, Self::Down | Self::Reserve)
    }
}

/// Strict total order over the statuses a vehicle advances through.
///
/// `Down` and `Reserve` are not part of the cycle: they are reached only through
/// explicit actions, and advancing from them restarts the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCycle {
    order: &'static [VehicleStatus],
}

impl StatusCycle {
    pub const ORDER: [VehicleStatus; 5] = [
        VehicleStatus::Available,
        VehicleStatus::EnRoute,
        VehicleStatus::OnScene,
        VehicleStatus::EnRouteToHospital,
        VehicleStatus::ReturningToBase,
    ];

    pub fn order(&self) -> &'static [VehicleStatus] {
        self.order
    }

    /// First state of the cycle; also the `restore` target.
    pub fn first(&self) -> VehicleStatus {
        self.order[0]
    }

    pub fn position(&self, status: VehicleStatus) -> Option<usize> {
        self.order.iter().position(|s| *s == status)
    }

    /// Next status in the cycle, wrapping around. Statuses outside the cycle
    /// restart at the first element.
    pub fn next(&self, current: VehicleStatus) -> VehicleStatus {
        match self.position(current) {
            Some(index) => self.order[(index + 1) % self.order.len()],
            None => self.first(),
        }
    }

    /// Like [`StatusCycle::next`] but for an unvalidated value. Anything that
    /// does not parse resets to the first element instead of failing.
    pub fn next_from_raw(&self, raw: &str) -> VehicleStatus {
        match VehicleStatus::parse_any(raw) {
            Some(status) => self.next(status),
            None => self.first(),
        }
    }
}

impl Default for StatusCycle {
    fn default() -> Self {
        Self {
            order: &Self::ORDER,
        }
    }
}

/// One row of the status vocabulary table exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusVocabularyEntry {
    pub status: VehicleStatus,
    pub label_en: &'static str,
    pub label_pt: &'static str,
    /// Position in the cycle, `None` for lowered states.
    pub cycle_position: Option<usize>,
    pub lowered: bool,
}

pub fn status_vocabulary(cycle: &StatusCycle) -> Vec<StatusVocabularyEntry> {
    VehicleStatus::iter()
        .map(|status| StatusVocabularyEntry {
            status,
            label_en: status.label(Locale::En),
            label_pt: status.label(Locale::Pt),
            cycle_position: cycle.position(status),
            lowered: status.is_lowered(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn next_advances_in_order_and_wraps() {
        let cycle = StatusCycle::default();
        let order = cycle.order();

        for (index, status) in order.iter().enumerate() {
            assert_eq!(cycle.next(*status), order[(index + 1) % order.len()]);
        }
        assert_eq!(
            cycle.next(VehicleStatus::ReturningToBase),
            VehicleStatus::Available
        );
    }

    #[test]
    fn lowered_states_restart_the_cycle() {
        let cycle = StatusCycle::default();

        assert_eq!(cycle.next(VehicleStatus::Down), VehicleStatus::Available);
        assert_eq!(cycle.next(VehicleStatus::Reserve), VehicleStatus::Available);
    }

    #[test]
    fn unknown_raw_values_reset_to_first() {
        let cycle = StatusCycle::default();

        assert_eq!(cycle.next_from_raw("parked"), VehicleStatus::Available);
        assert_eq!(cycle.next_from_raw(""), VehicleStatus::Available);
        assert_eq!(cycle.next_from_raw("Baixada"), VehicleStatus::Available);
        assert_eq!(cycle.next_from_raw("QTI"), VehicleStatus::OnScene);
        assert_eq!(cycle.next_from_raw("on_scene"), VehicleStatus::EnRouteToHospital);
    }

    #[test]
    fn five_advances_return_to_available() {
        let cycle = StatusCycle::default();
        let mut status = VehicleStatus::Available;
        let mut seen = Vec::new();

        for _ in 0..5 {
            status = cycle.next(status);
            seen.push(status);
        }

        assert_eq!(
            seen,
            vec![
                VehicleStatus::EnRoute,
                VehicleStatus::OnScene,
                VehicleStatus::EnRouteToHospital,
                VehicleStatus::ReturningToBase,
                VehicleStatus::Available,
            ]
        );
    }

    #[test]
    fn labels_are_a_bijection_per_locale() {
        for locale in Locale::iter() {
            let labels: HashSet<_> = VehicleStatus::iter().map(|s| s.label(locale)).collect();
            assert_eq!(labels.len(), VehicleStatus::iter().count());

            for status in VehicleStatus::iter() {
                assert_eq!(
                    VehicleStatus::from_label(locale, status.label(locale)),
                    Some(status)
                );
            }
        }
        assert_eq!(VehicleStatus::from_label(Locale::Pt, "Available"), None);
    }

    #[test]
    fn canonical_form_roundtrips_through_strum() {
        assert_eq!(VehicleStatus::EnRouteToHospital.to_string(), "en_route_to_hospital");
        assert_eq!(
            "returning_to_base".parse::<VehicleStatus>().ok(),
            Some(VehicleStatus::ReturningToBase)
        );
    }

    #[test]
    fn vocabulary_lists_cycle_positions() {
        let vocabulary = status_vocabulary(&StatusCycle::default());

        assert_eq!(vocabulary.len(), 7);
        let down = vocabulary
            .iter()
            .find(|e| e.status == VehicleStatus::Down)
            .unwrap();
        assert_eq!(down.cycle_position, None);
        assert!(down.lowered);
        assert!(!vocabulary[0].lowered);
        assert_eq!(down.label_pt, "Baixada");
        assert_eq!(vocabulary[0].cycle_position, Some(0));
    }
}
