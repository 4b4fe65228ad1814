use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::catalog::{CalculatorZone, Rubles};

/// Zone id -> selected flag, as kept by the calculator page.
///
/// The bundle zone and individual zones are never selected together;
/// [`Selection::toggle`] maintains that.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, bool>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, zone_id: &str) -> bool {
        self.0.get(zone_id).copied().unwrap_or(false)
    }

    /// Ids of every zone currently set to `true`.
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.as_str())
    }

    /// Flips `zone_id`. Toggling the bundle drops every individual zone,
    /// toggling an individual zone drops the bundle.
    pub fn toggle(&mut self, zone_id: &str, bundle_zone_id: &str) {
        let now_selected = !self.is_selected(zone_id);
        if zone_id == bundle_zone_id {
            self.0.clear();
        } else {
            self.0.remove(bundle_zone_id);
        }

        if now_selected {
            self.0.insert(zone_id.to_string(), true);
        } else {
            self.0.remove(zone_id);
        }
    }

    /// Brings a client-supplied mapping back to a consistent state: unset
    /// entries are dropped, and if the bundle is set the individual zones are.
    pub fn normalized(mut self, bundle_zone_id: &str) -> Self {
        self.0.retain(|_, selected| *selected);
        if self.is_selected(bundle_zone_id) {
            self.0.retain(|id, _| id == bundle_zone_id);
        }
        self
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Selection(iter.into_iter().map(|id| (id.into(), true)).collect())
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct QuoteFlags {
    #[serde(default)]
    pub is_first_visit: bool,
    #[serde(default)]
    pub is_for_men: bool,
}

/// Feedback shown under the selected zones while building a custom complex.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TierProgress {
    pub current_percent: u32,
    pub next_percent: Option<u32>,
    pub zones_needed: u32,
    /// Percentage of the way to the top tier, 0..=100.
    pub progress: u32,
    pub message: String,
    pub sub_message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalculationResult {
    pub active_zones: Vec<CalculatorZone>,
    /// Price before any discount (the bundle's list price in bundle mode).
    pub total: Rubles,
    pub count: u32,
    pub discount_percent: u32,
    pub discount_amount: Rubles,
    pub surcharge: Rubles,
    pub final_price: Rubles,
    pub is_full_body: bool,
    /// Sum of the bundle's component zones minus the bundle price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_savings: Option<Rubles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_progress: Option<TierProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_visit_banner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub selection: Selection,
    pub zone_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub selection: Selection,
    #[serde(flatten)]
    pub flags: QuoteFlags,
}
