use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{ApiError, ApiResult};
use crate::models::catalog::{
    CalculatorCategory, CalculatorZone, CatalogDocument, CosmeticProduct, CosmeticsBrand,
    Rubles, Service, ServiceCategory,
};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only catalog shared by every request.
#[derive(Debug, Clone)]
pub struct Catalog {
    document: CatalogDocument,
    zone_index: HashMap<String, CalculatorZone>,
    // Bundle components that actually exist in the zone catalog
    bundle_components: Vec<String>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> ApiResult<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Loads `path` if given, otherwise the embedded catalog.
    pub async fn load(path: Option<&Path>) -> ApiResult<Self> {
        match path {
            Some(path) => {
                log::info!("Loading catalog from {}", path.display());
                let raw = tokio::fs::read_to_string(path).await?;
                Self::from_json(&raw)
            }
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> ApiResult<Self> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_document(document: CatalogDocument) -> ApiResult<Self> {
        let mut zone_index = HashMap::new();
        for zone in document.calculator.iter().flat_map(|c| c.zones.iter()) {
            if zone_index.insert(zone.id.clone(), zone.clone()).is_some() {
                return Err(ApiError::Catalog(format!("duplicate zone id '{}'", zone.id)));
            }
        }

        let mut service_ids = HashSet::new();
        for service in document.services.iter().flat_map(|c| c.services.iter()) {
            if !service_ids.insert(service.id.as_str()) {
                return Err(ApiError::Catalog(format!(
                    "duplicate service id '{}'",
                    service.id
                )));
            }
        }

        let bundle_id = &document.bundle.zone_id;
        match zone_index.get(bundle_id) {
            Some(zone) if zone.original_price.is_some_and(|list| list >= zone.price) => {}
            Some(_) => {
                return Err(ApiError::Catalog(format!(
                    "bundle zone '{}' needs an original price not below its price",
                    bundle_id
                )))
            }
            None => {
                return Err(ApiError::Catalog(format!(
                    "bundle zone '{}' is not in the calculator catalog",
                    bundle_id
                )))
            }
        }

        let bundle_components = document
            .bundle
            .component_zone_ids
            .iter()
            .filter(|id| {
                let known = zone_index.contains_key(id.as_str()) && *id != bundle_id;
                if !known {
                    log::warn!("Bundle component '{}' does not match any zone, skipped", id);
                }
                known
            })
            .cloned()
            .collect();

        Ok(Self {
            document,
            zone_index,
            bundle_components,
        })
    }

    pub fn service_categories(&self) -> &[ServiceCategory] {
        &self.document.services
    }

    pub fn cosmetics(&self) -> &[CosmeticsBrand] {
        &self.document.cosmetics
    }

    pub fn calculator_categories(&self) -> &[CalculatorCategory] {
        &self.document.calculator
    }

    pub fn gift_certificate_presets(&self) -> &[Rubles] {
        &self.document.gift_certificate_presets
    }

    pub fn zone(&self, id: &str) -> Option<&CalculatorZone> {
        self.zone_index.get(id)
    }

    /// Zones in catalog order.
    pub fn zones(&self) -> impl Iterator<Item = &CalculatorZone> {
        self.document.calculator.iter().flat_map(|c| c.zones.iter())
    }

    pub fn bundle_zone_id(&self) -> &str {
        &self.document.bundle.zone_id
    }

    pub fn bundle_zone(&self) -> &CalculatorZone {
        // Presence checked in from_document
        &self.zone_index[&self.document.bundle.zone_id]
    }

    /// Sum of the individual prices of the zones the bundle stands for.
    pub fn bundle_components_price(&self) -> Rubles {
        self.bundle_components
            .iter()
            .filter_map(|id| self.zone(id))
            .map(|zone| zone.price)
            .sum()
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.document
            .services
            .iter()
            .flat_map(|c| c.services.iter())
            .find(|s| s.id == id)
    }

    pub fn product(&self, brand_id: &str, product_name: &str) -> Option<&CosmeticProduct> {
        self.document
            .cosmetics
            .iter()
            .filter(|brand| brand.id == brand_id)
            .flat_map(|brand| brand.tabs.iter())
            .flat_map(|tab| tab.products.iter())
            .find(|p| p.name == product_name)
    }
}
