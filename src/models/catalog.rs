use serde::{Deserialize, Serialize};

/// Prices are whole rubles.
pub type Rubles = u32;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: Rubles,
    pub duration: String,
    pub button_text: String,
    // Whether the service can be bought as a discounted multi-session course
    #[serde(default = "default_true")]
    pub course_eligible: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub services: Vec<Service>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProductVariant {
    pub size: String,
    pub price: Rubles,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub theme: String,
    pub description: String,
    pub active_components: Vec<String>,
    pub variants: Vec<ProductVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CosmeticProduct {
    pub fn variant(&self, size: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.size == size)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticTab {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub heading: String,
    pub description: String,
    pub products: Vec<CosmeticProduct>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticsBrand {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub tabs: Vec<CosmeticTab>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorZone {
    pub id: String,
    pub name: String,
    pub label: String,
    pub price: Rubles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Rubles>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorCategory {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub zones: Vec<CalculatorZone>,
}

/// The "full body" package and the individual zones it stands for.
///
/// The component list is maintained by hand next to the zone catalog; it is
/// only used to show how much the package saves compared with booking the
/// same zones one by one.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    pub zone_id: String,
    pub component_zone_ids: Vec<String>,
}

/// Raw catalog document as stored on disk.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub services: Vec<ServiceCategory>,
    pub cosmetics: Vec<CosmeticsBrand>,
    pub calculator: Vec<CalculatorCategory>,
    pub bundle: BundleConfig,
    #[serde(default)]
    pub gift_certificate_presets: Vec<Rubles>,
}
