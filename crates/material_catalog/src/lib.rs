mod table;

use std::borrow::Cow;

use serde::Serialize;

pub use table::BUILTIN_MATERIALS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialType {
    Bioplastic,
    Recycled,
    BioBased,
    Cellulose,
}

impl MaterialType {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialType::Bioplastic => "bioplastic",
            MaterialType::Recycled => "recycled",
            MaterialType::BioBased => "bio-based",
            MaterialType::Cellulose => "cellulose",
        }
    }
}

/// Physical properties. Units: MPa, %, °C, g/cm³, cc/m²·day·atm, g/m²·day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalProperties {
    pub tensile_strength: f64,
    pub elongation: f64,
    pub melting_point: f64,
    pub density: f64,
    pub oxygen_permeability: f64,
    pub water_vapor_permeability: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sustainability {
    pub biodegradable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compostable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recyclable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biomass_content: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recycled_content: Option<f64>,
    /// kg-CO2 per kg of resin.
    pub carbon_footprint: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CatalogMaterial {
    pub id: &'static str,
    pub formula: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub properties: PhysicalProperties,
    pub sustainability: Sustainability,
}

impl CatalogMaterial {
    pub fn biomass_content(&self) -> f64 {
        self.sustainability.biomass_content.unwrap_or(0.0)
    }

    pub fn is_recyclable(&self) -> bool {
        self.sustainability.recyclable.unwrap_or(false)
    }

    pub fn is_compostable(&self) -> bool {
        self.sustainability.compostable.unwrap_or(false)
    }
}

/// Read-only candidate set. `builtin()` borrows the process-wide table.
#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    materials: Cow<'static, [CatalogMaterial]>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaterialCatalog {
    pub fn builtin() -> Self {
        Self {
            materials: Cow::Borrowed(BUILTIN_MATERIALS),
        }
    }

    pub fn from_materials(materials: Vec<CatalogMaterial>) -> Self {
        Self {
            materials: Cow::Owned(materials),
        }
    }

    pub fn empty() -> Self {
        Self::from_materials(Vec::new())
    }

    pub fn materials(&self) -> &[CatalogMaterial] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&CatalogMaterial> {
        let key = key.trim();
        self.materials
            .iter()
            .find(|m| m.id.eq_ignore_ascii_case(key) || m.name.eq_ignore_ascii_case(key))
    }
}
