use crate::{CatalogMaterial, MaterialType, PhysicalProperties, Sustainability};

// Representative film-grade values; permeabilities are normalized to 25 µm.
pub static BUILTIN_MATERIALS: &[CatalogMaterial] = &[
    CatalogMaterial {
        id: "pla",
        formula: "(C3H4O2)n",
        name: "PLA",
        material_type: MaterialType::Bioplastic,
        properties: PhysicalProperties {
            tensile_strength: 65.0,
            elongation: 6.0,
            melting_point: 170.0,
            density: 1.24,
            oxygen_permeability: 550.0,
            water_vapor_permeability: 250.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: Some(true),
            recyclable: Some(false),
            biomass_content: Some(100.0),
            recycled_content: None,
            carbon_footprint: 0.8,
        },
    },
    CatalogMaterial {
        id: "phbh",
        formula: "(C4H6O2)n-co-(C6H10O2)m",
        name: "PHBH",
        material_type: MaterialType::Bioplastic,
        properties: PhysicalProperties {
            tensile_strength: 25.0,
            elongation: 10.0,
            melting_point: 145.0,
            density: 1.20,
            oxygen_permeability: 120.0,
            water_vapor_permeability: 60.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: Some(true),
            recyclable: Some(false),
            biomass_content: Some(100.0),
            recycled_content: None,
            carbon_footprint: 1.1,
        },
    },
    CatalogMaterial {
        id: "pbs",
        formula: "(C8H12O4)n",
        name: "PBS",
        material_type: MaterialType::BioBased,
        properties: PhysicalProperties {
            tensile_strength: 40.0,
            elongation: 300.0,
            melting_point: 115.0,
            density: 1.26,
            oxygen_permeability: 900.0,
            water_vapor_permeability: 120.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: Some(true),
            recyclable: Some(false),
            biomass_content: Some(50.0),
            recycled_content: None,
            carbon_footprint: 1.5,
        },
    },
    CatalogMaterial {
        id: "pbat",
        formula: "(C20H20O8)n",
        name: "PBAT",
        material_type: MaterialType::Bioplastic,
        properties: PhysicalProperties {
            tensile_strength: 22.0,
            elongation: 700.0,
            melting_point: 120.0,
            density: 1.26,
            oxygen_permeability: 1400.0,
            water_vapor_permeability: 550.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: Some(true),
            recyclable: Some(false),
            biomass_content: None,
            recycled_content: None,
            carbon_footprint: 2.2,
        },
    },
    CatalogMaterial {
        id: "pga",
        formula: "(C2H2O2)n",
        name: "PGA",
        material_type: MaterialType::Bioplastic,
        properties: PhysicalProperties {
            tensile_strength: 110.0,
            elongation: 15.0,
            melting_point: 225.0,
            density: 1.50,
            oxygen_permeability: 0.5,
            water_vapor_permeability: 2.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: Some(true),
            recyclable: Some(false),
            biomass_content: None,
            recycled_content: None,
            carbon_footprint: 1.9,
        },
    },
    CatalogMaterial {
        id: "pef",
        formula: "(C8H6O5)n",
        name: "PEF",
        material_type: MaterialType::BioBased,
        properties: PhysicalProperties {
            tensile_strength: 70.0,
            elongation: 4.0,
            melting_point: 235.0,
            density: 1.43,
            oxygen_permeability: 1.2,
            water_vapor_permeability: 5.0,
        },
        sustainability: Sustainability {
            biodegradable: false,
            compostable: None,
            recyclable: Some(true),
            biomass_content: Some(100.0),
            recycled_content: None,
            carbon_footprint: 0.9,
        },
    },
    CatalogMaterial {
        id: "bio-pe",
        formula: "(C2H4)n",
        name: "Bio-PE",
        material_type: MaterialType::BioBased,
        properties: PhysicalProperties {
            tensile_strength: 30.0,
            elongation: 600.0,
            melting_point: 130.0,
            density: 0.95,
            oxygen_permeability: 2500.0,
            water_vapor_permeability: 6.0,
        },
        sustainability: Sustainability {
            biodegradable: false,
            compostable: None,
            recyclable: Some(true),
            biomass_content: Some(95.0),
            recycled_content: None,
            carbon_footprint: -2.1,
        },
    },
    CatalogMaterial {
        id: "bio-pet30",
        formula: "(C10H8O4)n",
        name: "Bio-PET30",
        material_type: MaterialType::BioBased,
        properties: PhysicalProperties {
            tensile_strength: 55.0,
            elongation: 120.0,
            melting_point: 250.0,
            density: 1.38,
            oxygen_permeability: 40.0,
            water_vapor_permeability: 20.0,
        },
        sustainability: Sustainability {
            biodegradable: false,
            compostable: None,
            recyclable: Some(true),
            biomass_content: Some(30.0),
            recycled_content: None,
            carbon_footprint: 2.0,
        },
    },
    CatalogMaterial {
        id: "rpet",
        formula: "(C10H8O4)n",
        name: "rPET",
        material_type: MaterialType::Recycled,
        properties: PhysicalProperties {
            tensile_strength: 52.0,
            elongation: 110.0,
            melting_point: 250.0,
            density: 1.37,
            oxygen_permeability: 45.0,
            water_vapor_permeability: 22.0,
        },
        sustainability: Sustainability {
            biodegradable: false,
            compostable: None,
            recyclable: Some(true),
            biomass_content: None,
            recycled_content: Some(100.0),
            carbon_footprint: 0.45,
        },
    },
    CatalogMaterial {
        id: "rpp",
        formula: "(C3H6)n",
        name: "rPP",
        material_type: MaterialType::Recycled,
        properties: PhysicalProperties {
            tensile_strength: 28.0,
            elongation: 350.0,
            melting_point: 160.0,
            density: 0.91,
            oxygen_permeability: 1800.0,
            water_vapor_permeability: 5.0,
        },
        sustainability: Sustainability {
            biodegradable: false,
            compostable: None,
            recyclable: Some(true),
            biomass_content: None,
            recycled_content: Some(70.0),
            carbon_footprint: 0.55,
        },
    },
    CatalogMaterial {
        id: "cellophane",
        formula: "(C6H10O5)n",
        name: "Cellophane",
        material_type: MaterialType::Cellulose,
        properties: PhysicalProperties {
            tensile_strength: 100.0,
            elongation: 20.0,
            melting_point: 260.0,
            density: 1.45,
            oxygen_permeability: 1.5,
            water_vapor_permeability: 400.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: Some(true),
            recyclable: Some(false),
            biomass_content: Some(100.0),
            recycled_content: None,
            carbon_footprint: 0.9,
        },
    },
    CatalogMaterial {
        id: "cnf-paper",
        formula: "(C6H10O5)n",
        name: "CNF-coated paper",
        material_type: MaterialType::Cellulose,
        properties: PhysicalProperties {
            tensile_strength: 75.0,
            elongation: 3.0,
            melting_point: 230.0,
            density: 1.10,
            oxygen_permeability: 0.8,
            water_vapor_permeability: 300.0,
        },
        sustainability: Sustainability {
            biodegradable: true,
            compostable: None,
            recyclable: Some(true),
            biomass_content: Some(98.0),
            recycled_content: None,
            carbon_footprint: 0.5,
        },
    },
];
