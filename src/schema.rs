/// Column-name constants for flow tables.
/// Single source of truth - exported to Python via PyO3.

// ── Input flow columns ──────────────────────────────────────────────────────
pub mod flow {
    pub const NAME: &str = "Name";
    pub const AMOUNT: &str = "Amount";
    pub const UNIT: &str = "Unit";
    pub const FLOW_TYPE: &str = "Flow Type";
    pub const COMPARTMENT: &str = "Compartment";
    pub const SUBCOMPARTMENT: &str = "Subcompartment";

    pub const DRY_MASS: &str = "dry mass (kg)";
    pub const WET_MASS: &str = "wet mass (kg)";
    pub const WATER_CONTENT: &str = "water content (dimensionless)";
    pub const CARBON_FOSSIL: &str = "carbon content, fossil (dimensionless)";
    pub const CARBON_NON_FOSSIL: &str = "carbon content, non-fossil (dimensionless)";

    pub const REQUIRED: [&str; 6] = [NAME, AMOUNT, UNIT, FLOW_TYPE, COMPARTMENT, SUBCOMPARTMENT];

    pub const TEXT: [&str; 5] = [NAME, UNIT, FLOW_TYPE, COMPARTMENT, SUBCOMPARTMENT];

    /// `"<element name> content (dimensionless)"`
    pub fn content_column(element_name: &str) -> String {
        format!("{element_name} content (dimensionless)")
    }
}

// ── Output columns ──────────────────────────────────────────────────────────
pub mod output {
    pub const FLOW_NAME: &str = "Flow Name";
    pub const SUB_PROCESS: &str = "Sub Process";
    pub const AMOUNT: &str = "Amount";
    pub const UNIT: &str = "Unit";
    pub const FLOW_TYPE: &str = "Flow Type";
    pub const COMPARTMENT: &str = "Compartment";
    pub const SUBCOMPARTMENT: &str = "Subcompartment";
    pub const REST: &str = "rest";

    pub const LEADING: [&str; 7] = [
        FLOW_NAME,
        SUB_PROCESS,
        AMOUNT,
        UNIT,
        FLOW_TYPE,
        COMPARTMENT,
        SUBCOMPARTMENT,
    ];
}

// ── Unit values ─────────────────────────────────────────────────────────────
pub mod units {
    pub const KILOGRAM: &str = "kg";
    pub const CUBIC_METER: &str = "m3";
}

// ── Flow type values ────────────────────────────────────────────────────────
pub mod flow_type {
    pub const INPUT: &str = "Input";
    pub const OUTPUT: &str = "Output";
    pub const UNKNOWN: &str = "Unknown";
}

// ── Exchange types ──────────────────────────────────────────────────────────
pub mod exchange {
    pub const INTERMEDIATE: &str = "intermediate";
    pub const ELEMENTARY: &str = "elementary";
}

// ── Sheet names ─────────────────────────────────────────────────────────────
pub mod sheet {
    pub const INTERMEDIATE: &str = "intermediate_exchanges";
    pub const ELEMENTARY: &str = "elementary_exchanges";
}
