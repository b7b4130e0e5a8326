/// Volume→mass rule for elementary flows: a flow reported in m3 whose name
/// contains `keyword` (case-insensitive) is converted with `kg_per_m3`.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityRule {
    pub keyword: String,
    pub kg_per_m3: f64,
}

impl DensityRule {
    pub fn new(keyword: &str, kg_per_m3: f64) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            kg_per_m3,
        }
    }
}

/// Flows that are aggregate proxy measurements rather than summable masses.
pub const NON_ADDITIVE_FLOWS: [&str; 4] = [
    "BOD5, Biological Oxygen Demand",
    "COD, Chemical Oxygen Demand",
    "DOC, Dissolved Organic Carbon",
    "TOC, Total Organic Carbon",
];

/// Tunables for the balance pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceConfig {
    /// Elementary m3 flows; first matching rule wins. Default: water → 1000 kg/m3.
    pub density_rules: Vec<DensityRule>,
    /// Intermediate m3 flows without a wet mass are multiplied by this.
    pub volume_to_mass_factor: f64,
    /// Intermediate m3 flows have their dry mass divided by this.
    pub dry_mass_volume_divisor: f64,
    /// Exact flow names removed by the sanitizer.
    pub excluded_flows: Vec<String>,
    /// Value written to the "Sub Process" output column.
    pub sub_process_label: String,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            density_rules: vec![DensityRule::new("water", 1000.0)],
            volume_to_mass_factor: 1000.0,
            dry_mass_volume_divisor: 1000.0,
            excluded_flows: NON_ADDITIVE_FLOWS.iter().map(|s| s.to_string()).collect(),
            sub_process_label: "No information".to_string(),
        }
    }
}

impl BalanceConfig {
    /// Density for an elementary volume flow, if any rule matches its name.
    pub fn density_for(&self, flow_name: &str) -> Option<f64> {
        let name = flow_name.trim().to_lowercase();
        self.density_rules
            .iter()
            .find(|rule| name.contains(&rule.keyword))
            .map(|rule| rule.kg_per_m3)
    }
}
