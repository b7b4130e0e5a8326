//! Reference data: periodic table, molar masses and compound decompositions.
//!
//! Built once and never mutated. Engines borrow or own a `ReferenceData`
//! so several compound tables can coexist in one process.

use std::collections::{BTreeMap, HashMap};

use crate::error::BalanceError;

/// (symbol, name) for all 118 elements, ordered by atomic number.
pub const PERIODIC_TABLE: [(&str, &str); 118] = [
    ("H", "hydrogen"), ("He", "helium"), ("Li", "lithium"), ("Be", "beryllium"),
    ("B", "boron"), ("C", "carbon"), ("N", "nitrogen"), ("O", "oxygen"),
    ("F", "fluorine"), ("Ne", "neon"), ("Na", "sodium"), ("Mg", "magnesium"),
    ("Al", "aluminium"), ("Si", "silicon"), ("P", "phosphorus"), ("S", "sulfur"),
    ("Cl", "chlorine"), ("Ar", "argon"), ("K", "potassium"), ("Ca", "calcium"),
    ("Sc", "scandium"), ("Ti", "titanium"), ("V", "vanadium"), ("Cr", "chromium"),
    ("Mn", "manganese"), ("Fe", "iron"), ("Co", "cobalt"), ("Ni", "nickel"),
    ("Cu", "copper"), ("Zn", "zinc"), ("Ga", "gallium"), ("Ge", "germanium"),
    ("As", "arsenic"), ("Se", "selenium"), ("Br", "bromine"), ("Kr", "krypton"),
    ("Rb", "rubidium"), ("Sr", "strontium"), ("Y", "yttrium"), ("Zr", "zirconium"),
    ("Nb", "niobium"), ("Mo", "molybdenum"), ("Tc", "technetium"), ("Ru", "ruthenium"),
    ("Rh", "rhodium"), ("Pd", "palladium"), ("Ag", "silver"), ("Cd", "cadmium"),
    ("In", "indium"), ("Sn", "tin"), ("Sb", "antimony"), ("Te", "tellurium"),
    ("I", "iodine"), ("Xe", "xenon"), ("Cs", "cesium"), ("Ba", "barium"),
    ("La", "lanthanum"), ("Ce", "cerium"), ("Pr", "praseodymium"), ("Nd", "neodymium"),
    ("Pm", "promethium"), ("Sm", "samarium"), ("Eu", "europium"), ("Gd", "gadolinium"),
    ("Tb", "terbium"), ("Dy", "dysprosium"), ("Ho", "holmium"), ("Er", "erbium"),
    ("Tm", "thulium"), ("Yb", "ytterbium"), ("Lu", "lutetium"), ("Hf", "hafnium"),
    ("Ta", "tantalum"), ("W", "tungsten"), ("Re", "rhenium"), ("Os", "osmium"),
    ("Ir", "iridium"), ("Pt", "platinum"), ("Au", "gold"), ("Hg", "mercury"),
    ("Tl", "thallium"), ("Pb", "lead"), ("Bi", "bismuth"), ("Po", "polonium"),
    ("At", "astatine"), ("Rn", "radon"), ("Fr", "francium"), ("Ra", "radium"),
    ("Ac", "actinium"), ("Th", "thorium"), ("Pa", "protactinium"), ("U", "uranium"),
    ("Np", "neptunium"), ("Pu", "plutonium"), ("Am", "americium"), ("Cm", "curium"),
    ("Bk", "berkelium"), ("Cf", "californium"), ("Es", "einsteinium"), ("Fm", "fermium"),
    ("Md", "mendelevium"), ("No", "nobelium"), ("Lr", "lawrencium"), ("Rf", "rutherfordium"),
    ("Db", "dubnium"), ("Sg", "seaborgium"), ("Bh", "bohrium"), ("Hs", "hassium"),
    ("Mt", "meitnerium"), ("Ds", "darmstadtium"), ("Rg", "roentgenium"), ("Cn", "copernicium"),
    ("Nh", "nihonium"), ("Fl", "flerovium"), ("Mc", "moscovium"), ("Lv", "livermorium"),
    ("Ts", "tennessine"), ("Og", "oganesson"),
];

/// Molar masses in g/mol for the elements the compound table is built from.
pub const STANDARD_MOLAR_MASSES: [(&str, f64); 6] = [
    ("hydrogen", 1.008),
    ("carbon", 12.011),
    ("nitrogen", 14.007),
    ("oxygen", 15.999),
    ("phosphorus", 30.974),
    ("sulfur", 32.06),
];

/// Atom counts per compound display name.
pub const STANDARD_COMPOUNDS: [(&str, &[(&str, u32)]); 7] = [
    ("Nitrogen oxides", &[("nitrogen", 1), ("oxygen", 2)]),
    ("carbon dioxide", &[("carbon", 1), ("oxygen", 2)]),
    ("Sulfur dioxide", &[("sulfur", 1), ("oxygen", 2)]),
    ("Sulfuric acid", &[("sulfur", 1), ("oxygen", 4), ("hydrogen", 2)]),
    ("Ammonium", &[("nitrogen", 1), ("hydrogen", 4)]),
    ("Phosphorus", &[("phosphorus", 1)]),
    ("Water", &[("hydrogen", 2), ("oxygen", 1)]),
];

const WATER_ATOMS: &[(&str, u32)] = &[("hydrogen", 2), ("oxygen", 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Element name → molar mass (g/mol).
#[derive(Debug, Clone, PartialEq)]
pub struct MolarMassTable {
    masses: BTreeMap<String, f64>,
}

impl MolarMassTable {
    pub fn standard() -> Self {
        Self {
            masses: STANDARD_MOLAR_MASSES
                .iter()
                .map(|(name, mass)| (name.to_string(), *mass))
                .collect(),
        }
    }

    pub fn with_mass(mut self, element_name: &str, grams_per_mole: f64) -> Self {
        self.masses.insert(element_name.to_lowercase(), grams_per_mole);
        self
    }

    pub fn get(&self, element_name: &str) -> Option<f64> {
        self.masses.get(element_name).copied()
    }
}

/// Stoichiometric recipe for a compound, before it is resolved to fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSpec {
    pub name: String,
    /// (element name, atom count)
    pub atoms: Vec<(String, u32)>,
}

impl CompoundSpec {
    pub fn new(name: &str, atoms: &[(&str, u32)]) -> Self {
        Self {
            name: name.to_string(),
            atoms: atoms.iter().map(|(el, n)| (el.to_string(), *n)).collect(),
        }
    }

    pub fn standard_set() -> Vec<CompoundSpec> {
        STANDARD_COMPOUNDS
            .iter()
            .map(|(name, atoms)| CompoundSpec::new(name, atoms))
            .collect()
    }
}

/// A compound resolved to per-element mass fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub name: String,
    /// Lower-cased, whitespace-collapsed name used for substring matching.
    pub match_key: String,
    /// (element index into the periodic table, mass fraction)
    pub fractions: Vec<(usize, f64)>,
}

/// Lower-case, trim and collapse runs of whitespace to one space.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    elements: Vec<Element>,
    name_index: HashMap<&'static str, usize>,
    symbol_index: HashMap<&'static str, usize>,
    molar_masses: MolarMassTable,
    compounds: Vec<Compound>,
    water: Vec<(usize, f64)>,
}

impl ReferenceData {
    /// Standard molar masses and the seven-compound table.
    pub fn standard() -> Result<Self, BalanceError> {
        Self::new(MolarMassTable::standard(), &CompoundSpec::standard_set())
    }

    pub fn new(molar_masses: MolarMassTable, compounds: &[CompoundSpec]) -> Result<Self, BalanceError> {
        let elements: Vec<Element> = PERIODIC_TABLE
            .iter()
            .map(|&(symbol, name)| Element { symbol, name })
            .collect();
        let name_index = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name, i))
            .collect();
        let symbol_index = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.symbol, i))
            .collect();

        let mut reference = Self {
            elements,
            name_index,
            symbol_index,
            molar_masses,
            compounds: Vec::with_capacity(compounds.len()),
            water: Vec::new(),
        };

        reference.water = reference.mass_fractions("Water", WATER_ATOMS.iter().map(|(e, n)| (*e, *n)))?;
        for spec in compounds {
            let fractions = reference.mass_fractions(
                &spec.name,
                spec.atoms.iter().map(|(e, n)| (e.as_str(), *n)),
            )?;
            reference.compounds.push(Compound {
                name: spec.name.clone(),
                match_key: normalize_name(&spec.name),
                fractions,
            });
        }

        Ok(reference)
    }

    /// Mass fraction of each element: n·M(el) / Σ n·M.
    fn mass_fractions<'a>(
        &self,
        compound: &str,
        atoms: impl Iterator<Item = (&'a str, u32)>,
    ) -> Result<Vec<(usize, f64)>, BalanceError> {
        let mut parts = Vec::new();
        for (element, count) in atoms {
            let idx = self
                .index_of_name(element)
                .ok_or_else(|| BalanceError::UnknownElement(element.to_string()))?;
            let mass = self.molar_masses.get(element).ok_or_else(|| {
                BalanceError::InvalidData(format!(
                    "No molar mass for '{element}' (needed by compound '{compound}')"
                ))
            })?;
            parts.push((idx, f64::from(count) * mass));
        }

        let total: f64 = parts.iter().map(|(_, m)| m).sum();
        if total <= 0.0 {
            return Err(BalanceError::InvalidData(format!(
                "Compound '{compound}' has no mass"
            )));
        }
        Ok(parts.into_iter().map(|(i, m)| (i, m / total)).collect())
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    pub fn index_of_symbol(&self, symbol: &str) -> Option<usize> {
        self.symbol_index.get(symbol).copied()
    }

    pub fn symbol_for_name(&self, name: &str) -> Option<&'static str> {
        self.index_of_name(name).map(|i| self.elements[i].symbol)
    }

    pub fn name_for_symbol(&self, symbol: &str) -> Option<&'static str> {
        self.index_of_symbol(symbol).map(|i| self.elements[i].name)
    }

    pub fn molar_masses(&self) -> &MolarMassTable {
        &self.molar_masses
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    /// Hydrogen / oxygen split of water, independent of the compound table.
    pub fn water_fractions(&self) -> &[(usize, f64)] {
        &self.water
    }
}
