use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of measurement fields the evaluation service accepts.
pub const PARAMETER_COUNT: usize = 15;

/// A water-quality measurement field known to the evaluation service.
///
/// The serialized name of each variant is its wire key. Keys are part of the
/// contract with the service and must never be renamed.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Temperature,
    #[serde(rename = "pH")]
    Ph,
    Turbidity,
    DissolvedOxygen,
    Conductivity,
    TotalDissolvedSolids,
    Nitrate,
    Phosphate,
    TotalColiforms,
    Ecoli,
    #[serde(rename = "BOD")]
    Bod,
    #[serde(rename = "COD")]
    Cod,
    Hardness,
    Alkalinity,
    Iron,
}

/// Static metadata for one measurement field.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ParameterDefinition {
    pub parameter: Parameter,
    /// Wire key used in the request payload
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Display unit, empty when the value is dimensionless
    pub unit: &'static str,
}

const fn def(
    parameter: Parameter,
    key: &'static str,
    label: &'static str,
    unit: &'static str,
) -> ParameterDefinition {
    ParameterDefinition {
        parameter,
        key,
        label,
        unit,
    }
}

/// The fixed, ordered parameter schema.
pub static SCHEMA: [ParameterDefinition; PARAMETER_COUNT] = [
    def(Parameter::Temperature, "Temperature", "Temperature", "°C"),
    def(Parameter::Ph, "pH", "pH", ""),
    def(Parameter::Turbidity, "Turbidity", "Turbidity", "NTU"),
    def(Parameter::DissolvedOxygen, "DissolvedOxygen", "Dissolved Oxygen", "mg/L"),
    def(Parameter::Conductivity, "Conductivity", "Conductivity", "µS/cm"),
    def(
        Parameter::TotalDissolvedSolids,
        "TotalDissolvedSolids",
        "Total Dissolved Solids",
        "mg/L",
    ),
    def(Parameter::Nitrate, "Nitrate", "Nitrate", "mg/L"),
    def(Parameter::Phosphate, "Phosphate", "Phosphate", "mg/L"),
    def(Parameter::TotalColiforms, "TotalColiforms", "Total Coliforms", "CFU/100mL"),
    def(Parameter::Ecoli, "Ecoli", "E. coli", "CFU/100mL"),
    def(Parameter::Bod, "BOD", "BOD", "mg/L"),
    def(Parameter::Cod, "COD", "COD", "mg/L"),
    def(Parameter::Hardness, "Hardness", "Hardness", "mg/L as CaCO3"),
    def(Parameter::Alkalinity, "Alkalinity", "Alkalinity", "mg/L as CaCO3"),
    def(Parameter::Iron, "Iron", "Iron", "mg/L"),
];

impl Parameter {
    /// All parameters in schema order.
    pub const ALL: [Parameter; PARAMETER_COUNT] = [
        Parameter::Temperature,
        Parameter::Ph,
        Parameter::Turbidity,
        Parameter::DissolvedOxygen,
        Parameter::Conductivity,
        Parameter::TotalDissolvedSolids,
        Parameter::Nitrate,
        Parameter::Phosphate,
        Parameter::TotalColiforms,
        Parameter::Ecoli,
        Parameter::Bod,
        Parameter::Cod,
        Parameter::Hardness,
        Parameter::Alkalinity,
        Parameter::Iron,
    ];

    /// Position of this parameter in the schema.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> &'static ParameterDefinition {
        &SCHEMA[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.definition().key
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    pub fn unit(self) -> &'static str {
        self.definition().unit
    }

    /// Look up a parameter by its exact (case-sensitive) wire key.
    pub fn from_key(key: &str) -> Option<Parameter> {
        SCHEMA.iter().find(|d| d.key == key).map(|d| d.parameter)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Enumerate the schema in order.
pub fn schema() -> &'static [ParameterDefinition] {
    &SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_order_matches_variants() {
        for (i, definition) in SCHEMA.iter().enumerate() {
            assert_eq!(definition.parameter.index(), i);
            assert_eq!(Parameter::ALL[i], definition.parameter);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = SCHEMA.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), PARAMETER_COUNT);
    }

    #[test]
    fn test_serde_name_is_wire_key() {
        for parameter in Parameter::ALL {
            let json = serde_json::to_string(&parameter).unwrap();
            assert_eq!(json, format!("\"{}\"", parameter.key()));
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Parameter::from_key("pH"), Some(Parameter::Ph));
        assert_eq!(Parameter::from_key("DissolvedOxygen"), Some(Parameter::DissolvedOxygen));
        assert_eq!(Parameter::from_key("ph"), None);
        assert_eq!(Parameter::from_key("Dissolved Oxygen"), None);
    }

    #[test]
    fn test_labels_are_not_keys() {
        assert_eq!(Parameter::Ecoli.label(), "E. coli");
        assert_eq!(Parameter::Ecoli.key(), "Ecoli");
        assert_eq!(Parameter::Ph.unit(), "");
    }
}
