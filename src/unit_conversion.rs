//! # Unit Conversion Module
//!
//! Fixed-ratio conversion between the base mass units (g/kg) and volume
//! units (ml/L) an emission factor can be expressed in. Anything outside the
//! table is an unsupported conversion and fails the calculation that
//! requested it.

/// Error type for conversions outside the fixed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No conversion rule exists for the (from, to) unit pair
    Unsupported { from: String, to: String },
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::Unsupported { from, to } => {
                write!(f, "Unsupported unit conversion: {from} -> {to}")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

/// Convert a quantity between units.
///
/// Identical units pass the quantity through unchanged. Otherwise the fixed
/// conversion table applies: g↔kg and ml↔L/l. Plain floating-point
/// multiplication, no rounding; display formatting is the caller's concern.
pub fn convert(quantity: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    if from_unit == to_unit {
        return Ok(quantity);
    }

    let ratio = match (from_unit, to_unit) {
        ("g", "kg") => 0.001,
        ("kg", "g") => 1000.0,
        ("ml", "L") | ("ml", "l") => 0.001,
        ("L", "ml") | ("l", "ml") => 1000.0,
        _ => {
            return Err(ConversionError::Unsupported {
                from: from_unit.to_string(),
                to: to_unit.to_string(),
            })
        }
    };

    Ok(quantity * ratio)
}
