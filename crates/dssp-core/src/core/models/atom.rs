use super::ids::ResidueId;
use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub name: String,          // Atom name (e.g., "CA", "N", "O")
    pub element: String,       // Element symbol (e.g., "C", "N", "S")
    pub serial: usize,         // Atom serial number from the source file
    pub residue_id: ResidueId, // ID of the parent residue
    pub position: Point3<f64>, // 3D coordinates in Ångström
    pub occupancy: f64,        // Crystallographic occupancy
}

impl Atom {
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: guess_element(name),
            serial: 0,
            residue_id,
            position,
            occupancy: 1.0,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    pub fn with_serial(mut self, serial: usize) -> Self {
        self.serial = serial;
        self
    }
}

/// Derives the element symbol from a protein atom name.
///
/// Protein atom names lead with the element ("CA" is a carbon, "OG1" an
/// oxygen); two-letter elements do not occur among standard residue atoms.
fn guess_element(name: &str) -> String {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
