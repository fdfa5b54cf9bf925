//! Shrake-Rupley solvent-accessible surface area.
//!
//! Supplies the per-residue accessibility the engine reports; the engine
//! itself never computes surface areas.

use crate::core::models::ids::ResidueId;
use crate::core::models::structure::MolecularStructure;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SasaParams {
    /// Water probe radius in Å.
    pub probe_radius: f64,
    /// Number of test points per atom sphere.
    pub test_points: usize,
}

impl Default for SasaParams {
    fn default() -> Self {
        Self {
            probe_radius: 1.4,
            test_points: 256,
        }
    }
}

fn vdw_radius(element: &str) -> f64 {
    match element {
        "H" => 1.20,
        "C" => 1.70,
        "N" => 1.55,
        "O" => 1.52,
        "S" => 1.80,
        "P" => 1.80,
        _ => 1.50,
    }
}

/// Computes per-atom accessible surface and accumulates it onto each residue.
///
/// Returns the total accessible surface of the structure in Å².
pub fn assign_accessibility(structure: &mut MolecularStructure, params: &SasaParams) -> f64 {
    let atoms: Vec<(ResidueId, Point3<f64>, f64)> = structure
        .atoms_iter()
        .map(|(_, atom)| {
            (
                atom.residue_id,
                atom.position,
                vdw_radius(&atom.element) + params.probe_radius,
            )
        })
        .collect();

    if atoms.is_empty() {
        return 0.0;
    }

    let sphere = fibonacci_sphere(params.test_points.max(1));

    let per_atom: Vec<(ResidueId, f64)> = atoms
        .par_iter()
        .enumerate()
        .map(|(index, &(residue_id, center, radius))| {
            let neighbours: Vec<(Point3<f64>, f64)> = atoms
                .iter()
                .enumerate()
                .filter(|&(other, &(_, other_center, other_radius))| {
                    other != index
                        && (other_center - center).norm_squared()
                            < (radius + other_radius) * (radius + other_radius)
                })
                .map(|(_, &(_, c, r))| (c, r))
                .collect();

            let accessible = sphere
                .iter()
                .filter(|&&direction| {
                    let point = center + direction * radius;
                    !neighbours
                        .iter()
                        .any(|&(c, r)| (point - c).norm_squared() < r * r)
                })
                .count();

            let area = 4.0 * std::f64::consts::PI * radius * radius * accessible as f64
                / sphere.len() as f64;
            (residue_id, area)
        })
        .collect();

    let mut per_residue: HashMap<ResidueId, f64> = HashMap::new();
    let mut total = 0.0;
    for (residue_id, area) in per_atom {
        *per_residue.entry(residue_id).or_insert(0.0) += area;
        total += area;
    }
    for (residue_id, area) in per_residue {
        if let Some(residue) = structure.residue_mut(residue_id) {
            residue.accessibility = area;
        }
    }
    total
}

/// Points uniformly distributed on the unit sphere via the Fibonacci spiral.
fn fibonacci_sphere(count: usize) -> Vec<Vector3<f64>> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..count)
        .map(|i| {
            let y = if count > 1 {
                1.0 - 2.0 * i as f64 / (count - 1) as f64
            } else {
                0.0
            };
            let radius = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f64;
            Vector3::new(theta.cos() * radius, y, theta.sin() * radius)
        })
        .collect()
}
