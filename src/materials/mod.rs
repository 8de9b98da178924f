//! Cross sections per cell.
//!
//! Cells carry a material id; a [`MaterialTable`] maps the two known
//! materials to total and scattering cross sections. Any other id is a setup
//! error and fails immediately.

use crate::error::{Result, TransportError};
use crate::mesh::TetMesh;
use crate::types::CellIndex;

/// Total and scattering cross sections for materials 1 and 2.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialTable {
    pub sigma_t1: f64,
    pub sigma_s1: f64,
    pub sigma_t2: f64,
    pub sigma_s2: f64,
}

impl Default for MaterialTable {
    /// Pure absorber with σ_t = 1 for both materials.
    fn default() -> Self {
        Self {
            sigma_t1: 1.0,
            sigma_s1: 0.0,
            sigma_t2: 1.0,
            sigma_s2: 0.0,
        }
    }
}

impl MaterialTable {
    /// `(σ_t, σ_s)` of a material id, if known.
    pub fn lookup(&self, material: usize) -> Option<(f64, f64)> {
        match material {
            1 => Some((self.sigma_t1, self.sigma_s1)),
            2 => Some((self.sigma_t2, self.sigma_s2)),
            _ => None,
        }
    }
}

/// Per-cell total and scattering cross sections, shared by all groups.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossSections {
    pub sigma_t: Vec<f64>,
    pub sigma_s: Vec<f64>,
}

impl CrossSections {
    /// Look up every cell's material.
    ///
    /// Fails with [`TransportError::InvalidMaterial`] on the first cell whose
    /// material is not in the table.
    pub fn from_materials(mesh: &TetMesh, table: &MaterialTable) -> Result<Self> {
        let n_cells = mesh.n_cells();
        let mut sigma_t = Vec::with_capacity(n_cells);
        let mut sigma_s = Vec::with_capacity(n_cells);
        for cell in CellIndex::iter(n_cells) {
            let material = mesh.cell_material(cell);
            let (st, ss) = table
                .lookup(material)
                .ok_or(TransportError::InvalidMaterial { cell, material })?;
            sigma_t.push(st);
            sigma_s.push(ss);
        }
        Ok(Self { sigma_t, sigma_s })
    }

    /// Same cross sections in every cell.
    pub fn uniform(n_cells: usize, sigma_t: f64, sigma_s: f64) -> Self {
        Self {
            sigma_t: vec![sigma_t; n_cells],
            sigma_s: vec![sigma_s; n_cells],
        }
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.sigma_t.len()
    }
}
