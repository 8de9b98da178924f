//! Upwind ordering of cells per direction.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::mesh::{FaceAdjacency, TransportGeometry};
use crate::types::{AngleIndex, CellIndex};

/// For every angle, an order of the local cells in which each cell comes
/// after all of its upwind neighbors in the same partition.
///
/// A cell depends on the neighbor across a face whose signed area is strictly
/// negative. Faces parallel to the direction (zero area) add no dependency.
/// Partition and vacuum faces never do: their incoming data is either
/// delivered beforehand or zero.
#[derive(Clone, Debug)]
pub struct SweepSchedule {
    orders: Vec<Vec<CellIndex>>,
}

impl SweepSchedule {
    /// Topologically sort the cells for every angle (Kahn's algorithm).
    ///
    /// Ties are broken by ascending cell index, so the order is deterministic.
    pub fn new<G>(geometry: &G) -> Result<Self>
    where
        G: TransportGeometry + ?Sized,
    {
        let orders = AngleIndex::iter(geometry.n_angles())
            .map(|angle| Self::order_for_angle(geometry, angle))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { orders })
    }

    fn order_for_angle<G>(geometry: &G, angle: AngleIndex) -> Result<Vec<CellIndex>>
    where
        G: TransportGeometry + ?Sized,
    {
        let n_cells = geometry.n_cells();
        let mut n_upwind = vec![0usize; n_cells];
        let mut downwind: Vec<Vec<CellIndex>> = vec![Vec::new(); n_cells];

        for cell in CellIndex::iter(n_cells) {
            for (face, area) in geometry.signed_face_areas(cell, angle).into_iter().enumerate() {
                if area >= 0.0 {
                    continue;
                }
                if let FaceAdjacency::Interior { cell: upwind } = geometry.face_adjacency(cell, face)
                {
                    n_upwind[cell] += 1;
                    downwind[upwind].push(cell);
                }
            }
        }

        let mut ready: VecDeque<CellIndex> = CellIndex::iter(n_cells)
            .filter(|&c| n_upwind[c] == 0)
            .collect();
        let mut order = Vec::with_capacity(n_cells);
        while let Some(cell) = ready.pop_front() {
            order.push(cell);
            for &next in &downwind[cell] {
                n_upwind[next] -= 1;
                if n_upwind[next] == 0 {
                    ready.push_back(next);
                }
            }
        }

        if order.len() != n_cells {
            return Err(TransportError::CyclicDependency {
                angle,
                remaining: n_cells - order.len(),
            });
        }
        debug!(%angle, n_cells, "scheduled sweep order");
        Ok(order)
    }

    /// Number of angles scheduled.
    #[inline]
    pub fn n_angles(&self) -> usize {
        self.orders.len()
    }

    /// Cell order for one angle.
    #[inline]
    pub fn order(&self, angle: AngleIndex) -> &[CellIndex] {
        &self.orders[angle]
    }
}
