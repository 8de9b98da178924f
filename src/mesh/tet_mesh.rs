//! Conforming tetrahedral mesh.
//!
//! Stores nodes, cells and the per-cell geometry the sweep needs (volume,
//! face areas, outward unit normals, face adjacency and face-vertex maps).
//! Face vertices are ordered by ascending global node id so both cells
//! sharing a face, including cells in different partitions, agree on it.

use std::collections::HashMap;

use crate::error::{Result, TransportError};
use crate::mesh::traits::FaceAdjacency;
use crate::types::{
    CellIndex, FACE_LOCAL_VERTICES, N_FACE_PER_CELL, N_VERTEX_PER_CELL, N_VERTEX_PER_FACE,
    SideIndex,
};

/// Volumes below this fraction of (bounding size)³ are rejected as degenerate.
const DEGENERATE_VOLUME_TOL: f64 = 1e-12;

/// Face-vertex marker for the vertex a face does not contain.
const NOT_ON_FACE: usize = usize::MAX;

/// Partition-boundary face of a local mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionSide {
    /// Local cell owning the face.
    pub cell: CellIndex,
    /// Local face index.
    pub face: usize,
    /// Partition owning the neighbor.
    pub rank: usize,
    /// Neighbor cell id in the undivided mesh.
    pub remote_cell: usize,
}

/// Tetrahedral mesh with precomputed cell geometry.
#[derive(Clone, Debug)]
pub struct TetMesh {
    nodes: Vec<[f64; 3]>,
    cells: Vec<[usize; N_VERTEX_PER_CELL]>,
    materials: Vec<usize>,
    volumes: Vec<f64>,
    face_areas: Vec<[f64; N_FACE_PER_CELL]>,
    face_normals: Vec<[[f64; 3]; N_FACE_PER_CELL]>,
    adjacency: Vec<[FaceAdjacency; N_FACE_PER_CELL]>,
    /// `face_vertex[c][f][v]`: face-vertex index of local vertex `v` on face `f`.
    face_vertex: Vec<[[usize; N_VERTEX_PER_CELL]; N_FACE_PER_CELL]>,
    /// `neighbor_vertex[c][f][fv]`: neighbor-local vertex of face vertex `fv`.
    neighbor_vertex: Vec<[[usize; N_VERTEX_PER_FACE]; N_FACE_PER_CELL]>,
    /// Cell ids in the undivided mesh.
    global_cells: Vec<usize>,
    sides: Vec<PartitionSide>,
}

impl TetMesh {
    /// Build a mesh from node coordinates, cell connectivity and materials.
    ///
    /// Fails on out-of-range node ids, degenerate cells, or faces shared by
    /// more than two cells.
    pub fn new(
        nodes: Vec<[f64; 3]>,
        cells: Vec<[usize; N_VERTEX_PER_CELL]>,
        materials: Vec<usize>,
    ) -> Result<Self> {
        TransportError::check_len("cell materials", cells.len(), materials.len())?;
        if cells.is_empty() {
            return Err(TransportError::InvalidMesh("mesh has no cells".to_string()));
        }

        let scale = bounding_size(&nodes);
        let mut volumes = Vec::with_capacity(cells.len());
        let mut face_areas = Vec::with_capacity(cells.len());
        let mut face_normals = Vec::with_capacity(cells.len());

        for (c, cell) in cells.iter().enumerate() {
            if let Some(&bad) = cell.iter().find(|&&n| n >= nodes.len()) {
                return Err(TransportError::InvalidMesh(format!(
                    "cell {c} references node {bad} of {}",
                    nodes.len()
                )));
            }
            let p = cell.map(|n| nodes[n]);
            let volume = triple_product(sub(p[1], p[0]), sub(p[2], p[0]), sub(p[3], p[0])).abs() / 6.0;
            if volume <= DEGENERATE_VOLUME_TOL * scale * scale * scale {
                return Err(TransportError::InvalidMesh(format!(
                    "cell {c} is degenerate (volume {volume:e})"
                )));
            }

            let mut areas = [0.0; N_FACE_PER_CELL];
            let mut normals = [[0.0; 3]; N_FACE_PER_CELL];
            for face in 0..N_FACE_PER_CELL {
                let [a, b, d] = FACE_LOCAL_VERTICES[face].map(|v| p[v]);
                let n = cross(sub(b, a), sub(d, a));
                let len = norm(n);
                let mut unit = [n[0] / len, n[1] / len, n[2] / len];
                // Point away from the opposite vertex.
                if dot(unit, sub(p[face], a)) > 0.0 {
                    unit = [-unit[0], -unit[1], -unit[2]];
                }
                areas[face] = 0.5 * len;
                normals[face] = unit;
            }

            volumes.push(volume);
            face_areas.push(areas);
            face_normals.push(normals);
        }

        let adjacency = build_adjacency(&cells)?;
        let face_vertex = cells.iter().map(face_vertex_table).collect();
        let n_cells = cells.len();

        let mut mesh = Self {
            nodes,
            cells,
            materials,
            volumes,
            face_areas,
            face_normals,
            adjacency,
            face_vertex,
            neighbor_vertex: Vec::new(),
            global_cells: (0..n_cells).collect(),
            sides: Vec::new(),
        };
        mesh.neighbor_vertex = mesh.build_neighbor_vertices();
        Ok(mesh)
    }

    /// Structured cube `[0, size]³` with `n` hexahedra per side, each split
    /// into six tetrahedra around its main diagonal. All cells get material 1.
    pub fn cube(size: f64, n: usize) -> Result<Self> {
        if n == 0 || size <= 0.0 {
            return Err(TransportError::InvalidMesh(format!(
                "cube needs positive size and divisions, got size={size}, n={n}"
            )));
        }
        let h = size / n as f64;
        let node_id = |i: usize, j: usize, k: usize| (k * (n + 1) + j) * (n + 1) + i;

        let mut nodes = Vec::with_capacity((n + 1).pow(3));
        for k in 0..=n {
            for j in 0..=n {
                for i in 0..=n {
                    nodes.push([i as f64 * h, j as f64 * h, k as f64 * h]);
                }
            }
        }

        // Paths from corner (0,0,0) to (1,1,1) along the axes, one per permutation.
        const PATHS: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        let mut cells = Vec::with_capacity(6 * n * n * n);
        for k in 0..n {
            for j in 0..n {
                for i in 0..n {
                    for path in PATHS {
                        let mut corner = [i, j, k];
                        let mut cell = [node_id(i, j, k); N_VERTEX_PER_CELL];
                        for (step, &axis) in path.iter().enumerate() {
                            corner[axis] += 1;
                            cell[step + 1] = node_id(corner[0], corner[1], corner[2]);
                        }
                        cells.push(cell);
                    }
                }
            }
        }

        let materials = vec![1; cells.len()];
        Self::new(nodes, cells, materials)
    }

    /// Reassign materials from the cell centroid.
    pub fn assign_materials<F>(&mut self, f: F)
    where
        F: Fn([f64; 3]) -> usize,
    {
        for cell in CellIndex::iter(self.n_cells()) {
            self.materials[cell] = f(self.cell_centroid(cell));
        }
    }

    /// Split into one local mesh per partition.
    ///
    /// `owner[c]` is the partition of cell `c`. Faces whose neighbor lives in
    /// another partition become [`FaceAdjacency::Partition`] faces, numbered
    /// consecutively per partition in (cell, face) order.
    pub fn partition(&self, owner: &[usize]) -> Result<Vec<TetMesh>> {
        TransportError::check_len("partition owners", self.n_cells(), owner.len())?;
        let n_parts = owner.iter().max().map_or(0, |&m| m + 1);

        let mut local_id = vec![CellIndex::ZERO; self.n_cells()];
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_parts];
        for (c, &p) in owner.iter().enumerate() {
            local_id[c] = CellIndex::new(members[p].len());
            members[p].push(c);
        }

        let parts = members
            .into_iter()
            .enumerate()
            .map(|(rank, globals)| {
                let mut sides = Vec::new();
                let adjacency = globals
                    .iter()
                    .enumerate()
                    .map(|(local, &g)| {
                        std::array::from_fn(|face| match self.adjacency[g][face] {
                            FaceAdjacency::Interior { cell } if owner[cell.get()] == rank => {
                                FaceAdjacency::Interior {
                                    cell: local_id[cell.get()],
                                }
                            }
                            FaceAdjacency::Interior { cell } => {
                                let side = SideIndex::new(sides.len());
                                sides.push(PartitionSide {
                                    cell: CellIndex::new(local),
                                    face,
                                    rank: owner[cell.get()],
                                    remote_cell: self.global_cells[cell.get()],
                                });
                                FaceAdjacency::Partition {
                                    rank: owner[cell.get()],
                                    side,
                                }
                            }
                            other => other,
                        })
                    })
                    .collect();

                let mut part = TetMesh {
                    nodes: self.nodes.clone(),
                    cells: globals.iter().map(|&g| self.cells[g]).collect(),
                    materials: globals.iter().map(|&g| self.materials[g]).collect(),
                    volumes: globals.iter().map(|&g| self.volumes[g]).collect(),
                    face_areas: globals.iter().map(|&g| self.face_areas[g]).collect(),
                    face_normals: globals.iter().map(|&g| self.face_normals[g]).collect(),
                    adjacency,
                    face_vertex: globals.iter().map(|&g| self.face_vertex[g]).collect(),
                    neighbor_vertex: Vec::new(),
                    global_cells: globals.iter().map(|&g| self.global_cells[g]).collect(),
                    sides,
                };
                part.neighbor_vertex = part.build_neighbor_vertices();
                part
            })
            .collect();

        Ok(parts)
    }

    /// Number of cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Global node id of a cell-local vertex.
    #[inline]
    pub fn cell_node(&self, cell: CellIndex, vertex: usize) -> usize {
        self.cells[cell][vertex]
    }

    /// Node coordinates.
    #[inline]
    pub fn node_coord(&self, node: usize) -> [f64; 3] {
        self.nodes[node]
    }

    /// Coordinates of a cell-local vertex.
    #[inline]
    pub fn vertex_coord(&self, cell: CellIndex, vertex: usize) -> [f64; 3] {
        self.node_coord(self.cell_node(cell, vertex))
    }

    /// Arithmetic mean of the four vertices.
    pub fn cell_centroid(&self, cell: CellIndex) -> [f64; 3] {
        let mut c = [0.0; 3];
        for vertex in 0..N_VERTEX_PER_CELL {
            let p = self.vertex_coord(cell, vertex);
            for d in 0..3 {
                c[d] += p[d] / N_VERTEX_PER_CELL as f64;
            }
        }
        c
    }

    /// Material id of a cell.
    #[inline]
    pub fn cell_material(&self, cell: CellIndex) -> usize {
        self.materials[cell]
    }

    /// Cell volume.
    #[inline]
    pub fn cell_volume(&self, cell: CellIndex) -> f64 {
        self.volumes[cell]
    }

    /// Face area.
    #[inline]
    pub fn face_area(&self, cell: CellIndex, face: usize) -> f64 {
        self.face_areas[cell][face]
    }

    /// Outward unit normal of a face.
    #[inline]
    pub fn face_normal(&self, cell: CellIndex, face: usize) -> [f64; 3] {
        self.face_normals[cell][face]
    }

    /// Adjacency across a face.
    #[inline]
    pub fn face_adjacency(&self, cell: CellIndex, face: usize) -> FaceAdjacency {
        self.adjacency[cell][face]
    }

    /// Face-vertex index of a cell-local vertex.
    #[inline]
    pub fn face_vertex(&self, cell: CellIndex, face: usize, vertex: usize) -> usize {
        debug_assert_ne!(vertex, face, "vertex {vertex} is not on face {face}");
        self.face_vertex[cell][face][vertex]
    }

    /// Neighbor-local vertex of a face vertex on an interior face.
    #[inline]
    pub fn neighbor_vertex(&self, cell: CellIndex, face: usize, face_vertex: usize) -> usize {
        self.neighbor_vertex[cell][face][face_vertex]
    }

    /// Cell id in the undivided mesh.
    #[inline]
    pub fn global_cell(&self, cell: CellIndex) -> usize {
        self.global_cells[cell]
    }

    /// Partition-boundary faces, indexed by side.
    pub fn sides(&self) -> &[PartitionSide] {
        &self.sides
    }

    /// Number of exterior (vacuum) faces.
    pub fn n_vacuum_faces(&self) -> usize {
        self.adjacency
            .iter()
            .flatten()
            .filter(|adj| adj.is_vacuum())
            .count()
    }

    /// Total volume of all cells.
    pub fn total_volume(&self) -> f64 {
        self.volumes.iter().sum()
    }

    fn build_neighbor_vertices(&self) -> Vec<[[usize; N_VERTEX_PER_FACE]; N_FACE_PER_CELL]> {
        CellIndex::iter(self.n_cells())
            .map(|cell| {
                std::array::from_fn(|face| match self.adjacency[cell][face] {
                    FaceAdjacency::Interior { cell: neighbor } => {
                        let ordered = face_nodes_sorted(&self.cells[cell], face);
                        ordered.map(|node| {
                            self.cells[neighbor]
                                .iter()
                                .position(|&n| n == node)
                                .unwrap_or(NOT_ON_FACE)
                        })
                    }
                    _ => [NOT_ON_FACE; N_VERTEX_PER_FACE],
                })
            })
            .collect()
    }
}

/// Global node ids of a face, ascending.
fn face_nodes_sorted(cell: &[usize; N_VERTEX_PER_CELL], face: usize) -> [usize; N_VERTEX_PER_FACE] {
    let mut nodes = FACE_LOCAL_VERTICES[face].map(|v| cell[v]);
    nodes.sort_unstable();
    nodes
}

/// `table[f][v]` = position of local vertex `v` within face `f`'s sorted node list.
fn face_vertex_table(cell: &[usize; N_VERTEX_PER_CELL]) -> [[usize; N_VERTEX_PER_CELL]; N_FACE_PER_CELL] {
    std::array::from_fn(|face| {
        let ordered = face_nodes_sorted(cell, face);
        std::array::from_fn(|vertex| {
            if vertex == face {
                NOT_ON_FACE
            } else {
                ordered
                    .iter()
                    .position(|&n| n == cell[vertex])
                    .unwrap_or(NOT_ON_FACE)
            }
        })
    })
}

fn build_adjacency(
    cells: &[[usize; N_VERTEX_PER_CELL]],
) -> Result<Vec<[FaceAdjacency; N_FACE_PER_CELL]>> {
    let mut shared: HashMap<[usize; N_VERTEX_PER_FACE], Vec<(usize, usize)>> =
        HashMap::with_capacity(2 * cells.len());
    for (c, cell) in cells.iter().enumerate() {
        for face in 0..N_FACE_PER_CELL {
            shared
                .entry(face_nodes_sorted(cell, face))
                .or_default()
                .push((c, face));
        }
    }

    let mut adjacency = vec![[FaceAdjacency::Vacuum; N_FACE_PER_CELL]; cells.len()];
    for (key, owners) in shared {
        match owners.as_slice() {
            [_] => {}
            [(c1, f1), (c2, f2)] => {
                adjacency[*c1][*f1] = FaceAdjacency::Interior {
                    cell: CellIndex::new(*c2),
                };
                adjacency[*c2][*f2] = FaceAdjacency::Interior {
                    cell: CellIndex::new(*c1),
                };
            }
            _ => {
                return Err(TransportError::InvalidMesh(format!(
                    "face {key:?} is shared by {} cells",
                    owners.len()
                )));
            }
        }
    }
    Ok(adjacency)
}

fn bounding_size(nodes: &[[f64; 3]]) -> f64 {
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for p in nodes {
        for d in 0..3 {
            lo[d] = lo[d].min(p[d]);
            hi[d] = hi[d].max(p[d]);
        }
    }
    (0..3).map(|d| hi[d] - lo[d]).fold(0.0, f64::max)
}

#[inline]
fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
fn triple_product(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    dot(a, cross(b, c))
}
