//! Mathematical utilities for the direct stiffness method

use nalgebra::{DMatrix, DVector, Matrix6, Vector6};

use crate::error::{FrameError, FrameResult};
use crate::topology::dof_index;

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for element stiffness and transformation
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for element forces/displacements
pub type Vec6 = Vector6<f64>;

/// Scatter an element stiffness matrix and load vector into the global system
///
/// # Arguments
/// * `dofs` - 1-based global DOF numbers of the element
/// * `k_global` - Global stiffness matrix (accumulated in place)
/// * `ke` - Element stiffness matrix in global coordinates
/// * `f_global` - Global load vector (accumulated in place)
/// * `fe` - Element load vector in global coordinates
pub fn assemble(dofs: &[usize; 6], k_global: &mut Mat, ke: &Mat6, f_global: &mut Vec, fe: &Vec6) {
    for (a, &da) in dofs.iter().enumerate() {
        let row = dof_index(da);
        f_global[row] += fe[a];
        for (b, &db) in dofs.iter().enumerate() {
            k_global[(row, dof_index(db))] += ke[(a, b)];
        }
    }
}

/// Gather the element values of a global vector
pub fn extract(dofs: &[usize; 6], global: &Vec) -> Vec6 {
    Vec6::from_fn(|a, _| global[dof_index(dofs[a])])
}

/// Solve `K a = f` for the given free DOFs, all other DOFs prescribed to zero
///
/// `free` holds 1-based DOF numbers, each between 1 and `f.len()`. Returns the
/// full displacement vector and `K a - f`, whose entries at the constrained
/// DOFs are the support reactions.
pub fn solve_constrained(k: &Mat, f: &Vec, free: &[usize]) -> FrameResult<(Vec, Vec)> {
    let n_dofs = f.len();

    if free.is_empty() {
        return Err(FrameError::SingularSystem(
            "no free degrees of freedom".to_string(),
        ));
    }
    if let Some(dof) = free.iter().find(|&&dof| dof == 0 || dof > n_dofs) {
        return Err(FrameError::InvalidInput(format!(
            "DOF {dof} is outside 1..={n_dofs}"
        )));
    }
    let free: std::vec::Vec<usize> = free.iter().map(|&dof| dof_index(dof)).collect();

    // Partition stiffness matrix and load vector
    let n_free = free.len();
    let mut k11 = Mat::zeros(n_free, n_free);
    let mut f1 = Vec::zeros(n_free);

    for (i, &di) in free.iter().enumerate() {
        f1[i] = f[di];
        for (j, &dj) in free.iter().enumerate() {
            k11[(i, j)] = k[(di, dj)];
        }
    }

    // Solve K11 * a1 = f1
    let a1 = solve_linear_system(&k11, &f1).ok_or_else(|| {
        FrameError::SingularSystem(
            "reduced stiffness matrix is not invertible; check section properties and geometry"
                .to_string(),
        )
    })?;

    if a1.iter().any(|v| !v.is_finite()) {
        return Err(FrameError::SingularSystem(
            "solution contains non-finite displacements".to_string(),
        ));
    }

    // Assemble full displacement vector, constrained entries stay zero
    let mut a = Vec::zeros(n_dofs);
    for (i, &di) in free.iter().enumerate() {
        a[di] = a1[i];
    }

    let r = k * &a - f;

    Ok((a, r))
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}
