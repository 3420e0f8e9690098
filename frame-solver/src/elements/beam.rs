//! Two-node plane beam element (axial + Euler-Bernoulli bending)

use serde::{Deserialize, Serialize};

use crate::math::{Mat6, Vec6};

/// Material and section properties of a beam element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSection {
    /// Young's modulus
    pub e: f64,
    /// Cross-section area
    pub a: f64,
    /// Second moment of area
    pub i: f64,
}

impl BeamSection {
    /// Create a new section
    pub fn new(e: f64, a: f64, i: f64) -> Self {
        Self { e, a, i }
    }

    /// Axial stiffness EA
    pub fn ea(&self) -> f64 {
        self.e * self.a
    }

    /// Bending stiffness EI
    pub fn ei(&self) -> f64 {
        self.e * self.i
    }
}

/// Internal forces and displacements at one station along a member
///
/// All values are in the member's local system: `x` runs from the i-end,
/// the transverse axis is the member axis rotated a quarter turn
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSample {
    /// Distance from the i-end
    pub x: f64,
    /// Normal force (positive = tension)
    pub normal: f64,
    /// Shear force
    pub shear: f64,
    /// Bending moment
    pub moment: f64,
    /// Displacement along the member axis
    pub axial_displacement: f64,
    /// Displacement transverse to the member axis
    pub transverse_displacement: f64,
}

/// A plane beam element between two points with a uniform load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamElement {
    /// i-end coordinates [X, Y]
    pub start: [f64; 2],
    /// j-end coordinates [X, Y]
    pub end: [f64; 2],
    /// Material and section
    pub section: BeamSection,
    /// Uniform load in local coordinates [qx, qy]
    pub load: [f64; 2],
}

impl BeamElement {
    /// Create a new element with a uniform transverse load `qy`
    pub fn new(start: [f64; 2], end: [f64; 2], section: BeamSection, qy: f64) -> Self {
        Self {
            start,
            end,
            section,
            load: [0.0, qy],
        }
    }

    /// Element length
    pub fn length(&self) -> f64 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Direction cosines of the member axis
    pub fn direction_cosines(&self) -> [f64; 2] {
        let l = self.length();
        [
            (self.end[0] - self.start[0]) / l,
            (self.end[1] - self.start[1]) / l,
        ]
    }

    /// Transformation matrix from global to local coordinates
    pub fn transformation(&self) -> Mat6 {
        let [n1, n2] = self.direction_cosines();

        #[rustfmt::skip]
        let data = [
            n1,  n2,  0.0, 0.0, 0.0, 0.0,
            -n2, n1,  0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, n1,  n2,  0.0,
            0.0, 0.0, 0.0, -n2, n1,  0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ];

        Mat6::from_row_slice(&data)
    }

    /// Local stiffness matrix
    ///
    /// DOFs: [u_i, v_i, θ_i, u_j, v_j, θ_j]
    pub fn local_stiffness(&self) -> Mat6 {
        let l = self.length();
        let l2 = l * l;
        let l3 = l2 * l;

        let ea_l = self.section.ea() / l;
        let ei_l3 = self.section.ei() / l3;
        let ei_l2 = self.section.ei() / l2;
        let ei_l = self.section.ei() / l;

        #[rustfmt::skip]
        let data = [
            ea_l,  0.0,          0.0,         -ea_l, 0.0,          0.0,
            0.0,   12.0*ei_l3,   6.0*ei_l2,   0.0,   -12.0*ei_l3,  6.0*ei_l2,
            0.0,   6.0*ei_l2,    4.0*ei_l,    0.0,   -6.0*ei_l2,   2.0*ei_l,
            -ea_l, 0.0,          0.0,         ea_l,  0.0,          0.0,
            0.0,   -12.0*ei_l3,  -6.0*ei_l2,  0.0,   12.0*ei_l3,   -6.0*ei_l2,
            0.0,   6.0*ei_l2,    2.0*ei_l,    0.0,   -6.0*ei_l2,   4.0*ei_l,
        ];

        Mat6::from_row_slice(&data)
    }

    /// Stiffness matrix in global coordinates: K = Gᵀ K_local G
    pub fn global_stiffness(&self) -> Mat6 {
        let g = self.transformation();
        g.transpose() * self.local_stiffness() * g
    }

    /// Equivalent nodal loads of the uniform load in local coordinates
    pub fn local_equivalent_loads(&self) -> Vec6 {
        let l = self.length();
        let [qx, qy] = self.load;
        Vec6::new(
            qx * l / 2.0,
            qy * l / 2.0,
            qy * l * l / 12.0,
            qx * l / 2.0,
            qy * l / 2.0,
            -qy * l * l / 12.0,
        )
    }

    /// Equivalent nodal loads in global coordinates
    pub fn global_equivalent_loads(&self) -> Vec6 {
        self.transformation().transpose() * self.local_equivalent_loads()
    }

    /// Recover section forces and displacements at equally spaced stations
    ///
    /// # Arguments
    /// * `ed` - Element displacements in global coordinates
    /// * `n_points` - Number of stations, including both ends (at least 2)
    pub fn section_forces(&self, ed: &Vec6, n_points: usize) -> Vec<SectionSample> {
        let n_points = n_points.max(2);
        let l = self.length();
        let ea = self.section.ea();
        let ei = self.section.ei();
        let [qx, qy] = self.load;

        let d = self.transformation() * ed;
        let (u1, v1, t1, u2, v2, t2) = (d[0], d[1], d[2], d[3], d[4], d[5]);

        // Homogeneous solution fitted to the end displacements after removing
        // the particular solution of the distributed load
        let c1 = (u2 - u1 + particular(qx * l * l, 2.0 * ea)) / l;
        let r1 = v2 - v1 - t1 * l - particular(qy * l.powi(4), 24.0 * ei);
        let r2 = t2 - t1 - particular(qy * l.powi(3), 6.0 * ei);
        let b3 = (r2 * l - 2.0 * r1) / l.powi(3);
        let b2 = (3.0 * r1 - r2 * l) / (l * l);

        (0..n_points)
            .map(|k| {
                let x = l * k as f64 / (n_points - 1) as f64;
                SectionSample {
                    x,
                    normal: ea * c1 - qx * x,
                    shear: -6.0 * ei * b3 - qy * x,
                    moment: ei * (6.0 * b3 * x + 2.0 * b2) + qy * x * x / 2.0,
                    axial_displacement: c1 * x + u1 - particular(qx * x * x, 2.0 * ea),
                    transverse_displacement: b3 * x.powi(3)
                        + b2 * x * x
                        + t1 * x
                        + v1
                        + particular(qy * x.powi(4), 24.0 * ei),
                }
            })
            .collect()
    }
}

/// Particular-solution term `load / stiffness`, zero when there is no load
fn particular(load: f64, stiffness: f64) -> f64 {
    if load == 0.0 {
        0.0
    } else {
        load / stiffness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn horizontal(qy: f64) -> BeamElement {
        BeamElement::new([0.0, 0.0], [6.0, 0.0], BeamSection::new(200e9, 6e-3, 5.4e-5), qy)
    }

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = horizontal(0.0).local_stiffness();
        for i in 0..6 {
            for j in 0..6 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_transformation_is_orthogonal() {
        let element = BeamElement::new(
            [1.0, 2.0],
            [4.0, 6.0],
            BeamSection::new(200e9, 2e-3, 1.6e-5),
            0.0,
        );
        let g = element.transformation();
        let product = g.transpose() * g;
        assert_relative_eq!(product, Mat6::identity(), epsilon = 1e-12);
        assert_relative_eq!(element.length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertical_member_local_axis() {
        // Column running downwards: local y points along global +X
        let element = BeamElement::new([0.0, 4.0], [0.0, 0.0], BeamSection::new(1.0, 1.0, 1.0), 0.0);
        let g = element.transformation();
        assert_relative_eq!(g[(0, 1)], -1.0);
        assert_relative_eq!(g[(1, 0)], 1.0);
    }

    #[test]
    fn test_equivalent_loads_sum_to_total_load() {
        let element = BeamElement::new([0.0, 4.0], [0.0, 0.0], BeamSection::new(1.0, 1.0, 1.0), 3.0);
        let fe = element.global_equivalent_loads();
        // Transverse load on a downward column acts along global +X
        assert_relative_eq!(fe[0] + fe[3], 12.0, epsilon = 1e-12);
        assert_relative_eq!(fe[1] + fe[4], 0.0, epsilon = 1e-12);
        assert_relative_eq!(fe[2], 4.0, epsilon = 1e-12);
        assert_relative_eq!(fe[5], -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rigid_body_motion_is_stress_free() {
        let element = horizontal(0.0);
        let k = element.global_stiffness();
        let translation = Vec6::new(1.0, -2.0, 0.0, 1.0, -2.0, 0.0);
        let forces = k * translation;
        assert!(forces.amax() < 1e-3);
    }

    #[test]
    fn test_clamped_beam_under_uniform_load() {
        let q = -10e3;
        let element = horizontal(q);
        let l = element.length();
        let ei = element.section.ei();

        let samples = element.section_forces(&Vec6::zeros(), 21);
        assert_eq!(samples.len(), 21);
        assert_relative_eq!(samples[20].x, l, epsilon = 1e-12);

        let first = samples[0];
        let mid = samples[10];
        let last = samples[20];

        assert_relative_eq!(first.moment, q * l * l / 12.0, max_relative = 1e-9);
        assert_relative_eq!(last.moment, q * l * l / 12.0, max_relative = 1e-9);
        assert_relative_eq!(mid.moment, -q * l * l / 24.0, max_relative = 1e-9);
        assert_relative_eq!(first.shear, q * l / 2.0, max_relative = 1e-9);
        assert_relative_eq!(last.shear, -q * l / 2.0, max_relative = 1e-9);
        assert_relative_eq!(
            mid.transverse_displacement,
            q * l.powi(4) / (384.0 * ei),
            max_relative = 1e-9
        );
        assert_eq!(mid.normal, 0.0);
        assert_eq!(mid.axial_displacement, 0.0);
    }

    #[test]
    fn test_axial_stretch() {
        let element = horizontal(0.0);
        let ed = Vec6::new(0.0, 0.0, 0.0, 1e-3, 0.0, 0.0);
        let samples = element.section_forces(&ed, 3);
        let expected = element.section.ea() * 1e-3 / element.length();
        for sample in &samples {
            assert_relative_eq!(sample.normal, expected, max_relative = 1e-12);
            assert_eq!(sample.moment, 0.0);
        }
        assert_relative_eq!(samples[1].axial_displacement, 0.5e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_end_forces_match_stiffness() {
        // Section forces at the ends agree with K d - f_equivalent
        let element = horizontal(-5e3);
        let ed = Vec6::new(1e-4, -2e-4, 3e-5, -1e-4, 4e-4, -1e-5);
        let end_forces = element.local_stiffness() * (element.transformation() * ed)
            - element.local_equivalent_loads();

        let samples = element.section_forces(&ed, 11);
        let first = samples[0];
        let last = samples[10];

        assert_relative_eq!(first.normal, -end_forces[0], max_relative = 1e-9);
        assert_relative_eq!(first.shear, -end_forces[1], max_relative = 1e-9);
        assert_relative_eq!(first.moment, -end_forces[2], max_relative = 1e-9);
        assert_relative_eq!(last.normal, end_forces[3], max_relative = 1e-9);
        assert_relative_eq!(last.shear, end_forces[4], max_relative = 1e-9);
        assert_relative_eq!(last.moment, end_forces[5], max_relative = 1e-9);
    }
}
