//! SE(3) parameter conversions.

use anyhow::{ensure, Result};
use boxdim_core::{Iso3, Real};
use nalgebra::{DVector, DVectorView, Translation3, UnitQuaternion, Vector3};

/// Number of parameters in a packed pose.
pub const POSE_DIM: usize = 6;

/// Convert an `Iso3` into a 6D vector `[rx, ry, rz, tx, ty, tz]`, where `r` is
/// the axis-angle (scaled axis) rotation.
pub fn iso3_to_se3_dvec(pose: &Iso3) -> DVector<Real> {
    let r = pose.rotation.scaled_axis();
    let t = pose.translation.vector;
    nalgebra::dvector![r.x, r.y, r.z, t.x, t.y, t.z]
}

/// Convert a 6D vector `[rx, ry, rz, tx, ty, tz]` into an `Iso3`.
pub fn se3_dvec_to_iso3(v: DVectorView<'_, Real>) -> Result<Iso3> {
    ensure!(
        v.len() == POSE_DIM,
        "expected se3 vector of length {POSE_DIM}, got {}",
        v.len()
    );
    let rot = UnitQuaternion::from_scaled_axis(Vector3::new(v[0], v[1], v[2]));
    let trans = Translation3::new(v[3], v[4], v[5]);
    Ok(Iso3::from_parts(trans, rot))
}
