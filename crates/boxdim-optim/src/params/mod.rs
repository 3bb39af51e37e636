//! Parameter block definitions.
//!
//! Each parameter block provides its dimension and conversions to and from
//! the dense `DVector` used by the solver backends.
//!
//! - [`pose_se3::iso3_to_se3_dvec`] / [`pose_se3::se3_dvec_to_iso3`]: 6-DOF
//!   pose as axis-angle rotation followed by translation.

pub mod pose_se3;
