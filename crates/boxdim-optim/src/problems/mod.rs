//! Problem builders on top of [`crate::NllsProblem`].

pub mod pose_refine;
