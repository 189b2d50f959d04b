//! Value types making up a paired series.

pub mod point;
pub mod scalar;
pub mod series;
pub mod tolerance;
