use core::fmt::Debug;
use num_traits::Float;

/// the float element types a [`DataFrame`](crate::df::DataFrame) can hold
pub trait AFloat: Float + Debug + Send + Sync + 'static {}

impl AFloat for f32 {}
impl AFloat for f64 {}
