//! Motion sensor drivers

pub mod lis3dh;

pub use lis3dh::{DataRate, Lis3dh};
