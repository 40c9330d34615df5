pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece does not fit at the requested cells")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("spawned piece overlaps settled cells")]
pub struct TopOutError;
