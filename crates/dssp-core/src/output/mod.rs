//! Output adapters over a frozen [`Dssp`](crate::engine::Dssp) result.
//!
//! Both writers only read the engine result and the structure metadata;
//! they share no state with the engine. Callers that must not leave
//! partial files behind render into a buffer first (see
//! [`crate::workflows::annotate`]).

pub mod dssp;
pub mod mmcif;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("This file contains data that won't fit in the original DSSP format")]
    WontFit,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub use dssp::write_dssp;
pub use mmcif::annotate_mmcif;
