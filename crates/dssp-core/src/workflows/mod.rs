//! High-level entry points tying the structure layer, the engine and the
//! output adapters together.

pub mod annotate;

pub use annotate::{
    annotate_file, annotate_structure, AnnotateOptions, OutputFormat, WorkflowError,
};
