//! `segy-core` is the pure, dependency-light foundation for `segy-io`.
//!
//! It declares the SEG-Y layout as a descriptor tree (scalar, structured,
//! text, trace, and file descriptors), a small numeric codec (endian swap,
//! IBM32 -> IEEE754), and a registry of the per-revision descriptors that
//! tree compiles to. Nothing in this crate performs I/O; `segy-io` drives
//! the transport and hands this crate raw bytes to decode.
#![allow(clippy::derive_partial_eq_without_eq)]
extern crate num;
#[macro_use]
extern crate num_derive;

#[cfg(any(feature = "to_json", feature = "serde"))]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod bitconverter;
pub mod descriptor;
pub mod errors;
pub mod registry;
pub mod sample_format;
pub mod scalar;
pub mod standards;

pub use descriptor::{
    CompiledField, CompiledLayout, Customization, ReadableTapeLabel, Record, SampleArray,
    SegyDescriptor, SegyStandard, StructuredDataTypeDescriptor, StructuredFieldDescriptor,
    TapeLabel, TextEncoding, TextHeaderDescriptor, TraceDataDescriptor, TraceDescriptor,
    TAPE_LABEL_LEN,
};
pub use errors::SegyError;
pub use registry::StandardRegistry;
pub use sample_format::SampleFormatCode;
pub use scalar::{decode_scalar, Endianness, Family, ScalarType, ScalarValue};
