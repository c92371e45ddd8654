//! `segy-io` is the transport-facing half of the SEG-Y reader: given a
//! [`RangeSource`] and a URL, it opens a file, derives its concrete trace
//! layout from the text and binary headers, and serves random-access reads
//! of individual traces, trace headers, or sample vectors without loading
//! the whole file.
//!
//! The heavy lifting — byte layout, numeric decoding, revision catalogs —
//! lives in `segy_core`, which this crate re-exports the pieces of a caller
//! needs without a second `extern crate` line.
pub mod file;
pub mod indexer;
pub mod local;
pub mod planner;
pub mod transport;

pub use file::SegyFile;
pub use indexer::{
    DataIndexer, DataOutput, HeaderIndexer, HeaderOutput, IndexSelector, PostProcessOptions,
    SliceSpec, TabularView, TraceIndexer, TraceOutput, TraceRecord,
};
pub use local::LocalFileSource;
pub use planner::{RangePlan, RegionPlan, DEFAULT_MAX_BLOCK};
pub use transport::RangeSource;

pub use segy_core::{
    Customization, Endianness, Record, SampleArray, SegyDescriptor, SegyError, SegyStandard,
    StandardRegistry,
};
