//! Per-revision field tables and descriptor builders.
//!
//! Each submodule publishes a `build()` (and, where a revision forks, a
//! second constructor like [`rev2::build_rev21`]) returning the registered
//! [`crate::descriptor::SegyDescriptor`] for that revision, plus the raw
//! field-list functions the next revision's module builds on additively.
pub mod rev0;
pub mod rev1;
pub mod rev2;
