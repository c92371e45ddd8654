//! The standard registry (C3): an immutable catalog of per-revision
//! [`SegyDescriptor`] trees, built once and handed out by deep copy.
//!
//! Mirrors the teacher's pattern of building every revision's fixed layout
//! at construction time (`giga-segy-core::header_structs::BinHeader::default`
//! effectively plays this role per-struct); here the catalog is a single
//! `HashMap` keyed by [`SegyStandard`] rather than one type per revision,
//! since the descriptor model is schema-driven and generic.
use crate::descriptor::{SegyDescriptor, SegyStandard};
use crate::errors::SegyError;
use crate::standards::{rev0, rev1, rev2};
use std::collections::HashMap;

/// Holds one [`SegyDescriptor`] per registered [`SegyStandard`].
///
/// `get` always returns a deep copy: mutating (customizing) the returned
/// descriptor never aliases the catalog entry, so repeated calls to `get`
/// for the same standard are unaffected by what a caller did with a prior
/// result.
pub struct StandardRegistry {
    standards: HashMap<SegyStandard, SegyDescriptor>,
}

impl StandardRegistry {
    /// Build the registry with the four built-in revisions (Rev0, Rev1,
    /// Rev2, Rev2.1) registered. The distilled spec calls Rev1+ "optional";
    /// they are registered here unconditionally since the file facade's
    /// revision auto-detection needs them to exist.
    pub fn new() -> Result<Self, SegyError> {
        let mut standards = HashMap::new();
        standards.insert(SegyStandard::Rev0, rev0::build()?);
        standards.insert(SegyStandard::Rev1, rev1::build()?);
        standards.insert(SegyStandard::Rev2, rev2::build()?);
        standards.insert(SegyStandard::Rev21, rev2::build_rev21()?);
        Ok(StandardRegistry { standards })
    }

    /// Retrieve a deep copy of the descriptor registered for `standard`.
    /// `SegyStandard::Custom` is never pre-registered; it only arises from
    /// [`SegyDescriptor::customize`] and is therefore an [`SegyError::UnknownStandard`]
    /// here.
    pub fn get(&self, standard: SegyStandard) -> Result<SegyDescriptor, SegyError> {
        self.standards
            .get(&standard)
            .cloned()
            .ok_or_else(|| SegyError::UnknownStandard {
                key: format!("{:?}", standard),
            })
    }

    /// Register (or replace) a descriptor under an explicit standard key.
    /// Lets an embedder register `Custom` base descriptors of their own
    /// rather than going through [`SegyDescriptor::customize`] each time.
    pub fn register(&mut self, standard: SegyStandard, descriptor: SegyDescriptor) {
        self.standards.insert(standard, descriptor);
    }

    /// The set of standards currently registered.
    pub fn standards(&self) -> impl Iterator<Item = &SegyStandard> {
        self.standards.keys()
    }
}

impl Default for StandardRegistry {
    /// Panics only if the built-in revision field tables themselves violate
    /// the overlap/oversize invariants, which would be a bug in this crate,
    /// not a runtime condition a caller can trigger.
    fn default() -> Self {
        Self::new().expect("built-in SEG-Y standards are internally consistent")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_standards_are_registered() {
        let reg = StandardRegistry::new().unwrap();
        assert!(reg.get(SegyStandard::Rev0).is_ok());
        assert!(reg.get(SegyStandard::Rev1).is_ok());
        assert!(reg.get(SegyStandard::Rev2).is_ok());
        assert!(reg.get(SegyStandard::Rev21).is_ok());
    }

    #[test]
    fn unknown_standard_is_an_error() {
        let reg = StandardRegistry::new().unwrap();
        let mut reg = reg;
        reg.standards.remove(&SegyStandard::Custom);
        match reg.get(SegyStandard::Custom) {
            Err(SegyError::UnknownStandard { .. }) => {}
            other => panic!("expected UnknownStandard, got {:?}", other),
        }
    }

    #[test]
    fn get_is_a_deep_copy_isolated_from_future_gets() {
        let reg = StandardRegistry::new().unwrap();
        let mut first = reg.get(SegyStandard::Rev0).unwrap();
        first.trace.data.samples = 9999;
        let second = reg.get(SegyStandard::Rev0).unwrap();
        assert_ne!(second.trace.data.samples, 9999);
    }

    #[test]
    fn rev0_binary_header_item_size_is_400() {
        let reg = StandardRegistry::new().unwrap();
        let d = reg.get(SegyStandard::Rev0).unwrap();
        assert_eq!(d.binary_file_header.item_size(), 400);
        assert_eq!(d.trace.header.item_size(), 240);
    }
}
