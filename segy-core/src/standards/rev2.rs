//! SEG-Y Rev2 / Rev2.1 overlay: additive byte-order detection field on top
//! of [`super::rev1`], and permission for little-endian or ASCII text
//! headers (applied by the caller via [`crate::descriptor::SegyDescriptor::customize`],
//! not baked into the registered default — a Rev2 file may still be
//! big-endian EBCDIC).
use crate::descriptor::{
    SegyDescriptor, SegyStandard, StructuredDataTypeDescriptor, StructuredFieldDescriptor,
    TextEncoding, TextHeaderDescriptor, TraceDataDescriptor, TraceDescriptor,
};
use crate::errors::SegyError;
use crate::scalar::{Endianness, ScalarType};
use crate::standards::{rev0, rev1};

fn f(name: &str, offset: usize, format: ScalarType) -> StructuredFieldDescriptor {
    StructuredFieldDescriptor::new(name, offset, format, Endianness::Big)
}

/// Rev2 adds the byte-order marker field (a 4-byte constant pattern used to
/// detect whether the file was written little-endian) to the Rev1 list.
pub fn bin_header_fields() -> Vec<StructuredFieldDescriptor> {
    let mut fields = rev1::bin_header_fields();
    fields.push(f("byte_order_marker", 96, ScalarType::UInt32));
    fields
}

fn build_for(standard: SegyStandard) -> Result<SegyDescriptor, SegyError> {
    let binary_file_header = StructuredDataTypeDescriptor::new(
        bin_header_fields(),
        rev0::BIN_HEADER_LEN,
        Some(rev0::TEXT_HEADER_LEN),
    )?;
    let header = StructuredDataTypeDescriptor::new(
        rev1::trace_header_fields(),
        rev0::TRACE_HEADER_LEN,
        None,
    )?;
    let data = TraceDataDescriptor::new(ScalarType::Ibm32, Endianness::Big, 0);
    let trace = TraceDescriptor::new(header, data, rev0::TEXT_HEADER_LEN + rev0::BIN_HEADER_LEN);
    Ok(SegyDescriptor {
        segy_standard: standard,
        text_file_header: TextHeaderDescriptor::new(40, 80, 0, TextEncoding::Ebcdic),
        binary_file_header,
        extended_text_header: None,
        trace,
    })
}

pub fn build() -> Result<SegyDescriptor, SegyError> {
    build_for(SegyStandard::Rev2)
}

pub fn build_rev21() -> Result<SegyDescriptor, SegyError> {
    build_for(SegyStandard::Rev21)
}
