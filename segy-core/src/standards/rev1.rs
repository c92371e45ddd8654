//! SEG-Y Rev1 overlay: additive binary-header and trace-header fields on
//! top of [`super::rev0`].
use crate::descriptor::{
    SegyDescriptor, SegyStandard, StructuredDataTypeDescriptor, StructuredFieldDescriptor,
    TextEncoding, TextHeaderDescriptor, TraceDataDescriptor, TraceDescriptor,
};
use crate::errors::SegyError;
use crate::scalar::{Endianness, ScalarType};
use crate::standards::rev0;

fn f(name: &str, offset: usize, format: ScalarType) -> StructuredFieldDescriptor {
    StructuredFieldDescriptor::new(name, offset, format, Endianness::Big)
}

/// Rev1 adds the revision code, the fixed-length-trace flag, and the
/// extended text header count to the Rev0 binary header field list.
pub fn bin_header_fields() -> Vec<StructuredFieldDescriptor> {
    let mut fields = rev0::bin_header_fields();
    fields.push(f("segy_revision_number", 300, ScalarType::UInt16));
    fields.push(f("fixed_length_trace_flag", 302, ScalarType::UInt16));
    fields.push(f("extended_header_count", 304, ScalarType::UInt16));
    fields
}

/// Rev1 adds 19 trace-header fields (bytes 180..234) that Rev0 leaves
/// unassigned: ensemble/inline/crossline coordinates, the shot point
/// number, trace measurement/transduction units, and the source
/// measurement fields. `trace_name` (bytes 234..240, 6 bytes in the
/// upstream layout rounding out the 240-byte record) is an ASCII tag, not
/// a scalar, and is left as an unnamed gap like the rest of this model.
pub fn trace_header_fields() -> Vec<StructuredFieldDescriptor> {
    use ScalarType::*;
    let mut fields = rev0::trace_header_fields();
    fields.push(f("x_ensemble", 180, Int32));
    fields.push(f("y_ensemble", 184, Int32));
    fields.push(f("inline_no", 188, Int32));
    fields.push(f("crossline_no", 192, Int32));
    fields.push(f("shot_point_no", 196, Int32));
    fields.push(f("shot_point_scalar", 200, UInt16));
    fields.push(f("trace_value_measurement_unit", 202, UInt16));
    fields.push(f("transduction_constant_mantissa", 204, Int32));
    fields.push(f("transduction_constant_power", 208, UInt16));
    fields.push(f("transduction_units", 210, UInt16));
    fields.push(f("trace_identifier", 212, UInt16));
    fields.push(f("time_scalar_trace_header", 214, UInt16));
    fields.push(f("source_type", 216, UInt16));
    fields.push(f("source_energy_direction_v", 218, UInt16));
    fields.push(f("source_energy_direction_il", 220, UInt16));
    fields.push(f("source_energy_direction_xl", 222, UInt16));
    fields.push(f("source_measurement_mantissa", 224, Int32));
    fields.push(f("source_measurement_exponent", 228, UInt16));
    fields.push(f("source_measurement_unit", 230, UInt16));
    fields
}

pub fn build() -> Result<SegyDescriptor, SegyError> {
    let binary_file_header = StructuredDataTypeDescriptor::new(
        bin_header_fields(),
        rev0::BIN_HEADER_LEN,
        Some(rev0::TEXT_HEADER_LEN),
    )?;
    let header = StructuredDataTypeDescriptor::new(
        trace_header_fields(),
        rev0::TRACE_HEADER_LEN,
        None,
    )?;
    let data = TraceDataDescriptor::new(ScalarType::Ibm32, Endianness::Big, 0);
    let trace = TraceDescriptor::new(header, data, rev0::TEXT_HEADER_LEN + rev0::BIN_HEADER_LEN);
    Ok(SegyDescriptor {
        segy_standard: SegyStandard::Rev1,
        text_file_header: TextHeaderDescriptor::new(40, 80, 0, TextEncoding::Ebcdic),
        binary_file_header,
        extended_text_header: None,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_header_fields_overlay_rev0_with_19_additive_fields() {
        let rev0_fields = rev0::trace_header_fields();
        let rev1_fields = trace_header_fields();
        assert_eq!(rev0_fields.len(), 71);
        assert_eq!(rev1_fields.len(), 90);
        assert_eq!(&rev1_fields[..71], &rev0_fields[..]);
    }

    #[test]
    fn overlay_fields_keep_rev0s_over_travel_as_the_last_shared_field() {
        let rev1_fields = trace_header_fields();
        assert_eq!(rev1_fields[70].name, "over_travel");
        assert_eq!(rev1_fields[70].offset, 178);
        assert_eq!(rev1_fields[71].name, "x_ensemble");
        assert_eq!(rev1_fields[71].offset, 180);
    }

    #[test]
    fn source_measurement_unit_is_the_last_rev1_trace_header_field() {
        let f = trace_header_fields();
        let last = f.last().unwrap();
        assert_eq!(last.name, "source_measurement_unit");
        assert_eq!(last.offset, 230);
        assert_eq!(last.format, ScalarType::UInt16);
    }

    #[test]
    fn build_registers_the_full_overlaid_trace_header() {
        let d = build().unwrap();
        assert_eq!(d.trace.header.item_size(), rev0::TRACE_HEADER_LEN);
        assert!(d.trace.header.field("over_travel").is_some());
        assert!(d.trace.header.field("x_ensemble").is_some());
        assert!(d.trace.header.field("source_measurement_unit").is_some());
    }

    #[test]
    fn build_registers_ibm32_as_the_default_sample_format() {
        let d = build().unwrap();
        assert_eq!(d.trace.data.format, ScalarType::Ibm32);
    }
}
