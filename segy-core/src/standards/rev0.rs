//! SEG-Y Rev0 field tables: the 27-field binary file header and the
//! 71-scalar-field trace header, offsets and widths as published by the
//! canonical SEG-Y Rev0 specification.
//!
//! Byte offsets below stop at the last field Rev0 itself defines
//! (`over_travel`, offset 178); see `standards::rev1`/`rev2` for the
//! revision-specific additive overlays layered on top.
use crate::descriptor::{
    SegyDescriptor, SegyStandard, StructuredDataTypeDescriptor, StructuredFieldDescriptor,
    TextHeaderDescriptor, TextEncoding, TraceDataDescriptor, TraceDescriptor,
};
use crate::errors::SegyError;
use crate::scalar::{Endianness, ScalarType};

fn f(name: &str, offset: usize, format: ScalarType) -> StructuredFieldDescriptor {
    StructuredFieldDescriptor::new(name, offset, format, Endianness::Big)
}

/// The Rev0 binary file header field list (400-byte record, 27 fields used).
///
/// `sample_interval` is declared `int16` (rather than the unsigned width a
/// literal transcription of some reference implementations uses) to match
/// the field's documented signedness.
pub fn bin_header_fields() -> Vec<StructuredFieldDescriptor> {
    use ScalarType::*;
    vec![
        f("job_id", 0, UInt32),
        f("line_number", 4, UInt32),
        f("reel_number", 8, UInt32),
        f("no_traces", 12, UInt16),
        f("no_aux_traces", 14, UInt16),
        f("sample_interval", 16, Int16),
        f("sample_interval_original", 18, UInt16),
        f("no_samples", 20, UInt16),
        f("no_samples_original", 22, UInt16),
        f("sample_format_code", 24, UInt16),
        f("ensemble_fold", 26, UInt16),
        f("sorting_code", 28, UInt16),
        f("vertical_sum", 30, UInt16),
        f("sweep_frequency_start", 32, UInt16),
        f("sweep_frequency_end", 34, UInt16),
        f("sweep_length", 36, UInt16),
        f("sweep_type", 38, UInt16),
        f("sweep_channel_trace_no", 40, UInt16),
        f("sweep_taper_at_start", 42, UInt16),
        f("sweep_taper_at_end", 44, UInt16),
        f("taper_type", 46, UInt16),
        f("correlated_traces", 48, UInt16),
        f("binary_gain_recovered", 50, UInt16),
        f("amplitude_recovery_method", 52, UInt16),
        f("measurement_system", 54, UInt16),
        f("impulse_signal_polarity", 56, UInt16),
        f("vibratory_polarity_code", 58, UInt16),
    ]
}

/// The Rev0 trace header field list: 71 scalar fields, `trace_sequence_on_line`
/// (offset 0) through `over_travel` (offset 178). Rev0 leaves bytes 180..240
/// unassigned; Rev1 is the revision that gives that tail meaning (see
/// [`super::rev1::trace_header_fields`]), so those fields do not belong here.
/// `trace_name` (bytes 232..240, Rev1+) is an 8-byte ASCII tag rather than a
/// scalar value and is intentionally left as an unnamed gap; the
/// descriptor model is schema-driven over [`ScalarType`], not byte arrays.
pub fn trace_header_fields() -> Vec<StructuredFieldDescriptor> {
    use ScalarType::*;
    vec![
        f("trace_sequence_on_line", 0, Int32),
        f("trace_sequence_in_file", 4, Int32),
        f("field_record_no", 8, Int32),
        f("trace_no", 12, Int32),
        f("energy_source_point_no", 16, Int32),
        f("ensemble_no", 20, Int32),
        f("trace_no_in_ensemble", 24, Int32),
        f("trace_identification_code", 28, Int16),
        f("no_v_summed_traces", 30, UInt16),
        f("no_h_stacked_traces", 32, UInt16),
        f("data_use", 34, UInt16),
        f("source_to_receiver_distance", 36, Int32),
        f("elevation_of_receiver_group", 40, Int32),
        f("surface_elevation_of_source", 44, Int32),
        f("source_depth", 48, Int32),
        f("datum_elevation_of_receiver_group", 52, Int32),
        f("datum_elevation_of_source", 56, Int32),
        f("water_column_height_at_source", 60, Int32),
        f("water_column_height_at_group", 64, Int32),
        f("elevation_scalar", 68, Int16),
        f("coordinate_scalar", 70, Int16),
        f("source_x", 72, Int32),
        f("source_y", 76, Int32),
        f("receiver_group_x", 80, Int32),
        f("receiver_group_y", 84, Int32),
        f("coordinate_units", 88, UInt16),
        f("weathering_velocity", 90, UInt16),
        f("sub_weathering_velocity", 92, UInt16),
        f("uphole_time_at_source", 94, UInt16),
        f("uphole_time_at_group", 96, UInt16),
        f("source_static_correction", 98, UInt16),
        f("group_static_correction", 100, UInt16),
        f("total_static_applied", 102, UInt16),
        f("lag_time_a", 104, UInt16),
        f("lag_time_b", 106, UInt16),
        f("delay_recording_time", 108, UInt16),
        f("mute_time_start", 110, UInt16),
        f("mute_time_end", 112, UInt16),
        f("no_samples_in_trace", 114, UInt16),
        f("sample_interval_of_trace", 116, UInt16),
        f("gain_type", 118, UInt16),
        f("instrument_gain_constant", 120, UInt16),
        f("instrument_initial_gain", 122, UInt16),
        f("correlated", 124, UInt16),
        f("sweep_frequency_at_start", 126, UInt16),
        f("sweep_frequency_at_end", 128, UInt16),
        f("sweep_length_trace", 130, UInt16),
        f("sweep_type_trace", 132, UInt16),
        f("sweep_trace_taper_length_at_start", 134, UInt16),
        f("sweep_trace_taper_length_at_end", 136, UInt16),
        f("taper_type_trace", 138, UInt16),
        f("alias_filter_frequency", 140, UInt16),
        f("alias_filter_slope", 142, UInt16),
        f("notch_filter_frequency", 144, UInt16),
        f("notch_filter_slope", 146, UInt16),
        f("low_cut_frequency", 148, UInt16),
        f("high_cut_frequency", 150, UInt16),
        f("low_cut_slope", 152, UInt16),
        f("high_cut_slope", 154, UInt16),
        f("year_recorded", 156, UInt16),
        f("day_of_year", 158, UInt16),
        f("hour_of_day", 160, UInt16),
        f("minute_of_hour", 162, UInt16),
        f("second_of_minute", 164, UInt16),
        f("time_base_code", 166, UInt16),
        f("trace_weighting_factor", 168, UInt16),
        f("geophone_group_number_roll_pos1", 170, UInt16),
        f("geophone_group_number_first_trace_orig_field", 172, UInt16),
        f("geophone_group_number_last_trace_orig_field", 174, UInt16),
        f("gap_size", 176, UInt16),
        f("over_travel", 178, UInt16),
    ]
}

pub const BIN_HEADER_LEN: usize = 400;
pub const TRACE_HEADER_LEN: usize = 240;
pub const TEXT_HEADER_LEN: usize = 3200;

/// Build the registered Rev0 [`SegyDescriptor`]. `samples` defaults to 0 and
/// `format` to `Ibm32`, the sample format code SEG-Y Rev0 actually documents
/// as the default trace data encoding; the file facade still patches both
/// from the actual binary header on open (see
/// [`crate::descriptor::SegyDescriptor::customize`]), but a caller reaching
/// this descriptor straight from [`crate::registry`] without customizing
/// gets the historically-correct IBM float reading rather than a silently
/// wrong 16-bit integer one.
pub fn build() -> Result<SegyDescriptor, SegyError> {
    let binary_file_header =
        StructuredDataTypeDescriptor::new(bin_header_fields(), BIN_HEADER_LEN, Some(TEXT_HEADER_LEN))?;
    let header = StructuredDataTypeDescriptor::new(trace_header_fields(), TRACE_HEADER_LEN, None)?;
    let data = TraceDataDescriptor::new(ScalarType::Ibm32, Endianness::Big, 0);
    let trace = TraceDescriptor::new(header, data, TEXT_HEADER_LEN + BIN_HEADER_LEN);
    Ok(SegyDescriptor {
        segy_standard: SegyStandard::Rev0,
        text_file_header: TextHeaderDescriptor::new(40, 80, 0, TextEncoding::Ebcdic),
        binary_file_header,
        extended_text_header: None,
        trace,
    })
}
