//! The declarative descriptor tree: scalar, structured, text, trace, and
//! file-level descriptors, plus the runtime value types they decode into.
//!
//! Every descriptor here is an immutable value object. Nothing under this
//! module performs I/O; it only knows how to compile a byte layout and
//! decode/encode bytes it is handed.
use crate::bitconverter::{ascii_bytes_to_string, ibm32_buffer_to_f32, swap_fields_in_place};
use crate::errors::SegyError;
use crate::scalar::{decode_scalar, Endianness, Family, ScalarType, ScalarValue};
use encoding8::ebcdic::{to_ascii, to_ebcdic};
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single named, fixed-offset field within a [`StructuredDataTypeDescriptor`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructuredFieldDescriptor {
    pub name: String,
    pub offset: usize,
    pub format: ScalarType,
    pub endianness: Endianness,
}

impl StructuredFieldDescriptor {
    pub fn new(name: impl Into<String>, offset: usize, format: ScalarType, endianness: Endianness) -> Self {
        StructuredFieldDescriptor {
            name: name.into(),
            offset,
            format,
            endianness,
        }
    }

    fn end(&self) -> usize {
        self.offset + self.format.width()
    }
}

/// One entry of a compiled [`StructuredDataTypeDescriptor`] layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledField {
    pub name: String,
    pub offset: usize,
    pub width: usize,
    pub family: Family,
    pub endianness: Endianness,
    pub format: ScalarType,
}

/// The result of [`StructuredDataTypeDescriptor::compile`]: the ordered field
/// layout plus the gap (padding) regions left unnamed between or after
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLayout {
    pub fields: Vec<CompiledField>,
    pub item_size: usize,
    pub gaps: Vec<(usize, usize)>,
}

/// An ordered set of named fields describing a fixed-size binary record:
/// a trace header, a binary file header, or a user structured field group.
///
/// Construction validates that no two fields overlap and that every field
/// fits within `item_size`; either violation is a [`SegyError::SchemaOverlap`]
/// or [`SegyError::SchemaOversize`], never a panic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructuredDataTypeDescriptor {
    fields: Vec<StructuredFieldDescriptor>,
    item_size: usize,
    offset: Option<usize>,
}

impl StructuredDataTypeDescriptor {
    /// Build a structured descriptor from its fields, validating uniqueness
    /// of names, non-overlap, and that every field fits in `item_size`.
    pub fn new(
        fields: Vec<StructuredFieldDescriptor>,
        item_size: usize,
        offset: Option<usize>,
    ) -> Result<Self, SegyError> {
        let mut seen_names = HashSet::new();
        for field in &fields {
            if !seen_names.insert(field.name.clone()) {
                return Err(SegyError::SchemaOverlap {
                    a: field.name.clone(),
                    b: field.name.clone(),
                });
            }
            if field.end() > item_size {
                return Err(SegyError::SchemaOversize {
                    field: field.name.clone(),
                    item_size,
                });
            }
        }

        let mut ordered: Vec<&StructuredFieldDescriptor> = fields.iter().collect();
        ordered.sort_by_key(|f| f.offset);
        for pair in ordered.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.end() > b.offset {
                return Err(SegyError::SchemaOverlap {
                    a: a.name.clone(),
                    b: b.name.clone(),
                });
            }
        }

        Ok(StructuredDataTypeDescriptor {
            fields,
            item_size,
            offset,
        })
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn fields(&self) -> &[StructuredFieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&StructuredFieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Compile the declaration-order field list into an offset-ordered
    /// layout with gap detection. Deterministic and pure.
    pub fn compile(&self) -> CompiledLayout {
        let mut ordered: Vec<&StructuredFieldDescriptor> = self.fields.iter().collect();
        ordered.sort_by_key(|f| f.offset);

        let mut fields = Vec::with_capacity(self.fields.len());
        let mut gaps = Vec::new();
        let mut cursor = 0usize;
        for f in &ordered {
            if f.offset > cursor {
                gaps.push((cursor, f.offset));
            }
            fields.push(CompiledField {
                name: f.name.clone(),
                offset: f.offset,
                width: f.format.width(),
                family: f.format.family(),
                endianness: f.endianness,
                format: f.format,
            });
            cursor = f.end();
        }
        if cursor < self.item_size {
            gaps.push((cursor, self.item_size));
        }

        // Field declaration order (not offset order) is what callers see in
        // a decoded Record, per the "field access preserves declaration
        // order" contract.
        let declared_order: Vec<CompiledField> = self
            .fields
            .iter()
            .map(|f| {
                fields
                    .iter()
                    .find(|c| c.name == f.name)
                    .cloned()
                    .expect("field compiled from its own descriptor")
            })
            .collect();

        CompiledLayout {
            fields: declared_order,
            item_size: self.item_size,
            gaps,
        }
    }

    /// Decode a buffer of exactly `item_size` bytes into a [`Record`],
    /// preserving field declaration order.
    pub fn decode(&self, buf: &[u8]) -> Result<Record, SegyError> {
        if buf.len() != self.item_size {
            return Err(SegyError::TruncatedBuffer {
                expected: self.item_size,
                actual: buf.len(),
            });
        }
        let mut entries = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let slice = &buf[field.offset..field.offset + field.format.width()];
            let value = decode_scalar(slice, field.format, field.endianness)?;
            entries.push((field.name.clone(), value));
        }
        Ok(Record(entries))
    }

    /// Swap every field's bytes in place, honoring each field's own width.
    /// Gaps are left untouched. Calling this twice on the same buffer is a
    /// no-op (byte swap is an involution).
    pub fn swap_in_place(&self, buf: &mut [u8]) {
        let layout: Vec<(usize, usize)> = self
            .fields
            .iter()
            .map(|f| (f.offset, f.format.width()))
            .collect();
        swap_fields_in_place(buf, &layout);
    }
}

/// Text encoding used by a [`TextHeaderDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextEncoding {
    Ebcdic,
    Ascii,
}

/// Descriptor for a fixed-size block of printable text: the 3200-byte file
/// text header or an extended text header.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextHeaderDescriptor {
    rows: usize,
    cols: usize,
    offset: usize,
    encoding: TextEncoding,
}

impl TextHeaderDescriptor {
    pub fn new(rows: usize, cols: usize, offset: usize, encoding: TextEncoding) -> Self {
        TextHeaderDescriptor {
            rows,
            cols,
            offset,
            encoding,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode `s` to exactly `rows * cols` bytes, space-padding short input.
    /// Input longer than `rows * cols` is a [`SegyError::TextHeaderTooLong`].
    pub fn encode(&self, s: &str) -> Result<Vec<u8>, SegyError> {
        let max = self.len();
        if s.len() > max {
            return Err(SegyError::TextHeaderTooLong { len: s.len(), max });
        }
        let padded = format!("{:<width$}", s, width = max);
        match self.encoding {
            TextEncoding::Ascii => Ok(padded.into_bytes()),
            TextEncoding::Ebcdic => Ok(padded.bytes().map(to_ebcdic).collect()),
        }
    }

    /// Decode exactly `rows * cols` bytes to a `String` using the declared
    /// encoding.
    pub fn decode(&self, buf: &[u8]) -> Result<String, SegyError> {
        let expected = self.len();
        if buf.len() != expected {
            return Err(SegyError::TruncatedBuffer {
                expected,
                actual: buf.len(),
            });
        }
        match self.encoding {
            TextEncoding::Ascii => Ok(String::from_utf8_lossy(buf).to_string()),
            TextEncoding::Ebcdic => {
                let ascii: Vec<u8> = buf.iter().map(|b| to_ascii(*b)).collect();
                Ok(ascii_bytes_to_string(&ascii))
            }
        }
    }

    /// Split a `rows*cols`-length string into `rows` lines of `cols` chars.
    pub fn wrap(&self, s: &str) -> Vec<String> {
        s.as_bytes()
            .chunks(self.cols)
            .map(|chunk| String::from_utf8_lossy(chunk).to_string())
            .collect()
    }
}

/// Descriptor for the fixed-format, fixed-count sample vector of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceDataDescriptor {
    pub format: ScalarType,
    pub endianness: Endianness,
    pub samples: usize,
}

impl TraceDataDescriptor {
    pub fn new(format: ScalarType, endianness: Endianness, samples: usize) -> Self {
        TraceDataDescriptor {
            format,
            endianness,
            samples,
        }
    }

    /// Storage width of the sample vector, in bytes. `ibm32` stores the same
    /// 4 bytes per sample as `float32`.
    pub fn width(&self) -> usize {
        self.samples * self.format.width()
    }

    /// Decode the sample vector, converting `ibm32` to `float32` along the
    /// way per the family invariant.
    pub fn decode(&self, buf: &[u8]) -> Result<SampleArray, SegyError> {
        let expected = self.width();
        if buf.len() != expected {
            return Err(SegyError::TruncatedBuffer {
                expected,
                actual: buf.len(),
            });
        }
        if self.format == ScalarType::Ibm32 {
            // IBM32 is always big-endian on the wire; `endianness` only
            // governs whether the raw word needs a swap before extraction.
            let mut owned;
            let be_buf: &[u8] = if self.endianness.needs_swap() {
                owned = buf.to_vec();
                swap_fields_in_place(&mut owned, &field_layout(self.samples, 4));
                &owned
            } else {
                buf
            };
            return Ok(SampleArray::F32(ibm32_buffer_to_f32(be_buf)));
        }

        let width = self.format.width();
        let mut values = Vec::with_capacity(self.samples);
        for chunk in buf.chunks_exact(width) {
            values.push(decode_scalar(chunk, self.format, self.endianness)?);
        }
        Ok(SampleArray::from_scalars(self.format, values))
    }

    /// Swap every sample's bytes in place (all samples share one width).
    pub fn swap_in_place(&self, buf: &mut [u8]) {
        swap_fields_in_place(buf, &field_layout(self.samples, self.format.width()));
    }
}

fn field_layout(count: usize, width: usize) -> Vec<(usize, usize)> {
    (0..count).map(|i| (i * width, width)).collect()
}

/// A trace record descriptor: a structured header followed by a sample
/// vector. The compiled record has two contiguous regions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceDescriptor {
    pub header: StructuredDataTypeDescriptor,
    pub data: TraceDataDescriptor,
    pub offset: usize,
}

impl TraceDescriptor {
    pub fn new(header: StructuredDataTypeDescriptor, data: TraceDataDescriptor, offset: usize) -> Self {
        TraceDescriptor { header, data, offset }
    }

    pub fn header_size(&self) -> usize {
        self.header.item_size()
    }

    pub fn data_size(&self) -> usize {
        self.data.width()
    }

    /// Byte distance between consecutive trace records on disk.
    pub fn stride(&self) -> usize {
        self.header_size() + self.data_size()
    }

    pub fn itemsize(&self) -> usize {
        self.stride()
    }
}

/// The revision (or custom status) a [`SegyDescriptor`] was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegyStandard {
    Rev0,
    Rev1,
    Rev2,
    Rev21,
    Custom,
}

/// The full, composed layout of a SEG-Y file: text header, binary header,
/// optional extended text header, and trace descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegyDescriptor {
    pub segy_standard: SegyStandard,
    pub text_file_header: TextHeaderDescriptor,
    pub binary_file_header: StructuredDataTypeDescriptor,
    pub extended_text_header: Option<TextHeaderDescriptor>,
    pub trace: TraceDescriptor,
}

/// The set of slots [`SegyDescriptor::customize`] may overwrite. `None`
/// leaves that slot untouched (preserved by deep copy).
#[derive(Debug, Clone, Default)]
pub struct Customization {
    pub text_file_header: Option<TextHeaderDescriptor>,
    pub binary_file_header: Option<StructuredDataTypeDescriptor>,
    pub extended_text_header: Option<Option<TextHeaderDescriptor>>,
    pub trace_header_fields: Option<StructuredDataTypeDescriptor>,
    pub trace_data: Option<TraceDataDescriptor>,
}

impl SegyDescriptor {
    /// Produce a deep-cloned descriptor with `segy_standard = Custom` and
    /// the provided slots overwritten; everything else is preserved.
    /// A provided header field list *replaces* the existing one wholesale,
    /// it is never merged field-by-field.
    pub fn customize(&self, over: Customization) -> SegyDescriptor {
        let mut out = self.clone();
        out.segy_standard = SegyStandard::Custom;
        if let Some(t) = over.text_file_header {
            out.text_file_header = t;
        }
        if let Some(b) = over.binary_file_header {
            out.binary_file_header = b;
        }
        if let Some(e) = over.extended_text_header {
            out.extended_text_header = e;
        }
        if let Some(h) = over.trace_header_fields {
            out.trace.header = h;
        }
        if let Some(d) = over.trace_data {
            out.trace.data = d;
        }
        out
    }
}

/// A decoded structured record: an ordered list of `(field name, value)`
/// pairs in field declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(pub Vec<(String, ScalarValue)>);

impl Record {
    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
}

/// A decoded sample vector, tagged by its post-decode scalar type. `ibm32`
/// storage always surfaces as `F32`.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleArray {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl SampleArray {
    pub fn len(&self) -> usize {
        match self {
            SampleArray::I8(v) => v.len(),
            SampleArray::U8(v) => v.len(),
            SampleArray::I16(v) => v.len(),
            SampleArray::U16(v) => v.len(),
            SampleArray::I32(v) => v.len(),
            SampleArray::U32(v) => v.len(),
            SampleArray::I64(v) => v.len(),
            SampleArray::U64(v) => v.len(),
            SampleArray::F32(v) => v.len(),
            SampleArray::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_scalars(format: ScalarType, values: Vec<ScalarValue>) -> Self {
        match format {
            ScalarType::Int8 => SampleArray::I8(values.into_iter().map(|v| match v {
                ScalarValue::I8(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::UInt8 => SampleArray::U8(values.into_iter().map(|v| match v {
                ScalarValue::U8(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::Int16 => SampleArray::I16(values.into_iter().map(|v| match v {
                ScalarValue::I16(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::UInt16 => SampleArray::U16(values.into_iter().map(|v| match v {
                ScalarValue::U16(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::Int32 => SampleArray::I32(values.into_iter().map(|v| match v {
                ScalarValue::I32(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::UInt32 => SampleArray::U32(values.into_iter().map(|v| match v {
                ScalarValue::U32(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::Int64 => SampleArray::I64(values.into_iter().map(|v| match v {
                ScalarValue::I64(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::UInt64 => SampleArray::U64(values.into_iter().map(|v| match v {
                ScalarValue::U64(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::Float32 => SampleArray::F32(values.into_iter().map(|v| match v {
                ScalarValue::F32(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::Float64 => SampleArray::F64(values.into_iter().map(|v| match v {
                ScalarValue::F64(x) => x,
                _ => unreachable!("decode_scalar returns the format it was asked for"),
            }).collect()),
            ScalarType::Ibm32 => unreachable!("ibm32 samples are decoded via ibm32_buffer_to_f32"),
        }
    }
}

/// Length of the optional 128-byte IBM 9-track tape label that may precede
/// the text header.
pub const TAPE_LABEL_LEN: usize = 128;

/// The raw 128-byte tape label, unparsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeLabel(pub [u8; TAPE_LABEL_LEN]);

impl TapeLabel {
    pub fn from_bytes(buf: &[u8]) -> Result<Self, SegyError> {
        if buf.len() != TAPE_LABEL_LEN {
            return Err(SegyError::TruncatedBuffer {
                expected: TAPE_LABEL_LEN,
                actual: buf.len(),
            });
        }
        let mut arr = [0u8; TAPE_LABEL_LEN];
        arr.copy_from_slice(buf);
        Ok(TapeLabel(arr))
    }

    /// Detect whether a buffer beginning a SEG-Y file starts with a tape
    /// label: `buf[0]` is not the text header's leading `'C'` record marker,
    /// but `buf[TAPE_LABEL_LEN]` is. `buf` must have at least
    /// `TAPE_LABEL_LEN + 1` bytes.
    pub fn has_label(buf: &[u8]) -> bool {
        if buf.len() <= TAPE_LABEL_LEN {
            return false;
        }
        let is_c = |b: u8| b == b'C' || b == 0xC3;
        !is_c(buf[0]) && is_c(buf[TAPE_LABEL_LEN])
    }

    /// Decode the label's character sub-fields into a display-friendly
    /// form. Field boundaries follow the 128-byte IBM 9-track tape label
    /// layout; this workspace does not interpret their semantics beyond
    /// exposing them as strings (the label is additive metadata and plays
    /// no part in trace indexing).
    pub fn to_readable(&self) -> ReadableTapeLabel {
        let b = &self.0;
        let take = |start: usize, len: usize| ascii_bytes_to_string(&b[start..start + len]);
        ReadableTapeLabel {
            storage_unit_seq_no: take(0, 4),
            segy_revision_no: take(4, 5),
            storage_unit_structure: take(9, 6),
            binding_number: take(15, 4),
            producing_organisation_code: take(29, 10),
            creation_date: take(39, 11),
            serial_number: take(50, 12),
            external_label: take(68, 12),
            recording_entity: take(80, 24),
            extra: take(104, 14),
        }
    }
}

/// Human-readable view of a [`TapeLabel`]'s character sub-fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadableTapeLabel {
    pub storage_unit_seq_no: String,
    pub segy_revision_no: String,
    pub storage_unit_structure: String,
    pub binding_number: String,
    pub producing_organisation_code: String,
    pub creation_date: String,
    pub serial_number: String,
    pub external_label: String,
    pub recording_entity: String,
    pub extra: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{Endianness, ScalarType};

    fn field(name: &str, offset: usize, format: ScalarType) -> StructuredFieldDescriptor {
        StructuredFieldDescriptor::new(name, offset, format, Endianness::Big)
    }

    #[test]
    fn overlapping_fields_are_rejected() {
        let fields = vec![
            field("a", 0, ScalarType::Int32),
            field("b", 2, ScalarType::Int16),
        ];
        match StructuredDataTypeDescriptor::new(fields, 8, None) {
            Err(SegyError::SchemaOverlap { .. }) => {}
            other => panic!("expected SchemaOverlap, got {:?}", other),
        }
    }

    #[test]
    fn oversized_field_is_rejected() {
        let fields = vec![field("a", 6, ScalarType::Int32)];
        match StructuredDataTypeDescriptor::new(fields, 8, None) {
            Err(SegyError::SchemaOversize { .. }) => {}
            other => panic!("expected SchemaOversize, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let fields = vec![
            field("a", 0, ScalarType::Int16),
            field("a", 2, ScalarType::Int16),
        ];
        match StructuredDataTypeDescriptor::new(fields, 4, None) {
            Err(SegyError::SchemaOverlap { .. }) => {}
            other => panic!("expected SchemaOverlap for duplicate name, got {:?}", other),
        }
    }

    /// Invariant 1: item_size accounts for every field plus whatever
    /// padding gaps `compile()` reports between/after them.
    #[test]
    fn compiled_layout_accounts_for_every_byte() {
        let fields = vec![
            field("a", 0, ScalarType::Int16),
            field("b", 4, ScalarType::Int32),
        ];
        let d = StructuredDataTypeDescriptor::new(fields, 10, None).unwrap();
        let layout = d.compile();
        assert_eq!(layout.item_size, 10);
        assert_eq!(layout.gaps, vec![(2, 4), (8, 10)]);
        let covered: usize = layout.fields.iter().map(|f| f.width).sum();
        let gapped: usize = layout.gaps.iter().map(|(s, e)| e - s).sum();
        assert_eq!(covered + gapped, layout.item_size);
    }

    #[test]
    fn decode_preserves_declaration_order_not_offset_order() {
        let fields = vec![
            field("second", 2, ScalarType::Int16),
            field("first", 0, ScalarType::Int16),
        ];
        let d = StructuredDataTypeDescriptor::new(fields, 4, None).unwrap();
        let mut buf = Vec::new();
        buf.extend_from_slice(&1i16.to_be_bytes());
        buf.extend_from_slice(&2i16.to_be_bytes());
        let record = d.decode(&buf).unwrap();
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["second", "first"]);
        assert_eq!(record.get("first"), Some(&ScalarValue::I16(1)));
        assert_eq!(record.get("second"), Some(&ScalarValue::I16(2)));
    }

    #[test]
    fn decode_rejects_a_buffer_of_the_wrong_length() {
        let d = StructuredDataTypeDescriptor::new(vec![field("a", 0, ScalarType::Int16)], 4, None)
            .unwrap();
        match d.decode(&[0u8; 2]) {
            Err(SegyError::TruncatedBuffer { expected: 4, actual: 2 }) => {}
            other => panic!("expected TruncatedBuffer, got {:?}", other),
        }
    }

    /// Invariant 4: swapping a structured record's fields twice is a no-op.
    #[test]
    fn swap_in_place_is_an_involution() {
        let fields = vec![
            field("a", 0, ScalarType::Int16),
            field("b", 2, ScalarType::Int32),
        ];
        let d = StructuredDataTypeDescriptor::new(fields, 6, None).unwrap();
        let original: Vec<u8> = (0..6).collect();
        let mut buf = original.clone();
        d.swap_in_place(&mut buf);
        assert_ne!(buf, original);
        d.swap_in_place(&mut buf);
        assert_eq!(buf, original);
    }

    /// Invariant 3: text header round-trip for both encodings.
    #[test]
    fn text_header_round_trips_ascii() {
        let th = TextHeaderDescriptor::new(2, 4, 0, TextEncoding::Ascii);
        let encoded = th.encode("abc").unwrap();
        assert_eq!(encoded.len(), 8);
        let decoded = th.decode(&encoded).unwrap();
        assert_eq!(decoded.trim_end(), "abc");
    }

    #[test]
    fn text_header_round_trips_ebcdic() {
        let th = TextHeaderDescriptor::new(1, 10, 0, TextEncoding::Ebcdic);
        let encoded = th.encode("C 1 HELLO").unwrap();
        assert_eq!(encoded.len(), 10);
        let decoded = th.decode(&encoded).unwrap();
        assert_eq!(decoded.trim_end(), "C 1 HELLO");
    }

    #[test]
    fn text_header_input_longer_than_capacity_is_rejected() {
        let th = TextHeaderDescriptor::new(1, 4, 0, TextEncoding::Ascii);
        match th.encode("too long") {
            Err(SegyError::TextHeaderTooLong { len: 8, max: 4 }) => {}
            other => panic!("expected TextHeaderTooLong, got {:?}", other),
        }
    }

    #[test]
    fn wrap_splits_into_rows_of_cols_characters() {
        let th = TextHeaderDescriptor::new(2, 3, 0, TextEncoding::Ascii);
        assert_eq!(th.wrap("abcdef"), vec!["abc".to_string(), "def".to_string()]);
    }

    /// S1: Rev0 binary header is 400 bytes with `sample_interval` at offset
    /// 16, int16 big-endian.
    #[test]
    fn s1_rev0_binary_header_layout() {
        let d = crate::standards::rev0::build().unwrap();
        assert_eq!(d.binary_file_header.item_size(), 400);
        let f = d.binary_file_header.field("sample_interval").unwrap();
        assert_eq!(f.offset, 16);
        assert_eq!(f.format, ScalarType::Int16);
        assert_eq!(f.endianness, Endianness::Big);
    }

    /// S2: Rev0 trace header is 240 bytes with `src_x` (named `source_x`
    /// here) at offset 72, int32 big-endian.
    #[test]
    fn s2_rev0_trace_header_layout() {
        let d = crate::standards::rev0::build().unwrap();
        assert_eq!(d.trace.header.item_size(), 240);
        let f = d.trace.header.field("source_x").unwrap();
        assert_eq!(f.offset, 72);
        assert_eq!(f.format, ScalarType::Int32);
        assert_eq!(f.endianness, Endianness::Big);
    }

    /// Invariant 8: customizing a descriptor never mutates the original it
    /// was cloned from.
    #[test]
    fn customize_does_not_mutate_the_source_descriptor() {
        let original = crate::standards::rev0::build().unwrap();
        let overridden_text = TextHeaderDescriptor::new(1, 1, 0, TextEncoding::Ascii);
        let customized = original.customize(Customization {
            text_file_header: Some(overridden_text),
            ..Default::default()
        });
        assert_eq!(customized.segy_standard, SegyStandard::Custom);
        assert_ne!(customized.text_file_header, original.text_file_header);
        assert_eq!(original.text_file_header.rows(), 40);
        assert_eq!(original.text_file_header.cols(), 80);
    }

    #[test]
    fn trace_data_descriptor_decodes_ibm32_to_float32() {
        let td = TraceDataDescriptor::new(ScalarType::Ibm32, Endianness::Big, 2);
        let mut buf = Vec::new();
        buf.extend_from_slice(&0x4110_0000u32.to_be_bytes());
        buf.extend_from_slice(&0x4080_0000u32.to_be_bytes());
        match td.decode(&buf).unwrap() {
            SampleArray::F32(v) => assert_eq!(v, vec![1.0f32, 0.5f32]),
            other => panic!("expected F32 samples, got {:?}", other),
        }
    }

    #[test]
    fn trace_data_descriptor_width_matches_samples_times_scalar_width() {
        let td = TraceDataDescriptor::new(ScalarType::Float64, Endianness::Big, 3);
        assert_eq!(td.width(), 24);
    }

    #[test]
    fn tape_label_detection_requires_leading_and_trailing_markers() {
        let mut buf = vec![0u8; TAPE_LABEL_LEN + 1];
        buf[TAPE_LABEL_LEN] = b'C';
        assert!(TapeLabel::has_label(&buf));
        buf[0] = b'C';
        assert!(!TapeLabel::has_label(&buf), "a text header itself must not look like a tape label");
    }

    #[test]
    fn tape_label_from_bytes_rejects_wrong_length() {
        match TapeLabel::from_bytes(&[0u8; 4]) {
            Err(SegyError::TruncatedBuffer { .. }) => {}
            other => panic!("expected TruncatedBuffer, got {:?}", other),
        }
    }
}
