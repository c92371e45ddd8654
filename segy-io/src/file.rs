//! The file facade (C6): opens a URL, reads and decodes the text and
//! binary file headers, derives the concrete trace layout, and exposes the
//! three indexers over it.
use crate::indexer::{DataIndexer, HeaderIndexer, TraceIndexer};
use crate::transport::RangeSource;
use segy_core::sample_format::SampleFormatCode;
use segy_core::standards::rev0::{BIN_HEADER_LEN, TEXT_HEADER_LEN};
use segy_core::{
    Customization, Endianness, ReadableTapeLabel, Record, SegyDescriptor, SegyError, SegyStandard,
    StandardRegistry, StructuredDataTypeDescriptor, StructuredFieldDescriptor, TapeLabel,
    TextEncoding, TextHeaderDescriptor, TraceDataDescriptor, TraceDescriptor,
};
use std::sync::Arc;

/// A SEG-Y file opened over a [`RangeSource`]: parsed text/binary headers,
/// the specialized [`SegyDescriptor`] derived from them, and the three
/// indexers sharing it.
pub struct SegyFile<R: RangeSource> {
    source: Arc<R>,
    url: String,
    descriptor: Arc<SegyDescriptor>,
    trace: Arc<TraceDescriptor>,
    trace_count: usize,
    tape_label: Option<TapeLabel>,
    text_header: String,
    extended_headers: Vec<String>,
    bin_header: Record,
    /// `Some(remainder)` when the file length is not a whole number of
    /// traces (§4.6 step 4): advisory, the reader still opened successfully
    /// using the floor of the division.
    alignment_warning: Option<usize>,
}

impl<R: RangeSource> SegyFile<R> {
    /// Open `url` against `source`. `standard`, if given, skips revision
    /// auto-detection entirely — required for Rev0, which has no revision
    /// field to detect from (§4.6 step 2).
    pub async fn open(
        source: R,
        url: &str,
        registry: &StandardRegistry,
        standard: Option<SegyStandard>,
    ) -> Result<Self, SegyError> {
        log::debug!("segy-io: opening '{}'", url);
        let file_size = source.size(url).await?;
        if file_size < (TEXT_HEADER_LEN + BIN_HEADER_LEN) as u64 {
            return Err(SegyError::FileTooShort);
        }

        let (tape_label, base) = probe_tape_label(&source, url, file_size).await?;

        let text_bytes = fetch_one(&source, url, base, base + TEXT_HEADER_LEN as u64).await?;
        let text_header = TextHeaderDescriptor::new(40, 80, 0, detect_text_encoding(&text_bytes))
            .decode(&text_bytes)?;

        let bin_start = base + TEXT_HEADER_LEN as u64;
        let bin_bytes = fetch_one(&source, url, bin_start, bin_start + BIN_HEADER_LEN as u64).await?;

        let file_endianness = detect_endianness(&bin_bytes);
        let (revision_major, revision_minor) = revision_bytes(&bin_bytes, file_endianness);
        let chosen_standard =
            standard.unwrap_or_else(|| standard_from_revision(revision_major, revision_minor));
        log::debug!(
            "segy-io: '{}' resolved to standard {:?}, endianness {:?}",
            url,
            chosen_standard,
            file_endianness
        );

        let mut descriptor = registry.get(chosen_standard)?;
        if file_endianness == Endianness::Little {
            descriptor = with_field_endianness(descriptor, Endianness::Little)?;
        }

        let bin_record = descriptor.binary_file_header.decode(&bin_bytes)?;
        let no_samples = field_i64(&bin_record, "no_samples")? as usize;
        let format_code = field_i64(&bin_record, "sample_format_code")? as u16;
        let scalar_type = SampleFormatCode::new(format_code)?.to_scalar_type()?;
        let n_extended = bin_record
            .get("extended_header_count")
            .map(|v| v.as_i64().max(0))
            .unwrap_or(0) as usize;

        let ext_start = bin_start + BIN_HEADER_LEN as u64;
        let mut extended_headers = Vec::with_capacity(n_extended);
        for i in 0..n_extended {
            let start = ext_start + i as u64 * TEXT_HEADER_LEN as u64;
            let buf = fetch_one(&source, url, start, start + TEXT_HEADER_LEN as u64).await?;
            let td = TextHeaderDescriptor::new(40, 80, 0, detect_text_encoding(&buf));
            extended_headers.push(td.decode(&buf)?);
        }

        let trace_offset = ext_start + n_extended as u64 * TEXT_HEADER_LEN as u64;
        let data_descriptor = TraceDataDescriptor::new(scalar_type, file_endianness, no_samples);
        let mut descriptor = descriptor.customize(Customization {
            trace_data: Some(data_descriptor),
            ..Default::default()
        });
        descriptor.trace.offset = trace_offset as usize;

        let stride = descriptor.trace.stride() as u64;
        if stride == 0 {
            return Err(SegyError::DecodeError {
                field: "trace".to_string(),
                cause: "computed a zero-length trace stride".to_string(),
            });
        }
        let remaining = file_size.saturating_sub(trace_offset);
        let trace_count = (remaining / stride) as usize;
        let remainder = (remaining % stride) as usize;
        let alignment_warning = if remainder != 0 {
            log::warn!(
                "segy-io: '{}' has {} leftover byte(s) after {} whole traces",
                url,
                remainder,
                trace_count
            );
            Some(remainder)
        } else {
            None
        };

        Ok(SegyFile {
            source: Arc::new(source),
            url: url.to_string(),
            trace: Arc::new(descriptor.trace.clone()),
            descriptor: Arc::new(descriptor),
            trace_count,
            tape_label,
            text_header,
            extended_headers,
            bin_header: bin_record,
            alignment_warning,
        })
    }

    pub fn tape_label(&self) -> Option<&TapeLabel> {
        self.tape_label.as_ref()
    }

    pub fn readable_tape_label(&self) -> Option<ReadableTapeLabel> {
        self.tape_label.as_ref().map(TapeLabel::to_readable)
    }

    pub fn text_header(&self) -> &str {
        &self.text_header
    }

    /// The text header split into its 40 lines of 80 characters, mirroring
    /// `giga_segy_in::SegyFile::get_text_header_lines`.
    pub fn text_header_lines(&self) -> Vec<String> {
        self.descriptor.text_file_header.wrap(&self.text_header)
    }

    pub fn extended_headers(&self) -> &[String] {
        &self.extended_headers
    }

    pub fn bin_header(&self) -> &Record {
        &self.bin_header
    }

    pub fn descriptor(&self) -> &SegyDescriptor {
        &self.descriptor
    }

    pub fn trace_count(&self) -> usize {
        self.trace_count
    }

    /// `Some(leftover_bytes)` if the file length did not divide evenly into
    /// whole traces; the reader proceeds using the floor regardless.
    pub fn alignment_warning(&self) -> Option<usize> {
        self.alignment_warning
    }

    pub fn trace_indexer(&self) -> TraceIndexer<R> {
        TraceIndexer::new(
            Arc::clone(&self.trace),
            Arc::clone(&self.source),
            self.url.clone(),
            self.trace_count,
        )
    }

    pub fn header_indexer(&self) -> HeaderIndexer<R> {
        HeaderIndexer::new(
            Arc::clone(&self.trace),
            Arc::clone(&self.source),
            self.url.clone(),
            self.trace_count,
        )
    }

    pub fn data_indexer(&self) -> DataIndexer<R> {
        DataIndexer::new(
            Arc::clone(&self.trace),
            Arc::clone(&self.source),
            self.url.clone(),
            self.trace_count,
        )
    }
}

async fn fetch_one<R: RangeSource>(
    source: &R,
    url: &str,
    start: u64,
    end: u64,
) -> Result<Vec<u8>, SegyError> {
    let mut bufs = source.range_fetch(url, &[(start, end)]).await?;
    if bufs.len() != 1 {
        return Err(SegyError::TruncatedBuffer {
            expected: 1,
            actual: bufs.len(),
        });
    }
    let buf = bufs.remove(0);
    if buf.len() != (end - start) as usize {
        return Err(SegyError::truncated(start..end, buf.len()));
    }
    Ok(buf)
}

/// Detects a leading 128-byte IBM 9-track tape label and returns
/// `(label, base_offset)`, where `base_offset` shifts every subsequent
/// absolute offset in the file (text header, binary header, trace data).
async fn probe_tape_label<R: RangeSource>(
    source: &R,
    url: &str,
    file_size: u64,
) -> Result<(Option<TapeLabel>, u64), SegyError> {
    use segy_core::TAPE_LABEL_LEN;
    if file_size <= TAPE_LABEL_LEN as u64 {
        return Ok((None, 0));
    }
    let probe = fetch_one(source, url, 0, TAPE_LABEL_LEN as u64 + 1).await?;
    if TapeLabel::has_label(&probe) {
        let label = TapeLabel::from_bytes(&probe[..TAPE_LABEL_LEN])?;
        Ok((Some(label), TAPE_LABEL_LEN as u64))
    } else {
        Ok((None, 0))
    }
}

/// Heuristic ascii/ebcdic detection, matching `giga_segy_in::memory_map::is_ascii`:
/// a text header is ASCII if every byte is printable ASCII or a plain
/// space; EBCDIC bytes almost never satisfy that over a full 3200-byte
/// header written by seismic processing software.
fn detect_text_encoding(buf: &[u8]) -> TextEncoding {
    let ascii = buf.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
    if ascii {
        TextEncoding::Ascii
    } else {
        TextEncoding::Ebcdic
    }
}

/// Reads the Rev2+ byte-order marker at binary-header offset 96 as raw
/// bytes (not through a declared-endianness decode, which would itself
/// depend on knowing the answer). A big-endian file's 4-byte marker reads
/// as `0x0102_0304`; a little-endian one reads as the fully reversed
/// `0x0403_0201`. Rev0/Rev1 files, and any Rev2 file that happens to leave
/// this reserved-in-earlier-revisions slot at zero, fall back to `Big`.
fn detect_endianness(bin_bytes: &[u8]) -> Endianness {
    if bin_bytes.len() < 100 {
        return Endianness::Big;
    }
    let marker = u32::from_be_bytes(bin_bytes[96..100].try_into().expect("checked length"));
    if marker == 0x0403_0201 {
        Endianness::Little
    } else {
        Endianness::Big
    }
}

/// The two bytes of `segy_revision_number` (offset 300), corrected for the
/// file's detected byte order.
fn revision_bytes(bin_bytes: &[u8], endianness: Endianness) -> (u8, u8) {
    let (b0, b1) = (bin_bytes[300], bin_bytes[301]);
    match endianness {
        Endianness::Little => (b1, b0),
        _ => (b0, b1),
    }
}

fn standard_from_revision(major: u8, minor: u8) -> SegyStandard {
    match (major, minor) {
        (2, 0) => SegyStandard::Rev2,
        (2, m) if m >= 1 => SegyStandard::Rev21,
        (1, _) => SegyStandard::Rev1,
        _ => SegyStandard::Rev1,
    }
}

fn field_i64(record: &Record, name: &str) -> Result<i64, SegyError> {
    record
        .get(name)
        .map(|v| v.as_i64())
        .ok_or_else(|| SegyError::DecodeError {
            field: name.to_string(),
            cause: "field missing from decoded binary header".to_string(),
        })
}

/// Rebuild the binary-header and trace-header field lists with every
/// field's declared endianness overridden to `e`, used when the Rev2+
/// byte-order marker indicates the file is little-endian. Overlap/oversize
/// validation reruns (infallibly, since only the endianness tag changed),
/// matching [`SegyDescriptor::customize`]'s "whole list, not merged"
/// replacement semantics.
fn with_field_endianness(mut d: SegyDescriptor, e: Endianness) -> Result<SegyDescriptor, SegyError> {
    let bin_fields = rebuild_fields(d.binary_file_header.fields(), e);
    d.binary_file_header = StructuredDataTypeDescriptor::new(
        bin_fields,
        d.binary_file_header.item_size(),
        d.binary_file_header.offset(),
    )?;
    let trace_fields = rebuild_fields(d.trace.header.fields(), e);
    d.trace.header = StructuredDataTypeDescriptor::new(
        trace_fields,
        d.trace.header.item_size(),
        d.trace.header.offset(),
    )?;
    Ok(d)
}

fn rebuild_fields(fields: &[StructuredFieldDescriptor], e: Endianness) -> Vec<StructuredFieldDescriptor> {
    fields
        .iter()
        .map(|f| StructuredFieldDescriptor::new(f.name.clone(), f.offset, f.format, e))
        .collect()
}
