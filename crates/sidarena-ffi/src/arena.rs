//! Exported duplication functions.
//!
//! Input identifiers are read through raw pointers in two steps: the fixed
//! header first, then exactly the tail the header announces. Output goes
//! into a caller-owned buffer; nothing allocated here outlives the call.

use sidarena_arena::{
    duplicate_entry_array, duplicate_identifier, ArenaConfig, ArrayLayout,
};
use sidarena_core::layout::{decode_sid, encoded_len_from_header};
use sidarena_core::{Sid, SidAndAttributes, MAX_SID_SIZE, SID_HEADER_SIZE};
use tracing::debug;

use crate::status::SidStatus;
use crate::types::SidAndAttributesRaw;

/// Decode the identifier at `ptr`.
///
/// Reads `SID_HEADER_SIZE` bytes, then the full encoded length. The caller
/// guarantees `ptr` is null or addresses a readable encoded identifier.
#[allow(unsafe_code)]
fn read_sid(ptr: *const u8) -> Result<Sid, SidStatus> {
    if ptr.is_null() {
        return Err(SidStatus::NullInput);
    }
    // SAFETY: ptr addresses at least a full identifier header per caller contract.
    let header = unsafe { std::slice::from_raw_parts(ptr, SID_HEADER_SIZE) };
    let len = encoded_len_from_header(header).map_err(|e| SidStatus::from(&e))?;
    // SAFETY: the header announces `len` readable bytes starting at ptr.
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    decode_sid(bytes).map_err(|e| SidStatus::from(&e))
}

#[allow(unsafe_code)]
fn write_usize(dst: *mut usize, value: usize) {
    if !dst.is_null() {
        // SAFETY: dst is non-null and valid for writes per caller contract.
        unsafe { *dst = value };
    }
}

/// Bytes needed to hold `count` duplicated entries with the default layout.
///
/// Returns `NullInput` for a zero count and `LayoutOverflow` if the size
/// does not fit in `usize`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sidarena_required_size(count: usize, size_out: *mut usize) -> i32 {
    ffi_guard!({
        if size_out.is_null() {
            return SidStatus::InvalidArgument as i32;
        }
        if count == 0 {
            return SidStatus::NullInput as i32;
        }
        match ArrayLayout::new(count, &ArenaConfig::default()) {
            Ok(layout) => {
                // SAFETY: size_out is non-null and valid for writes.
                unsafe { *size_out = layout.total_len() };
                SidStatus::Ok as i32
            }
            Err(e) => SidStatus::from(&e) as i32,
        }
    })
}

/// Duplicate `count` entries into the caller's buffer `out`.
///
/// On success the buffer holds `count` entries followed by `count`
/// identifier slots, each entry's reference being the absolute address of
/// its slot inside `out`. The number of bytes used is written to `written`
/// (which may be null). On `BufferTooSmall` the required size is written to
/// `written` and `out` is untouched. On any other failure nothing is
/// written to `out`.
///
/// The caller releases `out` with one release of its own.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sidarena_duplicate_entry_array(
    entries: *const SidAndAttributesRaw,
    count: usize,
    out: *mut u8,
    out_len: usize,
    written: *mut usize,
) -> i32 {
    ffi_guard!({
        if entries.is_null() || count == 0 {
            return SidStatus::NullInput as i32;
        }
        if out.is_null() {
            return SidStatus::InvalidArgument as i32;
        }

        let layout = match ArrayLayout::new(count, &ArenaConfig::default()) {
            Ok(l) => l,
            Err(e) => return SidStatus::from(&e) as i32,
        };
        let required = layout.total_len();
        if out_len < required {
            write_usize(written, required);
            return SidStatus::BufferTooSmall as i32;
        }

        // SAFETY: entries points to count valid SidAndAttributesRaw structs.
        let raw = unsafe { std::slice::from_raw_parts(entries, count) };
        let mut sids = Vec::new();
        if sids.try_reserve_exact(count).is_err() {
            return SidStatus::AllocationFailed as i32;
        }
        for (index, record) in raw.iter().enumerate() {
            match read_sid(record.sid) {
                Ok(sid) => sids.push(sid),
                Err(status) => {
                    debug!(index, ?status, "rejected source identifier");
                    return status as i32;
                }
            }
        }
        let pairs: Vec<SidAndAttributes<'_>> = sids
            .iter()
            .zip(raw)
            .map(|(sid, record)| SidAndAttributes::new(sid, record.attributes))
            .collect();

        let array = match duplicate_entry_array(&pairs) {
            Ok(a) => a,
            Err(e) => return SidStatus::from(&e) as i32,
        };
        // SAFETY: out points to out_len writable bytes per caller contract.
        let dst = unsafe { std::slice::from_raw_parts_mut(out, out_len) };
        if let Err(e) = array.relocate_into(dst, out as usize as u64) {
            return SidStatus::from(&e) as i32;
        }
        write_usize(written, required);
        SidStatus::Ok as i32
    })
}

/// Copy one encoded identifier into `out`, zero-filling up to `out_len`.
///
/// `out_len` must be at least `MAX_SID_SIZE` (68), the capacity every
/// duplicated identifier is given regardless of its actual length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn sidarena_duplicate_identifier(
    sid: *const u8,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return SidStatus::InvalidArgument as i32;
        }
        if out_len < MAX_SID_SIZE {
            return SidStatus::BufferTooSmall as i32;
        }
        let source = match read_sid(sid) {
            Ok(s) => s,
            Err(status) => return status as i32,
        };
        let copy = match duplicate_identifier(&source) {
            Ok(c) => c,
            Err(e) => return SidStatus::from(&e) as i32,
        };
        // SAFETY: out points to out_len writable bytes per caller contract.
        let dst = unsafe { std::slice::from_raw_parts_mut(out, out_len) };
        let bytes = copy.as_bytes();
        dst[..bytes.len()].copy_from_slice(bytes);
        dst[bytes.len()..].fill(0);
        SidStatus::Ok as i32
    })
}
