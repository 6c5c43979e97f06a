//! What each tick reports, and a framing for sending that over a serial link.
//!
//! Frames are postcard with a crc32 trailer, COBS encoded, and terminated with a zero byte.
use core::fmt;

use crc::{CRC_32_ISCSI, Crc};
use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::band::RawSample;
use crate::errors::{IndicatorError, IndicatorResult};
use crate::hysteresis::IndicatorState;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRecord {
    pub raw: RawSample,
    /// `raw * reference_voltage / full_scale_count`
    pub voltage: f32,
    pub state: IndicatorState,
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "raw={} voltage={:.3}V state={}",
            self.raw, self.voltage, self.state
        )
    }
}

pub const STATUS_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

const CRC_BYTES: usize = 4;

/// postcard bytes plus the crc
pub const STATUS_CRC_BYTES: usize = StatusRecord::POSTCARD_MAX_SIZE + CRC_BYTES;

/// COBS adds one byte per 254, plus the zero delimiter
pub const STATUS_FRAME_BYTES: usize = STATUS_CRC_BYTES + STATUS_CRC_BYTES / 254 + 2;

/// Serialize with a crc, then COBS encode. Returns how much of `output_buffer` holds the frame,
/// including the trailing zero.
pub fn serialize_with_crc_and_cobs(
    record: &StatusRecord,
    crc_buffer: &mut [u8],
    output_buffer: &mut [u8],
) -> IndicatorResult<usize> {
    let checksummed = postcard::to_slice_crc32(record, crc_buffer, STATUS_CRC.digest())?;

    let encoded_len = cobs::try_encode(checksummed, output_buffer)?;

    let delimiter = output_buffer
        .get_mut(encoded_len)
        .ok_or(IndicatorError::FrameTooLarge)?;
    *delimiter = 0;

    Ok(encoded_len + 1)
}

/// Undo `serialize_with_crc_and_cobs`. The frame is decoded in place. A trailing zero is optional.
pub fn deserialize_with_crc(frame: &mut [u8]) -> IndicatorResult<StatusRecord> {
    let end = frame.iter().position(|&x| x == 0).unwrap_or(frame.len());

    if end == 0 {
        return Err(IndicatorError::EmptyFrame);
    }

    let decoded_len = cobs::decode_in_place(&mut frame[..end])?;

    let record = postcard::from_bytes_crc32(&frame[..decoded_len], STATUS_CRC.digest())?;

    Ok(record)
}
