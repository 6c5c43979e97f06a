use std::fmt::Write;

use battery_lights_core::StatusRecord;
use battery_lights_core::monitor::StatusReport;
use battery_lights_core::status::{
    STATUS_CRC_BYTES, STATUS_FRAME_BYTES, serialize_with_crc_and_cobs,
};
use log::{info, warn};

/// Log every record. With `frames` on, also print the serial frame a sensor board would send.
#[derive(Debug, Default)]
pub struct TerminalReport {
    frames: bool,
    crc_buffer: [u8; STATUS_CRC_BYTES],
    output_buffer: [u8; STATUS_FRAME_BYTES],
}

impl TerminalReport {
    pub fn new(frames: bool) -> Self {
        Self {
            frames,
            ..Default::default()
        }
    }

    /// Hex of the COBS frame for `record`.
    pub fn frame_hex(
        &mut self,
        record: &StatusRecord,
    ) -> battery_lights_core::IndicatorResult<String> {
        let len =
            serialize_with_crc_and_cobs(record, &mut self.crc_buffer, &mut self.output_buffer)?;

        let mut hex = String::with_capacity(len * 2);
        for b in &self.output_buffer[..len] {
            // writing to a String can't fail
            let _ = write!(hex, "{b:02x}");
        }

        Ok(hex)
    }
}

impl StatusReport for TerminalReport {
    fn report(&mut self, record: &StatusRecord) {
        info!("{record}");

        if self.frames {
            match self.frame_hex(record) {
                Ok(hex) => println!("{hex}"),
                Err(err) => warn!("unable to frame status: {err}"),
            }
        }
    }
}
