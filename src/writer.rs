use ddp_rs::connection::DDPConnection;
use rgb::RGB8;

/// Drives the disc controller over DDP. The controller maps each RGB triple
/// to one disc and flips it on for any non-zero channel, so color only
/// matters for controllers with backlights.
pub struct Writer {
    connection: DDPConnection,
    buffer: Vec<u8>,
}

impl Writer {
    pub fn new(connection: DDPConnection) -> Self {
        Self {
            connection,
            buffer: Vec::with_capacity(crate::konst::NUM_CELLS * 3),
        }
    }
}

impl smart_leds_trait::SmartLedsWrite for Writer {
    type Error = ddp_rs::error::DDPError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.buffer.clear();
        for color in iterator {
            let rgb = color.into();
            self.buffer.extend_from_slice(&[rgb.r, rgb.g, rgb.b]);
        }

        self.connection.write(&self.buffer).map(drop)
    }
}
