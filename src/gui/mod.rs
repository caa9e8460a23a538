use std::sync::Arc;

use druid::piet::ImageFormat;
use druid::ImageBuf;

use crate::painter::rgb_channels;
use crate::FrameBuffer;

pub mod widget;

pub fn convert_frame(frame: &FrameBuffer) -> ImageBuf {
    let raw: Arc<[u8]> = frame
        .pixels()
        .iter()
        .flat_map(|p| rgb_channels(*p))
        .collect::<Vec<u8>>()
        .into();

    ImageBuf::from_raw(raw, ImageFormat::Rgb, frame.width(), frame.height())
}
