use crate::ppu::{self, PpuState};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error("error creating renderer: {source}")]
    CreateRenderer {
        #[from]
        source: IntegerOrSdlError,
    },
    #[error("error creating frame texture: {msg}")]
    CreateTexture { msg: String },
    #[error("error updating frame texture: {msg}")]
    Texture { msg: String },
    #[error("error copying frame texture to renderer: {msg}")]
    CopyToCanvas { msg: String },
}

/// Create an SDL2 renderer from the given SDL2 window, with the logical size fixed to the
/// 160x144 display so window resizes keep the aspect ratio.
pub fn create_renderer(window: sdl2::video::Window) -> Result<WindowCanvas, GraphicsError> {
    let mut canvas = window.into_canvas().present_vsync().build()?;

    canvas
        .set_logical_size(ppu::SCREEN_WIDTH as u32, ppu::SCREEN_HEIGHT as u32)
        .map_err(|err| GraphicsError::CreateRenderer { source: err })?;

    canvas.clear();
    canvas.present();

    Ok(canvas)
}

/// Create the streaming texture the frame buffer is uploaded into.
pub fn create_frame_texture(
    texture_creator: &TextureCreator<WindowContext>,
) -> Result<Texture<'_>, GraphicsError> {
    texture_creator
        .create_texture_streaming(
            PixelFormatEnum::RGBA32,
            ppu::SCREEN_WIDTH as u32,
            ppu::SCREEN_HEIGHT as u32,
        )
        .map_err(|err| GraphicsError::CreateTexture {
            msg: err.to_string(),
        })
}

/// Render the current frame buffer to the SDL2 window, overwriting all previously displayed
/// data.
pub fn render_frame(
    ppu_state: &PpuState,
    canvas: &mut WindowCanvas,
    texture: &mut Texture<'_>,
) -> Result<(), GraphicsError> {
    let frame_buffer = ppu_state.frame_buffer();

    texture
        .with_lock(None, |pixels: &mut [u8], pitch: usize| {
            for (row, scanline) in frame_buffer.iter().enumerate() {
                for (column, color) in scanline.iter().enumerate() {
                    let start = row * pitch + 4 * column;
                    pixels[start..start + 4].copy_from_slice(color);
                }
            }
        })
        .map_err(|msg| GraphicsError::Texture { msg })?;

    canvas.clear();
    canvas
        .copy(texture, None, None)
        .map_err(|msg| GraphicsError::CopyToCanvas { msg })?;
    canvas.present();

    Ok(())
}
