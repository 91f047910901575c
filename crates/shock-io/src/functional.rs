use std::path::Path;

use shock_image::ImageSize;

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB samples.
///
/// The method tries to read from any image format supported by the image
/// crate and converts the result to RGB8.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// The image size and the row-major interleaved RGB samples.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<(ImageSize, Vec<u8>), IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let rgb = image::open(file_path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };

    Ok((size, rgb.into_raw()))
}

/// Writes 8-bit RGB samples to the given file path.
///
/// The format is picked from the file extension, as supported by the image
/// crate.
///
/// # Arguments
///
/// * `file_path` - The path to write to.
/// * `size` - The size of the image in pixels.
/// * `samples` - The row-major interleaved RGB samples.
pub fn write_image_rgb8(
    file_path: impl AsRef<Path>,
    size: ImageSize,
    samples: &[u8],
) -> Result<(), IoError> {
    image::save_buffer(
        file_path.as_ref(),
        samples,
        size.width as u32,
        size.height as u32,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}
