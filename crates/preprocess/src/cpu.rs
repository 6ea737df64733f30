use crate::PreprocessResult;
use crate::config::DEFAULT_INPUT_SIZE;
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};
use ndarray::{Array, IxDyn};
use std::default::Default;

const LETTERBOX_COLOR: u8 = 114;

pub struct CpuPreProcessor {
    pub input_size: (u32, u32),
    letterboxed_buffer: Vec<u8>,
}

impl CpuPreProcessor {
    pub fn new(input_size: (u32, u32)) -> Self {
        Self {
            input_size,
            letterboxed_buffer: vec![LETTERBOX_COLOR; (input_size.0 * input_size.1 * 3) as usize],
        }
    }

    /// Letterbox and normalize an RGB image into the model input tensor.
    ///
    /// `pixels` is HWC RGB data, tightly packed. The output tensor is NCHW
    /// with values scaled to [0, 1]; YOLO exports take raw 0-1 input, not
    /// ImageNet-normalized channels.
    pub fn preprocess_image(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<PreprocessResult> {
        tracing::trace!(
            width,
            height,
            pixel_bytes = pixels.len(),
            "Preprocessing image"
        );

        let expected_size = (width * height * 3) as usize;
        if pixels.len() != expected_size {
            anyhow::bail!(
                "Buffer size mismatch: expected {}, got {} bytes",
                expected_size,
                pixels.len()
            );
        }

        let (scale, offset_x, offset_y, letterboxed) =
            self.resize_and_letterbox(pixels, width, height)?;

        let tensor = Self::normalize(&letterboxed)?;

        Ok(PreprocessResult {
            tensor,
            scale,
            offset_x,
            offset_y,
        })
    }

    fn resize_and_letterbox(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<(f32, f32, f32, Image<'_>)> {
        let scale =
            (self.input_size.0 as f32 / width as f32).min(self.input_size.1 as f32 / height as f32);
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        let offset_x = (self.input_size.0 - new_width) / 2;
        let offset_y = (self.input_size.1 - new_height) / 2;

        let src = ImageRef::new(width, height, pixels, PixelType::U8x3)?;

        let mut resized = Image::new(new_width, new_height, PixelType::U8x3);

        Resizer::new().resize(
            &src,
            &mut resized,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
        )?;

        self.letterboxed_buffer.fill(LETTERBOX_COLOR);

        let resized_data = resized.buffer();
        let stride = self.input_size.0 * 3;

        for y in 0..new_height {
            let src_row = (y * new_width * 3) as usize;
            let dst_row = ((y + offset_y) * stride + offset_x * 3) as usize;

            self.letterboxed_buffer[dst_row..dst_row + (new_width * 3) as usize]
                .copy_from_slice(&resized_data[src_row..src_row + (new_width * 3) as usize]);
        }

        let final_img = Image::from_slice_u8(
            self.input_size.0,
            self.input_size.1,
            &mut self.letterboxed_buffer,
            PixelType::U8x3,
        )?;

        Ok((scale, offset_x as f32, offset_y as f32, final_img))
    }

    fn normalize(image: &Image) -> anyhow::Result<Array<f32, IxDyn>> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let spatial = width * height;

        let mut output = vec![0.0f32; 3 * spatial];
        let buf = image.buffer();

        for (i, px) in buf.chunks_exact(3).enumerate() {
            output[i] = px[0] as f32 / 255.0;
            output[i + spatial] = px[1] as f32 / 255.0;
            output[i + 2 * spatial] = px[2] as f32 / 255.0;
        }

        Ok(Array::from_shape_vec(
            IxDyn(&[1, 3, height, width]),
            output,
        )?)
    }
}

impl Default for CpuPreProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test RGB preprocessing produces the model input shape
    #[test]
    fn test_rgb_preprocessing() {
        let pixels = vec![
            255, 0, 0, // Red pixel
            0, 255, 0, // Green pixel
            0, 0, 255, // Blue pixel
            255, 255, 255, // White pixel
        ];

        let mut preprocessor = CpuPreProcessor::default();
        let result = preprocessor.preprocess_image(&pixels, 2, 2);

        assert!(result.is_ok(), "RGB preprocessing should succeed");
        let result = result.unwrap();
        assert_eq!(result.tensor.shape(), &[1, 3, 640, 640]);
    }

    /// Test buffer size mismatch detection
    #[test]
    fn test_buffer_size_mismatch_detection() {
        let pixels = vec![0u8; 200]; // Wrong size for 10x10

        let mut preprocessor = CpuPreProcessor::default();
        let result = preprocessor.preprocess_image(&pixels, 10, 10);

        assert!(result.is_err(), "Size mismatch should return error");
        assert!(
            result.unwrap_err().to_string().contains("mismatch"),
            "Error should mention mismatch"
        );
    }

    /// Test letterboxing preserves aspect ratio
    #[test]
    fn test_letterboxing_preserves_aspect_ratio() {
        // 800x600 image (4:3 aspect ratio)
        let pixels = vec![128u8; 800 * 600 * 3];

        let mut preprocessor = CpuPreProcessor::default();
        let result = preprocessor.preprocess_image(&pixels, 800, 600).unwrap();

        // Scale should be min(640/800, 640/600) = 640/800 = 0.8
        assert_eq!(result.scale, 0.8, "Scale should preserve aspect ratio");

        // Resized dimensions: 800*0.8 = 640, 600*0.8 = 480
        // Offset X: (640 - 640) / 2 = 0
        // Offset Y: (640 - 480) / 2 = 80
        assert_eq!(result.offset_x, 0.0, "X offset should be 0 for wide image");
        assert_eq!(result.offset_y, 80.0, "Y offset should center vertically");

        // Output shape should always be 640x640
        assert_eq!(result.tensor.shape(), &[1, 3, 640, 640]);
    }

    /// Test small images are scaled up to the input size
    #[test]
    fn test_small_image_is_upscaled() {
        let pixels = vec![200u8; 100 * 100 * 3];

        let mut preprocessor = CpuPreProcessor::default();
        let result = preprocessor.preprocess_image(&pixels, 100, 100).unwrap();

        // Scale = min(640/100, 640/100) = 6.4, no padding needed
        assert_eq!(result.scale, 6.4, "Small images should scale up");
        assert_eq!(result.offset_x, 0.0);
        assert_eq!(result.offset_y, 0.0);
    }

    /// Test 0-1 normalization is applied uniformly across channels
    #[test]
    fn test_unit_normalization() {
        // Mid-gray image (128, 128, 128)
        let pixels = vec![128u8; 2 * 2 * 3];

        let mut preprocessor = CpuPreProcessor::new((640, 640));
        let result = preprocessor.preprocess_image(&pixels, 2, 2).unwrap();

        assert_eq!(result.tensor.shape(), &[1, 3, 640, 640]);

        // Gray 128 scales to 128/255 ~= 0.502 on every channel; unlike
        // ImageNet normalization the channels must not diverge
        let r = result.tensor[[0, 0, 320, 320]];
        let g = result.tensor[[0, 1, 320, 320]];
        let b = result.tensor[[0, 2, 320, 320]];

        assert!(
            (r - 0.502).abs() < 0.01,
            "R channel should be ~0.502 (got {})",
            r
        );
        assert_eq!(r, g, "R and G must match for gray input");
        assert_eq!(g, b, "G and B must match for gray input");
    }

    /// Test the letterbox padding carries the fill color, not image data
    #[test]
    fn test_letterbox_padding_value() {
        // Pure white wide image forces vertical padding bands
        let pixels = vec![255u8; 640 * 320 * 3];

        let mut preprocessor = CpuPreProcessor::default();
        let result = preprocessor.preprocess_image(&pixels, 640, 320).unwrap();

        // Scale 1.0, offset_y = (640 - 320) / 2 = 160
        assert_eq!(result.offset_y, 160.0);

        // Row 0 sits inside the top padding band: 114/255 ~= 0.447
        let pad = result.tensor[[0, 0, 0, 320]];
        assert!(
            (pad - 114.0 / 255.0).abs() < 1e-6,
            "Padding should be the letterbox fill (got {})",
            pad
        );

        // Center row holds image data: 255/255 = 1.0
        let center = result.tensor[[0, 0, 320, 320]];
        assert_eq!(center, 1.0, "Image area should hold pixel data");
    }
}
