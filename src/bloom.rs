use tiny_skia::Pixmap;

use crate::config::GlowConfig;

/// Bloom post-process: blend a brightened, blurred copy of the canvas back
/// over itself. The canvas is fully opaque at this stage, so the
/// premultiplied buffer is handled as straight RGB; alpha is untouched.
pub fn apply(pixmap: &mut Pixmap, config: &GlowConfig) {
    let mix = config.bloom_mix.clamp(0.0, 1.0);
    if mix <= 0.0 {
        return;
    }
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;

    let mut bright = pixmap.data().to_vec();
    let factor = config.bloom_brightness.max(0.0);
    for pixel in bright.chunks_exact_mut(4) {
        for channel in pixel.iter_mut().take(3) {
            *channel = ((*channel as f32) * factor).min(255.0) as u8;
        }
    }

    let radius = config.bloom_radius as usize;
    if radius > 0 {
        let mut scratch = vec![0u8; bright.len()];
        blur_horizontal(&bright, &mut scratch, width, height, radius);
        blur_vertical(&scratch, &mut bright, width, height, radius);
    }

    for (original, blurred) in pixmap
        .data_mut()
        .chunks_exact_mut(4)
        .zip(bright.chunks_exact(4))
    {
        for channel in 0..3 {
            original[channel] = ((original[channel] as f32) * (1.0 - mix)
                + (blurred[channel] as f32) * mix)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
    }
}

/// Sliding-window box blur along rows, edge pixels replicated.
fn blur_horizontal(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    let last = width as isize - 1;
    for y in 0..height {
        let row = y * width;
        let mut sums = [0u32; 3];
        for i in -(radius as isize)..=(radius as isize) {
            let x = i.clamp(0, last) as usize;
            let p = (row + x) * 4;
            for c in 0..3 {
                sums[c] += src[p + c] as u32;
            }
        }
        for x in 0..width {
            let p = (row + x) * 4;
            for c in 0..3 {
                dst[p + c] = (sums[c] / window) as u8;
            }
            dst[p + 3] = src[p + 3];
            let leaving = (x as isize - radius as isize).clamp(0, last) as usize;
            let entering = (x as isize + radius as isize + 1).clamp(0, last) as usize;
            let lp = (row + leaving) * 4;
            let ep = (row + entering) * 4;
            for c in 0..3 {
                sums[c] += src[ep + c] as u32;
                sums[c] -= src[lp + c] as u32;
            }
        }
    }
}

/// Sliding-window box blur along columns, edge pixels replicated.
fn blur_vertical(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    let last = height as isize - 1;
    for x in 0..width {
        let mut sums = [0u32; 3];
        for i in -(radius as isize)..=(radius as isize) {
            let y = i.clamp(0, last) as usize;
            let p = (y * width + x) * 4;
            for c in 0..3 {
                sums[c] += src[p + c] as u32;
            }
        }
        for y in 0..height {
            let p = (y * width + x) * 4;
            for c in 0..3 {
                dst[p + c] = (sums[c] / window) as u8;
            }
            dst[p + 3] = src[p + 3];
            let leaving = (y as isize - radius as isize).clamp(0, last) as usize;
            let entering = (y as isize + radius as isize + 1).clamp(0, last) as usize;
            let lp = (leaving * width + x) * 4;
            let ep = (entering * width + x) * 4;
            for c in 0..3 {
                sums[c] += src[ep + c] as u32;
                sums[c] -= src[lp + c] as u32;
            }
        }
    }
}
