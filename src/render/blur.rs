//! Separable gaussian blur over premultiplied RGBA8, used for text glow.

/// Canvas-style shadow blur: `sigma = blur / 2`, kernel reaching `3 * sigma`.
pub(crate) fn kernel_radius(blur: f64) -> u32 {
    if !blur.is_finite() || blur <= 0.0 {
        return 0;
    }
    (1.5 * blur).ceil() as u32
}

/// Blur a `width * height` premultiplied RGBA8 region in place.
pub(crate) fn blur_premul_in_place(buf: &mut [u8], width: usize, height: usize, blur: f64) {
    let radius = kernel_radius(blur);
    if radius == 0 || width == 0 || height == 0 || buf.len() != width * height * 4 {
        return;
    }
    let kernel = gaussian_q16(radius, (blur / 2.0) as f32);
    let mut tmp = vec![0u8; buf.len()];
    pass(buf, &mut tmp, width, height, &kernel, Axis::X);
    pass(&tmp, buf, width, height, &kernel, Axis::Y);
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Normalized Q16 weights for `-radius..=radius`; they sum to exactly `1 << 16`.
fn gaussian_q16(radius: u32, sigma: f32) -> Vec<u32> {
    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-(f64::from(i) * f64::from(i)) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();

    let mut weights: Vec<u32> = raw
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - total).clamp(0, 65536) as u32;
    weights
}

fn pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as isize;
    let (w, h) = (width as isize, height as isize);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as isize - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = ((a + 32768) >> 16).min(255) as u8;
            }
        }
    }
}
