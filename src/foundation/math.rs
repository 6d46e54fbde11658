pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Composite premultiplied RGBA8 `src` over `dst` in place.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - sa;
        for c in 0..4 {
            let v = u16::from(s[c]) + mul_div255_u16(u16::from(d[c]), inv);
            d[c] = v.min(255) as u8;
        }
    }
}

/// Flatten premultiplied RGBA8 over an opaque background into `dst`.
pub(crate) fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg_rgba: [u8; 4]) {
    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
