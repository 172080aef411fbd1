pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Straight RGBA8 -> premultiplied RGBA8.
pub(crate) fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        mul_div255_u8(u16::from(px[0]), a),
        mul_div255_u8(u16::from(px[1]), a),
        mul_div255_u8(u16::from(px[2]), a),
        px[3],
    ]
}

/// Premultiplied RGBA8 -> straight RGBA8 (rounded to nearest).
pub(crate) fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| (((u32::from(c) * 255) + a / 2) / a).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

/// Source-over for premultiplied pixels.
pub(crate) fn over_premul(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over for straight-alpha pixels, computed in premultiplied space.
pub(crate) fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        0 => dst,
        255 => src,
        _ => unpremultiply(over_premul(premultiply(dst), premultiply(src))),
    }
}
