use super::*;

#[test]
fn mul_div255_bounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
}

#[test]
fn over_with_opaque_src_replaces_dst() {
    let mut dst = vec![10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[1, 2, 3, 255]);
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn over_with_transparent_src_keeps_dst() {
    let mut dst = vec![10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]);
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_0_returns_bg() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &[0, 0, 0, 0], [10, 20, 30, 255]);
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &[1, 2, 3, 255], [10, 20, 30, 255]);
    assert_eq!(dst, vec![1, 2, 3, 255]);
}
