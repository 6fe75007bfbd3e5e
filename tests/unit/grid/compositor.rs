use super::*;

fn solid_batch(frames: usize, width: u32, height: u32, rgb: [u8; 3]) -> FrameBatch {
    let frame = Frame::solid(width, height, Rgba8Premul::opaque(rgb[0], rgb[1], rgb[2])).unwrap();
    FrameBatch::new(vec![frame; frames]).unwrap()
}

fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width() + x) * 4) as usize;
    let d = frame.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn canvas_size_follows_the_padding_formula() {
    // Four 10x10 inputs in two columns with padding 1:
    // 2*10 + 3*1 = 23 on both axes, last row fully filled.
    let a = solid_batch(1, 10, 10, [255, 0, 0]);
    let b = solid_batch(1, 10, 10, [0, 255, 0]);
    let c = solid_batch(1, 10, 10, [0, 0, 255]);
    let d = solid_batch(1, 10, 10, [255, 255, 0]);
    let out = tile(
        &[Some(&a), Some(&b), Some(&c), Some(&d)],
        &GridOptions::new(2, 1),
    )
    .unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out.dimensions(), Some((23, 23)));

    let canvas = &out.frames()[0];
    // one interior pixel per cell, row-major placement
    assert_eq!(pixel(canvas, 5, 5), [255, 0, 0, 255]);
    assert_eq!(pixel(canvas, 16, 5), [0, 255, 0, 255]);
    assert_eq!(pixel(canvas, 5, 16), [0, 0, 255, 255]);
    assert_eq!(pixel(canvas, 16, 16), [255, 255, 0, 255]);
    // padding stays background
    assert_eq!(pixel(canvas, 11, 11), [0, 0, 0, 255]);
    assert_eq!(pixel(canvas, 0, 0), [0, 0, 0, 255]);
}

#[test]
fn uneven_batches_clamp_to_their_last_frame() {
    let mut a = FrameBatch::empty();
    for v in [10u8, 20, 30] {
        a.push(Frame::solid(8, 8, Rgba8Premul::opaque(v, 0, 0)).unwrap())
            .unwrap();
    }
    let b = solid_batch(1, 8, 8, [0, 99, 0]);

    let out = tile(&[Some(&a), Some(&b)], &GridOptions::new(2, 0)).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.dimensions(), Some((16, 8)));

    for (i, expected_r) in [10u8, 20, 30].into_iter().enumerate() {
        let canvas = &out.frames()[i];
        // left cell advances with batch A
        assert_eq!(pixel(canvas, 3, 3), [expected_r, 0, 0, 255]);
        // right cell reuses batch B's single frame on every output frame
        assert_eq!(pixel(canvas, 11, 3), [0, 99, 0, 255]);
    }
}

#[test]
fn undersized_frames_center_in_their_cell() {
    let small = solid_batch(1, 4, 4, [200, 0, 0]);
    let large = solid_batch(1, 8, 8, [0, 0, 200]);
    let out = tile(&[Some(&small), Some(&large)], &GridOptions::new(2, 0)).unwrap();
    assert_eq!(out.dimensions(), Some((16, 8)));

    let canvas = &out.frames()[0];
    // 4x4 frame centered in an 8x8 cell sits at (2,2)..(6,6)
    assert_eq!(pixel(canvas, 1, 1), [0, 0, 0, 255]);
    assert_eq!(pixel(canvas, 2, 2), [200, 0, 0, 255]);
    assert_eq!(pixel(canvas, 5, 5), [200, 0, 0, 255]);
    assert_eq!(pixel(canvas, 6, 6), [0, 0, 0, 255]);
    assert_eq!(pixel(canvas, 12, 4), [0, 0, 200, 255]);
}

#[test]
fn trailing_cells_stay_background() {
    let a = solid_batch(1, 10, 10, [255, 255, 255]);
    let out = tile(&[Some(&a)], &GridOptions::new(2, 0)).unwrap();
    // the canvas is always `columns` cells wide; the second cell is empty
    assert_eq!(out.dimensions(), Some((20, 10)));
    let canvas = &out.frames()[0];
    assert_eq!(pixel(canvas, 5, 5), [255, 255, 255, 255]);
    assert_eq!(pixel(canvas, 15, 5), [0, 0, 0, 255]);
}

#[test]
fn background_color_is_configurable() {
    let a = solid_batch(1, 2, 2, [255, 255, 255]);
    let opts = GridOptions {
        columns: 1,
        padding: 1,
        background: Rgba8Premul::opaque(0, 0, 255),
    };
    let out = tile(&[Some(&a)], &opts).unwrap();
    let canvas = &out.frames()[0];
    assert_eq!(pixel(canvas, 0, 0), [0, 0, 255, 255]);
    assert_eq!(pixel(canvas, 1, 1), [255, 255, 255, 255]);
}

#[test]
fn absent_and_empty_inputs_are_skipped() {
    let a = solid_batch(2, 6, 6, [9, 9, 9]);
    let empty = FrameBatch::empty();
    let out = tile(&[None, Some(&empty), Some(&a)], &GridOptions::new(1, 0)).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out.dimensions(), Some((6, 6)));
}

#[test]
fn no_usable_inputs_is_a_config_error() {
    let empty = FrameBatch::empty();
    for inputs in [vec![], vec![None, None], vec![Some(&empty)]] {
        let err = tile(&inputs, &GridOptions::new(2, 0)).unwrap_err();
        assert!(matches!(err, AnnotileError::Config(_)), "{err}");
    }
}

#[test]
fn zero_columns_is_a_config_error() {
    let a = solid_batch(1, 4, 4, [1, 2, 3]);
    let err = tile(&[Some(&a)], &GridOptions::new(0, 0)).unwrap_err();
    assert!(matches!(err, AnnotileError::Config(_)));
}

#[test]
fn too_many_inputs_is_a_config_error() {
    let a = solid_batch(1, 4, 4, [1, 2, 3]);
    let inputs = vec![Some(&a); 7];
    let err = tile(&inputs, &GridOptions::new(2, 0)).unwrap_err();
    assert!(matches!(err, AnnotileError::Config(_)));
}

#[test]
fn tiling_is_deterministic() {
    let a = solid_batch(3, 5, 7, [10, 20, 30]);
    let b = solid_batch(2, 9, 4, [40, 50, 60]);
    let opts = GridOptions::new(3, 4);
    let first = tile(&[Some(&a), Some(&b)], &opts).unwrap();
    let second = tile(&[Some(&a), Some(&b)], &opts).unwrap();
    assert_eq!(first, second);
}
