use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const SIZE: u32 = 22;

fn engine(per_block: u32, keep: u32, target: &str) -> MatrixLayoutEngine {
    MatrixLayoutEngine::new(&AnimationConfig {
        glyph_size: SIZE,
        reveal_interval_ms: 1000.0,
        columns_per_block: per_block,
        keep_columns: keep,
        target: target.to_owned(),
        ..AnimationConfig::default()
    })
}

fn grid(cols: u32, rows: u32) -> Grid {
    Grid::for_surface(
        Canvas {
            width: cols * SIZE,
            height: rows * SIZE,
        },
        SIZE,
    )
}

fn symbols(layout: Layout) -> Vec<Symbol> {
    match layout {
        Layout::Frame(s) => s,
        Layout::Exhausted => panic!("unexpected exhausted layout"),
    }
}

fn column_of(sym: &Symbol) -> u32 {
    (sym.x / f64::from(SIZE)).round() as u32
}

fn header(symbols: &[Symbol]) -> Vec<(char, f64)> {
    symbols
        .iter()
        .filter(|s| s.y == f64::from(SIZE))
        .map(|s| (s.glyph, s.x))
        .collect()
}

#[test]
fn grid_floors_partial_cells() {
    let g = Grid::for_surface(
        Canvas {
            width: 1920,
            height: 1080,
        },
        22,
    );
    assert_eq!(g, Grid { rows: 49, cols: 87 });
}

#[test]
fn columns_to_reveal_is_monotonic() {
    let e = engine(10, 2, "");
    let mut prev = 0;
    for step in 0..2000 {
        let n = e.columns_to_reveal(f64::from(step) * 7.3);
        assert!(n >= prev);
        prev = n;
    }
    assert_eq!(e.columns_to_reveal(-5.0), 0);
    assert_eq!(e.columns_to_reveal(999.9), 0);
    assert_eq!(e.columns_to_reveal(1000.0), 1);
}

#[test]
fn exhaustion_boundary_for_wide_blocks() {
    let e = engine(13, 3, "+380501234567");
    assert!(!e.is_exhausted(10_000.0));
    assert!(!e.is_exhausted(10_999.0));
    assert!(e.is_exhausted(11_000.0));
    assert_eq!(
        e.layout(11_000.0, grid(30, 5), &mut StdRng::seed_from_u64(1)),
        Layout::Exhausted
    );
}

#[test]
fn reveal_counts_from_block_right_edge() {
    let e = engine(5, 2, "");
    let revealed: Vec<u32> = (1..=10).filter(|&x| e.is_revealed(x, 2)).collect();
    assert_eq!(revealed, vec![4, 5, 9, 10]);
    assert!((1..=10).all(|x| !e.is_revealed(x, 0)));
}

#[test]
fn at_start_only_noise_is_emitted() {
    let e = engine(5, 2, "42");
    let g = grid(10, 4);
    let syms = symbols(e.layout(0.0, g, &mut StdRng::seed_from_u64(7)));

    assert!(header(&syms).is_empty());
    let foreground = syms.iter().filter(|s| s.opacity == DEFAULT_SYMBOL_OPACITY).count();
    assert_eq!(foreground, (g.cols * (g.rows - 1)) as usize);
    assert!(syms.iter().all(|s| s.glyph.is_ascii_digit()));
}

#[test]
fn revealed_columns_stop_noise_and_show_target_chars() {
    let g = grid(10, 4);

    // Short target: revealed columns 4,5,9,10 have no target char, so they go blank.
    let e = engine(5, 2, "42");
    let syms = symbols(e.layout(2500.0, g, &mut StdRng::seed_from_u64(7)));
    assert!(header(&syms).is_empty());
    for col in [4, 5, 9, 10] {
        assert!(syms.iter().all(|s| column_of(s) != col));
    }
    for col in [1, 2, 3, 6, 7, 8] {
        assert!(syms.iter().any(|s| column_of(s) == col));
    }

    // Full-width target: columns 4 and 5 are drawn one block to the right in the header row.
    let e = engine(5, 2, "42817");
    let syms = symbols(e.layout(2500.0, g, &mut StdRng::seed_from_u64(7)));
    assert_eq!(
        header(&syms),
        vec![('1', f64::from(9 * SIZE)), ('7', f64::from(10 * SIZE))]
    );
    assert!(syms.iter().filter(|s| s.y == f64::from(SIZE)).all(|s| s.opacity == 1.0));
}

#[test]
fn scenario_runs_until_budget_is_spent() {
    let e = engine(5, 2, "42817");
    let g = grid(10, 4);
    let mut rng = StdRng::seed_from_u64(3);

    let syms = symbols(e.layout(3500.0, g, &mut rng));
    let glyphs: Vec<char> = header(&syms).into_iter().map(|(c, _)| c).collect();
    assert_eq!(glyphs, vec!['8', '1', '7']);

    assert!(!e.is_exhausted(3999.0));
    assert_eq!(e.layout(4000.5, g, &mut rng), Layout::Exhausted);
}

#[test]
fn noise_cells_layer_faint_digits_under_foreground() {
    let e = engine(5, 2, "");
    let g = grid(3, 30);
    let syms = symbols(e.layout(0.0, g, &mut StdRng::seed_from_u64(11)));

    let mut faint_run = Vec::new();
    for s in &syms {
        if s.opacity == DEFAULT_SYMBOL_OPACITY {
            let expected: Vec<f64> = (1..=faint_run.len()).map(|i| 0.5 / i as f64).collect();
            assert_eq!(faint_run, expected);
            assert!(faint_run.len() <= 2);
            faint_run.clear();
        } else {
            faint_run.push(s.opacity);
        }
    }
    assert!(faint_run.is_empty());
}

#[test]
fn single_row_grid_has_nothing_to_draw() {
    let e = engine(5, 2, "42817");
    let syms = symbols(e.layout(2500.0, grid(10, 1), &mut StdRng::seed_from_u64(1)));
    assert!(syms.is_empty());
}

#[test]
fn exhausted_layout_leaves_buffer_untouched() {
    let e = engine(5, 2, "");
    let mut out = vec![Symbol::new('x', 0.0, 0.0, 1.0)];
    assert!(!e.layout_into(9000.0, grid(10, 4), &mut StdRng::seed_from_u64(1), &mut out));
    assert_eq!(out.len(), 1);
}

#[test]
fn same_seed_same_frame() {
    let e = engine(10, 2, "9375019583");
    let g = grid(40, 20);
    let a = e.layout(4200.0, g, &mut StdRng::seed_from_u64(99));
    let b = e.layout(4200.0, g, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}
