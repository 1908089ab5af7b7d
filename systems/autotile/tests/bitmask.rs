use std::collections::BTreeSet;

use delve_core::{Grid, TileCoord, TileKind, VariantId};
use delve_system_autotile::{
    assign_variants, eight_bit_variant, raw_mask, variant_for, BitMaskMode,
};

const CENTRE: TileCoord = TileCoord::new(0, 0);

/// Neighbour offsets in the order of their eight-bit weights.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn neighbourhood(offsets: &[(i32, i32)]) -> Vec<TileCoord> {
    let mut coords = vec![CENTRE];
    coords.extend(offsets.iter().map(|&(dx, dy)| CENTRE.offset(dx, dy)));
    coords
}

fn floors_around(offsets: &[(i32, i32)]) -> Grid {
    Grid::with_floors(neighbourhood(offsets))
}

fn walls_around(offsets: &[(i32, i32)]) -> Grid {
    let mut grid = Grid::new();
    for coord in neighbourhood(offsets) {
        assert!(grid.insert_wall(coord));
    }
    grid
}

fn wall_mask(grid: &Grid) -> u8 {
    raw_mask(grid, TileKind::Wall, CENTRE, BitMaskMode::FourBit)
}

fn floor_mask(grid: &Grid) -> u8 {
    raw_mask(grid, TileKind::Floor, CENTRE, BitMaskMode::EightBit)
}

#[test]
fn four_bit_isolated_and_surrounded() {
    let isolated = walls_around(&[]);
    assert_eq!(
        variant_for(&isolated, TileKind::Wall, CENTRE, BitMaskMode::FourBit),
        VariantId::new(0)
    );

    let surrounded = walls_around(&[(0, -1), (1, 0), (0, 1), (-1, 0)]);
    assert_eq!(
        variant_for(&surrounded, TileKind::Wall, CENTRE, BitMaskMode::FourBit),
        VariantId::new(15)
    );
}

#[test]
fn four_bit_weights_each_side() {
    let cases = [((0, -1), 1), ((1, 0), 2), ((0, 1), 4), ((-1, 0), 8)];
    for (offset, expected) in cases {
        let grid = walls_around(&[offset]);
        assert_eq!(
            variant_for(&grid, TileKind::Wall, CENTRE, BitMaskMode::FourBit),
            VariantId::new(expected),
            "neighbour at {offset:?}"
        );
    }
}

#[test]
fn four_bit_ignores_diagonals() {
    let grid = walls_around(&[(-1, -1), (1, -1), (-1, 1), (1, 1)]);
    assert_eq!(wall_mask(&grid), 0);
}

#[test]
fn eight_bit_isolated_maps_to_forty_seven() {
    let grid = floors_around(&[]);
    assert_eq!(floor_mask(&grid), 0);
    assert_eq!(
        variant_for(&grid, TileKind::Floor, CENTRE, BitMaskMode::EightBit),
        VariantId::new(47)
    );
}

#[test]
fn eight_bit_diagonal_needs_both_orthogonals() {
    // above-right without right: diagonal must not count.
    let partial = floors_around(&[(0, -1), (1, -1)]);
    assert_eq!(floor_mask(&partial), 2);
    assert_eq!(
        variant_for(&partial, TileKind::Floor, CENTRE, BitMaskMode::EightBit),
        VariantId::new(1)
    );

    // above and right without the diagonal.
    let open = floors_around(&[(0, -1), (1, 0)]);
    assert_eq!(floor_mask(&open), 18);
    assert_eq!(
        variant_for(&open, TileKind::Floor, CENTRE, BitMaskMode::EightBit),
        VariantId::new(6)
    );

    // above, right and the diagonal between them.
    let closed = floors_around(&[(0, -1), (1, 0), (1, -1)]);
    assert_eq!(floor_mask(&closed), 22);
    assert_eq!(
        variant_for(&closed, TileKind::Floor, CENTRE, BitMaskMode::EightBit),
        VariantId::new(7)
    );

    // a lone diagonal contributes nothing.
    let lone = floors_around(&[(-1, 1)]);
    assert_eq!(floor_mask(&lone), 0);
}

#[test]
fn eight_bit_fully_surrounded_is_forty_six() {
    let grid = floors_around(&NEIGHBOURS);
    assert_eq!(floor_mask(&grid), 255);
    assert_eq!(
        variant_for(&grid, TileKind::Floor, CENTRE, BitMaskMode::EightBit),
        VariantId::new(46)
    );
}

#[test]
fn eight_bit_remap_matches_asset_table() {
    let expected: [(u8, u8); 47] = [
        (2, 1),
        (8, 2),
        (10, 3),
        (11, 4),
        (16, 5),
        (18, 6),
        (22, 7),
        (24, 8),
        (26, 9),
        (27, 10),
        (30, 11),
        (31, 12),
        (64, 13),
        (66, 14),
        (72, 15),
        (74, 16),
        (75, 17),
        (80, 18),
        (82, 19),
        (86, 20),
        (88, 21),
        (90, 22),
        (91, 23),
        (94, 24),
        (95, 25),
        (104, 26),
        (106, 27),
        (107, 28),
        (120, 29),
        (122, 30),
        (123, 31),
        (126, 32),
        (127, 33),
        (208, 34),
        (210, 35),
        (214, 36),
        (216, 37),
        (218, 38),
        (219, 39),
        (222, 40),
        (223, 41),
        (248, 42),
        (250, 43),
        (251, 44),
        (254, 45),
        (255, 46),
        (0, 47),
    ];

    for (raw, id) in expected {
        assert_eq!(eight_bit_variant(raw), Some(VariantId::new(id)), "raw {raw}");
    }
}

#[test]
fn every_neighbourhood_lands_in_the_table() {
    let mut variants = BTreeSet::new();

    for pattern in 0u16..256 {
        let offsets: Vec<(i32, i32)> = NEIGHBOURS
            .iter()
            .enumerate()
            .filter(|(bit, _)| pattern & (1 << bit) != 0)
            .map(|(_, &offset)| offset)
            .collect();
        let grid = floors_around(&offsets);
        let raw = floor_mask(&grid);

        assert!(eight_bit_variant(raw).is_some(), "raw {raw} missing from table");
        let variant = variant_for(&grid, TileKind::Floor, CENTRE, BitMaskMode::EightBit);
        let _ = variants.insert(variant);
    }

    assert_eq!(variants.len(), 47);
}

#[test]
fn assign_variants_only_sees_same_kind() {
    let mut grid = Grid::with_floors([CENTRE, TileCoord::new(1, 0)]);
    assert!(grid.insert_wall(TileCoord::new(0, -1)));
    assert!(grid.insert_wall(TileCoord::new(0, -2)));

    assign_variants(&mut grid, TileKind::Floor, BitMaskMode::EightBit);
    assign_variants(&mut grid, TileKind::Wall, BitMaskMode::FourBit);

    let floor = grid.find_floor(CENTRE).expect("floor present");
    assert_eq!(floor.variant(), VariantId::new(5));

    let lower_wall = grid.find_wall(TileCoord::new(0, -1)).expect("wall present");
    assert_eq!(lower_wall.variant(), VariantId::new(1));
    let upper_wall = grid.find_wall(TileCoord::new(0, -2)).expect("wall present");
    assert_eq!(upper_wall.variant(), VariantId::new(4));
}
