#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bitmask autotiler that derives sprite variants from neighbour occupancy.
//!
//! Only neighbours of the same [`TileKind`] contribute: floors look at floors,
//! walls look at walls. Variants must be assigned after generation finishes,
//! because the lookup inspects the live grid.

use delve_core::{Grid, TileCoord, TileKind, VariantId};

/// Variant assigned in eight-neighbour mode to a tile with no neighbours.
pub const ISOLATED_EIGHT_BIT: VariantId = VariantId::new(47);

/// Neighbourhood considered when computing a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitMaskMode {
    /// Orthogonal neighbours only; the raw value is the variant (`0..=15`).
    FourBit,
    /// All eight neighbours with corner gating, collapsed through [`EIGHT_BIT_REMAP`].
    EightBit,
}

const ABOVE_LEFT: u8 = 1;
const ABOVE: u8 = 2;
const ABOVE_RIGHT: u8 = 4;
const LEFT: u8 = 8;
const RIGHT: u8 = 16;
const BELOW_LEFT: u8 = 32;
const BELOW: u8 = 64;
const BELOW_RIGHT: u8 = 128;

/// Fixed raw-mask to sprite-index table for eight-neighbour mode.
///
/// The pairs are sorted by raw value. The 47 entries are exactly the masks
/// reachable when a diagonal only counts alongside both adjacent orthogonals.
pub const EIGHT_BIT_REMAP: [(u8, u8); 47] = [
    (0, 47),
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
];

/// Computes the unmapped neighbour mask of a tile.
///
/// Four-bit mode weighs above=1, right=2, below=4, left=8. Eight-bit mode uses
/// the row-major weights 1..128 and drops a diagonal unless both orthogonals
/// beside it are present.
#[must_use]
pub fn raw_mask(grid: &Grid, kind: TileKind, coord: TileCoord, mode: BitMaskMode) -> u8 {
    let present = |dx: i32, dy: i32| grid.contains(kind, coord.offset(dx, dy));

    let above = present(0, -1);
    let right = present(1, 0);
    let below = present(0, 1);
    let left = present(-1, 0);

    match mode {
        BitMaskMode::FourBit => {
            u8::from(above) | u8::from(right) << 1 | u8::from(below) << 2 | u8::from(left) << 3
        }
        BitMaskMode::EightBit => {
            let mut mask = 0;
            if above {
                mask |= ABOVE;
            }
            if left {
                mask |= LEFT;
            }
            if right {
                mask |= RIGHT;
            }
            if below {
                mask |= BELOW;
            }
            if above && left && present(-1, -1) {
                mask |= ABOVE_LEFT;
            }
            if above && right && present(1, -1) {
                mask |= ABOVE_RIGHT;
            }
            if below && left && present(-1, 1) {
                mask |= BELOW_LEFT;
            }
            if below && right && present(1, 1) {
                mask |= BELOW_RIGHT;
            }
            mask
        }
    }
}

/// Looks up the sprite index for an eight-bit raw mask.
#[must_use]
pub fn eight_bit_variant(raw: u8) -> Option<VariantId> {
    EIGHT_BIT_REMAP
        .binary_search_by_key(&raw, |&(key, _)| key)
        .ok()
        .map(|index| VariantId::new(EIGHT_BIT_REMAP[index].1))
}

/// Returns the variant a tile should display given its current neighbours.
#[must_use]
pub fn variant_for(grid: &Grid, kind: TileKind, coord: TileCoord, mode: BitMaskMode) -> VariantId {
    let raw = raw_mask(grid, kind, coord, mode);
    match mode {
        BitMaskMode::FourBit => VariantId::new(raw),
        // Corner gating keeps every raw mask inside the table.
        BitMaskMode::EightBit => eight_bit_variant(raw).unwrap_or(ISOLATED_EIGHT_BIT),
    }
}

/// Recomputes the variant of every tile of `kind` in place.
pub fn assign_variants(grid: &mut Grid, kind: TileKind, mode: BitMaskMode) {
    let updates: Vec<(TileCoord, VariantId)> = grid
        .coords(kind)
        .into_iter()
        .map(|coord| (coord, variant_for(grid, kind, coord, mode)))
        .collect();

    for (coord, variant) in updates {
        let _ = grid.set_variant(kind, coord, variant);
    }
}
