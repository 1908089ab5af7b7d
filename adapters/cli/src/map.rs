use delve_core::{EntityKind, TileKind};
use delve_world::{query, World};

const FLOOR: char = '.';
const WALL: char = '#';
const VOID: char = ' ';
const PLAYER: char = '@';
const ROAMER: char = 'r';

/// Renders the world as rows of ASCII glyphs, top row first.
pub(crate) fn render(world: &World) -> String {
    let tiles = query::tiles(world);
    let Some(first) = tiles.first() else {
        return String::new();
    };

    let (mut min_x, mut min_y) = (first.coord.x(), first.coord.y());
    let (mut max_x, mut max_y) = (min_x, min_y);
    for tile in &tiles {
        min_x = min_x.min(tile.coord.x());
        min_y = min_y.min(tile.coord.y());
        max_x = max_x.max(tile.coord.x());
        max_y = max_y.max(tile.coord.y());
    }

    let width = usize::try_from(max_x - min_x + 1).unwrap_or(0);
    let height = usize::try_from(max_y - min_y + 1).unwrap_or(0);
    let mut rows = vec![vec![VOID; width]; height];

    let mut place = |x: i32, y: i32, glyph: char| {
        let column = usize::try_from(x - min_x).ok();
        let row = usize::try_from(y - min_y).ok();
        if let (Some(column), Some(row)) = (column, row) {
            if let Some(cell) = rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                *cell = glyph;
            }
        }
    };

    for tile in &tiles {
        let glyph = match tile.kind {
            TileKind::Floor => FLOOR,
            TileKind::Wall => WALL,
        };
        place(tile.coord.x(), tile.coord.y(), glyph);
    }
    for entity in query::entities(world) {
        let glyph = match entity.kind {
            EntityKind::Player => PLAYER,
            EntityKind::Roamer => ROAMER,
        };
        place(entity.tile.x(), entity.tile.y(), glyph);
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{Grid, TileCoord};

    #[test]
    fn renders_player_over_floor() {
        let mut grid = Grid::with_floors([TileCoord::new(0, 0), TileCoord::new(1, 0)]);
        assert!(grid.insert_wall(TileCoord::new(0, -1)));
        let world = World::new(grid, TileCoord::new(1, 0)).expect("start is a floor");

        assert_eq!(render(&world), "#\n.@");
    }
}
