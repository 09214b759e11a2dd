/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Number of cells on a `height x width` board.
pub const fn area(height: Coord, width: Coord) -> CellCount {
    height as CellCount * width as CellCount
}

pub(crate) fn to_index((row, col): Coord2) -> [usize; 2] {
    [row as usize, col as usize]
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up-to-8 in-bounds neighbors of `center` on a `bounds`-sized board.
/// Off-board neighbors are simply absent, there is no wraparound.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let row = center.0 as i32 + dr;
        let col = center.1 as i32 + dc;
        if row < 0 || col < 0 || row >= bounds.0 as i32 || col >= bounds.1 as i32 {
            None
        } else {
            Some((row as Coord, col as Coord))
        }
    })
}
