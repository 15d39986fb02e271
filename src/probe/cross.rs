use crate::CubeFace;

/// Grid width of the cross atlas, in face-size cells.
pub const CROSS_COLS: usize = 4;

/// Grid height of the cross atlas, in face-size cells.
pub const CROSS_ROWS: usize = 3;

/// Grid cell occupied by a cube face within the cross atlas.
///
/// Rows count from the top of the atlas:
///
/// ```text
/// [    ][ +Y ][    ][    ]
/// [ -X ][ +Z ][ +X ][ -Z ]
/// [    ][ -Y ][    ][    ]
/// ```
pub fn cell_of(face: CubeFace) -> (usize, usize) {
    match face {
        CubeFace::PositiveY => (1, 0),
        CubeFace::NegativeX => (0, 1),
        CubeFace::PositiveZ => (1, 1),
        CubeFace::PositiveX => (2, 1),
        CubeFace::NegativeZ => (3, 1),
        CubeFace::NegativeY => (1, 2),
    }
}

/// The cube face occupying a grid cell, if any.
pub fn face_at(col: usize, row: usize) -> Option<CubeFace> {
    CubeFace::ALL
        .iter()
        .copied()
        .find(|&face| cell_of(face) == (col, row))
}

/// Pixel region `(x0, y0, x1, y1)` of a face within the atlas, with `y`
/// counted from the top and the upper bounds exclusive.
pub fn pixel_region(face: CubeFace, face_size: usize) -> (usize, usize, usize, usize) {
    let (col, row) = cell_of(face);

    (
        col * face_size,
        row * face_size,
        (col + 1) * face_size,
        (row + 1) * face_size,
    )
}

/// Atlas dimensions for a face size, always exact multiples of it.
pub fn atlas_dimensions(face_size: usize) -> (usize, usize) {
    (CROSS_COLS * face_size, CROSS_ROWS * face_size)
}
