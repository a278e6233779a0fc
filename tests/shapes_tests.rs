//! Shape catalog tests - every rotation state is a valid tetromino

use std::collections::HashSet;

use blockfall::core::{get_shape, offsets, ActivePiece};
use blockfall::types::{CellRef, PieceKind, Rotation, BOARD_WIDTH, SPAWN_ANCHOR};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

fn connected(minos: &[(i8, i8); 4]) -> bool {
    let mut seen = vec![minos[0]];
    let mut stack = vec![minos[0]];
    while let Some((x, y)) = stack.pop() {
        for next in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if minos.contains(&next) && !seen.contains(&next) {
                seen.push(next);
                stack.push(next);
            }
        }
    }
    seen.len() == 4
}

#[test]
fn test_all_shapes_are_four_connected_minos() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let shape = get_shape(kind, rotation);
            let distinct: HashSet<_> = shape.iter().collect();
            assert_eq!(distinct.len(), 4, "{kind:?} {rotation:?}");
            assert!(connected(&shape), "{kind:?} {rotation:?} is not connected");
            assert!(
                shape.iter().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)),
                "{kind:?} {rotation:?} leaves its box"
            );
        }
    }
}

#[test]
fn test_offsets_match_shape() {
    let w = BOARD_WIDTH as CellRef;
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let expected = get_shape(kind, rotation).map(|(x, y)| y as CellRef * w + x as CellRef);
            assert_eq!(offsets(kind, rotation), expected);
        }
    }
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = offsets(PieceKind::O, Rotation::North);
    for rotation in ROTATIONS {
        assert_eq!(offsets(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_spawned_pieces_stay_inside_board() {
    let w = BOARD_WIDTH as CellRef;
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let piece = ActivePiece::new(kind, rotation, SPAWN_ANCHOR);
            for cell in piece.cells() {
                assert!(cell >= 0);
                let col = cell % w;
                assert!((SPAWN_ANCHOR..SPAWN_ANCHOR + 4).contains(&col), "{kind:?} {rotation:?}");
            }
        }
    }
}
