use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use shrinkmaze_core::{CellCoord, CellKind, Direction, MazeDimensions, MazeLayout};
use shrinkmaze_system_carving::{carve, CarveEntropy, Carving, Config, SeededEntropy};

/// Entropy that never shuffles, always picks the lowest value and never rolls a room.
struct Scripted;

impl CarveEntropy for Scripted {
    fn shuffle(&mut self, _directions: &mut [Direction]) {}

    fn below(&mut self, _upper: u32) -> u32 {
        0
    }

    fn chance(&mut self, _probability: f64) -> bool {
        false
    }
}

#[test]
fn scripted_entropy_carves_expected_serpentine() {
    let dimensions = MazeDimensions::new(21, 11).expect("valid dimensions");
    let layout = carve(dimensions, &mut Scripted);
    let expected = MazeLayout::parse(&[
        "#####################",
        "#.....#...#...#...#.#",
        "#...#.#.#.#.#.#.#.#.#",
        "#.#.#.#.#.#.#.#.#.#.#",
        "#.#.#.#.#.#.#.#.#.#.#",
        "#.#.#.#.#.#.#.#.#.#.#",
        "#.#.#.#.#.#.#.#.#.#.#",
        "#.#.#.#.#.#.#.#.#.#.#",
        "#.#.#.#.#.#.#.#.#.#.#",
        "#...#...#...#...#...#",
        "#####################",
    ])
    .expect("valid fixture");
    assert_eq!(layout.to_rows(), expected.to_rows());
}

#[test]
fn carving_system_uses_configured_dimensions() {
    let dimensions = MazeDimensions::new(9, 7).expect("valid dimensions");
    let mut carving = Carving::new(Config::new(dimensions, 11));
    assert_eq!(carving.dimensions(), dimensions);
    assert_eq!(carving.generate().dimensions(), dimensions);
}

fn reachable_from_start(layout: &MazeLayout) -> HashSet<CellCoord> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([CellCoord::new(1, 1)]);
    let _ = seen.insert(CellCoord::new(1, 1));
    while let Some(cell) = queue.pop_front() {
        for direction in Direction::ALL {
            let Some(next) = cell.step(direction, 1) else {
                continue;
            };
            if layout.is_path(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn odd_side(range: std::ops::RangeInclusive<u32>) -> impl Strategy<Value = u32> {
    range.prop_map(|half| half * 2 + 1)
}

proptest! {
    #[test]
    fn carved_mazes_keep_invariants(
        width in odd_side(2..=15),
        height in odd_side(2..=15),
        seed in any::<u64>(),
    ) {
        let dimensions = MazeDimensions::new(width, height).expect("odd dimensions");
        let layout = carve(dimensions, &mut SeededEntropy::new(seed));

        for (cell, kind) in layout.iter() {
            if dimensions.is_border(cell) {
                prop_assert_eq!(kind, CellKind::Wall, "border cell {:?} is open", cell);
            }
        }

        for (column, row) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            prop_assert!(layout.is_path(CellCoord::new(column, row)));
        }

        let reachable = reachable_from_start(&layout);
        let paths = layout.iter().filter(|(_, kind)| *kind == CellKind::Path).count();
        prop_assert_eq!(reachable.len(), paths);

        for row in (1..height - 1).step_by(2) {
            for column in (1..width - 1).step_by(2) {
                prop_assert!(layout.is_path(CellCoord::new(column, row)));
            }
        }
    }
}
