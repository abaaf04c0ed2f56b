use proptest::prelude::*;
use shrinkmaze_core::{
    constants::{FIXED_STEP, MIN_ACTIVE_SPAN},
    ActiveBounds, CellCoord, CellKind, Command, Event, GamePhase, MazeDimensions, MazeLayout,
    PowerUpKind,
};
use shrinkmaze_world::{self as world, query, World};

const ROOMY: [&str; 11] = [
    "#####################",
    "#...................#",
    "#.#################.#",
    "#.#...............#.#",
    "#.#.#############.#.#",
    "#.#.#...........#.#.#",
    "#.#.#############.#.#",
    "#.#...............#.#",
    "#.#################.#",
    "#...................#",
    "#####################",
];

fn playing_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    let layout = MazeLayout::parse(&ROOMY).expect("valid layout");
    world::apply(&mut world, Command::LoadMaze { layout }, &mut events);
    world::apply(
        &mut world,
        Command::SetPhase {
            phase: GamePhase::Playing,
        },
        &mut events,
    );
    world
}

fn shrink(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::ShrinkRing, &mut events);
    events
}

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FIXED_STEP }, &mut events);
    events
}

#[test]
fn border_ring_contracts_without_markers() {
    let mut world = playing_world();
    let events = shrink(&mut world);
    assert_eq!(
        events,
        vec![Event::LevelShrinkBegan {
            bounds: ActiveBounds::new(1, 19, 1, 9),
            marked: 0,
        }]
    );
    assert!(query::shrink_markers(&world).is_empty());
}

#[test]
fn marked_cells_solidify_after_warning_period() {
    let mut world = playing_world();
    let _ = shrink(&mut world);
    let events = shrink(&mut world);
    assert_eq!(
        events,
        vec![Event::LevelShrinkBegan {
            bounds: ActiveBounds::new(2, 18, 2, 8),
            marked: 52,
        }]
    );

    let corner = CellCoord::new(19, 9);
    let markers = query::shrink_markers(&world);
    assert!(markers.iter().any(|marker| marker.cell == corner));
    assert!(markers
        .iter()
        .all(|marker| (marker.remaining_fraction() - 1.0).abs() < f32::EPSILON));

    for _ in 0..119 {
        let events = tick(&mut world);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::WallSolidified { .. })));
    }
    assert_eq!(query::grid_view(&world).kind(corner), CellKind::Path);

    let events = tick(&mut world);
    let solidified = events
        .iter()
        .filter(|event| matches!(event, Event::WallSolidified { .. }))
        .count();
    assert_eq!(solidified, 52);
    assert_eq!(query::grid_view(&world).kind(corner), CellKind::Wall);
    assert!(query::shrink_markers(&world).is_empty());
}

#[test]
fn solidified_cells_drop_their_pickups() {
    let mut world = playing_world();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::PlaceGems {
            cells: vec![CellCoord::new(19, 5), CellCoord::new(3, 5)],
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnPowerUp {
            kind: PowerUpKind::Ghost,
            cell: CellCoord::new(10, 9),
        },
        &mut events,
    );
    let _ = shrink(&mut world);
    let _ = shrink(&mut world);
    for _ in 0..120 {
        let _ = tick(&mut world);
    }

    let gems = query::gems(&world);
    assert_eq!(gems.len(), 1);
    assert_eq!(gems[0].cell, CellCoord::new(3, 5));
    assert!(query::power_ups(&world).is_empty());
}

#[test]
fn bounds_shrink_monotonically_and_halt_at_minimum_span() {
    let mut world = playing_world();
    let mut previous = query::active_bounds(&world);
    for _ in 0..12 {
        let _ = shrink(&mut world);
        let current = query::active_bounds(&world);
        assert!(current.min_x() >= previous.min_x());
        assert!(current.max_x() <= previous.max_x());
        assert!(current.min_y() >= previous.min_y());
        assert!(current.max_y() <= previous.max_y());
        assert!(current.min_x() <= current.max_x());
        assert!(current.min_y() <= current.max_y());
        previous = current;
    }
    assert_eq!(previous, ActiveBounds::new(2, 18, 2, 8));
    assert!(shrink(&mut world).is_empty());
}

#[test]
fn loading_a_maze_resets_bounds_and_markers() {
    let mut world = playing_world();
    let _ = shrink(&mut world);
    let _ = shrink(&mut world);
    assert!(!query::shrink_markers(&world).is_empty());

    let mut events = Vec::new();
    let layout = MazeLayout::parse(&ROOMY).expect("valid layout");
    world::apply(&mut world, Command::LoadMaze { layout }, &mut events);
    assert!(query::shrink_markers(&world).is_empty());
    assert_eq!(
        query::active_bounds(&world),
        ActiveBounds::covering(query::dimensions(&world))
    );
}

fn random_layout(dimensions: MazeDimensions, cells: &[bool]) -> MazeLayout {
    let kinds = (0..dimensions.cell_count())
        .map(|index| {
            if cells[index % cells.len()] {
                CellKind::Path
            } else {
                CellKind::Wall
            }
        })
        .collect();
    MazeLayout::from_cells(dimensions, kinds).expect("matching cell count")
}

proptest! {
    #[test]
    fn bounds_only_ever_contract_by_one_ring(
        half_width in 2u32..13,
        half_height in 2u32..13,
        cells in prop::collection::vec(any::<bool>(), 1..64),
        script in prop::collection::vec(any::<bool>(), 1..200),
    ) {
        let dimensions = MazeDimensions::new(half_width * 2 + 1, half_height * 2 + 1)
            .expect("odd dimensions");
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::LoadMaze { layout: random_layout(dimensions, &cells) },
            &mut events,
        );
        world::apply(&mut world, Command::SetPhase { phase: GamePhase::Playing }, &mut events);

        let mut previous = query::active_bounds(&world);
        prop_assert_eq!(previous, ActiveBounds::covering(dimensions));
        for shrinks in script {
            let events = if shrinks { shrink(&mut world) } else { tick(&mut world) };
            let current = query::active_bounds(&world);

            if shrinks && previous.can_contract(MIN_ACTIVE_SPAN) {
                prop_assert_eq!(current, previous.contracted());
                let began = matches!(
                    events.as_slice(),
                    [Event::LevelShrinkBegan { bounds, .. }] if *bounds == current
                );
                prop_assert!(began);
            } else {
                prop_assert_eq!(current, previous);
                let any_began = events
                    .iter()
                    .any(|event| matches!(event, Event::LevelShrinkBegan { .. }));
                prop_assert!(!any_began);
            }
            prop_assert!(current.min_x() <= current.max_x());
            prop_assert!(current.min_y() <= current.max_y());
            for marker in query::shrink_markers(&world) {
                prop_assert!(!current.contains(marker.cell));
            }
            previous = current;
        }
    }
}
