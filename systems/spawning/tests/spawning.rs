use std::collections::HashSet;

use shrinkmaze_core::{
    constants::{FIXED_STEP, START_CELL},
    ActiveBounds, CellCoord, CellKind, Command, EnemyKind, Event, GamePhase, Intent,
    MazeDimensions, MazeLayout, WorldPoint,
};
use shrinkmaze_system_spawning::{Config, Spawning};
use shrinkmaze_world::{self as world, query, query::BoardView, World};

fn open_field() -> MazeLayout {
    let dimensions = MazeDimensions::DEFAULT;
    let mut layout = MazeLayout::filled(dimensions, CellKind::Path);
    for cell in ActiveBounds::covering(dimensions).ring() {
        let _ = layout.set(cell, CellKind::Wall);
    }
    layout
}

fn respond(world: &mut World, spawning: &mut Spawning, events: &[Event]) -> Vec<Command> {
    let mut commands = Vec::new();
    spawning.handle(
        events,
        query::grid_view(world),
        query::active_bounds(world),
        &query::board_view(world),
        &mut commands,
    );
    commands
}

#[test]
fn loaded_maze_receives_gems_power_ups_and_enemies() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadMaze {
            layout: open_field(),
        },
        &mut events,
    );

    let mut spawning = Spawning::new(Config::new(0x5eed));
    for command in respond(&mut world, &mut spawning, &events) {
        world::apply(&mut world, command, &mut Vec::new());
    }

    let gems: HashSet<CellCoord> = query::gems(&world).iter().map(|gem| gem.cell).collect();
    assert_eq!(gems.len(), 20);
    assert!(!gems.contains(&START_CELL));

    let power_ups = query::power_ups(&world);
    assert!(power_ups.len() <= 4);
    for power in &power_ups {
        assert_ne!(power.cell, START_CELL);
        assert!(!gems.contains(&power.cell));
    }

    let board = query::board_view(&world);
    assert_eq!(board.chasers, 2);
    assert_eq!(board.wanderers, 3);
    for enemy in query::enemy_view(&world).iter() {
        let reach = match enemy.kind {
            EnemyKind::Chaser => 4,
            EnemyKind::Wanderer => 3,
        };
        assert!(enemy.cell.column() > 1 + reach || enemy.cell.row() > 1 + reach);
        assert!(ActiveBounds::new(2, 18, 2, 12).contains(enemy.cell));
    }
}

#[test]
fn collecting_the_last_gem_plans_a_new_set() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadMaze {
            layout: open_field(),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SetPhase {
            phase: GamePhase::Playing,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::PlaceGems {
            cells: vec![CellCoord::new(2, 1)],
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SetPlayerIntent {
            intent: Intent::new(1, 0),
        },
        &mut events,
    );

    let mut spawning = Spawning::new(Config::new(42));
    let mut collected = Vec::new();
    for _ in 0..30 {
        let mut tick_events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: FIXED_STEP }, &mut tick_events);
        if tick_events
            .iter()
            .any(|event| matches!(event, Event::GemCollected { .. }))
        {
            collected = tick_events;
            break;
        }
    }
    assert!(!collected.is_empty(), "gem should have been collected");
    assert_eq!(query::score(&world), 1);

    let commands = respond(&mut world, &mut spawning, &collected);
    match commands.as_slice() {
        [Command::PlaceGems { cells }] => assert_eq!(cells.len(), 20),
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn every_twentieth_point_brings_a_reinforcement() {
    let layout = open_field();
    let grid = query::GridView::new(&layout, 32.0);
    let board = BoardView {
        chasers: 2,
        wanderers: 3,
        player_cell: START_CELL,
        score: 20,
        ..BoardView::default()
    };
    let mut spawning = Spawning::new(Config::new(7));
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::GemCollected {
            position: WorldPoint::new(48.0, 48.0),
            score: 20,
        }],
        grid,
        ActiveBounds::covering(layout.dimensions()),
        &board,
        &mut commands,
    );

    assert!(matches!(commands.first(), Some(Command::PlaceGems { .. })));
    assert!(matches!(
        commands.get(1),
        Some(Command::SpawnEnemy {
            kind: EnemyKind::Chaser,
            ..
        })
    ));
}

#[test]
fn full_roster_gets_no_reinforcement() {
    let layout = open_field();
    let grid = query::GridView::new(&layout, 32.0);
    let board = BoardView {
        chasers: 4,
        wanderers: 4,
        score: 40,
        ..BoardView::default()
    };
    let mut spawning = Spawning::new(Config::new(7));
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::GemCollected {
            position: WorldPoint::new(48.0, 48.0),
            score: 40,
        }],
        grid,
        ActiveBounds::covering(layout.dimensions()),
        &board,
        &mut commands,
    );

    assert_eq!(commands.len(), 1);
}

#[test]
fn no_room_for_gems_declares_victory() {
    let layout = open_field();
    let grid = query::GridView::new(&layout, 32.0);
    let bounds = ActiveBounds::new(9, 11, 6, 8);
    let board = BoardView {
        marked: bounds.ring(),
        score: 3,
        ..BoardView::default()
    };
    let mut spawning = Spawning::new(Config::new(1));
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::WallSolidified {
            cell: CellCoord::new(9, 6),
            position: WorldPoint::new(304.0, 208.0),
        }],
        grid,
        bounds,
        &board,
        &mut commands,
    );

    assert_eq!(commands, vec![Command::DeclareVictory]);
}

#[test]
fn remaining_gems_suppress_refill() {
    let layout = open_field();
    let grid = query::GridView::new(&layout, 32.0);
    let board = BoardView {
        gems: vec![CellCoord::new(4, 4)],
        ..BoardView::default()
    };
    let mut spawning = Spawning::new(Config::new(1));
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::WallSolidified {
            cell: CellCoord::new(1, 1),
            position: WorldPoint::new(48.0, 48.0),
        }],
        grid,
        ActiveBounds::covering(layout.dimensions()),
        &board,
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn reinforcement_never_lands_on_an_enemy() {
    let layout = MazeLayout::parse(&[
        "#########",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#########",
    ])
    .expect("valid layout");
    let grid = query::GridView::new(&layout, 32.0);
    let bounds = ActiveBounds::covering(layout.dimensions());
    let area = bounds.inset(2).expect("room for enemies");
    let far_cells: Vec<CellCoord> = area
        .cells()
        .filter(|cell| cell.column() > 5 || cell.row() > 5)
        .collect();
    assert_eq!(far_cells.len(), 9);

    let board = BoardView {
        enemies: far_cells,
        chasers: 2,
        wanderers: 3,
        player_cell: START_CELL,
        score: 20,
        ..BoardView::default()
    };
    let mut spawning = Spawning::new(Config::new(7));
    let mut commands = Vec::new();
    spawning.handle(
        &[Event::GemCollected {
            position: WorldPoint::new(48.0, 48.0),
            score: 20,
        }],
        grid,
        bounds,
        &board,
        &mut commands,
    );

    match commands.as_slice() {
        [Command::PlaceGems { cells }] => assert!(!cells.is_empty()),
        other => panic!("unexpected commands: {other:?}"),
    }
}

#[test]
fn board_view_reports_enemy_cells() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadMaze {
            layout: open_field(),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Wanderer,
            cell: CellCoord::new(9, 7),
        },
        &mut events,
    );

    assert_eq!(query::board_view(&world).enemies, vec![CellCoord::new(9, 7)]);
}
