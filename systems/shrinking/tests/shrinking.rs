use shrinkmaze_core::{
    constants::{FIXED_STEP, SHRINK_INTERVAL},
    ActiveBounds, CellKind, Command, Event, GamePhase, MazeDimensions, MazeLayout,
};
use shrinkmaze_system_shrinking::{Config, Shrinking};
use shrinkmaze_world::{self as world, query, World};

fn open_field() -> MazeLayout {
    let dimensions = MazeDimensions::DEFAULT;
    let mut layout = MazeLayout::filled(dimensions, CellKind::Path);
    for cell in ActiveBounds::covering(dimensions).ring() {
        let _ = layout.set(cell, CellKind::Wall);
    }
    layout
}

fn playing_world() -> (World, Vec<Event>) {
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
    (world, events)
}

fn step(world: &mut World, shrinking: &mut Shrinking, pending: Vec<Event>) -> Vec<Event> {
    let mut events = pending;
    world::apply(world, Command::Tick { dt: FIXED_STEP }, &mut events);

    let mut commands = Vec::new();
    shrinking.handle(
        &events,
        query::active_bounds(world),
        query::grid_view(world),
        query::gems(world).len(),
        query::power_ups(world).len(),
        &mut commands,
    );

    let mut produced = Vec::new();
    for command in commands {
        world::apply(world, command, &mut produced);
    }
    produced
}

#[test]
fn first_shrink_fires_after_eight_seconds_of_play() {
    let (mut world, loaded) = playing_world();
    let mut shrinking = Shrinking::new(Config::new(SHRINK_INTERVAL, 5));

    let mut pending = loaded;
    let mut fired_at = None;
    for tick in 1..=600 {
        let produced = step(&mut world, &mut shrinking, std::mem::take(&mut pending));
        if produced
            .iter()
            .any(|event| matches!(event, Event::LevelShrinkBegan { .. }))
        {
            fired_at = Some(tick);
            break;
        }
    }

    assert_eq!(fired_at, Some(480));
    assert_eq!(query::active_bounds(&world), ActiveBounds::new(1, 19, 1, 13));
}

#[test]
fn shrink_power_ups_land_on_the_centre_of_the_new_bounds() {
    let (mut world, loaded) = playing_world();
    let mut shrinking = Shrinking::new(Config::new(FIXED_STEP / 2, 9));

    let mut pending = loaded;
    let mut centres = Vec::new();
    for _ in 0..6 {
        let produced = step(&mut world, &mut shrinking, std::mem::take(&mut pending));
        for event in produced {
            if let Event::PowerUpSpawned { cell, .. } = event {
                centres.push((cell, query::active_bounds(&world).center()));
            }
        }
    }

    assert!(query::power_ups(&world).len() <= 3);
    for (cell, centre) in centres {
        assert_eq!(cell, centre);
    }
}

#[test]
fn halted_shrink_with_no_gems_declares_victory() {
    let (mut world, loaded) = playing_world();
    let mut shrinking = Shrinking::new(Config::new(FIXED_STEP / 2, 1));

    let mut pending = loaded;
    let mut victory = false;
    for _ in 0..12 {
        let produced = step(&mut world, &mut shrinking, std::mem::take(&mut pending));
        victory |= produced.contains(&Event::Victory);
    }

    let bounds = query::active_bounds(&world);
    assert_eq!(bounds, ActiveBounds::new(4, 16, 4, 10));
    assert!(!bounds.can_contract(7));
    assert!(victory);
}
