use shrinkmaze_core::{
    constants::FIXED_STEP, CellCoord, Command, Direction, EnemyId, EnemyKind, Event, GamePhase,
    MazeLayout,
};
use shrinkmaze_system_pursuit::{Config, Pursuit};
use shrinkmaze_world::{self as world, query, World};

const OPEN_ROOM: [&str; 11] = [
    "###########",
    "#.........#",
    "#.........#",
    "#.........#",
    "#.........#",
    "#.........#",
    "#.........#",
    "#.........#",
    "#.........#",
    "#.........#",
    "###########",
];

const CORRIDOR: [&str; 5] = [
    "#########",
    "#.......#",
    "#########",
    "#.#######",
    "#########",
];

fn playing_world(rows: &[&str]) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    let layout = MazeLayout::parse(rows).expect("valid layout");
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

fn spawn(world: &mut World, kind: EnemyKind, cell: CellCoord) -> EnemyId {
    let mut events = Vec::new();
    world::apply(world, Command::SpawnEnemy { kind, cell }, &mut events);
    match events.as_slice() {
        [Event::EnemySpawned { enemy, .. }] => *enemy,
        other => panic!("unexpected events: {other:?}"),
    }
}

fn decide(world: &World, pursuit: &mut Pursuit, player_cell: CellCoord) -> Vec<Command> {
    let mut commands = Vec::new();
    pursuit.handle(
        &query::enemy_view(world),
        player_cell,
        query::grid_view(world),
        &mut commands,
    );
    commands
}

#[test]
fn chaser_with_clear_column_heads_straight_for_the_player() {
    let mut world = playing_world(&OPEN_ROOM);
    let enemy = spawn(&mut world, EnemyKind::Chaser, CellCoord::new(5, 5));
    let mut pursuit = Pursuit::new(Config::new(17));

    let commands = decide(&world, &mut pursuit, CellCoord::new(5, 9));

    assert_eq!(
        commands,
        vec![Command::SteerEnemy {
            enemy,
            heading: Some(Direction::South),
            cooldown_ticks: 30,
        }]
    );
}

#[test]
fn enemies_on_cooldown_are_left_alone() {
    let mut world = playing_world(&OPEN_ROOM);
    let _ = spawn(&mut world, EnemyKind::Chaser, CellCoord::new(5, 5));
    let mut pursuit = Pursuit::new(Config::new(3));

    let first = decide(&world, &mut pursuit, CellCoord::new(1, 1));
    for command in first {
        world::apply(&mut world, command, &mut Vec::new());
    }

    assert!(decide(&world, &mut pursuit, CellCoord::new(1, 1)).is_empty());
}

#[test]
fn wanderer_never_doubles_back_while_another_way_is_open() {
    for seed in 0..32 {
        let mut world = playing_world(&CORRIDOR);
        let enemy = spawn(&mut world, EnemyKind::Wanderer, CellCoord::new(4, 1));
        world::apply(
            &mut world,
            Command::SteerEnemy {
                enemy,
                heading: Some(Direction::East),
                cooldown_ticks: 0,
            },
            &mut Vec::new(),
        );

        let mut pursuit = Pursuit::new(Config::new(seed));
        let commands = decide(&world, &mut pursuit, CellCoord::new(1, 1));
        match commands.as_slice() {
            [Command::SteerEnemy {
                heading,
                cooldown_ticks,
                ..
            }] => {
                assert_eq!(*heading, Some(Direction::East));
                assert!((90..135).contains(cooldown_ticks));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }
}

#[test]
fn wanderer_reverses_out_of_a_dead_end() {
    let mut world = playing_world(&CORRIDOR);
    let enemy = spawn(&mut world, EnemyKind::Wanderer, CellCoord::new(7, 1));
    world::apply(
        &mut world,
        Command::SteerEnemy {
            enemy,
            heading: Some(Direction::East),
            cooldown_ticks: 0,
        },
        &mut Vec::new(),
    );

    let mut pursuit = Pursuit::new(Config::new(5));
    let commands = decide(&world, &mut pursuit, CellCoord::new(1, 1));
    assert!(matches!(
        commands.as_slice(),
        [Command::SteerEnemy {
            heading: Some(Direction::West),
            ..
        }]
    ));
}

#[test]
fn boxed_in_enemy_waits_briefly() {
    let mut world = playing_world(&CORRIDOR);
    let enemy = spawn(&mut world, EnemyKind::Chaser, CellCoord::new(1, 3));
    let mut pursuit = Pursuit::new(Config::new(5));

    assert_eq!(
        decide(&world, &mut pursuit, CellCoord::new(1, 1)),
        vec![Command::SteerEnemy {
            enemy,
            heading: None,
            cooldown_ticks: 10,
        }]
    );
}

#[test]
fn chaser_runs_down_an_idle_player_in_a_corridor() {
    let mut world = playing_world(&CORRIDOR);
    let _ = spawn(&mut world, EnemyKind::Chaser, CellCoord::new(7, 1));
    let mut pursuit = Pursuit::new(Config::new(11));

    let mut caught = false;
    for _ in 0..600 {
        let player_cell = query::player_cell(&world);
        for command in decide(&world, &mut pursuit, player_cell) {
            world::apply(&mut world, command, &mut Vec::new());
        }
        let mut events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: FIXED_STEP }, &mut events);
        if events.iter().any(|event| matches!(event, Event::GameOver { .. })) {
            caught = true;
            break;
        }
    }

    assert!(caught);
    assert_eq!(query::phase(&world), GamePhase::GameOver);
}
