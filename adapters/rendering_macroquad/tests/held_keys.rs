use shrinkmaze_core::{Direction, Intent};
use shrinkmaze_rendering_macroquad::HeldKeys;

#[test]
fn no_keys_means_idle() {
    assert_eq!(HeldKeys::default().intent(), Intent::IDLE);
}

#[test]
fn single_keys_map_to_their_direction() {
    let cases = [
        (
            HeldKeys {
                up: true,
                ..HeldKeys::default()
            },
            Direction::North,
        ),
        (
            HeldKeys {
                down: true,
                ..HeldKeys::default()
            },
            Direction::South,
        ),
        (
            HeldKeys {
                left: true,
                ..HeldKeys::default()
            },
            Direction::West,
        ),
        (
            HeldKeys {
                right: true,
                ..HeldKeys::default()
            },
            Direction::East,
        ),
    ];

    for (keys, direction) in cases {
        assert_eq!(keys.intent().direction(), Some(direction), "{keys:?}");
    }
}

#[test]
fn horizontal_keys_win_over_vertical_ones() {
    let keys = HeldKeys {
        up: true,
        right: true,
        ..HeldKeys::default()
    };
    assert_eq!(keys.intent(), Intent::toward(Direction::East));
}

#[test]
fn opposite_keys_cancel_out() {
    let keys = HeldKeys {
        left: true,
        right: true,
        down: true,
        ..HeldKeys::default()
    };
    assert_eq!(keys.intent(), Intent::toward(Direction::South));

    let keys = HeldKeys {
        up: true,
        down: true,
        ..HeldKeys::default()
    };
    assert_eq!(keys.intent(), Intent::IDLE);
}
