//! Player input handling
//!
//! Raw keyboard / mouse / touch / gamepad state is read once per frame into
//! [`PlayerActions`]; gameplay systems only look at the actions.

use bevy::input::gamepad::Gamepad;
use bevy::input::mouse::MouseMotion;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

/// Key assignments for every player action
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub move_forward: KeyCode,
    pub move_backward: KeyCode,
    pub move_right: KeyCode,
    pub move_left: KeyCode,
    pub jump: KeyCode,
    pub sprint: KeyCode,
    pub pick_up_item: KeyCode,
    pub show_wall: KeyCode,
    pub show_floor: KeyCode,
    pub show_stairs: KeyCode,
    pub exit_build: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub look_up: KeyCode,
    pub look_down: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            move_forward: KeyCode::KeyW,
            move_backward: KeyCode::KeyS,
            move_right: KeyCode::KeyD,
            move_left: KeyCode::KeyA,
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            pick_up_item: KeyCode::KeyE,
            show_wall: KeyCode::KeyX,
            show_floor: KeyCode::KeyF,
            show_stairs: KeyCode::KeyC,
            exit_build: KeyCode::Escape,
            turn_left: KeyCode::ArrowLeft,
            turn_right: KeyCode::ArrowRight,
            look_up: KeyCode::ArrowUp,
            look_down: KeyCode::ArrowDown,
        }
    }
}

/// Actions for the current frame
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerActions {
    /// -1..1, positive is forward
    pub move_forward: f32,
    /// -1..1, positive is right
    pub move_right: f32,
    /// Absolute yaw delta from the mouse (pixels)
    pub turn: f32,
    /// Absolute pitch delta from the mouse (pixels, positive is up)
    pub look_up: f32,
    /// -1..1 yaw rate (positive turns right)
    pub turn_rate: f32,
    /// -1..1 pitch rate (positive looks up)
    pub look_up_rate: f32,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub sprint_pressed: bool,
    pub sprint_released: bool,
    pub pick_up_item: bool,
    pub show_wall: bool,
    pub show_floor: bool,
    pub show_stairs: bool,
    pub exit_build: bool,
}

/// Stick values below this are ignored
const STICK_DEADZONE: f32 = 0.15;

/// Registers input gathering. Added once at app setup.
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>();
        app.init_resource::<PlayerActions>();

        app.add_systems(Update, gather_player_actions.in_set(GatherActions));
        app.add_systems(Update, grab_cursor);
    }
}

/// Systems that read input must run after this set
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GatherActions;

/// Read the raw devices into `PlayerActions`
pub fn gather_player_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    mut mouse_motion: MessageReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    bindings: Res<InputBindings>,
    mut actions: ResMut<PlayerActions>,
) {
    let axis = |positive: KeyCode, negative: KeyCode| -> f32 {
        let mut value = 0.0;
        if keyboard.pressed(positive) {
            value += 1.0;
        }
        if keyboard.pressed(negative) {
            value -= 1.0;
        }
        value
    };

    let mut mouse_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        mouse_delta += motion.delta;
    }

    let stick = gamepads
        .iter()
        .map(|gamepad| gamepad.right_stick())
        .find(|stick| stick.length() > STICK_DEADZONE)
        .unwrap_or(Vec2::ZERO);

    *actions = PlayerActions {
        move_forward: axis(bindings.move_forward, bindings.move_backward),
        move_right: axis(bindings.move_right, bindings.move_left),
        turn: mouse_delta.x,
        // Screen Y grows downward
        look_up: -mouse_delta.y,
        turn_rate: (axis(bindings.turn_right, bindings.turn_left) + stick.x).clamp(-1.0, 1.0),
        look_up_rate: (axis(bindings.look_up, bindings.look_down) + stick.y).clamp(-1.0, 1.0),
        jump_pressed: keyboard.just_pressed(bindings.jump) || touches.any_just_pressed(),
        jump_released: keyboard.just_released(bindings.jump) || touches.any_just_released(),
        sprint_pressed: keyboard.just_pressed(bindings.sprint),
        sprint_released: keyboard.just_released(bindings.sprint),
        pick_up_item: keyboard.just_pressed(bindings.pick_up_item),
        show_wall: keyboard.just_pressed(bindings.show_wall),
        show_floor: keyboard.just_pressed(bindings.show_floor),
        show_stairs: keyboard.just_pressed(bindings.show_stairs),
        exit_build: keyboard.just_pressed(bindings.exit_build),
    };
}

/// Lock the cursor on click so mouse look works
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };
    let Ok(mut cursor) = cursor_opts.get_mut(window_entity) else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else if keyboard.just_pressed(KeyCode::Tab) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}
