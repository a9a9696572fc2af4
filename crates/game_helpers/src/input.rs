use bevy::input::touch::Touch;
use bevy::prelude::*;

/// Which edge of the pointer gesture to sample.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PointerPhase {
    JustPressed,
    Held,
    JustReleased,
}

fn screen_position(
    phase: PointerPhase,
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    let mouse_active = match phase {
        PointerPhase::JustPressed => button_input.just_pressed(MouseButton::Left),
        PointerPhase::Held => button_input.pressed(MouseButton::Left),
        PointerPhase::JustReleased => button_input.just_released(MouseButton::Left),
    };
    if mouse_active {
        return windows.get_single().ok()?.cursor_position();
    }

    // Only the first touch is effective.
    match phase {
        PointerPhase::JustPressed => touch_input.iter_just_pressed().next().map(Touch::position),
        PointerPhase::Held => touch_input.iter().next().map(Touch::position),
        PointerPhase::JustReleased => touch_input.iter_just_released().next().map(Touch::position),
    }
}

fn world_position(
    phase: PointerPhase,
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = screen_position(phase, button_input, touch_input, windows)?;

    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    world_position(
        PointerPhase::JustPressed,
        button_input,
        touch_input,
        windows,
        camera,
    )
}

pub fn pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    world_position(
        PointerPhase::Held,
        button_input,
        touch_input,
        windows,
        camera,
    )
}

pub fn just_released_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    world_position(
        PointerPhase::JustReleased,
        button_input,
        touch_input,
        windows,
        camera,
    )
}
