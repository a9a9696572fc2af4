use bevy::prelude::*;
use game_helpers::input::{
    just_pressed_world_position, just_released_world_position, pressed_world_position,
};
use game_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};
use strum::IntoEnumIterator;

use crate::board::{LaneBoard, Lanes};
use crate::config::{
    CLIPBOARD_DRAG_LAYER, CLIPBOARD_LAYER, GameConfig, TEXT_COLOR, TileKind,
};
use crate::lock::SwapLock;
use crate::GameEntity;

const CLIPBOARD_X: f32 = (0.855 - 0.5) * WINDOW_WIDTH;
const CLIPBOARD_SIZE: Vec2 = Vec2::new(0.24 * WINDOW_WIDTH, 0.29 * WINDOW_HEIGHT);
const CLIPBOARD_COLOR: Color = Color::srgb(0.94, 0.92, 0.85);

// Labels at least this long get the smaller font.
const LONG_LABEL_LEN: usize = 12;

/// A draggable clipboard. `index` is its identity in the lane board;
/// `kind` never changes after creation.
#[derive(Component)]
pub struct Clipboard {
    pub index: usize,
    pub kind: TileKind,
}

/// The clipboard currently following the pointer, if any.
#[derive(Resource, Default)]
pub struct DragState {
    dragged: Option<Entity>,
}

/// Lane pair to commit when the running snap animation completes. Stays
/// `None` for a snap-back, which reassigns nothing.
#[derive(Resource, Default)]
pub struct PendingSwap(Option<(usize, usize)>);

/// Short lerp from `from` to `to`; the lane board is only touched once
/// every motion of the gesture has finished.
#[derive(Component)]
pub struct SnapMotion {
    from: Vec2,
    to: Vec2,
    timer: Timer,
}

pub fn spawn_clipboards(mut commands: Commands, lanes: Res<Lanes>) {
    for (index, kind) in TileKind::iter().take(lanes.len()).enumerate() {
        let Some(lane_y) = lanes.y(index) else {
            continue;
        };
        let label = kind.to_string();
        let font_size = if label.len() >= LONG_LABEL_LEN {
            10.0
        } else {
            14.0
        };
        commands
            .spawn((
                Sprite::from_color(CLIPBOARD_COLOR, CLIPBOARD_SIZE),
                Transform::from_xyz(CLIPBOARD_X, lane_y, CLIPBOARD_LAYER),
                Clipboard { index, kind },
                GameEntity,
            ))
            .with_child((
                Text2d::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_xyz(0.0, -CLIPBOARD_SIZE.y * 0.2, 0.1),
            ))
            .with_child((
                Sprite::from_color(kind.color(), Vec2::splat(24.0)),
                Transform::from_xyz(0.0, CLIPBOARD_SIZE.y * 0.2, 0.1),
            ));
    }
}

pub fn begin_drag(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    lock: Res<SwapLock>,
    mut drag: ResMut<DragState>,
    mut clipboards: Query<(Entity, &Sprite, &mut Transform), With<Clipboard>>,
) {
    // New gestures are ignored outright while a swap animation runs.
    if lock.is_held() {
        return;
    }
    let Some(position) =
        just_pressed_world_position(&mouse_input, &touch_input, &windows, &camera)
    else {
        return;
    };
    for (entity, sprite, mut transform) in &mut clipboards {
        let size = sprite.custom_size.unwrap_or(CLIPBOARD_SIZE);
        let rect = Rect::from_center_size(transform.translation.truncate(), size);
        if rect.contains(position) {
            // Bring the dragged clipboard in front of its neighbors.
            transform.translation.z = CLIPBOARD_DRAG_LAYER;
            drag.dragged = Some(entity);
            break;
        }
    }
}

pub fn update_drag(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    lock: Res<SwapLock>,
    drag: Res<DragState>,
    mut clipboards: Query<&mut Transform, With<Clipboard>>,
) {
    if lock.is_held() {
        return;
    }
    let Some(entity) = drag.dragged else {
        return;
    };
    let Some(position) = pressed_world_position(&mouse_input, &touch_input, &windows, &camera)
    else {
        return;
    };
    let Ok(mut transform) = clipboards.get_mut(entity) else {
        return;
    };
    // The clipboard stays pinned to its column; only the height follows
    // the pointer.
    transform.translation.x = CLIPBOARD_X;
    transform.translation.y = position.y;
}

pub fn end_drag(
    mut commands: Commands,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut lock: ResMut<SwapLock>,
    mut drag: ResMut<DragState>,
    mut pending: ResMut<PendingSwap>,
    config: Res<GameConfig>,
    lanes: Res<Lanes>,
    board: Option<Res<LaneBoard>>,
    clipboards: Query<(Entity, &Clipboard, &Transform)>,
) {
    if lock.is_held() {
        return;
    }
    if !mouse_input.just_released(MouseButton::Left) && !touch_input.any_just_released() {
        return;
    }
    let Some(dragged) = drag.dragged.take() else {
        return;
    };
    let Some(board) = board else {
        return;
    };
    let Ok((_, clipboard, transform)) = clipboards.get(dragged) else {
        error!("dragged clipboard vanished mid-gesture");
        return;
    };
    let Some(origin_lane) = board.lane_of(clipboard.index) else {
        error!(
            "clipboard {} ({}) is not on the board",
            clipboard.index, clipboard.kind
        );
        return;
    };

    // A release outside the window reports no position; the clipboard's
    // own height is the drop point then.
    let drop_y = just_released_world_position(&mouse_input, &touch_input, &windows, &camera)
        .map_or(transform.translation.y, |position| position.y);
    let target_lane = lanes.closest(drop_y);
    let (Some(origin_y), Some(target_y)) = (lanes.y(origin_lane), lanes.y(target_lane)) else {
        error!("lane layout lost lanes {origin_lane}/{target_lane}");
        return;
    };

    let dropped_at = transform.translation.truncate();

    if target_lane == origin_lane {
        // Not dragged far enough to reach another lane: glide back, no
        // reassignment.
        if !lock.try_acquire() {
            return;
        }
        pending.0 = None;
        commands.entity(dragged).insert(SnapMotion {
            from: dropped_at,
            to: Vec2::new(CLIPBOARD_X, origin_y),
            timer: Timer::new(config.swap_duration, TimerMode::Once),
        });
        return;
    }

    // Find the clipboard being displaced before committing to the swap.
    let Some(occupant_index) = board.clipboard_at(target_lane) else {
        error!("lane {target_lane} has no occupant");
        return;
    };
    let Some((occupant, _, occupant_transform)) = clipboards
        .iter()
        .find(|(_, other, _)| other.index == occupant_index)
    else {
        error!("clipboard {occupant_index} has no entity");
        return;
    };

    if !lock.try_acquire() {
        return;
    }
    pending.0 = Some((origin_lane, target_lane));
    commands.entity(dragged).insert(SnapMotion {
        from: dropped_at,
        to: Vec2::new(CLIPBOARD_X, target_y),
        timer: Timer::new(config.swap_duration, TimerMode::Once),
    });
    commands.entity(occupant).insert(SnapMotion {
        from: occupant_transform.translation.truncate(),
        to: Vec2::new(CLIPBOARD_X, origin_y),
        timer: Timer::new(config.swap_duration, TimerMode::Once),
    });
}

/// Advances snap animations and, once the last one finishes, commits the
/// gesture in one step: swap the lane assignments (if any), drop every
/// clipboard back to the normal layer, release the lock.
pub fn snap_motion(
    mut commands: Commands,
    time: Res<Time>,
    mut lock: ResMut<SwapLock>,
    mut pending: ResMut<PendingSwap>,
    mut board: Option<ResMut<LaneBoard>>,
    mut motions: Query<(Entity, &mut SnapMotion, &mut Transform)>,
) {
    if motions.is_empty() {
        return;
    }
    let mut still_running = false;
    for (entity, mut motion, mut transform) in &mut motions {
        motion.timer.tick(time.delta());
        let position = motion.from.lerp(motion.to, motion.timer.fraction());
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        if motion.timer.finished() {
            transform.translation = motion.to.extend(CLIPBOARD_LAYER);
            commands.entity(entity).remove::<SnapMotion>();
        } else {
            still_running = true;
        }
    }
    if still_running {
        return;
    }

    if let Some((lane_a, lane_b)) = pending.0.take() {
        if let Some(board) = board.as_mut() {
            board.swap(lane_a, lane_b);
        }
    }
    lock.release();
}
