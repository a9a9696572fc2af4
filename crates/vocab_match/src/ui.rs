use bevy::prelude::*;
use game_helpers::input::just_pressed_world_position;
use game_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::clipboards::DragState;
use crate::config::{END_SCENE_LAYER, GameConfig, TEXT_COLOR, UI_LAYER};
use crate::{GameEntity, GameFinished, GameState, Score};

const CONTINUE_BUTTON_SIZE: Vec2 = Vec2::new(180.0, 64.0);
const BACKDROP_COLOR: Color = Color::WHITE;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct EndScreenElement;

#[derive(Component)]
pub struct ContinueButton;

/// The continue button only reacts once the end screen finished fading
/// in, so the player cannot dismiss the summary before seeing it.
#[derive(Resource, Default)]
pub struct ContinueGate {
    interactable: bool,
}

#[derive(Resource)]
pub struct EndFade {
    timer: Timer,
}

pub fn spawn_score_ui(mut commands: Commands) {
    commands.spawn((
        Text2d::new("Score: 0"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(TEXT_COLOR),
        Transform::from_xyz(-WINDOW_WIDTH * 0.5 + 60.0, WINDOW_HEIGHT * 0.4, UI_LAYER),
        ScoreText,
        GameEntity,
    ));
}

pub fn update_score_text(score: Res<Score>, mut query: Query<&mut Text2d, With<ScoreText>>) {
    if score.is_changed() {
        for mut text in &mut query {
            text.0 = format!("Score: {}", score.0);
        }
    }
}

/// Builds the end-of-game summary when the terminal event arrives.
/// Everything spawns fully transparent; the fade system brings it in.
pub fn show_end_screen(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut finished: EventReader<GameFinished>,
) {
    for event in finished.read() {
        commands.spawn((
            Sprite::from_color(
                BACKDROP_COLOR.with_alpha(0.0),
                Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            ),
            Transform::from_xyz(0.0, 0.0, END_SCENE_LAYER),
            EndScreenElement,
            GameEntity,
        ));

        commands.spawn((
            Text2d::new("Game Over"),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(TEXT_COLOR.with_alpha(0.0)),
            TextLayout::new_with_justify(JustifyText::Center),
            Transform::from_xyz(0.0, WINDOW_HEIGHT * 0.1, END_SCENE_LAYER + 0.1),
            EndScreenElement,
            GameEntity,
        ));

        // Also tagged ScoreText: a tile finishing its travel on the very
        // frame the game ends may still bump the score afterwards.
        commands.spawn((
            Text2d::new(format!("Score: {}", event.score)),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(TEXT_COLOR.with_alpha(0.0)),
            TextLayout::new_with_justify(JustifyText::Center),
            Transform::from_xyz(0.0, -WINDOW_HEIGHT * 0.1, END_SCENE_LAYER + 0.1),
            ScoreText,
            EndScreenElement,
            GameEntity,
        ));

        commands
            .spawn((
                Sprite::from_color(TEXT_COLOR.with_alpha(0.0), CONTINUE_BUTTON_SIZE),
                Transform::from_xyz(0.0, -WINDOW_HEIGHT * 0.35, END_SCENE_LAYER + 0.1),
                ContinueButton,
                EndScreenElement,
                GameEntity,
            ))
            .with_child((
                Text2d::new("Continue"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE.with_alpha(0.0)),
                TextLayout::new_with_justify(JustifyText::Center),
                Transform::from_xyz(0.0, 0.0, 0.1),
                EndScreenElement,
            ));

        commands.insert_resource(EndFade {
            timer: Timer::new(config.end_fade_duration, TimerMode::Once),
        });
        commands.insert_resource(ContinueGate::default());
    }
}

pub fn fade_in_end_screen(
    time: Res<Time>,
    fade: Option<ResMut<EndFade>>,
    mut gate: ResMut<ContinueGate>,
    mut sprites: Query<&mut Sprite, With<EndScreenElement>>,
    mut texts: Query<&mut TextColor, With<EndScreenElement>>,
) {
    let Some(mut fade) = fade else {
        return;
    };
    fade.timer.tick(time.delta());
    let alpha = fade.timer.fraction();
    for mut sprite in &mut sprites {
        sprite.color = sprite.color.with_alpha(alpha);
    }
    for mut text_color in &mut texts {
        text_color.0 = text_color.0.with_alpha(alpha);
    }
    if fade.timer.just_finished() {
        gate.interactable = true;
    }
}

pub fn handle_continue(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    gate: Res<ContinueGate>,
    buttons: Query<(&Sprite, &GlobalTransform), With<ContinueButton>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !gate.interactable {
        return;
    }
    let Some(position) =
        just_pressed_world_position(&mouse_input, &touch_input, &windows, &camera)
    else {
        return;
    };
    for (sprite, transform) in &buttons {
        let size = sprite.custom_size.unwrap_or(CONTINUE_BUTTON_SIZE);
        let rect = Rect::from_center_size(transform.translation().truncate(), size);
        if rect.contains(position) {
            next_state.set(GameState::Welcome);
        }
    }
}

pub fn cleanup_game(mut commands: Commands, query: Query<Entity, With<GameEntity>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<EndFade>();
    // A tap on the continue button can double as a drag start on the
    // bottom clipboard; drop the stale handle with the entities.
    commands.insert_resource(DragState::default());
}
