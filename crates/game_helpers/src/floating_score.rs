use core::time::Duration;

use bevy::prelude::*;

#[derive(Component)]
pub struct FloatingScore {
    timer: Timer,
    start: Vec2,
}

pub fn spawn_floating_score(commands: &mut Commands, position: Vec2, text: &str, color: Srgba) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::Srgba(color)),
        Transform::from_xyz(position.x, position.y, 10.0),
        FloatingScore {
            timer: Timer::new(Duration::from_secs(1), TimerMode::Once),
            start: position,
        },
    ));
}

pub fn animate_floating_scores(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut TextColor, &mut FloatingScore)>,
) {
    for (entity, mut transform, mut text_color, mut floating_score) in &mut query {
        floating_score.timer.tick(time.delta());
        let progress = floating_score.timer.fraction();

        // Drift upwards and fade out
        transform.translation.y = 40.0f32.mul_add(progress, floating_score.start.y);
        text_color.0 = text_color.0.with_alpha(1.0 - progress);

        if floating_score.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
