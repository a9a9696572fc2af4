use bevy::color::palettes::css::GREEN;
use bevy::prelude::*;
use game_helpers::WINDOW_WIDTH;
use game_helpers::floating_score::spawn_floating_score;

use crate::board::{LaneBoard, Lanes};
use crate::config::{GameConfig, TILE_LAYER, TileKind};
use crate::generator::TileGenerator;
use crate::scheduler::{RoundScheduler, SchedulerEvent};
use crate::{GameEntity, GameFinished, GameState, Score};

const TILE_SIZE: f32 = 0.14 * WINDOW_WIDTH;
const TILE_SPAWN_X: f32 = -0.5 * WINDOW_WIDTH;
const TILE_ARRIVAL_X: f32 = (0.7 - 0.5) * WINDOW_WIDTH;

/// A tile sliding toward the clipboards on its lane. Despawned right
/// after the arrival check, match or not.
#[derive(Component)]
pub struct Tile {
    kind: TileKind,
    lane: usize,
    travel: Timer,
}

/// Ticks the round cadence and acts on whatever became due: tile spawns
/// while the game runs, the terminal event when the last round is over.
pub fn run_rounds(
    mut commands: Commands,
    time: Res<Time>,
    scheduler: Option<ResMut<RoundScheduler>>,
    generator: Option<ResMut<TileGenerator>>,
    config: Res<GameConfig>,
    lanes: Res<Lanes>,
    score: Res<Score>,
    mut finished: EventWriter<GameFinished>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let (Some(mut scheduler), Some(mut generator)) = (scheduler, generator) else {
        return;
    };
    for event in scheduler.tick(time.delta()) {
        match event {
            SchedulerEvent::SpawnTile => {
                spawn_tile(&mut commands, &mut generator, &config, &lanes);
            }
            SchedulerEvent::GameOver => {
                finished.send(GameFinished { score: score.0 });
                next_state.set(GameState::GameOver);
            }
        }
    }
}

fn spawn_tile(
    commands: &mut Commands,
    generator: &mut TileGenerator,
    config: &GameConfig,
    lanes: &Lanes,
) {
    let (kind, lane) = generator.next_tile();
    let Some(lane_y) = lanes.y(lane) else {
        error!("generator produced lane {lane} outside the layout");
        return;
    };

    commands
        .spawn((
            Sprite::from_color(kind.color(), Vec2::splat(TILE_SIZE)),
            Transform::from_xyz(TILE_SPAWN_X, lane_y, TILE_LAYER),
            Tile {
                kind,
                lane,
                travel: Timer::new(config.travel_time, TimerMode::Once),
            },
            GameEntity,
        ))
        .with_child((
            Text2d::new(kind.to_string()),
            TextFont {
                font_size: 11.0,
                ..default()
            },
            TextColor(Color::BLACK),
            TextLayout::new_with_justify(JustifyText::Center),
            Transform::from_xyz(0.0, 0.0, 0.1),
        ));
}

/// Moves every tile along its lane and evaluates the match the moment it
/// arrives. The clipboard is looked up in the lane board *now*, not at
/// spawn time: swapping clipboards under a tile in flight is the game.
pub fn move_tiles(
    mut commands: Commands,
    time: Res<Time>,
    board: Option<Res<LaneBoard>>,
    mut score: ResMut<Score>,
    mut tiles: Query<(Entity, &mut Tile, &mut Transform)>,
) {
    let Some(board) = board else {
        return;
    };
    for (entity, mut tile, mut transform) in &mut tiles {
        tile.travel.tick(time.delta());
        transform.translation.x =
            (TILE_ARRIVAL_X - TILE_SPAWN_X).mul_add(tile.travel.fraction(), TILE_SPAWN_X);

        if tile.travel.just_finished() {
            if board.kind_at(tile.lane) == Some(tile.kind) {
                score.0 += 1;
                spawn_floating_score(
                    &mut commands,
                    transform.translation.truncate(),
                    "+1",
                    GREEN,
                );
            }
            commands.entity(entity).despawn_recursive();
        }
    }
}
