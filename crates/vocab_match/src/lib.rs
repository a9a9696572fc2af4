use bevy::prelude::*;
use game_helpers::WINDOW_HEIGHT;
use game_helpers::floating_score::animate_floating_scores;
use game_helpers::welcome_screen::{despawn_welcome_screen, spawn_welcome_screen};

use crate::board::{LaneBoard, Lanes};
use crate::clipboards::{
    DragState, PendingSwap, begin_drag, end_drag, snap_motion, spawn_clipboards, update_drag,
};
use crate::config::{GameConfig, LANE_FRACTIONS};
use crate::generator::TileGenerator;
use crate::lock::SwapLock;
use crate::scheduler::RoundScheduler;
use crate::tiles::{move_tiles, run_rounds};
use crate::ui::{
    ContinueGate, cleanup_game, fade_in_end_screen, handle_continue, show_end_screen,
    spawn_score_ui, update_score_text,
};

mod board;
mod clipboards;
mod config;
mod generator;
mod lock;
mod scheduler;
mod tiles;
mod ui;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
enum GameState {
    #[default]
    Welcome,
    Playing,
    GameOver,
}

/// Total matches so far. Only ever grows, by one per matching arrival.
#[derive(Resource, Default)]
struct Score(u32);

/// Terminal event carrying the final score.
#[derive(Event)]
struct GameFinished {
    score: u32,
}

/// Everything spawned for one playthrough; swept when the end screen is
/// dismissed.
#[derive(Component, Default)]
struct GameEntity;

pub fn run() {
    game_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .init_state::<GameState>()
        .insert_resource(GameConfig::default())
        .insert_resource(Lanes::from_fractions(&LANE_FRACTIONS, WINDOW_HEIGHT))
        .init_resource::<Score>()
        .init_resource::<DragState>()
        .init_resource::<SwapLock>()
        .init_resource::<PendingSwap>()
        .init_resource::<ContinueGate>()
        .add_event::<GameFinished>()
        .add_systems(Startup, setup)
        .add_systems(OnEnter(GameState::Welcome), spawn_welcome)
        .add_systems(OnExit(GameState::Welcome), despawn_welcome_screen)
        .add_systems(
            OnEnter(GameState::Playing),
            (enter_game, spawn_clipboards, spawn_score_ui).chain(),
        )
        .add_systems(OnExit(GameState::GameOver), cleanup_game)
        .add_systems(
            Update,
            handle_welcome_input.run_if(in_state(GameState::Welcome)),
        )
        .add_systems(Update, run_rounds.run_if(in_state(GameState::Playing)))
        .add_systems(
            Update,
            (
                move_tiles,
                begin_drag,
                update_drag,
                end_drag,
                snap_motion,
                update_score_text,
                show_end_screen,
                animate_floating_scores,
            ),
        )
        .add_systems(
            Update,
            (fade_in_end_screen, handle_continue).run_if(in_state(GameState::GameOver)),
        )
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_welcome(mut commands: Commands) {
    spawn_welcome_screen(
        &mut commands,
        "Vocab Match",
        "Drag the clipboards between lanes\nso every tile reaches its word",
    );
}

fn handle_welcome_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if mouse_input.just_pressed(MouseButton::Left) || touch_input.any_just_pressed() {
        next_state.set(GameState::Playing);
    }
}

/// Builds the round machinery for a fresh playthrough. Both constructors
/// validate the configuration, so a bad config is rejected here instead
/// of misbehaving mid-game.
fn enter_game(mut commands: Commands, config: Res<GameConfig>, lanes: Res<Lanes>) {
    let scheduler = match RoundScheduler::new(&config) {
        Ok(scheduler) => scheduler,
        Err(err) => {
            error!("refusing to start: {err}");
            return;
        }
    };
    let generator = match TileGenerator::new(lanes.len()) {
        Ok(generator) => generator,
        Err(err) => {
            error!("refusing to start: {err}");
            return;
        }
    };

    commands.insert_resource(scheduler);
    commands.insert_resource(generator);
    commands.insert_resource(LaneBoard::new(lanes.len()));
    commands.insert_resource(Score::default());
    commands.insert_resource(DragState::default());
    commands.insert_resource(SwapLock::default());
    commands.insert_resource(PendingSwap::default());
    commands.insert_resource(ContinueGate::default());
}
