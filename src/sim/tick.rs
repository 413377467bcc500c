//! Per-frame simulation tick
//!
//! Core game loop that advances the state by one rendered frame. Bird
//! physics scale with `dt`; world scrolling moves a fixed amount per frame.

use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (edge-triggered)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key went down this frame
    pub jump: bool,
    /// Restart key went down this frame
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let mut jump = input.jump;

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
        // The restart press doubles as the first flap of the new run
        jump = true;
    }

    state.time_ticks += 1;

    if state.phase == GamePhase::Title {
        if jump {
            log::info!("Run started");
            state.phase = GamePhase::Running;
        } else {
            // Idle: flap in place while the world drifts by
            state.bird.animate(state.tuning.animation_period());
            state
                .scroll
                .advance(state.tuning.background_scroll, state.speed, &state.metrics);
            return;
        }
    }

    match state.phase {
        GamePhase::Running => run_frame(state, jump, dt),
        GamePhase::GameOver => {
            state.bird.animate(state.tuning.animation_period());
            settle_bird(state, dt);
        }
        GamePhase::Title => {}
    }
}

fn run_frame(state: &mut GameState, jump: bool, dt: f32) {
    if jump {
        state.emit(GameEvent::Jumped);
    }
    state.bird.step(jump, &state.tuning, dt);
    state.bird.animate(state.tuning.animation_period());

    state
        .scroll
        .advance(state.tuning.background_scroll, state.speed, &state.metrics);
    state.scroll_pipes(state.speed);

    award_passed_pipes(state);
    state.recycle_pipes();

    if let Some(cause) = state.check_collision() {
        log::info!(
            "Crashed into {:?} with score {} (best {})",
            cause,
            state.score,
            state.high_score
        );
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::Crashed { cause });
    }
}

/// Score every active pipe whose right edge is behind the bird.
///
/// Each pipe scores once: it is deactivated on the transition and only a
/// recycle makes it active again. Returns the number of points awarded.
pub fn award_passed_pipes(state: &mut GameState) -> u32 {
    let bird_x = state.bird.pos.x;
    let mut awarded = 0;

    for i in 0..state.pipes.len() {
        let pipe = &mut state.pipes[i];
        if !pipe.active || pipe.right() >= bird_x {
            continue;
        }
        pipe.active = false;
        state.score += 1;
        awarded += 1;
        state.emit(GameEvent::Scored { score: state.score });

        let every = state.tuning.speed_up_every;
        if every > 0 && state.score % every == 0 {
            state.speed += state.tuning.speed_increment;
            log::debug!("Speed up to {:.2}", state.speed);
            state.emit(GameEvent::SpeedUp { speed: state.speed });
        }

        if state.score > state.high_score {
            state.high_score = state.score;
            state.emit(GameEvent::NewHighScore { score: state.score });
        }
    }

    awarded
}

/// After a crash the world freezes and the bird drops onto the ground line
fn settle_bird(state: &mut GameState, dt: f32) {
    if !state.bird.airborne {
        return;
    }
    state.bird.fall(&state.tuning, dt);
    state.bird.integrate(&state.tuning, dt);

    let rest_y = state.tuning.ground - state.metrics.bird.y;
    if state.bird.pos.y >= rest_y {
        state.bird.pos.y = rest_y;
        state.bird.velocity = 0.0;
        state.bird.acceleration = 0.0;
        state.bird.airborne = false;
    }
}

/// Demo driver: start runs, restart after crashes, and flap whenever the
/// bird drops below the centre of the next opening
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Title => input.jump = true,
        GamePhase::GameOver => input.restart = true,
        GamePhase::Running => {
            let hitbox = state.bird_hitbox();
            let target = state
                .pipes
                .iter()
                .filter(|p| p.right() >= hitbox.left())
                .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
                .map(|p| p.gap_center())
                .unwrap_or((state.tuning.ceiling + state.tuning.ground) * 0.5);

            input.jump = state.bird.velocity >= 0.0 && hitbox.center().y > target + 10.0;
        }
    }
}
