//! Draw list construction
//!
//! Back to front: background, pipes, foreground, bird, then the phase
//! overlay. Nothing here mutates the game state.

use glam::Vec2;

use super::instance::{SpriteInstance, colors};
use crate::assets::ImageAsset;
use crate::sim::{GamePhase, GameState, Rect};

/// Build the sprite list for the current frame
pub fn build_frame(state: &GameState, show_hitboxes: bool) -> Vec<SpriteInstance> {
    let mut sprites = Vec::with_capacity(8 + state.pipes.len() * 2);

    push_layer(
        &mut sprites,
        state,
        ImageAsset::Background,
        state.scroll.background,
        0.0,
    );
    push_pipes(&mut sprites, state);
    push_layer(
        &mut sprites,
        state,
        ImageAsset::Foreground,
        state.scroll.foreground,
        state.tuning.ground,
    );
    sprites.push(bird_sprite(state));

    match state.phase {
        GamePhase::Title => push_centered(&mut sprites, state, ImageAsset::Title, 0.25),
        GamePhase::GameOver => {
            push_centered(&mut sprites, state, ImageAsset::GameOver, 0.25);
            push_centered(&mut sprites, state, ImageAsset::Scoreboard, 0.45);
        }
        GamePhase::Running => {}
    }

    if show_hitboxes {
        push_hitboxes(&mut sprites, state);
    }

    sprites
}

/// A looping layer is drawn twice, the second copy two texture widths on
fn push_layer(
    sprites: &mut Vec<SpriteInstance>,
    state: &GameState,
    image: ImageAsset,
    offset: f32,
    y: f32,
) {
    let size = state.metrics.size_of(image);
    let scaled = size * state.tuning.texture_scale;
    for x in [offset, offset + size.x * 2.0] {
        sprites.push(SpriteInstance::image(
            image,
            size,
            Rect::new(x, y, scaled.x, scaled.y),
        ));
    }
}

fn push_pipes(sprites: &mut Vec<SpriteInstance>, state: &GameState) {
    let size = state.metrics.pipe;
    for pipe in &state.pipes {
        if pipe.right() < 0.0 || pipe.x > state.tuning.screen_width {
            continue;
        }
        // Upper obstacle hangs from the top, so its texture is flipped
        sprites.push(SpriteInstance::image(ImageAsset::Pipe, size, pipe.top_rect).flipped_y());
        sprites.push(SpriteInstance::image(ImageAsset::Pipe, size, pipe.bottom_rect));
    }
}

fn bird_sprite(state: &GameState) -> SpriteInstance {
    let bird = &state.bird;
    let src = Rect::new(
        bird.current_frame as f32 * bird.frame_width,
        0.0,
        bird.frame_width,
        state.metrics.bird.y,
    );
    SpriteInstance::frame(ImageAsset::Bird, src, bird.sprite_rect(&state.metrics))
        .rotated(bird.rotation)
}

/// Horizontally centred overlay with its top at `height_frac` of the screen
fn push_centered(
    sprites: &mut Vec<SpriteInstance>,
    state: &GameState,
    image: ImageAsset,
    height_frac: f32,
) {
    let size = state.metrics.size_of(image);
    let scaled = size * state.tuning.texture_scale;
    let pos = Vec2::new(
        (state.tuning.screen_width - scaled.x) * 0.5,
        state.tuning.screen_height * height_frac,
    );
    sprites.push(SpriteInstance::image(
        image,
        size,
        Rect::new(pos.x, pos.y, scaled.x, scaled.y),
    ));
}

fn push_hitboxes(sprites: &mut Vec<SpriteInstance>, state: &GameState) {
    for pipe in &state.pipes {
        let tint = if pipe.active {
            colors::PIPE_HITBOX
        } else {
            colors::SCORED_PIPE
        };
        sprites.push(SpriteInstance::solid(pipe.top_rect, tint));
        sprites.push(SpriteInstance::solid(pipe.bottom_rect, tint));
    }
    sprites.push(SpriteInstance::solid(state.bird_hitbox(), colors::BIRD_HITBOX));
}
