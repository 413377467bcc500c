//! Collision detection between the bird and the world
//!
//! Everything is an axis-aligned rectangle. The bird's hitbox is inset from
//! its sprite so grazing a pipe corner does not end the run.

use super::rect::Rect;
use super::state::{CrashCause, GameState, Pipe};

/// First obstacle the hitbox overlaps, checked ceiling, ground, then pipes
/// in slot order. Inactive (already scored) pipes are skipped.
pub fn find_collision(
    hitbox: &Rect,
    ceiling: &Rect,
    ground: &Rect,
    pipes: &[Pipe],
) -> Option<CrashCause> {
    if hitbox.overlaps(ceiling) {
        return Some(CrashCause::Ceiling);
    }
    if hitbox.overlaps(ground) {
        return Some(CrashCause::Ground);
    }
    pipes
        .iter()
        .position(|pipe| pipe.active && pipe_hit(hitbox, pipe))
        .map(CrashCause::Pipe)
}

/// Hitbox overlaps either half of the pipe
#[inline]
pub fn pipe_hit(hitbox: &Rect, pipe: &Pipe) -> bool {
    hitbox.overlaps(&pipe.top_rect) || hitbox.overlaps(&pipe.bottom_rect)
}

impl GameState {
    /// Test the bird against the world as it stands right now
    pub fn check_collision(&self) -> Option<CrashCause> {
        find_collision(
            &self.bird_hitbox(),
            &self.ceiling_rect(),
            &self.ground_rect(),
            &self.pipes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const PIPE_SIZE: Vec2 = Vec2::new(65.0, 400.0);

    fn world() -> (Rect, Rect) {
        (
            Rect::new(0.0, 0.0, 490.0, 28.0),
            Rect::new(0.0, 625.0, 490.0, 110.0),
        )
    }

    #[test]
    fn test_clear_flight() {
        let (ceiling, ground) = world();
        let bird = Rect::new(230.0, 300.0, 25.0, 38.0);
        let pipes = [Pipe::new(400.0, -200.0, 550.0, PIPE_SIZE)];
        assert_eq!(find_collision(&bird, &ceiling, &ground, &pipes), None);
    }

    #[test]
    fn test_ceiling_and_ground() {
        let (ceiling, ground) = world();
        let high = Rect::new(230.0, 20.0, 25.0, 38.0);
        let low = Rect::new(230.0, 600.0, 25.0, 38.0);
        assert_eq!(
            find_collision(&high, &ceiling, &ground, &[]),
            Some(CrashCause::Ceiling)
        );
        assert_eq!(
            find_collision(&low, &ceiling, &ground, &[]),
            Some(CrashCause::Ground)
        );
    }

    #[test]
    fn test_pipe_top_and_bottom() {
        let (ceiling, ground) = world();
        let pipes = [
            Pipe::new(600.0, -200.0, 550.0, PIPE_SIZE),
            Pipe::new(220.0, -200.0, 550.0, PIPE_SIZE),
        ];
        // Inside the upper obstacle (y -200..200)
        let in_top = Rect::new(230.0, 100.0, 25.0, 38.0);
        // Inside the lower obstacle (y 350..750)
        let in_bottom = Rect::new(230.0, 400.0, 25.0, 38.0);
        // In the opening (y 200..350)
        let in_gap = Rect::new(230.0, 250.0, 25.0, 38.0);

        assert_eq!(
            find_collision(&in_top, &ceiling, &ground, &pipes),
            Some(CrashCause::Pipe(1))
        );
        assert_eq!(
            find_collision(&in_bottom, &ceiling, &ground, &pipes),
            Some(CrashCause::Pipe(1))
        );
        assert_eq!(find_collision(&in_gap, &ceiling, &ground, &pipes), None);
    }

    #[test]
    fn test_scored_pipe_is_ignored() {
        let (ceiling, ground) = world();
        let mut pipe = Pipe::new(220.0, -200.0, 550.0, PIPE_SIZE);
        pipe.active = false;
        let in_top = Rect::new(230.0, 100.0, 25.0, 38.0);
        assert_eq!(find_collision(&in_top, &ceiling, &ground, &[pipe]), None);
    }

    #[test]
    fn test_inset_forgives_sprite_overlap() {
        let (ceiling, ground) = world();
        // Sprite would clip the pipe's left edge by 5; the inset hitbox doesn't
        let pipe = Pipe::new(265.0, -200.0, 550.0, PIPE_SIZE);
        let sprite = Rect::new(220.0, 100.0, 50.0, 48.0);
        let hitbox = sprite.inset(10.0, 5.0, 15.0, 5.0);
        assert!(sprite.overlaps(&pipe.top_rect));
        assert_eq!(find_collision(&hitbox, &ceiling, &ground, &[pipe]), None);
    }
}
