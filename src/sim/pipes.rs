//! Pipe pool: placement, randomization and recycling
//!
//! Pipes are never allocated after a run starts. A pipe that scrolls off the
//! left edge is moved behind the rightmost one and given a fresh opening.

use rand::Rng;

use super::state::{GameState, Pipe};

impl GameState {
    /// Lay out a fresh pool: pipe `i` at `first_pipe_x + i * spacing`
    pub fn init_pipes(&mut self) {
        let count = self.tuning.pool_size();
        let size = self.pipe_size();
        self.pipes.clear();
        for i in 0..count {
            let x = self.tuning.first_pipe_x + i as f32 * self.tuning.pipe_spacing;
            self.pipes.push(Pipe::new(x, 0.0, self.tuning.pipe_gap, size));
            self.randomize_pipe(i);
        }
    }

    /// Valid range for a pipe's top y: the opening must clear the ceiling
    /// and ground by `pipe_margin`
    pub fn top_y_range(&self) -> (f32, f32) {
        let pipe_height = self.pipe_size().y;
        let min = self.tuning.ceiling + self.tuning.pipe_margin - pipe_height;
        let max = self.tuning.ground - self.tuning.pipe_margin - self.tuning.pipe_gap;
        (min, max.max(min))
    }

    /// Draw a new opening for pipe `i`, rebuild its hitboxes and mark it
    /// scoreable again
    pub fn randomize_pipe(&mut self, i: usize) {
        let (min, max) = self.top_y_range();
        let top_y = if max > min {
            self.rng.random_range(min..=max)
        } else {
            min
        };
        let size = self.pipe_size();
        let gap = self.tuning.pipe_gap;

        let pipe = &mut self.pipes[i];
        pipe.top_y = top_y;
        pipe.bottom_y = top_y + gap;
        pipe.rebuild_hitboxes(size);
        pipe.active = true;
    }

    /// Rightmost pipe x in the pool
    pub fn max_pipe_x(&self) -> f32 {
        self.pipes
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Shift every pipe left by `dx`
    pub fn scroll_pipes(&mut self, dx: f32) {
        for pipe in &mut self.pipes {
            let x = pipe.x - dx;
            pipe.set_x(x);
        }
    }

    /// Move every pipe that left the screen behind the current rightmost
    /// pipe. Returns how many were recycled.
    pub fn recycle_pipes(&mut self) -> usize {
        let mut recycled = 0;
        for i in 0..self.pipes.len() {
            if self.pipes[i].right() >= 0.0 {
                continue;
            }
            let new_x = self.max_pipe_x() + self.tuning.pipe_spacing;
            self.pipes[i].set_x(new_x);
            self.randomize_pipe(i);
            recycled += 1;
            log::debug!("Recycled pipe {} to x={:.1}", i, new_x);
        }
        recycled
    }
}
