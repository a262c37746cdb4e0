//! Rendering
//!
//! The simulation hands a read-only [`FrameSnapshot`] to a [`RenderAdapter`]
//! once per frame. The WebGPU implementation draws coloured quads; text
//! (score, countdown, game over) lives in the DOM HUD on the web.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;

use crate::sim::{Avatar, GamePhase, Obstacle, Playfield};

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub avatar: &'a Avatar,
    pub gates: &'a [Obstacle],
    pub score: u32,
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub ground_top: f32,
}

/// Consumer of simulation state, called once per frame after the update
pub trait RenderAdapter {
    fn render_frame(&mut self, frame: &FrameSnapshot<'_>);
}

/// Renderer that is not there yet (e.g. GPU still initializing)
impl<R: RenderAdapter> RenderAdapter for Option<R> {
    fn render_frame(&mut self, frame: &FrameSnapshot<'_>) {
        if let Some(renderer) = self {
            renderer.render_frame(frame);
        }
    }
}

/// Builds scene geometry without a GPU; used by the native demo and tests
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_vertex_count: usize,
    pub last_score: u32,
    pub last_phase: Option<GamePhase>,
}

impl RenderAdapter for HeadlessRenderer {
    fn render_frame(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        self.last_vertex_count = shapes::scene(frame).len();
        self.last_score = frame.score;
        if self.last_phase != Some(frame.phase) {
            log::debug!("Frame {}: phase {:?}", self.frames, frame.phase);
        }
        self.last_phase = Some(frame.phase);
    }
}
