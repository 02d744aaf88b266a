// Bookkeeping for the animation loop. The host asks this before requesting
// every frame, so a stopped or superseded loop stops rescheduling itself.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoopToken {
    id: u32,
}

#[wasm_bindgen]
impl LoopToken {
    pub fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running(LoopToken),
    // Page hidden while running; resumes with the same token
    Suspended(LoopToken),
}

#[derive(Debug)]
pub struct FrameScheduler {
    state: LoopState,
    generation: u32,
}

impl FrameScheduler {
    pub fn new() -> FrameScheduler {
        FrameScheduler {
            state: LoopState::Stopped,
            generation: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    // Starts a new loop. Any previous token stops being valid.
    pub fn start(&mut self) -> LoopToken {
        self.generation = self.generation.wrapping_add(1);
        let token = LoopToken {
            id: self.generation,
        };
        self.state = match self.state {
            LoopState::Suspended(_) => LoopState::Suspended(token),
            _ => LoopState::Running(token),
        };
        token
    }

    // Returns false when the token does not belong to the live loop.
    pub fn stop(&mut self, token: LoopToken) -> bool {
        match self.state {
            LoopState::Running(t) | LoopState::Suspended(t) if t == token => {
                self.state = LoopState::Stopped;
                true
            }
            _ => false,
        }
    }

    pub fn suspend(&mut self) {
        if let LoopState::Running(t) = self.state {
            self.state = LoopState::Suspended(t);
        }
    }

    // Returns the token whose loop has to be kicked off again, if any.
    pub fn resume(&mut self) -> Option<LoopToken> {
        match self.state {
            LoopState::Suspended(t) => {
                self.state = LoopState::Running(t);
                Some(t)
            }
            _ => None,
        }
    }

    pub fn should_run(&self, token: LoopToken) -> bool {
        self.state == LoopState::Running(token)
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        FrameScheduler::new()
    }
}
