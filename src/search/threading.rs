//! Off-thread move selection.
//!
//! A search runs on its own named thread over a snapshot of the game and
//! reports through a channel. At most one search is outstanding at a time.
//! The shared `thinking` flag is only written from the owning side, so it
//! stays set until the result has been collected or the search abandoned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;

pub const SEARCH_THREAD_NAME: &str = "ai-search";

struct PendingSearch {
    generation: u64,
    receiver: Receiver<EngineOutput>,
}

#[derive(Default)]
pub struct BackgroundSearch {
    thinking: Arc<AtomicBool>,
    generation: u64,
    pending: Option<PendingSearch>,
}

impl BackgroundSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle for observers on other threads.
    pub fn thinking_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.thinking)
    }

    #[inline]
    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::Acquire)
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Spawns a search over `game_state`, returning its generation number.
    pub fn start<E>(
        &mut self,
        mut engine: E,
        game_state: GameState,
        params: SearchParams,
    ) -> ChessResult<u64>
    where
        E: Engine + 'static,
    {
        if self.pending.is_some() {
            return Err(ChessError::SearchInProgress);
        }

        self.generation += 1;
        let generation = self.generation;
        let (sender, receiver) = mpsc::channel();

        self.thinking.store(true, Ordering::Release);
        let spawned = thread::Builder::new()
            .name(SEARCH_THREAD_NAME.to_owned())
            .spawn(move || {
                let output = engine.choose_move(&game_state, &params);
                // The receiver is gone when the search was abandoned.
                let _ = sender.send(output);
            });

        if let Err(err) = spawned {
            self.thinking.store(false, Ordering::Release);
            return Err(ChessError::SearchSpawn(err));
        }

        debug!(generation, "search started");
        self.pending = Some(PendingSearch {
            generation,
            receiver,
        });
        Ok(generation)
    }

    /// Collects the result if the search has finished.
    pub fn try_finish(&mut self) -> ChessResult<Option<EngineOutput>> {
        let Some(pending) = &self.pending else {
            return Ok(None);
        };
        match pending.receiver.try_recv() {
            Ok(output) => Ok(Some(self.complete(output))),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(self.lost()),
        }
    }

    /// Blocks until the outstanding search reports. `None` when idle.
    pub fn wait(&mut self) -> ChessResult<Option<EngineOutput>> {
        let Some(pending) = &self.pending else {
            return Ok(None);
        };
        match pending.receiver.recv() {
            Ok(output) => Ok(Some(self.complete(output))),
            Err(_) => Err(self.lost()),
        }
    }

    /// Forgets the outstanding search; whatever it reports later is dropped.
    pub fn abandon(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(generation = pending.generation, "search abandoned");
            self.generation += 1;
        }
        self.thinking.store(false, Ordering::Release);
    }

    fn complete(&mut self, output: EngineOutput) -> EngineOutput {
        if let Some(pending) = self.pending.take() {
            debug!(
                generation = pending.generation,
                nodes = output.nodes,
                "search finished"
            );
        }
        self.thinking.store(false, Ordering::Release);
        output
    }

    fn lost(&mut self) -> ChessError {
        self.pending = None;
        self.thinking.store(false, Ordering::Release);
        ChessError::SearchWorkerLost
    }
}
