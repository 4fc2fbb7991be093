//! Generic tick engine shared by every real-time game.
//!
//! A game plugs in through [`GameRules`]: how input steers the agent, how the
//! world advances, when it collides, what a committed move scores and what
//! gets spawned. The engine owns everything else: the run state machine, the
//! score/pace controller, input buffering and the scheduler.
//!
//! One tick is the pure function [`step`]: `(session, input) -> session'`.
//! [`Engine`] keeps the latest [`Session`] and is the only thing that
//! replaces it, so the host never sees a half-applied tick.

use super::error::ConfigError;
use super::events::GameEvent;
use super::pace::{Pace, PaceConfig, Progress};
use super::run_state::{EndReason, RunState, Transition};
use super::scheduler::Scheduler;
use crate::games::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// The per-game strategy: spatial model, movement, collision and spawning.
pub trait GameRules {
    type Config: Clone + fmt::Debug;
    type World: Clone + fmt::Debug;
    /// A steering command, buffered until the next tick.
    type Input: Copy + fmt::Debug;
    /// What [`GameRules::advance`] computed for the collision check and the commit.
    type Motion;

    /// Reported when [`GameRules::collides`] ends a run.
    const END_REASON: EndReason;

    fn validate(config: &Self::Config) -> Result<(), ConfigError>;

    /// Check a world built outside [`GameRules::new_world`] against `config`.
    fn validate_world(world: &Self::World, config: &Self::Config) -> Result<(), ConfigError>;

    fn pace_config(config: &Self::Config) -> &PaceConfig;

    /// Fresh world for a new run (agent placed, initial items spawned).
    fn new_world<R: Rng>(config: &Self::Config, rng: &mut R) -> Self::World;

    /// Movement controller, input half: apply one buffered command.
    fn steer(
        world: &mut Self::World,
        config: &Self::Config,
        input: Self::Input,
        events: &mut Vec<GameEvent>,
    );

    /// Movement controller, tick half: compute this tick's motion.
    fn advance(world: &mut Self::World, config: &Self::Config, pace: &Pace) -> Self::Motion;

    /// Collision detector, evaluated on the advanced world before the commit.
    fn collides(world: &Self::World, config: &Self::Config, motion: &Self::Motion) -> bool;

    /// Commit the motion. Returns the number of scoring events it produced.
    fn settle(
        world: &mut Self::World,
        config: &Self::Config,
        motion: Self::Motion,
        events: &mut Vec<GameEvent>,
    ) -> u32;

    /// Spawner.
    fn spawn<R: Rng>(
        world: &mut Self::World,
        config: &Self::Config,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    );
}

/// Complete, versioned state of one game instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<W> {
    /// Bumped on every tick and every state transition.
    pub version: u64,
    /// Ticks simulated in the current run.
    pub tick: u64,
    pub run_state: RunState,
    pub world: W,
    pub progress: Progress,
}

/// Build the not-yet-started session for a new run.
pub fn new_session<G: GameRules, R: Rng>(config: &G::Config, rng: &mut R) -> Session<G::World> {
    Session {
        version: 0,
        tick: 0,
        run_state: RunState::NotStarted,
        world: G::new_world(config, rng),
        progress: Progress::new(G::pace_config(config)),
    }
}

/// Output of [`step`].
#[derive(Debug, Clone)]
pub struct Stepped<W> {
    pub session: Session<W>,
    pub events: Vec<GameEvent>,
}

/// Advance `session` by one tick.
///
/// Order: buffered input, movement, collision, commit, spawning, scoring.
/// A session that is not running comes back unchanged with no events.
pub fn step<G: GameRules, R: Rng>(
    config: &G::Config,
    session: &Session<G::World>,
    input: Option<G::Input>,
    rng: &mut R,
) -> Stepped<G::World> {
    let mut next = session.clone();
    let mut events = Vec::new();

    if !next.run_state.is_running() {
        return Stepped {
            session: next,
            events,
        };
    }

    next.tick += 1;
    next.version += 1;

    if let Some(input) = input {
        G::steer(&mut next.world, config, input, &mut events);
    }

    let motion = G::advance(&mut next.world, config, &next.progress.pace);

    if G::collides(&next.world, config, &motion) {
        next.run_state = next
            .run_state
            .next(Transition::Collision)
            .unwrap_or(RunState::Ended);
        events.push(GameEvent::RunEnded {
            reason: G::END_REASON,
            score: next.progress.score,
        });
        return Stepped {
            session: next,
            events,
        };
    }

    let scored = G::settle(&mut next.world, config, motion, &mut events);
    G::spawn(&mut next.world, config, rng, &mut events);
    next.progress
        .record(G::pace_config(config), scored, &mut events);

    Stepped {
        session: next,
        events,
    }
}

/// Values handed to the engine at construction instead of being read from
/// ambient storage mid-run.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Fixed RNG seed for reproducible runs (`None` = OS entropy).
    pub seed: Option<u64>,
    /// Cosmetic accent colour, passed through to snapshots untouched.
    pub accent: Rgb,
}

/// Read-only view for one render frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a, W> {
    pub version: u64,
    pub tick: u64,
    pub run_state: RunState,
    pub world: &'a W,
    pub score: u32,
    pub pace: Pace,
    pub accent: Rgb,
}

pub type ScoreCallback = Box<dyn FnMut(u32)>;

/// One game instance plus its host-facing control surface.
pub struct Engine<G: GameRules> {
    config: G::Config,
    accent: Rgb,
    session: Session<G::World>,
    /// Latest steering command, applied at the start of the next tick.
    pending: Option<G::Input>,
    scheduler: Scheduler,
    rng: StdRng,
    events: Vec<GameEvent>,
    on_score_change: Option<ScoreCallback>,
}

impl<G: GameRules> Engine<G> {
    /// Validate `config` and build a not-yet-started engine.
    pub fn new(config: G::Config, options: EngineOptions) -> Result<Self, ConfigError> {
        G::validate(&config)?;
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = new_session::<G, _>(&config, &mut rng);
        Ok(Self::assemble(config, options.accent, session, rng))
    }

    /// Resume from a previously captured session (restored games, scripted scenarios).
    ///
    /// Both the config and the session's world are validated; a world that
    /// doesn't fit the config is rejected before any tick can run.
    pub fn from_session(
        config: G::Config,
        options: EngineOptions,
        session: Session<G::World>,
    ) -> Result<Self, ConfigError> {
        G::validate(&config)?;
        G::validate_world(&session.world, &config)?;
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = Self::assemble(config, options.accent, session, rng);
        if engine.session.run_state.is_running() {
            engine
                .scheduler
                .start(engine.session.progress.pace.tick_interval_ms);
        }
        Ok(engine)
    }

    fn assemble(config: G::Config, accent: Rgb, session: Session<G::World>, rng: StdRng) -> Self {
        Self {
            config,
            accent,
            session,
            pending: None,
            scheduler: Scheduler::new(),
            rng,
            events: Vec::new(),
            on_score_change: None,
        }
    }

    /// Register the host's score observer. Called with the new score on every change.
    pub fn on_score_change(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_score_change = Some(Box::new(callback));
    }

    /// Explicit start. Returns false unless the run had not started yet.
    pub fn start(&mut self) -> bool {
        let Some(next) = self.session.run_state.next(Transition::Start) else {
            return false;
        };
        self.session.run_state = next;
        self.session.version += 1;
        self.scheduler
            .start(self.session.progress.pace.tick_interval_ms);
        self.events.push(GameEvent::RunStarted);
        true
    }

    /// Movement command from the host.
    ///
    /// Before the run: starts it and buffers the command. While running:
    /// replaces the buffered command. After the run ended: resets instead of
    /// moving.
    pub fn send(&mut self, input: G::Input) {
        match self.session.run_state {
            RunState::NotStarted => {
                self.pending = Some(input);
                self.start();
            }
            RunState::Running => self.pending = Some(input),
            RunState::Ended => {
                self.reset();
            }
        }
    }

    /// Restart after the run ended: fresh world, score and pace, then running.
    pub fn reset(&mut self) -> bool {
        let Some(next) = self.session.run_state.next(Transition::Reset) else {
            return false;
        };
        let previous_score = self.session.progress.score;
        let version = self.session.version;

        self.session = new_session::<G, _>(&self.config, &mut self.rng);
        self.session.run_state = next;
        self.session.version = version + 1;
        self.pending = None;
        self.scheduler
            .start(self.session.progress.pace.tick_interval_ms);

        self.events.push(GameEvent::RunReset);
        self.notify_score(previous_score);
        true
    }

    /// Halt the scheduler. No tick runs until [`Engine::resume`] or a reset.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Restart the scheduler after [`Engine::stop`] if the run is still live.
    pub fn resume(&mut self) {
        if self.session.run_state.is_running() && !self.scheduler.is_running() {
            self.scheduler
                .start(self.session.progress.pace.tick_interval_ms);
        }
    }

    /// Feed elapsed wall-clock time; runs every tick that became due.
    /// Returns true if at least one tick ran.
    pub fn update(&mut self, dt_ms: u64) -> bool {
        self.scheduler.advance(dt_ms);
        let mut changed = false;
        while self.scheduler.next_due() {
            changed |= self.tick();
        }
        changed
    }

    /// Run exactly one tick now, bypassing the scheduler.
    pub fn tick(&mut self) -> bool {
        if !self.session.run_state.is_running() {
            return false;
        }

        let previous_score = self.session.progress.score;
        let input = self.pending.take();
        let stepped = step::<G, _>(&self.config, &self.session, input, &mut self.rng);

        self.session = stepped.session;
        self.events.extend(stepped.events);
        self.notify_score(previous_score);

        if self.session.run_state.is_running() {
            self.scheduler
                .set_interval(self.session.progress.pace.tick_interval_ms);
        } else {
            self.scheduler.stop();
        }
        true
    }

    fn notify_score(&mut self, previous: u32) {
        let score = self.session.progress.score;
        if score == previous {
            return;
        }
        if let Some(callback) = self.on_score_change.as_mut() {
            callback(score);
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_, G::World> {
        Snapshot {
            version: self.session.version,
            tick: self.session.tick,
            run_state: self.session.run_state,
            world: &self.session.world,
            score: self.session.progress.score,
            pace: self.session.progress.pace,
            accent: self.accent,
        }
    }

    /// Events produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn session(&self) -> &Session<G::World> {
        &self.session
    }

    pub fn config(&self) -> &G::Config {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.session.run_state
    }

    pub fn score(&self) -> u32 {
        self.session.progress.score
    }

    pub fn pending_input(&self) -> Option<G::Input> {
        self.pending
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
