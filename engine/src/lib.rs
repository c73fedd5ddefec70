pub mod app;
pub mod audio;
pub mod graphics;
pub mod scheduler;
pub mod ui;

/// The result of feeding one input into a `GameLogic`.
///
/// Effects are instructions for whoever hosts the logic (a window, a test harness, an agent).
/// The logic itself never performs them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<State, Effect> {
    pub state: State,
    pub effects: Vec<Effect>,
}

impl<State, Effect> Transition<State, Effect> {
    pub fn new(state: State, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// A transition that keeps `state` and asks for nothing.
    pub fn unchanged(state: State) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

pub trait GameLogic {
    type State;
    type Input;
    type Effect;

    fn initial_state(&self) -> Self::State;

    /// Pure-ish transition: the logic may consume internal randomness, but all observable state
    /// lives in the returned `State`.
    fn step(
        &mut self,
        state: &Self::State,
        input: Self::Input,
    ) -> Transition<Self::State, Self::Effect>;
}

/// Owns a `GameLogic` plus its current state, and keeps a journal of emitted effects.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
    journal: Vec<(usize, G::Effect)>,
    journal_enabled: bool,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
            journal: Vec::new(),
            journal_enabled: false,
        }
    }

    /// Keep every emitted effect (tagged with its frame) for later inspection.
    pub fn with_journal(mut self) -> Self {
        self.journal_enabled = true;
        self
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn journal(&self) -> &[(usize, G::Effect)] {
        &self.journal
    }

    /// Replace the current state with a fresh `initial_state()`; the journal is kept.
    pub fn reset(&mut self) {
        self.state = self.game.initial_state();
    }

    pub fn step(&mut self, input: G::Input) -> Vec<G::Effect>
    where
        G::Effect: Clone,
    {
        let Transition { state, effects } = self.game.step(&self.state, input);
        self.state = state;
        self.frame += 1;
        if self.journal_enabled {
            let frame = self.frame;
            self.journal
                .extend(effects.iter().cloned().map(|effect| (frame, effect)));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum CounterEffect {
        Crossed(i32),
    }

    impl GameLogic for Counter {
        type State = i32;
        type Input = i32;
        type Effect = CounterEffect;

        fn initial_state(&self) -> Self::State {
            0
        }

        fn step(&mut self, state: &Self::State, input: Self::Input) -> Transition<i32, CounterEffect> {
            let next = *state + input;
            if *state < 10 && next >= 10 {
                Transition::new(next, vec![CounterEffect::Crossed(10)])
            } else {
                Transition::unchanged(next)
            }
        }
    }

    fn feed(runner: &mut HeadlessRunner<Counter>, inputs: &[i32]) {
        for &input in inputs {
            runner.step(input);
        }
    }

    #[test]
    fn runner_steps_and_returns_effects() {
        let mut runner = HeadlessRunner::new(Counter);
        assert!(runner.step(4).is_empty());
        assert_eq!(runner.step(7), vec![CounterEffect::Crossed(10)]);
        assert_eq!(runner.frame(), 2);
        assert_eq!(runner.state(), &11);
    }

    #[test]
    fn journal_is_opt_in_and_tags_frames() {
        let mut quiet = HeadlessRunner::new(Counter);
        feed(&mut quiet, &[5, 5]);
        assert!(quiet.journal().is_empty());

        let mut runner = HeadlessRunner::new(Counter).with_journal();
        feed(&mut runner, &[3, 3, 3, 3]);
        assert_eq!(runner.journal(), &[(4, CounterEffect::Crossed(10))]);
    }

    #[test]
    fn reset_restores_initial_state_but_keeps_frame_count() {
        let mut runner = HeadlessRunner::new(Counter);
        feed(&mut runner, &[1, 2]);
        runner.reset();
        assert_eq!(runner.state(), &0);
        assert_eq!(runner.frame(), 2);
    }
}
