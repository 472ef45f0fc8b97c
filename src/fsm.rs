/// Small finite-state-machine container.
///
/// `S` is a state enum. The machine only tracks which state is current, which
/// one preceded it, and how long the current state has been active; transition
/// rules live in the code that drives the machine (see
/// [`PlayerController`](crate::control::PlayerController)), keeping this type
/// pure bookkeeping.
pub struct StateMachine<S: Clone> {
    pub state: S,
    pub previous: S,
    /// Seconds spent in the current state, reset on every transition.
    pub elapsed: f32,
    entered_this_tick: bool,
}

impl<S: Clone> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            previous: initial.clone(),
            state: initial,
            elapsed: 0.0,
            entered_this_tick: true,
        }
    }

    /// Transition to `next` if it is a different variant from the current
    /// state. Variants are compared by discriminant, so enum payload changes
    /// alone do not count as a transition.
    pub fn go(&mut self, next: S) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            self.previous = std::mem::replace(&mut self.state, next);
            self.elapsed = 0.0;
            self.entered_this_tick = true;
        }
    }

    /// Advance the in-state timer and clear the entry flag. Call once per
    /// tick, after transitions for that tick have been processed.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        self.entered_this_tick = false;
    }

    /// True only on the tick a transition into the current state fired.
    pub fn just_entered(&self) -> bool {
        self.entered_this_tick
    }
}
