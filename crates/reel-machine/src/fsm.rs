//! Table-driven state machine.
//!
//! States are plain tags registered in order with their enter/exit hooks.
//! `change` is unconditional: it always runs the current state's exit hook
//! and then the target's enter hook. Gating belongs in the hooks.

use std::fmt::Debug;

use reel_core::ReelError;

pub struct StateHooks<S, C> {
    pub state: S,
    pub on_enter: fn(&mut C),
    pub on_exit: fn(&mut C),
}

pub struct Fsm<S, C> {
    table: Vec<StateHooks<S, C>>,
    current: Option<S>,
}

impl<S: Copy + Eq + Debug, C> Default for Fsm<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + Eq + Debug, C> Fsm<S, C> {
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            current: None,
        }
    }

    /// Register a state; a second registration of the same tag replaces the
    /// first.
    pub fn add(&mut self, hooks: StateHooks<S, C>) {
        match self.table.iter_mut().find(|h| h.state == hooks.state) {
            Some(existing) => *existing = hooks,
            None => self.table.push(hooks),
        }
    }

    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.table.iter().map(|h| h.state)
    }

    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Enter `state` without exiting anything.
    pub fn start(&mut self, state: S, cx: &mut C) -> Result<(), ReelError> {
        let on_enter = self.lookup(state)?.on_enter;
        self.current = Some(state);
        on_enter(cx);
        Ok(())
    }

    pub fn change(&mut self, state: S, cx: &mut C) -> Result<(), ReelError> {
        let on_enter = self.lookup(state)?.on_enter;
        if let Some(prev) = self.current {
            let on_exit = self.lookup(prev)?.on_exit;
            on_exit(cx);
        }
        log::debug!("fsm: {:?} -> {state:?}", self.current);
        self.current = Some(state);
        on_enter(cx);
        Ok(())
    }

    fn lookup(&self, state: S) -> Result<&StateHooks<S, C>, ReelError> {
        self.table
            .iter()
            .find(|h| h.state == state)
            .ok_or_else(|| ReelError::UnknownState(format!("{state:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Blue,
    }

    fn red_enter(t: &mut Vec<String>) {
        t.push("enter Red".into());
    }
    fn red_exit(t: &mut Vec<String>) {
        t.push("exit Red".into());
    }
    fn green_enter(t: &mut Vec<String>) {
        t.push("enter Green".into());
    }
    fn green_exit(t: &mut Vec<String>) {
        t.push("exit Green".into());
    }

    fn lights() -> Fsm<Light, Vec<String>> {
        let mut fsm = Fsm::new();
        fsm.add(StateHooks {
            state: Light::Red,
            on_enter: red_enter,
            on_exit: red_exit,
        });
        fsm.add(StateHooks {
            state: Light::Green,
            on_enter: green_enter,
            on_exit: green_exit,
        });
        fsm
    }

    #[test]
    fn change_runs_exit_then_enter() {
        let mut fsm = lights();
        let mut trace = Vec::new();
        fsm.start(Light::Red, &mut trace).unwrap();
        fsm.change(Light::Green, &mut trace).unwrap();
        fsm.change(Light::Green, &mut trace).unwrap();
        fsm.change(Light::Red, &mut trace).unwrap();

        assert_eq!(fsm.current(), Some(Light::Red));
        insta::assert_snapshot!(trace.join("\n"), @r"
        enter Red
        exit Red
        enter Green
        exit Green
        enter Green
        exit Green
        enter Red
        ");
    }

    #[test]
    fn unknown_state_is_rejected_without_side_effects() {
        let mut fsm = lights();
        let mut trace = Vec::new();
        fsm.start(Light::Red, &mut trace).unwrap();

        let err = fsm.change(Light::Blue, &mut trace).unwrap_err();
        assert!(matches!(err, ReelError::UnknownState(ref s) if s == "Blue"));
        assert_eq!(fsm.current(), Some(Light::Red));
        assert_eq!(trace, vec!["enter Red".to_string()]);
    }

    #[test]
    fn registration_order_is_kept() {
        let mut fsm = lights();
        fsm.add(StateHooks {
            state: Light::Red,
            on_enter: green_enter,
            on_exit: green_exit,
        });
        assert_eq!(fsm.states().collect::<Vec<_>>(), vec![Light::Red, Light::Green]);

        let mut trace = Vec::new();
        fsm.start(Light::Red, &mut trace).unwrap();
        assert_eq!(trace, vec!["enter Green".to_string()]);
    }
}
