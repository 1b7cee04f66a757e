//! Kill notification fan-out plus the score/kill counters.
//!
//! Counters bump in the same step as the emission, external observers run in
//! registration order with per-listener failures isolated, and the event is
//! queued for the same-tick reaction systems (spawn refill, loot drop).

use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct KillEvent {
    /// Pool index of the enemy slot that died.
    pub index: usize,
    /// Last known world position, where loot lands.
    pub pos: Vec3,
}

type KillListener = Box<dyn FnMut(&KillEvent) -> anyhow::Result<()>>;

pub struct CombatBus {
    pub kills: u32,
    pub score: u32,
    per_kill: u32,
    pending: Vec<KillEvent>,
    listeners: Vec<(String, KillListener)>,
}

impl CombatBus {
    pub fn new(per_kill: u32) -> Self {
        Self { kills: 0, score: 0, per_kill, pending: Vec::new(), listeners: Vec::new() }
    }

    /// Register an external observer. Observers are read-only: reactions that
    /// mutate the simulation run as ordered systems in the tick schedule.
    pub fn on_kill(
        &mut self,
        name: impl Into<String>,
        listener: impl FnMut(&KillEvent) -> anyhow::Result<()> + 'static,
    ) {
        self.listeners.push((name.into(), Box::new(listener)));
    }

    pub fn emit_kill(&mut self, ev: KillEvent) {
        self.kills += 1;
        self.score += self.per_kill;
        metrics::counter!("combat.kills_total").increment(1);
        for (name, listener) in &mut self.listeners {
            if let Err(e) = listener(&ev) {
                metrics::counter!("combat.listener_errors_total").increment(1);
                log::warn!("kill listener '{name}' failed: {e:#}");
            }
        }
        self.pending.push(ev);
    }

    /// Take the events queued since the last drain; consumed once per tick by
    /// the reaction systems.
    pub fn drain_pending(&mut self) -> Vec<KillEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn reset(&mut self) {
        self.kills = 0;
        self.score = 0;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ev(index: usize) -> KillEvent {
        KillEvent { index, pos: Vec3::ZERO }
    }

    #[test]
    fn counters_bump_with_emission() {
        let mut bus = CombatBus::new(5);
        bus.emit_kill(ev(3));
        bus.emit_kill(ev(4));
        assert_eq!(bus.kills, 2);
        assert_eq!(bus.score, 10);
        assert_eq!(bus.drain_pending().len(), 2);
        assert!(bus.drain_pending().is_empty());
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = CombatBus::new(1);
        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            bus.on_kill(tag, move |e| {
                seen.borrow_mut().push((tag, e.index));
                Ok(())
            });
        }
        bus.emit_kill(ev(7));
        assert_eq!(
            *seen.borrow(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn failing_listener_does_not_stop_the_rest() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut bus = CombatBus::new(1);
        bus.on_kill("broken", |_| anyhow::bail!("listener exploded"));
        {
            let seen = Rc::clone(&seen);
            bus.on_kill("counting", move |_| {
                *seen.borrow_mut() += 1;
                Ok(())
            });
        }
        bus.emit_kill(ev(0));
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(bus.kills, 1);
    }
}
