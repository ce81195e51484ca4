use crate::event::StepEvent;

/// A suspended computation advanced one logical step at a time.
///
/// `advance` returns the next [`StepEvent`] in the canonical order of the
/// equivalent direct recursion, or `None` once the process is exhausted.
/// Exhaustion is terminal and idempotent: every later call also returns
/// `None`, so a driver can poll without managing its own termination flag.
///
/// A process owns no externally shared mutable state; all communication is
/// through the returned events.
pub trait Process {
    fn advance(&mut self) -> Option<StepEvent>;
}

/// Drain a process to exhaustion, collecting every event in order.
pub fn drain(process: &mut dyn Process) -> Vec<StepEvent> {
    let mut events = Vec::new();
    while let Some(event) = process.advance() {
        events.push(event);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::StepEvent;

    struct Countdown(u32);

    impl Process for Countdown {
        fn advance(&mut self) -> Option<StepEvent> {
            if self.0 == 0 {
                return None;
            }
            self.0 -= 1;
            Some(StepEvent::Pop)
        }
    }

    #[test]
    fn drain_collects_until_exhaustion() {
        let mut p = Countdown(3);
        assert_eq!(drain(&mut p).len(), 3);
        assert!(p.advance().is_none());
        assert!(p.advance().is_none());
    }
}
