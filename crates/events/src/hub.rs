use std::time::Duration;

/// Delay before a dispatch that saw a `NotReady` hook is retried.
pub const REDISPATCH_DELAY: Duration = Duration::from_millis(200);

/// Where an event originates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSource {
    Viewport,
    Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Resize,
    Scroll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permanence {
    /// Runs on every matching dispatch.
    Permanent,
    /// Dropped after it runs, unless it reports [`HookOutcome::NotReady`].
    OneShot,
}

/// What a hook reports back. Only one-shot hooks are inspected: `NotReady`
/// keeps the hook and re-queues the dispatch after [`REDISPATCH_DELAY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    Done,
    NotReady,
}

type HookFn<Ctx> = Box<dyn FnMut(&mut Ctx, UiEvent) -> HookOutcome>;

struct Hook<Ctx> {
    source: EventSource,
    event: UiEvent,
    permanence: Permanence,
    run: HookFn<Ctx>,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    due: Duration,
    source: EventSource,
    event: UiEvent,
}

/// Fan-out point for UI events.
pub struct EventHub<Ctx> {
    hooks: Vec<Hook<Ctx>>,
    pending: Vec<Pending>,
}

impl<Ctx> Default for EventHub<Ctx> {
    fn default() -> Self {
        Self {
            hooks: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<Ctx> EventHub<Ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook for one `(source, event)` pair.
    pub fn hook(
        &mut self,
        source: EventSource,
        event: UiEvent,
        permanence: Permanence,
        run: impl FnMut(&mut Ctx, UiEvent) -> HookOutcome + 'static,
    ) {
        self.hooks.push(Hook {
            source,
            event,
            permanence,
            run: Box::new(run),
        });
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Redispatches queued and not yet fired.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Runs every hook matching `(source, event)`, in registration order.
    /// When any one-shot hook reports `NotReady`, the pair is re-queued to
    /// fire again once [`REDISPATCH_DELAY`] has passed.
    pub fn dispatch(&mut self, ctx: &mut Ctx, source: EventSource, event: UiEvent, now: Duration) {
        let mut needs_rerun = false;

        self.hooks.retain_mut(|hook| {
            if hook.source != source || hook.event != event {
                return true;
            }
            let outcome = (hook.run)(ctx, event);
            match hook.permanence {
                Permanence::Permanent => true,
                Permanence::OneShot => match outcome {
                    HookOutcome::Done => false,
                    HookOutcome::NotReady => {
                        needs_rerun = true;
                        true
                    }
                },
            }
        });

        if needs_rerun {
            log::trace!(target: "events.hub", "requeueing {event:?} from {source:?}");
            self.pending.push(Pending {
                due: now + REDISPATCH_DELAY,
                source,
                event,
            });
        }
    }

    /// Fires due redispatches. A redispatch that sees another `NotReady`
    /// queues itself again past `now`, so one pump never loops.
    pub fn pump(&mut self, ctx: &mut Ctx, now: Duration) {
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        for pending in due {
            self.dispatch(ctx, pending.source, pending.event, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Counters {
        permanent: usize,
        one_shot: usize,
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn permanent_hooks_survive_every_dispatch() {
        let mut hub: EventHub<Counters> = EventHub::new();
        let mut ctx = Counters::default();
        hub.hook(
            EventSource::Viewport,
            UiEvent::Resize,
            Permanence::Permanent,
            |ctx, _| {
                ctx.permanent += 1;
                HookOutcome::Done
            },
        );

        hub.dispatch(&mut ctx, EventSource::Viewport, UiEvent::Resize, ms(0));
        hub.dispatch(&mut ctx, EventSource::Viewport, UiEvent::Resize, ms(1));
        // Non-matching pair: same source, different event.
        hub.dispatch(&mut ctx, EventSource::Viewport, UiEvent::Scroll, ms(2));

        assert_eq!(ctx.permanent, 2);
        assert_eq!(hub.hook_count(), 1);
    }

    #[test]
    fn one_shot_hooks_drop_after_running() {
        let mut hub: EventHub<Counters> = EventHub::new();
        let mut ctx = Counters::default();
        hub.hook(
            EventSource::Document,
            UiEvent::Scroll,
            Permanence::OneShot,
            |ctx, _| {
                ctx.one_shot += 1;
                HookOutcome::Done
            },
        );

        hub.dispatch(&mut ctx, EventSource::Document, UiEvent::Scroll, ms(0));
        hub.dispatch(&mut ctx, EventSource::Document, UiEvent::Scroll, ms(1));

        assert_eq!(ctx.one_shot, 1);
        assert_eq!(hub.hook_count(), 0);
    }

    #[test]
    fn not_ready_hooks_rerun_only_after_the_delay() {
        let mut hub: EventHub<Counters> = EventHub::new();
        let mut ctx = Counters::default();
        hub.hook(
            EventSource::Viewport,
            UiEvent::Resize,
            Permanence::OneShot,
            |ctx, _| {
                ctx.one_shot += 1;
                if ctx.one_shot < 3 {
                    HookOutcome::NotReady
                } else {
                    HookOutcome::Done
                }
            },
        );

        hub.dispatch(&mut ctx, EventSource::Viewport, UiEvent::Resize, ms(0));
        assert_eq!(ctx.one_shot, 1);
        assert_eq!(hub.pending_count(), 1);

        // Too early: nothing fires.
        hub.pump(&mut ctx, ms(100));
        assert_eq!(ctx.one_shot, 1);

        hub.pump(&mut ctx, ms(200));
        assert_eq!(ctx.one_shot, 2);
        assert_eq!(hub.pending_count(), 1);

        hub.pump(&mut ctx, ms(400));
        assert_eq!(ctx.one_shot, 3);
        assert_eq!(hub.pending_count(), 0);
        assert_eq!(hub.hook_count(), 0);
    }

    #[test]
    fn redispatch_reruns_permanent_hooks_too() {
        let mut hub: EventHub<Counters> = EventHub::new();
        let mut ctx = Counters::default();
        hub.hook(
            EventSource::Viewport,
            UiEvent::Resize,
            Permanence::Permanent,
            |ctx, _| {
                ctx.permanent += 1;
                HookOutcome::Done
            },
        );
        hub.hook(
            EventSource::Viewport,
            UiEvent::Resize,
            Permanence::OneShot,
            |ctx, _| {
                ctx.one_shot += 1;
                if ctx.one_shot == 1 {
                    HookOutcome::NotReady
                } else {
                    HookOutcome::Done
                }
            },
        );

        hub.dispatch(&mut ctx, EventSource::Viewport, UiEvent::Resize, ms(0));
        hub.pump(&mut ctx, ms(250));

        assert_eq!(ctx.permanent, 2);
        assert_eq!(ctx.one_shot, 2);
        assert_eq!(hub.hook_count(), 1);
    }
}
