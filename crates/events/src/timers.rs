use std::time::Duration;

type TimerFn<Ctx> = Box<dyn FnMut(&mut Ctx)>;

struct NamedTimer<Ctx> {
    name: String,
    period: Duration,
    due: Duration,
    run: TimerFn<Ctx>,
}

struct OneShotTimer<Ctx> {
    due: Duration,
    run: Option<Box<dyn FnOnce(&mut Ctx)>>,
}

/// Deadline bookkeeping for the UI loop.
///
/// Named timers re-arm relative to when they actually ran, so a slow tick
/// delays the next run instead of bunching runs together.
pub struct Timers<Ctx> {
    named: Vec<NamedTimer<Ctx>>,
    one_shots: Vec<OneShotTimer<Ctx>>,
}

impl<Ctx> Default for Timers<Ctx> {
    fn default() -> Self {
        Self {
            named: Vec::new(),
            one_shots: Vec::new(),
        }
    }
}

impl<Ctx> Timers<Ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a repeating timer, replacing any existing timer with the
    /// same name. The first run comes one period after `now`.
    pub fn create_timer(
        &mut self,
        name: impl Into<String>,
        period: Duration,
        now: Duration,
        run: impl FnMut(&mut Ctx) + 'static,
    ) {
        let name = name.into();
        self.destroy_timer(&name);
        self.named.push(NamedTimer {
            name,
            period,
            due: now + period,
            run: Box::new(run),
        });
    }

    pub fn destroy_timer(&mut self, name: &str) {
        self.named.retain(|t| t.name != name);
    }

    pub fn has_timer(&self, name: &str) -> bool {
        self.named.iter().any(|t| t.name == name)
    }

    /// Schedules a callback to run once, `delay` after `now`.
    pub fn once(&mut self, delay: Duration, now: Duration, run: impl FnOnce(&mut Ctx) + 'static) {
        self.one_shots.push(OneShotTimer {
            due: now + delay,
            run: Some(Box::new(run)),
        });
    }

    /// Runs everything due at `now`. Named timers re-arm for `now + period`;
    /// due one-shots are removed in registration order.
    pub fn tick(&mut self, ctx: &mut Ctx, now: Duration) {
        for timer in &mut self.named {
            if timer.due <= now {
                (timer.run)(ctx);
                timer.due = now + timer.period;
            }
        }

        let mut index = 0;
        while index < self.one_shots.len() {
            if self.one_shots[index].due <= now {
                let mut shot = self.one_shots.remove(index);
                if let Some(run) = shot.run.take() {
                    run(ctx);
                }
            } else {
                index += 1;
            }
        }
    }
}
