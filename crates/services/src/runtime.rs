use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use quiz_core::{EngagementSampler, RenderCommand, SessionToken, UserIntent};

use crate::controller::{QuizController, Step};
use crate::error::RuntimeError;
use crate::pacing::Pacing;

/// Consumer of render commands (terminal, JSON pipe, desktop window, tests).
pub trait Presenter: Send {
    /// # Errors
    ///
    /// Returns `RuntimeError::PresenterClosed` once the consumer is gone.
    fn present(&mut self, command: RenderCommand) -> Result<(), RuntimeError>;
}

impl Presenter for mpsc::UnboundedSender<RenderCommand> {
    fn present(&mut self, command: RenderCommand) -> Result<(), RuntimeError> {
        self.send(command).map_err(|_| RuntimeError::PresenterClosed)
    }
}

/// Event loop around a `QuizController`.
///
/// Interleaves user intents with two kinds of timers: the delayed advance
/// after each answer (one spawned sleep per answer, carrying the session
/// token) and the periodic engagement sample. Everything runs on the loop's
/// task, one event at a time.
pub struct QuizRuntime<P> {
    controller: QuizController,
    pacing: Pacing,
    presenter: P,
}

impl<P: Presenter> QuizRuntime<P> {
    /// The controller's sampler is rebuilt from `pacing`, so the tick period
    /// and the sampler always agree.
    #[must_use]
    pub fn new(controller: QuizController, pacing: Pacing, presenter: P) -> Self {
        Self {
            controller: controller
                .with_sampler(EngagementSampler::new(pacing.engagement_period())),
            pacing,
            presenter,
        }
    }

    /// Run until the intent channel closes, then hand back the controller.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::PresenterClosed` if the presenter goes away.
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<UserIntent>,
    ) -> Result<QuizController, RuntimeError> {
        let (due_tx, mut due_rx) = mpsc::unbounded_channel::<SessionToken>();
        let mut ticker = tokio::time::interval(self.controller.sampler().period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for command in self.controller.initial_renders() {
            self.presenter.present(command)?;
        }
        // The first tick completes immediately; initial_renders already sampled.
        ticker.tick().await;

        tracing::debug!(pacing = ?self.pacing, "quiz runtime started");
        loop {
            tokio::select! {
                intent = intents.recv() => {
                    let Some(intent) = intent else { break };
                    tracing::trace!(?intent, "user intent");
                    let step = self.controller.handle(intent);
                    self.apply(step, &due_tx)?;
                }
                Some(token) = due_rx.recv() => {
                    let step = self.controller.advance_due(token);
                    self.apply(step, &due_tx)?;
                }
                _ = ticker.tick() => {
                    self.presenter.present(self.controller.sample_engagement())?;
                }
            }
        }

        tracing::debug!("intent channel closed; quiz runtime stopping");
        Ok(self.controller)
    }

    fn apply(
        &mut self,
        step: Step,
        due_tx: &mpsc::UnboundedSender<SessionToken>,
    ) -> Result<(), RuntimeError> {
        for command in step.renders {
            self.presenter.present(command)?;
        }
        if let Some(token) = step.advance_after {
            let delay = self.pacing.advance_delay();
            let due_tx = due_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // The loop may have stopped in the meantime.
                let _ = due_tx.send(token);
            });
        }
        Ok(())
    }
}
