//! The dashboard engine: command execution and the dispatch loop.
//!
//! The engine owns the store. Commands are processed strictly one at a
//! time: a handler runs to completion, including its await point, before
//! the next command is admitted, so overlapping submissions resolve
//! last-write-wins in admission order. Every processed command yields
//! exactly one terminal event, failure included.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::commands::Command;
use crate::config::EngineConfig;
use crate::context::EngineContext;
use crate::events::Event;
use crate::handlers::{self, HandlerEnv};
use crate::interfaces::InsightLoader;
use crate::model::{Insight, Layout};
use crate::selectors::Selectors;
use crate::store::DashboardState;

/// Command/event processing engine for one dashboard.
pub struct DashboardEngine {
    state: DashboardState,
    selectors: Selectors,
    ctx: EngineContext,
    loader: Arc<dyn InsightLoader>,
    config: EngineConfig,
}

impl DashboardEngine {
    /// Engine seeded with a layout and the insights it references.
    pub fn new(
        config: EngineConfig,
        ctx: EngineContext,
        loader: Arc<dyn InsightLoader>,
        layout: Layout,
        insights: Vec<Insight>,
    ) -> Self {
        Self {
            state: DashboardState::new(layout, insights),
            selectors: Selectors::new(config.selector_cache_capacity),
            ctx,
            loader,
            config,
        }
    }

    /// Current state, for selector reads.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The memoized selector registry.
    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Execute one command to completion and return its terminal event.
    ///
    /// Handler errors and batch-commit errors both surface as a correlated
    /// `CommandFailed` event; in either case the store is unchanged.
    pub async fn execute(&mut self, cmd: Command) -> Event {
        let outcome = {
            let env = HandlerEnv {
                state: &self.state,
                selectors: &self.selectors,
                ctx: &self.ctx,
                loader: self.loader.as_ref(),
                loader_config: &self.config.loader,
            };
            handlers::process(&env, &cmd).await
        };

        match outcome {
            Ok(outcome) => match self.state.apply_batch(outcome.batch) {
                Ok(()) => {
                    info!(
                        correlation_id = %cmd.correlation_id(),
                        command = cmd.name(),
                        "Command processed"
                    );
                    outcome.event
                }
                Err(err) => {
                    error!(
                        correlation_id = %cmd.correlation_id(),
                        command = cmd.name(),
                        error = %err,
                        "Batch commit failed"
                    );
                    Event::command_failed(&cmd, &err)
                }
            },
            Err(err) => {
                info!(
                    correlation_id = %cmd.correlation_id(),
                    command = cmd.name(),
                    error = %err,
                    "Command rejected"
                );
                Event::command_failed(&cmd, &err)
            }
        }
    }

    /// Move the engine onto a dispatch loop task.
    ///
    /// Returns a handle for submitting commands and the event channel the
    /// loop pushes terminal events to, in FIFO command order. The loop
    /// stops when every handle is dropped or the event receiver goes away.
    pub fn spawn(mut self) -> (EngineHandle, mpsc::Receiver<Event>) {
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(self.config.command_queue_capacity);
        let (event_tx, event_rx) = mpsc::channel::<Event>(self.config.event_channel_capacity);

        tokio::spawn(async move {
            while let Some(cmd) = cmd_rx.recv().await {
                let event = self.execute(cmd).await;
                if event_tx.send(event).await.is_err() {
                    debug!("Event receiver dropped, stopping dispatch loop");
                    return;
                }
            }
            debug!("All handles dropped, stopping dispatch loop");
        });

        (EngineHandle { cmd_tx }, event_rx)
    }
}

/// Handle for submitting commands to a spawned dispatch loop.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Command>,
}

/// The dispatch loop is no longer running; the command is returned.
#[derive(Debug, thiserror::Error)]
#[error("dispatch loop is not running")]
pub struct SubmitError(pub Command);

impl EngineHandle {
    /// Queue a command for processing, waiting for queue capacity.
    pub async fn submit(&self, cmd: Command) -> Result<(), SubmitError> {
        self.cmd_tx.send(cmd).await.map_err(|e| SubmitError(e.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandKind;
    use crate::events::EventKind;
    use crate::model::{ObjRef, VisualizationType};
    use crate::test_utils::{test_insight, test_layout, test_widget, StaticInsightLoader};

    fn engine_with(loader: StaticInsightLoader) -> DashboardEngine {
        let layout = test_layout(vec![vec![test_widget("w1", "Sales", ObjRef::id("i1"))]]);
        DashboardEngine::new(
            EngineConfig::default(),
            EngineContext::new("ws-1"),
            Arc::new(loader),
            layout,
            vec![test_insight("i1", "Sales", VisualizationType::Column)],
        )
    }

    #[tokio::test]
    async fn test_execute_emits_correlated_terminal_event() {
        let loader = StaticInsightLoader::new(vec![test_insight(
            "i2",
            "Revenue",
            VisualizationType::Column,
        )]);
        let mut engine = engine_with(loader);

        let cmd = Command::with_correlation_id(
            CommandKind::ChangeInsightWidgetInsight {
                widget_ref: ObjRef::id("w1"),
                insight_ref: ObjRef::id("i2"),
                visualization_properties: None,
            },
            "corr-1",
        )
        .unwrap();
        let event = engine.execute(cmd).await;

        assert_eq!(event.correlation_id(), "corr-1");
        assert!(!event.is_failure());
    }

    #[tokio::test]
    async fn test_spawned_loop_processes_fifo() {
        let loader = StaticInsightLoader::new(vec![
            test_insight("i2", "Revenue", VisualizationType::Column),
            test_insight("i3", "Costs", VisualizationType::Column),
        ]);
        let engine = engine_with(loader);
        let (handle, mut events) = engine.spawn();

        for (corr, insight) in [("first", "i2"), ("second", "i3")] {
            let cmd = Command::with_correlation_id(
                CommandKind::ChangeInsightWidgetInsight {
                    widget_ref: ObjRef::id("w1"),
                    insight_ref: ObjRef::id(insight),
                    visualization_properties: None,
                },
                corr,
            )
            .unwrap();
            handle.submit(cmd).await.unwrap();
        }

        let first = events.recv().await.unwrap();
        let second = events.recv().await.unwrap();
        assert_eq!(first.correlation_id(), "first");
        assert_eq!(second.correlation_id(), "second");

        // last write wins
        match second.kind() {
            EventKind::InsightWidgetInsightSwitched { insight, .. } => {
                assert_eq!(insight.title(), "Costs");
            }
            other => panic!("expected switch event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_after_loop_stops_returns_command() {
        let loader = StaticInsightLoader::new(vec![]);
        let engine = engine_with(loader);
        let (handle, events) = engine.spawn();
        drop(events);

        let cmd = Command::new(CommandKind::InitializeEntitlements {
            entitlements: vec![],
        });
        handle.submit(cmd).await.unwrap();

        // the loop observes the dropped receiver while emitting the event
        let mut stopped = false;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            if handle.cmd_tx.is_closed() {
                stopped = true;
                break;
            }
        }
        assert!(stopped);

        let late = Command::new(CommandKind::InitializeEntitlements {
            entitlements: vec![],
        });
        assert!(handle.submit(late).await.is_err());
    }
}
