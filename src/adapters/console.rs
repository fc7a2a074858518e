use crate::domain::model::OperatorAction;
use crate::domain::ports::OperatorConsole;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Operator console fed through a channel, e.g. by a Ctrl-C handler.
pub struct CliConsole {
    actions: UnboundedReceiver<OperatorAction>,
}

impl CliConsole {
    pub fn channel() -> (Self, UnboundedSender<OperatorAction>) {
        let (tx, rx) = unbounded_channel();
        (Self { actions: rx }, tx)
    }
}

#[async_trait::async_trait]
impl OperatorConsole for CliConsole {
    async fn next_actions(&mut self) -> Vec<OperatorAction> {
        // give the other tasks on this thread a turn before draining
        tokio::task::yield_now().await;

        let mut pending = Vec::new();
        while let Ok(action) = self.actions.try_recv() {
            pending.push(action);
        }
        pending
    }
}

/// Sends `Stop` to the console once Ctrl-C is pressed.
pub fn stop_on_ctrl_c(tx: UnboundedSender<OperatorAction>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Ctrl-C received, stopping");
                let _ = tx.send(OperatorAction::Stop);
            }
            Err(e) => tracing::warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });
}
