//! The per-connection event loop driving one game engine.

use tokio::{
    sync::mpsc,
    time::{sleep_until, Duration, Instant},
};

use crate::game::GameEngine;

use super::messages::{ClientMessage, ServerMessage};

/// Run a game session until the command channel closes or the client stops
/// listening. Deferred engine callbacks are driven from real time; a snapshot
/// is pushed after every observable change.
pub async fn run_session(
    mut engine: GameEngine,
    mut commands: mpsc::Receiver<ClientMessage>,
    updates: mpsc::Sender<ServerMessage>,
) {
    let origin = Instant::now();

    if updates.send(ServerMessage::snapshot(&engine)).await.is_err() {
        return;
    }
    let mut sent_revision = engine.revision();

    loop {
        let deadline = engine
            .next_deadline()
            .map(|ms| origin + Duration::from_millis(ms));

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                catch_up(&mut engine, origin);
                if let Some(reply) = handle_command(&mut engine, command) {
                    if updates.send(reply).await.is_err() {
                        break;
                    }
                }
            }
            _ = sleep_until_deadline(deadline) => {
                catch_up(&mut engine, origin);
            }
            _ = updates.closed() => {
                break;
            }
        }

        if engine.revision() != sent_revision {
            sent_revision = engine.revision();
            if updates.send(ServerMessage::snapshot(&engine)).await.is_err() {
                break;
            }
        }
    }

    engine.shutdown();
    tracing::debug!("Session loop stopped: {:?}", engine);
}

fn handle_command(engine: &mut GameEngine, command: ClientMessage) -> Option<ServerMessage> {
    match command {
        ClientMessage::StartGame => {
            engine.start();
            None
        }
        ClientMessage::InteractionStart { row, col } => {
            engine.interaction_start(row, col);
            None
        }
        ClientMessage::InteractionMove { row, col } => {
            engine.interaction_move(row, col);
            None
        }
        ClientMessage::InteractionEnd => {
            let (word, outcome) = engine.interaction_end()?;
            ServerMessage::word_result(word, outcome)
        }
        ClientMessage::ApplyPowerUp { power_up } => {
            if !engine.apply_power_up(power_up) {
                tracing::debug!("Power-up {:?} not available", power_up);
            }
            None
        }
    }
}

/// Bring the engine clock up to real elapsed time
fn catch_up(engine: &mut GameEngine, origin: Instant) {
    let elapsed = origin.elapsed().as_millis() as u64;
    engine.advance(elapsed.saturating_sub(engine.now()));
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
