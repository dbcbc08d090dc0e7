use serde::{Deserialize, Serialize};

use crate::{
    game::{GameEngine, RejectReason, SubmitOutcome},
    models::{Bonus, GameState, PowerUpType, Tile},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame,
    InteractionStart {
        row: usize,
        col: usize,
    },
    InteractionMove {
        row: usize,
        col: usize,
    },
    InteractionEnd,
    ApplyPowerUp {
        power_up: PowerUpType,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Snapshot(Box<Snapshot>),
    WordResult {
        word: String,
        accepted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<RejectReason>,
        score: u32,
        time: u64,
    },
    Error {
        message: String,
    },
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub path: Vec<Tile>,
    pub current_word: String,
    pub bonus: Option<Bonus>,
    pub frozen: bool,
}

impl ServerMessage {
    pub fn snapshot(engine: &GameEngine) -> Self {
        ServerMessage::Snapshot(Box::new(Snapshot {
            state: engine.state().clone(),
            path: engine.path().to_vec(),
            current_word: engine.current_word(),
            bonus: engine.bonus(),
            frozen: engine.is_frozen(),
        }))
    }

    /// Result message for a submitted word; `None` when no game was running
    pub fn word_result(word: String, outcome: SubmitOutcome) -> Option<Self> {
        match outcome {
            SubmitOutcome::Accepted(reward) => Some(ServerMessage::WordResult {
                word,
                accepted: true,
                reason: None,
                score: reward.score,
                time: reward.time,
            }),
            SubmitOutcome::Rejected(reason) => Some(ServerMessage::WordResult {
                word,
                accepted: false,
                reason: Some(reason),
                score: 0,
                time: 0,
            }),
            SubmitOutcome::Ignored => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::scorer::Reward;

    #[test]
    fn test_client_message_format() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"interaction_move","row":2,"col":4}"#).unwrap();
        assert!(matches!(msg, ClientMessage::InteractionMove { row: 2, col: 4 }));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"apply_power_up","power_up":"FREEZE_TIME"}"#).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::ApplyPowerUp {
                power_up: PowerUpType::FreezeTime
            }
        ));
    }

    #[test]
    fn test_word_result_format() {
        let msg = ServerMessage::word_result(
            "CRANE".to_string(),
            SubmitOutcome::Accepted(Reward { score: 50, time: 3000 }),
        )
        .unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "word_result");
        assert_eq!(json["accepted"], true);
        assert_eq!(json["score"], 50);
        assert!(json.get("reason").is_none());

        let msg = ServerMessage::word_result(
            "XQZ".to_string(),
            SubmitOutcome::Rejected(RejectReason::NotInDictionary),
        )
        .unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["reason"], "not_in_dictionary");

        assert!(ServerMessage::word_result("CAT".to_string(), SubmitOutcome::Ignored).is_none());
    }
}
