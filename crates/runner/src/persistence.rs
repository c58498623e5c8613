//! Trader state persistence
//!
//! Strategies hand back typed memory; between ticks it lives as a JSON
//! string owned by the host. Decoding is forgiving: a missing, corrupt or
//! foreign blob yields fresh memory instead of an error.

use crate::error::{PersistenceError, PersistenceResult};
use serde::{Serialize, de::DeserializeOwned};

/// JSON codec for strategy memory
pub struct StateCodec;

impl StateCodec {
    /// Serialize memory to the persisted form
    pub fn encode<M: Serialize>(memory: &M) -> PersistenceResult<String> {
        serde_json::to_string(memory).map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    /// Strict decode
    pub fn decode<M: DeserializeOwned>(blob: &str) -> PersistenceResult<M> {
        serde_json::from_str(blob).map_err(|e| PersistenceError::Deserialization(e.to_string()))
    }

    /// Decode, substituting fresh memory for anything unusable
    pub fn decode_or_default<M: DeserializeOwned + Default>(blob: Option<&str>) -> M {
        let Some(blob) = blob.filter(|b| !b.trim().is_empty()) else {
            log::debug!("[StateCodec] no trader data, starting fresh");
            return M::default();
        };

        match Self::decode(blob) {
            Ok(memory) => memory,
            Err(e) => {
                log::warn!("[StateCodec] discarding trader data: {}", e);
                M::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_strategy::TraderState;

    #[test]
    fn test_encode_layout() {
        let mut state = TraderState::new();
        state.observe("KELP", 2025.0);
        state.observe("KELP", 2027.0);

        let blob = StateCodec::encode(&state).unwrap();
        assert_eq!(blob, r#"{"averages":{"KELP":{"avg":2026.0,"count":2}}}"#);
        assert_eq!(StateCodec::decode::<TraderState>(&blob).unwrap(), state);
    }

    #[test]
    fn test_missing_or_blank_blob() {
        assert!(StateCodec::decode_or_default::<TraderState>(None).is_empty());
        assert!(StateCodec::decode_or_default::<TraderState>(Some("")).is_empty());
        assert!(StateCodec::decode_or_default::<TraderState>(Some("   ")).is_empty());
    }

    #[test]
    fn test_corrupt_blob_falls_back() {
        for blob in [
            "not json at all",
            "{\"averages\": ",
            "[1, 2, 3]",
            "42",
            "{}",
            r#"{"other": {}}"#,
            r#"{"averages": []}"#,
            r#"{"averages": {"KELP": {"avg": "high", "count": 1}}}"#,
            r#"{"averages": {"KELP": {"avg": 10.0, "count": -1}}}"#,
        ] {
            let state: TraderState = StateCodec::decode_or_default(Some(blob));
            assert!(state.is_empty(), "blob {:?} should be discarded", blob);
        }
    }

    #[test]
    fn test_extra_keys_are_tolerated() {
        let blob = r#"{"averages": {"KELP": {"avg": 10.0, "count": 3}}, "version": 2}"#;
        let state: TraderState = StateCodec::decode_or_default(Some(blob));
        assert_eq!(state.fair_value("KELP"), Some(10.0));
    }
}
