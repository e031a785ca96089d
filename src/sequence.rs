//! Encoded move sequences and the wait-padding policy.

use std::collections::HashMap;

use crate::error::PartitionError;

/// Name of the move that encodes the wait filler.
pub const WAIT_MOVE: &str = "wait";

/// A move sequence encoded to signal strengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    signals: Vec<u8>,
    wait: Option<u8>,
}

impl Sequence {
    pub fn new(signals: Vec<u8>, wait: Option<u8>) -> Self {
        Self { signals, wait }
    }

    /// Encode move names through `encoding`.
    ///
    /// The wait move is whatever `encoding` maps [`WAIT_MOVE`] to, if anything.
    pub fn decode<S: AsRef<str>>(
        moves: &[S],
        encoding: &HashMap<String, u8>,
    ) -> Result<Self, PartitionError> {
        let signals = moves
            .iter()
            .map(|name| {
                let name = name.as_ref();
                encoding
                    .get(name)
                    .copied()
                    .ok_or_else(|| PartitionError::UnknownMove(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            signals,
            wait: encoding.get(WAIT_MOVE).copied(),
        })
    }

    pub fn signals(&self) -> &[u8] {
        &self.signals
    }

    pub fn wait(&self) -> Option<u8> {
        self.wait
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// The signals, padded with wait moves up to `min_len`.
    ///
    /// # Errors
    /// [`PartitionError::MissingWait`] if padding is needed but the sequence has
    /// no wait move.
    pub fn with_min_items(&self, min_len: usize) -> Result<Vec<u8>, PartitionError> {
        if self.signals.len() >= min_len {
            return Ok(self.signals.clone());
        }
        let wait = self.wait.ok_or(PartitionError::MissingWait)?;
        let mut padded = Vec::with_capacity(min_len);
        padded.extend_from_slice(&self.signals);
        padded.resize(min_len, wait);
        Ok(padded)
    }
}
