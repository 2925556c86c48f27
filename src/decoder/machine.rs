//! The decoder state machine.

use super::record::{DecodedRecord, InputRecord, MessageType};
use crate::OrderBookError;
use crate::types::{Price, Side, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{trace, warn};

/// Steps from latching an input to handing out its decoded record, when the consumer is ready.
pub const DECODE_LATENCY_STEPS: u32 = 5;

/// Decoder states, visited strictly in declaration order and then back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecoderState {
    /// Waiting for input; the only state that accepts a record
    Idle,
    /// Classifying the message type and side
    HeaderParse,
    SymbolParse,
    PriceParse,
    /// Extracting the quantity, then holding the valid output until it is consumed
    QuantityParse,
}

impl fmt::Display for DecoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecoderState::Idle => "Idle",
            DecoderState::HeaderParse => "HeaderParse",
            DecoderState::SymbolParse => "SymbolParse",
            DecoderState::PriceParse => "PriceParse",
            DecoderState::QuantityParse => "QuantityParse",
        };
        f.write_str(name)
    }
}

/// Counters maintained by the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderStats {
    /// Every call to `step`
    pub steps: u64,
    /// Inputs accepted in `Idle`
    pub records_latched: u64,
    /// Decoded records handed to the consumer
    pub records_emitted: u64,
    /// Records decoded best-effort from malformed input
    pub malformed_records: u64,
    /// Steps spent holding a valid output for a consumer that was not ready
    pub stalled_steps: u64,
}

/// Fixed-latency decoder for [`InputRecord`]s.
///
/// Each call to [`step`](PacketDecoder::step) advances the machine by one
/// state. A record takes exactly [`DECODE_LATENCY_STEPS`] steps from latch to
/// hand-off regardless of its contents; malformed fields are decoded
/// best-effort rather than aborting the cycle.
#[derive(Debug)]
pub struct PacketDecoder {
    state: DecoderState,
    latched: InputRecord,
    output: DecodedRecord,
    malformed: bool,
    stats: DecoderStats,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            latched: InputRecord::from_bytes(&[]),
            output: DecodedRecord::EMPTY,
            malformed: false,
            stats: DecoderStats::default(),
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// True only in `Idle`: the decoder never accepts a record mid-decode.
    pub fn input_ready(&self) -> bool {
        self.state == DecoderState::Idle
    }

    /// The decoded record waiting for the consumer, if any.
    pub fn output(&self) -> Option<&DecodedRecord> {
        if self.state == DecoderState::QuantityParse && self.output.valid {
            Some(&self.output)
        } else {
            None
        }
    }

    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }

    /// Advance the machine by one state.
    ///
    /// `input` is only looked at in `Idle`. Returns the decoded record on the
    /// step where a valid output meets a ready consumer.
    pub fn step(
        &mut self,
        input: Option<&InputRecord>,
        consumer_ready: bool,
    ) -> Option<DecodedRecord> {
        self.stats.steps += 1;

        match self.state {
            DecoderState::Idle => {
                if let Some(record) = input {
                    self.latched = *record;
                    self.output = DecodedRecord::EMPTY;
                    self.malformed = record.is_truncated();
                    self.stats.records_latched += 1;
                    self.state = DecoderState::HeaderParse;
                }
                None
            }
            DecoderState::HeaderParse => {
                let message_type = MessageType::from_wire(self.latched.message_type_code());
                let (side, side_known) = Side::from_wire(self.latched.side_code());
                self.output.message_type = message_type;
                self.output.side = side;
                self.malformed |= message_type == MessageType::Undefined || !side_known;
                self.state = DecoderState::SymbolParse;
                None
            }
            DecoderState::SymbolParse => {
                let symbol = Symbol::from_bytes(self.latched.symbol_bytes());
                self.malformed |= symbol.is_empty();
                self.output.symbol = symbol;
                self.state = DecoderState::PriceParse;
                None
            }
            DecoderState::PriceParse => {
                self.output.price = Price::from_raw(self.latched.price_raw());
                self.state = DecoderState::QuantityParse;
                None
            }
            DecoderState::QuantityParse => {
                if !self.output.valid {
                    self.output.quantity = self.latched.quantity_raw();
                    self.output.valid = true;
                    if self.malformed {
                        self.stats.malformed_records += 1;
                        warn!(
                            "Decoder: malformed record decoded best-effort: {:?}",
                            self.output
                        );
                    }
                }

                if consumer_ready {
                    let decoded = self.output;
                    self.output.valid = false;
                    self.state = DecoderState::Idle;
                    self.stats.records_emitted += 1;
                    trace!("Decoder: emitted {:?}", decoded);
                    Some(decoded)
                } else {
                    self.stats.stalled_steps += 1;
                    None
                }
            }
        }
    }

    /// Run one full decode cycle for `record` with an always-ready consumer.
    ///
    /// Fails with `NotReady` if a previous record is still in flight.
    pub fn decode(&mut self, record: &InputRecord) -> Result<DecodedRecord, OrderBookError> {
        if !self.input_ready() {
            return Err(OrderBookError::NotReady {
                context: format!("decoder busy in {}", self.state),
            });
        }

        let mut input = Some(record);
        for _ in 0..DECODE_LATENCY_STEPS {
            if let Some(decoded) = self.step(input.take(), true) {
                return Ok(decoded);
            }
        }

        Err(OrderBookError::NotReady {
            context: format!("decode cycle did not complete, stopped in {}", self.state),
        })
    }

    /// Drop any in-flight record and return to `Idle`. Counters are kept.
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
        self.output = DecodedRecord::EMPTY;
        self.malformed = false;
    }
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}
