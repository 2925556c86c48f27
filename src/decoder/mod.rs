//! Streaming packet decoder.
//!
//! A fixed-latency state machine that turns 32-byte wire records into
//! [`DecodedRecord`]s for the order book engine. Input is accepted only while
//! the machine is idle, and a decoded record is held until the consumer takes
//! it, so the decoder and the engine hand off through a single slot.

mod machine;
mod record;

pub use machine::{DECODE_LATENCY_STEPS, DecoderState, DecoderStats, PacketDecoder};
pub use record::{DecodedRecord, InputRecord, MessageType, RECORD_LEN};
