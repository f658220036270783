//! Domain layer of the relay.
//!
//! Pure state and rules: identities, payload classification, the bounded
//! history, the word censor and the connection registry. Nothing here touches
//! the network; the transport is reached through the [`Connection`] and
//! [`InboundSource`] traits.

pub mod censor;
pub mod connection;
pub mod error;
pub mod history;
pub mod message;
pub mod payload;
pub mod registry;
pub mod value_object;

pub use censor::Censor;
pub use connection::{Connection, Inbound, InboundSource};
pub use error::{CensorError, SendError};
pub use history::{HISTORY_CAPACITY, HistoryBuffer};
pub use message::{SystemMessage, format_user_message};
pub use payload::{ControlSignal, Frame, Payload};
pub use registry::ConnectionRegistry;
pub use value_object::Identity;
