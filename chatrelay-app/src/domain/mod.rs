mod chat;

pub use chat::{InboundMessage, OutboundReply};
