pub mod chat;
pub mod language;
pub mod notification;
