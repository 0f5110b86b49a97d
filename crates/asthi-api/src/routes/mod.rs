pub mod assessment;
pub mod chat;
pub mod health;
pub mod notifications;
pub mod speech;
