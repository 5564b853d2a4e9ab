//! Domain Layer
//!
//! Pure rules behind the dashboard sections: validation, local edits and
//! the small aggregations shown in each summary card. Nothing here touches
//! the DOM or the network.

pub mod attendance;
pub mod contact;
pub mod delivery;
pub mod entity;
pub mod fleet;
pub mod format;
pub mod hub;
pub mod kilos_litros;
pub mod notification;
pub mod purchase;
pub mod settlement;

pub use hub::{Section, HUBS};
pub use notification::Notification;
