//! Persistence slice for notification subscriptions: which user wants which
//! action-notification on which content node.
//!
//! Queries are built with the typed `query-builder` crate and handed to the
//! [`database::Database`] execution seam; this crate never talks to a
//! database directly.

pub mod database;
pub mod dto;
pub mod error;
pub mod notification;
pub mod repository;

pub use error::NotificationsError;
pub use notification::{NodeId, Notification, UserId};
pub use repository::NotificationsRepository;
