//! Infrastructure layer - storage, services and external integrations

pub mod auth;
pub mod invitation;
pub mod logging;
pub mod member;
pub mod notification;
pub mod organization;
pub mod storage;
pub mod team;
pub mod user;
