pub mod config;
pub mod logging;

pub mod acquirer;
pub mod cache;
pub mod destination;
pub mod locator;
pub mod prefs;
pub mod resolver;
pub mod storage;
pub mod transport;
