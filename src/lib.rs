//! Digital flower bouquets: pick flowers, arrange them, add a note and a song,
//! and share the result.
//!
//! A bouquet travels in one of two ways. It can be stored in the registry
//! under a short id (or a creator-chosen slug), or it can be encoded whole
//! into a compact URL-safe payload that needs no server state at all. The
//! recipient's view is the same either way: every placed flower resolved
//! against the static catalog, drawn back-to-front by z-order.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Static flower, background and wrap definitions |
//! | [`bouquet`] | Arranged flowers, stored records, recipient views, validation |
//! | [`arrange`] | Fixed-slot auto-arrangement of a selection |
//! | [`store`] | Editor state for a bouquet under construction |
//! | [`codec`] | Compact URL payload encode/decode |
//! | [`registry`] | Write-once id → bouquet storage (memory or JSON file) |
//! | [`ids`] | Registry id generation and custom slug validation |
//! | [`share`] | Share-link construction |
//! | [`song`] | Spotify track ids, embed URLs and mm:ss helpers |
//! | [`routes`] | HTTP API |
//! | [`config`] | Environment-driven server configuration |
//! | [`state`] | Shared handler state |
//! | [`consts`] | Shared limits and defaults |
//!
//! ## Library surface
//!
//! The HTTP routes use only part of each module. Editor front-ends embedding
//! the crate also get [`store::ArrangementStore`], the `mm:ss` helpers in
//! [`song`], and [`registry::Registry::contains`] for checking a custom slug
//! before submitting it.

pub mod arrange;
pub mod bouquet;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod consts;
pub mod ids;
pub mod registry;
pub mod routes;
pub mod share;
pub mod song;
pub mod state;
pub mod store;
