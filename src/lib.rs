//! Parley is the reliability core of a peer-to-peer video-chat client.
//!
//! Two subsystems do the heavy lifting:
//! - the input reconciler, which moves live capture tracks to match the
//!   user's desired device/enablement/resolution configuration with the
//!   minimal set of hardware touches, and
//! - the chat layer, a per-peer request/acknowledgement protocol merged
//!   into a single room timeline.
//!
//! Rendering, signaling and the media transport itself are injected
//! collaborators behind traits; this crate owns the state machines between
//! them.

/// Reliable per-peer chat sessions and the merged room timeline.
pub mod chat;
/// Enumerates and deduplicates input devices, with hot-plug refresh.
pub mod device_catalog;
/// Reconciles desired media-input configuration against live tracks.
pub mod input_control;
/// Logging utilities for the crate.
pub mod log;
/// Media primitives: kinds, resolutions, tracks, streams, acquisition.
pub mod media;
/// Generated display names for unnamed participants.
pub mod names;
/// Engine-style coordinator wiring input, transport and chat together.
pub mod room;
/// Opaque key/value persistence for user preferences.
pub mod store;
/// Binds local streams to transport send slots without renegotiation.
pub mod transceiver;
/// Small shared helpers.
pub mod util;
/// Peak-hold input level metering.
pub mod volume;
