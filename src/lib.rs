// ABOUTME: Root library module exposing the transport-facing modules.
// ABOUTME: Platform-agnostic logic lives in chirpbridge-core and is re-exported.

pub mod events;
pub mod slack;
pub mod twitter;

// Re-export the core modules for convenient access
pub use chirpbridge_core::commands;
pub use chirpbridge_core::config;
pub use chirpbridge_core::dispatch;
pub use chirpbridge_core::metrics;
pub use chirpbridge_core::paginator;
pub use chirpbridge_core::poller;
pub use chirpbridge_core::relay;
pub use chirpbridge_core::scheduler;
pub use chirpbridge_core::sources;
pub use chirpbridge_core::traits;
pub use chirpbridge_core::watermark;
