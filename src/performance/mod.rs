//! # Frame Timing and Statistics
//!
//! - [`FrameClock`] - elapsed time since start and per-frame delta
//! - [`PerformanceOverlay`] - FPS, frame-time and memory panels drawn with ImGui
//!
//! ```no_run
//! use glimpse::performance::{FrameClock, PerformanceOverlay};
//!
//! let mut clock = FrameClock::new();
//! let mut overlay = PerformanceOverlay::standard();
//!
//! overlay.begin();
//! let time = clock.advance();
//! // ... update and render using time.delta ...
//! overlay.end();
//! ```

pub mod clock;
pub mod overlay;

pub use clock::{FrameClock, FrameTime};
pub use overlay::{MemorySource, PerformanceOverlay, ProcStatus, StatKind, StatPanel};
