//! California Speaks - Episode Queue
//!
//! Playlist navigation for the California Speaks voice skill.
//!
//! This crate provides:
//! - Forward queue and linear play history over an append-only playlist
//! - Status snapshots (position, current, next, previous, history)
//! - A lock-guarded shared handle for concurrent platform callbacks
//! - The closed set of skill events the callback layer dispatches on
//!
//! No I/O happens here. Episodes are opaque stream URLs.
//!
//! # Example
//!
//! ```rust
//! use speakca_playback::{Episode, QueueError, QueueManager};
//!
//! let mut queue = QueueManager::new(vec![
//!     Episode::new("https://cdn.example.org/speakca/a.mp3"),
//!     Episode::new("https://cdn.example.org/speakca/b.mp3"),
//! ]);
//!
//! let first = queue.start()?;
//! assert_eq!(first.url(), "https://cdn.example.org/speakca/a.mp3");
//!
//! queue.step()?;
//! assert_eq!(queue.status().position, 2);
//! assert_eq!(queue.step(), Err(QueueError::EmptyQueue));
//! # Ok::<(), QueueError>(())
//! ```
//!
//! # Example: Shared across request handlers
//!
//! ```rust
//! use speakca_playback::{Episode, SharedQueueManager};
//!
//! let queue = SharedQueueManager::from_playlist(vec![Episode::new("a.mp3")]);
//! let handle = queue.clone();
//!
//! std::thread::spawn(move || handle.start()).join().unwrap().unwrap();
//! assert_eq!(queue.current(), Some(Episode::new("a.mp3")));
//! ```

mod error;
pub mod events;
mod history;
mod manager;
mod queue;
mod shared;
pub mod types;

// Public exports
pub use error::{QueueError, Result};
pub use events::{IntentKind, SkillEvent};
pub use manager::QueueManager;
pub use shared::SharedQueueManager;
pub use types::{Episode, PlaybackPhase, QueueStatus};
