//! Progress reporting for mesh construction.
//!
//! The builder runs a fixed sequence of passes over its input. A [`Progress`]
//! callback receives one update as each pass starts.
//!
//! # Example
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//!
//! let faces = SlicedArray::from_slices(&[[0u32, 1, 2]]);
//! let mesh = build_mesh_with_progress(&faces, &BuildOptions::default(), &progress).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! ```

/// A progress callback that receives updates during construction.
///
/// The callback receives:
/// - `current`: Current step (0-based)
/// - `total`: Total number of steps
/// - `message`: Description of the current pass
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_report_forwards_to_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |current, total, message| {
            sink.lock().unwrap().push((current, total, message.to_string()));
        });

        progress.report(0, 2, "first");
        progress.report(1, 2, "second");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], (1, 2, "second".to_string()));
    }

    #[test]
    fn test_none_is_silent() {
        Progress::none().report(0, 1, "ignored");
        assert_eq!(format!("{:?}", Progress::default()), "Progress { .. }");
    }
}
