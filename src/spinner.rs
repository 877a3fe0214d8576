//! Loading spinner.
//!
//! The search input shows a spinner frame in place of the clear mark while a
//! suggestion request for the current query is outstanding. The spinner
//! animates itself: every [`TickMsg`] advances one frame and schedules the
//! next tick, and ticks addressed to another spinner, or left over from an
//! earlier tick chain, are ignored.
//!
//! ```rust
//! use search_autocomplete::spinner::{Model, MINI_DOT};
//!
//! let spinner = Model::new().with_spinner(MINI_DOT.clone());
//! let _first_tick = spinner.tick();
//! assert_eq!(spinner.frame_text(), "⠋");
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A set of frames and the delay between them.
#[derive(Debug, Clone)]
pub struct Spinner {
    /// Frames shown in order.
    pub frames: Vec<String>,
    /// Time each frame stays on screen.
    pub fps: Duration,
}

/// `| / - \`
pub static LINE: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: vec!["|".into(), "/".into(), "-".into(), "\\".into()],
    fps: Duration::from_millis(100),
});

/// Small braille dots; the default for the search input.
pub static MINI_DOT: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    fps: Duration::from_millis(83),
});

/// Three dots bouncing.
pub static POINTS: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: ["∙∙∙", "●∙∙", "∙●∙", "∙∙●"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    fps: Duration::from_millis(143),
});

/// Advances a spinner by one frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Spinner the tick belongs to.
    pub id: i64,
    pub(crate) tag: i64,
}

/// Spinner state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Frames and speed.
    pub spinner: Spinner,
    /// Style applied to the current frame.
    pub style: Style,
    frame: usize,
    id: i64,
    tag: i64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a [`MINI_DOT`] spinner with a dim style.
    pub fn new() -> Self {
        Self {
            spinner: MINI_DOT.clone(),
            style: Style::new().foreground(Color::from("240")),
            frame: 0,
            id: next_id(),
            tag: 0,
        }
    }

    /// Replaces the frames.
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self.frame = 0;
        self
    }

    /// Replaces the style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Unique id of this spinner.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Schedules the next frame.
    pub fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.spinner.fps, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Advances on a matching [`TickMsg`] and returns the next tick.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;

        if tick.id > 0 && tick.id != self.id {
            return None;
        }
        // A tag mismatch means another tick chain is already running.
        if tick.tag > 0 && tick.tag != self.tag {
            return None;
        }

        self.frame = (self.frame + 1) % self.spinner.frames.len().max(1);
        self.tag += 1;
        Some(self.tick())
    }

    /// Current frame without styling.
    pub fn frame_text(&self) -> &str {
        self.spinner
            .frames
            .get(self.frame)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Current frame, styled.
    pub fn view(&self) -> String {
        self.style.render(self.frame_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_for(m: &Model) -> Msg {
        Box::new(TickMsg {
            id: m.id,
            tag: m.tag,
        })
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(Model::new().id(), Model::new().id());
    }

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut m = Model::new().with_spinner(LINE.clone());
        assert_eq!(m.frame_text(), "|");

        for expected in ["/", "-", "\\", "|"] {
            let msg = tick_for(&m);
            assert!(m.update(&msg).is_some());
            assert_eq!(m.frame_text(), expected);
        }
    }

    #[test]
    fn test_foreign_tick_is_ignored() {
        let mut m = Model::new();
        let other = Model::new();
        assert!(m.update(&tick_for(&other)).is_none());
        assert_eq!(m.frame_text(), "⠋");
    }

    #[test]
    fn test_stale_tag_is_ignored() {
        let mut m = Model::new();
        m.update(&tick_for(&m));
        m.update(&tick_for(&m));

        let before = m.frame_text().to_string();
        let stale = Box::new(TickMsg {
            id: m.id,
            tag: 1,
        }) as Msg;
        assert!(m.update(&stale).is_none());
        assert_eq!(m.frame_text(), before);
    }

    #[test]
    fn test_non_tick_message_is_ignored() {
        let mut m = Model::new();
        let msg: Msg = Box::new("hello");
        assert!(m.update(&msg).is_none());
    }
}
