//! Progress bar display of a segmented download.
//!
//! One child bar per segment, fed by its [`ProgressMonitor`] samples, and a
//! main bar counting finished segments. The display is hidden by default.
//!
//! [`ProgressMonitor`]: super::ProgressMonitor

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Template of the main bar: `━━━━━━━━━━━━━━━━━━━━━━━ 2/4 segments`.
pub const TEMPLATE_SEGMENTS: &str = "{bar:40.blue} {pos:>}/{len} segments";

/// Template of segment bars, in the style of pip.
pub const TEMPLATE_SEGMENT: &str =
    "{prefix:>8} {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red}";

/// Progression characters: `"━╾╴─"`.
pub const CHARS_LINE: &str = "━╾╴─";

/// Coordinates the bars of one download.
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    enabled: bool,
}

impl ProgressDisplay {
    /// Creates the display for `segments` segments.
    pub fn new(enabled: bool, segments: usize) -> Self {
        let multi = if enabled {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let main = if enabled {
            multi.add(ProgressBar::new(segments as u64).with_style(style(TEMPLATE_SEGMENTS)))
        } else {
            ProgressBar::hidden()
        };

        Self {
            multi,
            main,
            enabled,
        }
    }

    /// A display that draws nothing.
    pub fn hidden() -> Self {
        Self::new(false, 0)
    }

    /// Whether bars are drawn.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Creates the bar of segment `index`. Its length is set once the server
    /// announces the segment size.
    pub fn segment_bar(&self, index: usize) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        self.multi.add(
            ProgressBar::new(0)
                .with_style(style(TEMPLATE_SEGMENT))
                .with_prefix(format!("part{}", index)),
        )
    }

    /// Completes a segment bar and advances the main bar.
    pub fn finish_segment(&self, bar: &ProgressBar) {
        bar.finish_and_clear();
        self.main.inc(1);
    }

    /// Completes the main bar.
    pub fn finish(self) {
        if self.enabled {
            self.main.finish();
        }
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(CHARS_LINE)
}
