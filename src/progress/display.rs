//! Progress bar display for one batch.

use crate::progress::{ProgressBarOpts, StyleOptions};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Coordinates the main bar and the per-file bars of a batch.
#[derive(Debug)]
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a display for a batch of `total_files` downloads.
    pub fn new(style_options: StyleOptions, total_files: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = attach(&multi, style_options.main(), total_files as u64);
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Create the bar tracking the bytes of one file.
    ///
    /// `size` is `0` when the server did not report one.
    pub fn create_file_progress(&self, filename: &str, size: u64) -> ProgressBar {
        let pb = attach(&self.multi, self.style_options.child(), size);
        pb.set_message(filename.to_string());
        pb
    }

    /// Finish a file bar and advance the main bar.
    pub fn finish_file(&self, pb: &ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
        self.main.inc(1);
    }

    /// Count a file that ended before its bar was created.
    pub fn skip_file(&self) {
        self.main.inc(1);
    }

    /// Get the number of files finished so far.
    pub fn finished_files(&self) -> u64 {
        self.main.position()
    }

    /// Finish the main bar.
    pub fn finish(&self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}

/// Disabled bars stay hidden instead of being drawn through `multi`.
fn attach(multi: &MultiProgress, opts: &ProgressBarOpts, len: u64) -> ProgressBar {
    let pb = opts.clone().to_progress_bar(len);
    match opts.enabled {
        true => multi.add(pb),
        false => pb,
    }
}
