use foundation::timeline::Year;

/// Milliseconds of playback per one-year step.
const YEAR_STEP_MS: f64 = 500.0;

/// Timeline playback driver.
///
/// Owns the selected year and the play/pause flag, so every year mutation
/// funnels through one place. `tick` accumulates elapsed time and steps the
/// year forward; reaching the dataset's last year stops playback there.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackController {
    year: Year,
    min_year: Year,
    max_year: Year,
    playing: bool,
    acc_ms: f64,
}

impl PlaybackController {
    pub fn new(min_year: Year, max_year: Year, initial: Year) -> Self {
        Self {
            year: initial.clamp(min_year, max_year),
            min_year,
            max_year,
            playing: false,
            acc_ms: 0.0,
        }
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn min_year(&self) -> Year {
        self.min_year
    }

    pub fn max_year(&self) -> Year {
        self.max_year
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        if self.year >= self.max_year {
            // Restart from the beginning when played out.
            self.year = self.min_year;
        }
        self.playing = true;
        tracing::debug!(year = self.year.0, "playback started");
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.acc_ms = 0.0;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Scrub to a year. Clamped to the dataset bounds; does not change the
    /// play/pause state.
    pub fn set_year(&mut self, year: Year) {
        self.year = year.clamp(self.min_year, self.max_year);
        self.acc_ms = 0.0;
    }

    /// Advances playback by `dt_ms`. Returns `true` when the selected year
    /// changed, which is the caller's cue to rebuild overlays.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if !self.playing {
            return false;
        }
        self.acc_ms += dt_ms.max(0.0);

        let before = self.year;
        while self.acc_ms >= YEAR_STEP_MS {
            self.acc_ms -= YEAR_STEP_MS;
            self.year = Year(self.year.0 + 1);
            if self.year >= self.max_year {
                self.year = self.max_year;
                self.playing = false;
                self.acc_ms = 0.0;
                tracing::debug!(year = self.year.0, "playback reached end");
                break;
            }
        }
        self.year != before
    }
}
