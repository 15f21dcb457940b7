use super::StarfieldConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// The focus star is swelling; counts completed frames.
    Growing { frames: u32 },
    /// Swelling finished; seconds left before the reveal.
    Waiting { remaining: f64 },
    Revealed,
}

/// The one-shot highlight of the focus star and the reveal that follows it.
///
/// The swell is frame-counted: it completes after
/// [`StarfieldConfig::focus_frames`] frames however long they take. The
/// reveal then fires once `reveal_delay_ms` of frame time has passed. Once
/// revealed the animation never restarts.
#[derive(Clone, Debug, PartialEq)]
pub struct Focus {
    index: usize,
    step: f64,
    total_frames: u32,
    delay: f64,
    phase: Phase,
    /// Eased progress to paint this frame, `None` when the star looks normal.
    current: Option<f64>,
}

/// What the focus animation did during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusStep {
    /// The swell reached full size on this frame.
    pub completed: bool,
    /// The reveal fired on this frame.
    pub revealed: bool,
}

impl Focus {
    pub(crate) fn new(index: usize, config: &StarfieldConfig) -> Self {
        Self {
            index,
            step: config.focus_step,
            total_frames: config.focus_frames(),
            delay: (config.reveal_delay_ms / 1000.0).max(0.0),
            phase: Phase::Growing { frames: 0 },
            current: None,
        }
    }

    /// Index of the focus star within the field.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Eased swell progress in `[0, 1]` to paint on the current frame, or
    /// `None` once the swell has finished.
    pub fn eased(&self) -> Option<f64> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Growing { .. })
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, Phase::Revealed)
    }

    /// Runs one frame of `dt` seconds.
    pub(crate) fn advance(&mut self, dt: f64) -> FocusStep {
        let mut step = FocusStep::default();
        match self.phase {
            Phase::Growing { frames } => {
                let frames = frames + 1;
                let eased = (f64::from(frames) * self.step).min(1.0);
                self.current = Some(eased);
                if frames >= self.total_frames {
                    self.current = Some(1.0);
                    step.completed = true;
                    self.phase = Phase::Waiting {
                        remaining: self.delay,
                    };
                    // A zero delay reveals on the completing frame.
                    if self.delay <= 0.0 {
                        self.phase = Phase::Revealed;
                        step.revealed = true;
                    }
                } else {
                    self.phase = Phase::Growing { frames };
                }
            }
            Phase::Waiting { remaining } => {
                self.current = None;
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.phase = Phase::Revealed;
                    step.revealed = true;
                } else {
                    self.phase = Phase::Waiting { remaining };
                }
            }
            Phase::Revealed => {
                self.current = None;
            }
        }
        step
    }
}
