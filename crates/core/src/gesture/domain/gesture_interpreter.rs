//! Per-frame mode arbitration for the pointer and volume channels.
//!
//! Pointer channel, first match wins:
//! 1. palm scroll: palm open and fingers spread past the click release band
//! 2. click: thumb–index pinch below the click engage threshold
//! 3. move: fingers spread, palm closed, click not latched
//! 4. idle: anything else (dead band)
//!
//! Right click is evaluated on every pointer frame independently of the
//! mode. The volume channel runs its own gate and never touches pointer
//! state.

use crate::control::domain::action::{Action, MouseButton};
use crate::gesture::domain::classifier::HandFeatures;
use crate::gesture::domain::gesture_session::{GestureSession, PointerMode};
use crate::gesture::domain::hysteresis_latch::LatchTransition;
use crate::gesture::domain::screen_mapper::ScreenMapper;
use crate::gesture::domain::volume_mapper::{VolumeMapper, VolumeReading};
use crate::shared::frame_dimensions::FrameDimensions;
use crate::shared::gesture_config::{Channel, GestureConfig};
use crate::shared::landmark_frame::{Handedness, LandmarkFrame};
use crate::tracking::domain::landmark_source::HandObservation;

/// What the interpreter decided for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// Actions in emission order.
    pub actions: Vec<Action>,
    /// Channel of the hand in this frame, `None` when no usable hand.
    pub channel: Option<Channel>,
    pub pointer_mode: Option<PointerMode>,
    pub volume_active: bool,
    pub volume: Option<VolumeReading>,
}

/// Turns hand observations into debounced control actions.
///
/// Owns the only `GestureSession`; frames must be fed in capture order.
pub struct GestureInterpreter {
    config: GestureConfig,
    mapper: ScreenMapper,
    volume: VolumeMapper,
    session: GestureSession,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig, camera: FrameDimensions) -> Self {
        let session = GestureSession::new(&config);
        Self::with_session(config, camera, session)
    }

    pub fn with_session(
        config: GestureConfig,
        camera: FrameDimensions,
        session: GestureSession,
    ) -> Self {
        let mapper = ScreenMapper::new(camera, config.frame_margin, config.screen);
        if !mapper.has_control_area() {
            log::warn!(
                "Frame margin {} leaves no control area in a {}x{} frame; pointer will pin to the screen origin",
                config.frame_margin,
                camera.width,
                camera.height
            );
        }
        let volume = VolumeMapper::new(config.volume_input_range, config.volume_bar_range);
        Self {
            config,
            mapper,
            volume,
            session,
        }
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Interprets raw detector output, skipping hands with a wrong
    /// landmark count as if no hand was seen.
    pub fn interpret_observation(&mut self, observation: &HandObservation) -> FrameOutcome {
        let Some(detected) = &observation.hand else {
            return self.interpret(None);
        };
        match LandmarkFrame::from_points(&detected.points) {
            Ok(frame) => self.interpret(Some((detected.handedness, &frame))),
            Err(e) => {
                log::warn!(
                    "Frame {}: ignoring {} hand: {e}",
                    observation.index,
                    detected.handedness
                );
                self.interpret(None)
            }
        }
    }

    /// Advances the session by one frame and returns the resulting actions.
    pub fn interpret(&mut self, hand: Option<(Handedness, &LandmarkFrame)>) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        let channel = hand.map(|(handedness, frame)| {
            (self.config.channel_for(handedness), HandFeatures::measure(frame))
        });

        match channel {
            Some((Channel::Pointer, features)) => {
                outcome.channel = Some(Channel::Pointer);
                outcome.pointer_mode = Some(self.interpret_pointer(&features, &mut outcome.actions));
            }
            Some((Channel::Volume, features)) => {
                outcome.channel = Some(Channel::Volume);
                outcome.volume = self.interpret_volume(&features, &mut outcome.actions);
                self.pointer_absent();
            }
            None => self.pointer_absent(),
        }

        outcome.volume_active = self.session.volume_active();
        outcome
    }

    fn interpret_pointer(&mut self, f: &HandFeatures, actions: &mut Vec<Action>) -> PointerMode {
        let click_band = self.config.click;
        let spread = f.thumb_index > click_band.release_above;

        let mode = if f.palm_open && spread {
            if let Some(amount) = self.session.scroll.track(f.index_tip.y) {
                actions.push(Action::Scroll { amount });
            }
            PointerMode::Scroll
        } else {
            self.session.scroll.reset();
            if self.session.click.update(f.thumb_index) == LatchTransition::Engaged {
                actions.push(Action::Click {
                    button: MouseButton::Left,
                });
            }
            if f.thumb_index < click_band.engage_below {
                PointerMode::Click
            } else if spread && !f.palm_open && !self.session.click.is_engaged() {
                PointerMode::Move
            } else {
                PointerMode::Idle
            }
        };

        if self.session.right_click.update(f.thumb_middle) == LatchTransition::Engaged {
            actions.push(Action::Click {
                button: MouseButton::Right,
            });
        }

        if mode == PointerMode::Move {
            actions.push(self.move_cursor(f));
        }

        if self.session.pointer_mode != Some(mode) {
            log::debug!("Pointer mode: {mode}");
            self.session.pointer_mode = Some(mode);
        }
        mode
    }

    fn move_cursor(&mut self, f: &HandFeatures) -> Action {
        let target = self.mapper.map(f.index_tip);
        let [x, y] = self.session.pointer.smooth(target);
        let x = if self.config.mirror_pointer_x() && self.mapper.has_control_area() {
            self.mapper.screen().width - x
        } else {
            x
        };
        Action::MoveCursor { x, y }
    }

    fn interpret_volume(
        &mut self,
        f: &HandFeatures,
        actions: &mut Vec<Action>,
    ) -> Option<VolumeReading> {
        match self.session.volume_gate.update(f.thumb_middle) {
            LatchTransition::Engaged => log::debug!("Volume control active"),
            LatchTransition::Released => log::debug!("Volume control inactive"),
            LatchTransition::Unchanged => {}
        }
        if !self.session.volume_active() {
            return None;
        }
        let reading = self.volume.read(f.thumb_index);
        actions.push(Action::SetVolume {
            level: reading.level,
        });
        self.session.last_volume = Some(reading);
        Some(reading)
    }

    /// Pointer hand not in this frame: latches persist, the scroll baseline
    /// does not, so a returning hand never scrolls by a stale delta.
    fn pointer_absent(&mut self) {
        self.session.scroll.reset();
    }
}
