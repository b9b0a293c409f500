//! Hero view orchestration: one showcased model driven by the pointer (or
//! by auto-spin on coarse-pointer devices), click-driven bounce pops and the
//! triple-click easter egg.

use std::time::Duration;

use smallvec::SmallVec;

use crate::constants::{EGG_OVERLAY_SEC, TRIPLE_CLICK_WINDOW_SEC};
use crate::orientation::{ModelOrientation, OrientationFrame};
use crate::pointer::PointerTracker;
use crate::presets::DeviceClass;

/// Per-frame output consumed by the renderer and the overlay layer.
#[derive(Clone, Copy, Debug)]
pub struct HeroFrame {
    pub orientation: OrientationFrame,
    pub egg_visible: bool,
}

pub struct HeroView {
    pub pointer: PointerTracker,
    orientation: ModelOrientation,
    device: DeviceClass,
    bounce_trigger: u32,
    clicks: SmallVec<[f64; 4]>,
    egg_until_sec: f64,
}

impl HeroView {
    pub fn new(device: DeviceClass, viewport_w: f32, viewport_h: f32, now_sec: f64) -> Self {
        let mut orientation = ModelOrientation::new(1.0, now_sec);
        orientation.set_auto_spin(device == DeviceClass::Mobile);
        Self {
            pointer: PointerTracker::new(viewport_w, viewport_h),
            orientation,
            device,
            bounce_trigger: 0,
            clicks: SmallVec::new(),
            egg_until_sec: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Switching device class flips which mode drives the base rotation:
    /// auto-spin on mobile, pointer tilt on desktop. Never both.
    pub fn set_device(&mut self, device: DeviceClass) {
        self.device = device;
        self.orientation.set_auto_spin(device == DeviceClass::Mobile);
    }

    #[inline]
    pub fn bounce_trigger(&self) -> u32 {
        self.bounce_trigger
    }

    #[inline]
    pub fn orientation(&self) -> &ModelOrientation {
        &self.orientation
    }

    /// Registers a click on the model. Every click arms a bounce impulse;
    /// the third click inside the window fires the easter egg once and
    /// clears the buffer. Returns whether the egg fired.
    pub fn click(&mut self, now_sec: f64) -> bool {
        self.bounce_trigger = self.bounce_trigger.wrapping_add(1);
        if now_sec < self.egg_until_sec {
            // overlay still visible; clicks never stack a second egg
            return false;
        }
        self.clicks
            .retain(|t| now_sec - *t <= TRIPLE_CLICK_WINDOW_SEC);
        self.clicks.push(now_sec);
        if self.clicks.len() >= 3 {
            self.clicks.clear();
            self.egg_until_sec = now_sec + EGG_OVERLAY_SEC;
            log::info!("[hero] easter egg");
            return true;
        }
        false
    }

    pub fn tick(&mut self, dt: Duration, now_sec: f64) -> HeroFrame {
        let orientation =
            self.orientation
                .tick(dt, now_sec, &mut self.pointer, self.bounce_trigger);
        HeroFrame {
            orientation,
            egg_visible: now_sec < self.egg_until_sec,
        }
    }

    /// Resume after a backgrounded tab; see
    /// [`ModelOrientation::resume`].
    pub fn resume(&mut self, now_sec: f64) {
        self.orientation.resume(now_sec);
        self.pointer.suppress();
    }
}
