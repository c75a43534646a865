/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Pre-join camera and microphone setup.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::{ProviderError, RoomError};
use crate::events::{RoomEvent, RoomEventBus};
use crate::providers::{CallHandle, MediaDevice};

/// What the setup screen shows in place of the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// The first device request has not completed yet.
    Loading,
    /// Devices were requested at least once, show the live preview.
    Live,
}

/// [DeviceSetup] reconciles the "join with mic and camera off" intent with the
/// call's camera and microphone controls.
///
/// It only tracks the last requested intent, never the OS-level grant state.
/// Device failures are logged and swallowed so that the setup screen can never
/// get stuck on the loading placeholder; the live preview is responsible for
/// showing a persistent device error.
pub struct DeviceSetup {
    call: Arc<dyn CallHandle>,
    mic_cam_disabled: AtomicBool,
    ready: AtomicBool,
    attempts: AtomicU32,
    events: RoomEventBus,
}

impl DeviceSetup {
    /// Fails with [`RoomError::NoActiveCall`] when there is no call to set up.
    pub fn new(call: Option<Arc<dyn CallHandle>>, events: RoomEventBus) -> Result<Self, RoomError> {
        let call = call.ok_or(RoomError::NoActiveCall)?;
        Ok(Self {
            call,
            mic_cam_disabled: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            attempts: AtomicU32::new(0),
            events,
        })
    }

    pub fn mic_cam_disabled(&self) -> bool {
        self.mic_cam_disabled.load(Ordering::Acquire)
    }

    pub fn devices_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn preview(&self) -> PreviewState {
        if self.devices_ready() {
            PreviewState::Live
        } else {
            PreviewState::Loading
        }
    }

    /// Apply the current intent. Called once when the setup screen mounts.
    pub async fn initialize(&self) {
        self.apply(self.mic_cam_disabled()).await;
    }

    /// Record a new intent and, if it changed, run the full enable/disable
    /// sequence again. Toggling twice retries a failed attempt.
    pub async fn set_mic_cam_disabled(&self, disabled: bool) {
        let previous = self.mic_cam_disabled.swap(disabled, Ordering::AcqRel);
        if previous == disabled {
            return;
        }
        self.apply(disabled).await;
    }

    async fn apply(&self, disabled: bool) {
        let attempt = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        log::debug!(
            "Device initialization attempt {attempt}: {} camera and microphone",
            if disabled { "disabling" } else { "enabling" }
        );

        let camera = Self::request(self.call.camera(), disabled);
        let microphone = Self::request(self.call.microphone(), disabled);
        let (camera, microphone) = futures::join!(camera, microphone);

        for (device, result) in [("camera", camera), ("microphone", microphone)] {
            if let Err(e) = result {
                log::error!("Failed to initialize devices: {e} ({device}, attempt {attempt})");
            }
        }

        self.ready.store(true, Ordering::Release);
        self.events.emit(RoomEvent::DevicesReady {
            attempt,
            mic_cam_disabled: disabled,
        });
    }

    async fn request(
        device: Option<Arc<dyn MediaDevice>>,
        disabled: bool,
    ) -> Result<(), ProviderError> {
        match device {
            Some(device) if disabled => device.disable().await,
            Some(device) => device.enable().await,
            None => Ok(()),
        }
    }
}
