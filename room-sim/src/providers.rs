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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! In-memory call, chat and browser providers for the simulator.

use async_trait::async_trait;
use meeting_room::meeting_room_types::{CallSchedule, CallingState};
use meeting_room::{
    CallHandle, ChannelOptions, ChatChannel, ChatClient, MediaDevice, Navigator, ProviderError,
    SessionProvisioner, UrlOpener,
};
use rand::Rng;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Simulated device latency, long enough to observe the loading preview.
const DEVICE_LATENCY: Duration = Duration::from_millis(150);

pub struct SimDevice {
    name: &'static str,
    deny: bool,
}

impl SimDevice {
    pub fn new(name: &'static str, deny: bool) -> Self {
        Self { name, deny }
    }
}

#[async_trait]
impl MediaDevice for SimDevice {
    async fn enable(&self) -> Result<(), ProviderError> {
        tokio::time::sleep(DEVICE_LATENCY).await;
        if self.deny {
            return Err(ProviderError::Device("Device access denied".to_string()));
        }
        info!("{} on", self.name);
        Ok(())
    }

    async fn disable(&self) -> Result<(), ProviderError> {
        tokio::time::sleep(DEVICE_LATENCY).await;
        info!("{} off", self.name);
        Ok(())
    }
}

pub struct SimCall {
    state: Mutex<CallingState>,
    schedule: CallSchedule,
    camera: Arc<SimDevice>,
    microphone: Arc<SimDevice>,
}

impl SimCall {
    pub fn new(schedule: CallSchedule, deny_camera: bool) -> Self {
        Self {
            state: Mutex::new(CallingState::Idle),
            schedule,
            camera: Arc::new(SimDevice::new("camera", deny_camera)),
            microphone: Arc::new(SimDevice::new("microphone", false)),
        }
    }

    fn set_state(&self, state: CallingState) {
        if let Ok(mut current) = self.state.lock() {
            info!("calling state {} -> {}", *current, state);
            *current = state;
        }
    }
}

#[async_trait]
impl CallHandle for SimCall {
    fn calling_state(&self) -> CallingState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(CallingState::Idle)
    }

    fn schedule(&self) -> CallSchedule {
        self.schedule
    }

    fn camera(&self) -> Option<Arc<dyn MediaDevice>> {
        Some(self.camera.clone())
    }

    fn microphone(&self) -> Option<Arc<dyn MediaDevice>> {
        Some(self.microphone.clone())
    }

    fn is_owned_by_local_user(&self) -> bool {
        true
    }

    async fn join(&self) -> Result<(), ProviderError> {
        self.set_state(CallingState::Joining);
        tokio::time::sleep(Duration::from_millis(200)).await;
        self.set_state(CallingState::Joined);
        Ok(())
    }

    async fn leave(&self) -> Result<(), ProviderError> {
        self.set_state(CallingState::Left);
        Ok(())
    }

    async fn end_call(&self) -> Result<(), ProviderError> {
        self.set_state(CallingState::Left);
        Ok(())
    }
}

pub struct SimChannel {
    kind: String,
    id: String,
    options: ChannelOptions,
    created: Arc<Mutex<HashSet<String>>>,
}

#[async_trait]
impl ChatChannel for SimChannel {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn id(&self) -> &str {
        &self.id
    }

    async fn create(&self) -> Result<(), ProviderError> {
        let cid = format!("{}:{}", self.kind, self.id);
        let mut created = self
            .created
            .lock()
            .map_err(|e| ProviderError::Chat(e.to_string()))?;
        if created.insert(cid.clone()) {
            info!(
                "created channel {cid} ({}) with members {:?}",
                self.options.name.as_deref().unwrap_or("unnamed"),
                self.options.members
            );
        } else {
            info!("fetched existing channel {cid}");
        }
        Ok(())
    }

    async fn send_message(&self, text: &str) -> Result<(), ProviderError> {
        info!("[{}:{}] {text}", self.kind, self.id);
        Ok(())
    }
}

pub struct SimChat {
    user_id: String,
    user_name: String,
    created: Arc<Mutex<HashSet<String>>>,
}

impl SimChat {
    pub fn new(user_id: &str, user_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            created: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl ChatClient for SimChat {
    fn user_id(&self) -> Option<String> {
        Some(self.user_id.clone())
    }

    fn user_name(&self) -> Option<String> {
        Some(self.user_name.clone())
    }

    fn channel(&self, kind: &str, id: &str, options: ChannelOptions) -> Arc<dyn ChatChannel> {
        Arc::new(SimChannel {
            kind: kind.to_string(),
            id: id.to_string(),
            options,
            created: self.created.clone(),
        })
    }

    async fn disconnect_user(&self) -> Result<(), ProviderError> {
        info!("chat user {} disconnected", self.user_id);
        Ok(())
    }
}

/// Hands out made-up collaboration room URLs without a browser.
pub struct FakeProvisioner;

#[async_trait]
impl SessionProvisioner for FakeProvisioner {
    async fn provision(&self, display_name: &str) -> Result<String, ProviderError> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let mut rng = rand::thread_rng();
        let room: u64 = rng.gen();
        let key: u64 = rng.gen();
        info!("provisioned whiteboard for {display_name}");
        Ok(format!("https://excalidraw.com/#room={room:x},{key:x}"))
    }
}

pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, path: &str) {
        info!("navigate to {path}");
    }
}

pub struct LogOpener;

impl UrlOpener for LogOpener {
    fn open(&self, url: &str) {
        info!("would open {url} in a new tab");
    }
}
