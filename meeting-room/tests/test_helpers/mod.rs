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

//! Mock providers and log capture shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use meeting_room::{
    CallHandle, ChannelOptions, ChatChannel, ChatClient, MediaDevice, Navigator, ProviderError,
    RoomCollaborators, SessionProvisioner, UrlOpener,
};
use meeting_room::meeting_room_types::{CallSchedule, CallingState};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Notify;

// ── Log capture ──────────────────────────────────────────────────────────

static LOGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INIT_LOGGER: Once = Once::new();

struct CapturingLogger;

impl log::Log for CapturingLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        LOGS.lock()
            .unwrap()
            .push(format!("{} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

pub fn init_log_capture() {
    INIT_LOGGER.call_once(|| {
        log::set_logger(&CapturingLogger).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Captured log lines containing every needle.
pub fn logs_containing(needles: &[&str]) -> Vec<String> {
    LOGS.lock()
        .unwrap()
        .iter()
        .filter(|line| needles.iter().all(|n| line.contains(n)))
        .cloned()
        .collect()
}

// ── Call provider ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDevice {
    pub enables: AtomicUsize,
    pub disables: AtomicUsize,
    pub fail_enable: Mutex<Option<String>>,
}

impl MockDevice {
    pub fn failing_enable(message: &str) -> Self {
        Self {
            fail_enable: Mutex::new(Some(message.to_string())),
            ..Default::default()
        }
    }

    pub fn enables(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }

    pub fn disables(&self) -> usize {
        self.disables.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaDevice for MockDevice {
    async fn enable(&self) -> Result<(), ProviderError> {
        self.enables.fetch_add(1, Ordering::SeqCst);
        match self.fail_enable.lock().unwrap().clone() {
            Some(message) => Err(ProviderError::Device(message)),
            None => Ok(()),
        }
    }

    async fn disable(&self) -> Result<(), ProviderError> {
        self.disables.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct MockCall {
    pub state: Mutex<CallingState>,
    pub schedule: Mutex<CallSchedule>,
    pub camera: Arc<MockDevice>,
    pub microphone: Arc<MockDevice>,
    pub has_camera: AtomicBool,
    pub has_microphone: AtomicBool,
    pub owned: AtomicBool,
    pub joins: AtomicUsize,
    pub leaves: AtomicUsize,
    pub ends: AtomicUsize,
    pub fail_end: AtomicBool,
}

impl MockCall {
    pub fn new(state: CallingState) -> Self {
        Self::with_devices(state, MockDevice::default(), MockDevice::default())
    }

    pub fn with_devices(state: CallingState, camera: MockDevice, microphone: MockDevice) -> Self {
        Self {
            state: Mutex::new(state),
            schedule: Mutex::new(CallSchedule::default()),
            camera: Arc::new(camera),
            microphone: Arc::new(microphone),
            has_camera: AtomicBool::new(true),
            has_microphone: AtomicBool::new(true),
            owned: AtomicBool::new(true),
            joins: AtomicUsize::new(0),
            leaves: AtomicUsize::new(0),
            ends: AtomicUsize::new(0),
            fail_end: AtomicBool::new(false),
        }
    }

    /// A call that exposes no camera control.
    pub fn without_camera(self) -> Self {
        self.has_camera.store(false, Ordering::SeqCst);
        self
    }

    pub fn without_microphone(self) -> Self {
        self.has_microphone.store(false, Ordering::SeqCst);
        self
    }

    pub fn set_state(&self, state: CallingState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn set_schedule(&self, schedule: CallSchedule) {
        *self.schedule.lock().unwrap() = schedule;
    }
}

#[async_trait]
impl CallHandle for MockCall {
    fn calling_state(&self) -> CallingState {
        *self.state.lock().unwrap()
    }

    fn schedule(&self) -> CallSchedule {
        *self.schedule.lock().unwrap()
    }

    fn camera(&self) -> Option<Arc<dyn MediaDevice>> {
        if !self.has_camera.load(Ordering::SeqCst) {
            return None;
        }
        Some(self.camera.clone())
    }

    fn microphone(&self) -> Option<Arc<dyn MediaDevice>> {
        if !self.has_microphone.load(Ordering::SeqCst) {
            return None;
        }
        Some(self.microphone.clone())
    }

    fn is_owned_by_local_user(&self) -> bool {
        self.owned.load(Ordering::SeqCst)
    }

    async fn join(&self) -> Result<(), ProviderError> {
        self.joins.fetch_add(1, Ordering::SeqCst);
        self.set_state(CallingState::Joined);
        Ok(())
    }

    async fn leave(&self) -> Result<(), ProviderError> {
        self.leaves.fetch_add(1, Ordering::SeqCst);
        self.set_state(CallingState::Left);
        Ok(())
    }

    async fn end_call(&self) -> Result<(), ProviderError> {
        self.ends.fetch_add(1, Ordering::SeqCst);
        if self.fail_end.load(Ordering::SeqCst) {
            return Err(ProviderError::Call("end rejected".to_string()));
        }
        self.set_state(CallingState::Left);
        Ok(())
    }
}

// ── Chat provider ────────────────────────────────────────────────────────

/// Server-side view of a channel, shared by every handle to it.
#[derive(Default)]
pub struct ChannelRecord {
    pub created: AtomicBool,
    pub create_calls: AtomicUsize,
    pub members: Mutex<Vec<String>>,
    pub name: Mutex<Option<String>>,
    pub messages: Mutex<Vec<String>>,
}

pub struct MockChannel {
    kind: String,
    id: String,
    options: ChannelOptions,
    record: Arc<ChannelRecord>,
    fail_create: Option<String>,
    fail_send: Option<String>,
}

#[async_trait]
impl ChatChannel for MockChannel {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn id(&self) -> &str {
        &self.id
    }

    async fn create(&self) -> Result<(), ProviderError> {
        self.record.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_create {
            return Err(ProviderError::Chat(message.clone()));
        }
        self.record.created.store(true, Ordering::SeqCst);
        let mut members = self.record.members.lock().unwrap();
        for member in &self.options.members {
            if !members.contains(member) {
                members.push(member.clone());
            }
        }
        if self.options.name.is_some() {
            *self.record.name.lock().unwrap() = self.options.name.clone();
        }
        Ok(())
    }

    async fn send_message(&self, text: &str) -> Result<(), ProviderError> {
        if let Some(message) = &self.fail_send {
            return Err(ProviderError::Chat(message.clone()));
        }
        self.record.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct MockChat {
    pub user_id: Mutex<Option<String>>,
    pub user_name: Option<String>,
    pub records: Mutex<HashMap<(String, String), Arc<ChannelRecord>>>,
    pub channel_requests: Mutex<Vec<(String, String)>>,
    pub disconnects: AtomicUsize,
    pub fail_disconnect: AtomicBool,
    pub fail_create: Mutex<Option<String>>,
    pub fail_send: Mutex<Option<String>>,
}

impl MockChat {
    pub fn new(user_id: &str, user_name: &str) -> Self {
        Self {
            user_id: Mutex::new(Some(user_id.to_string())),
            user_name: Some(user_name.to_string()),
            records: Mutex::new(HashMap::new()),
            channel_requests: Mutex::new(Vec::new()),
            disconnects: AtomicUsize::new(0),
            fail_disconnect: AtomicBool::new(false),
            fail_create: Mutex::new(None),
            fail_send: Mutex::new(None),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_id: Mutex::new(None),
            user_name: None,
            ..Self::new("", "")
        }
    }

    /// The chat connection finished and now reports a user.
    pub fn set_user_id(&self, user_id: &str) {
        *self.user_id.lock().unwrap() = Some(user_id.to_string());
    }

    pub fn record(&self, kind: &str, id: &str) -> Option<Arc<ChannelRecord>> {
        self.records
            .lock()
            .unwrap()
            .get(&(kind.to_string(), id.to_string()))
            .cloned()
    }

    /// Channels that exist on the provider side.
    pub fn created_channels(&self) -> usize {
        self.records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.created.load(Ordering::SeqCst))
            .count()
    }

    pub fn messages(&self, kind: &str, id: &str) -> Vec<String> {
        self.record(kind, id)
            .map(|r| r.messages.lock().unwrap().clone())
            .unwrap_or_default()
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for MockChat {
    fn user_id(&self) -> Option<String> {
        self.user_id.lock().unwrap().clone()
    }

    fn user_name(&self) -> Option<String> {
        self.user_name.clone()
    }

    fn channel(&self, kind: &str, id: &str, options: ChannelOptions) -> Arc<dyn ChatChannel> {
        self.channel_requests
            .lock()
            .unwrap()
            .push((kind.to_string(), id.to_string()));
        let record = self
            .records
            .lock()
            .unwrap()
            .entry((kind.to_string(), id.to_string()))
            .or_default()
            .clone();
        Arc::new(MockChannel {
            kind: kind.to_string(),
            id: id.to_string(),
            options,
            record,
            fail_create: self.fail_create.lock().unwrap().clone(),
            fail_send: self.fail_send.lock().unwrap().clone(),
        })
    }

    async fn disconnect_user(&self) -> Result<(), ProviderError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(ProviderError::Chat("disconnect rejected".to_string()));
        }
        Ok(())
    }
}

// ── Whiteboard, navigation, browser ──────────────────────────────────────

pub struct MockProvisioner {
    pub calls: AtomicUsize,
    pub names: Mutex<Vec<String>>,
    pub result: Mutex<Result<String, ProviderError>>,
    /// When set, provisioning waits for `release` after signalling `entered`.
    pub gated: bool,
    pub entered: Notify,
    pub release: Notify,
}

impl MockProvisioner {
    pub fn returning(url: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            names: Mutex::new(Vec::new()),
            result: Mutex::new(Ok(url.to_string())),
            gated: false,
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn failing(message: &str) -> Self {
        let provisioner = Self::returning("");
        *provisioner.result.lock().unwrap() = Err(ProviderError::Provisioning(message.to_string()));
        provisioner
    }

    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn succeed_with(&self, url: &str) {
        *self.result.lock().unwrap() = Ok(url.to_string());
    }
}

#[async_trait]
impl SessionProvisioner for MockProvisioner {
    async fn provision(&self, display_name: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(display_name.to_string());
        if self.gated {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.result.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockNavigator {
    pub paths: Mutex<Vec<String>>,
}

impl MockNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for MockNavigator {
    fn navigate_to(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

#[derive(Default)]
pub struct MockOpener {
    pub urls: Mutex<Vec<String>>,
}

impl MockOpener {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl UrlOpener for MockOpener {
    fn open(&self, url: &str) {
        self.urls.lock().unwrap().push(url.to_string());
    }
}

/// Mocks wired together for a room.
pub struct Fixture {
    pub call: Arc<MockCall>,
    pub chat: Arc<MockChat>,
    pub provisioner: Arc<MockProvisioner>,
    pub navigator: Arc<MockNavigator>,
    pub opener: Arc<MockOpener>,
}

impl Fixture {
    pub fn new(call: MockCall, chat: MockChat, provisioner: MockProvisioner) -> Self {
        Self {
            call: Arc::new(call),
            chat: Arc::new(chat),
            provisioner: Arc::new(provisioner),
            navigator: Arc::new(MockNavigator::default()),
            opener: Arc::new(MockOpener::default()),
        }
    }

    pub fn joined() -> Self {
        Self::new(
            MockCall::new(CallingState::Joined),
            MockChat::new("test-user-id", "Test User"),
            MockProvisioner::returning("https://excalidraw.com/#room=123,abc"),
        )
    }

    pub fn collaborators(&self) -> RoomCollaborators {
        RoomCollaborators {
            navigator: self.navigator.clone(),
            provisioner: self.provisioner.clone(),
            opener: self.opener.clone(),
        }
    }

    pub fn call_handle(&self) -> Option<Arc<dyn CallHandle>> {
        Some(self.call.clone())
    }

    pub fn chat_client(&self) -> Option<Arc<dyn ChatClient>> {
        Some(self.chat.clone())
    }
}
