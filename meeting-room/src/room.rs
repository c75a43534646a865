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

//! In-room session coordinator.
//!
//! [MeetingRoom] owns the room's view state (layout, side panels) and binds
//! user actions to call, chat and navigation side effects. The call handle
//! and chat client are injected and only ever borrowed; the room never
//! creates or destroys them.

use meeting_room_types::{LayoutMode, Panel, RoomRoute};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

use crate::chat::{BindOutcome, ChatBinder};
use crate::config::RoomConfig;
use crate::error::RoomError;
use crate::events::{RoomEvent, RoomEventBus};
use crate::providers::{CallHandle, ChatClient, Navigator, SessionProvisioner, UrlOpener};
use crate::whiteboard::{LaunchOutcome, WhiteboardLauncher};

/// Collaborators the room delegates to besides the call and chat providers.
#[derive(Clone)]
pub struct RoomCollaborators {
    pub navigator: Arc<dyn Navigator>,
    pub provisioner: Arc<dyn SessionProvisioner>,
    pub opener: Arc<dyn UrlOpener>,
}

/// Everything the in-call control bar needs to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomControls {
    pub layout: LayoutMode,
    pub participants_open: bool,
    pub chat_open: bool,
    /// Whiteboard launch in progress, the launch control is disabled.
    pub whiteboard_busy: bool,
    /// False in personal rooms and for participants who do not own the call.
    pub end_call_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomScreen {
    /// The call is not joined yet. Only a loading indicator is shown.
    Loading,
    InCall(RoomControls),
}

#[derive(Debug, Default)]
struct RoomView {
    layout: LayoutMode,
    participants_open: bool,
    chat_open: bool,
}

#[derive(Default)]
struct ChatState {
    client: Option<Arc<dyn ChatClient>>,
    /// Client instance the meeting channel was last bound with.
    bound_with: Option<Arc<dyn ChatClient>>,
}

fn same_client(a: &Arc<dyn ChatClient>, b: &Arc<dyn ChatClient>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MeetingRoom {
    route: RoomRoute,
    call: Arc<dyn CallHandle>,
    navigator: Arc<dyn Navigator>,
    home_path: String,
    view: Mutex<RoomView>,
    chat: Mutex<ChatState>,
    binder: ChatBinder,
    whiteboard: WhiteboardLauncher,
    events: RoomEventBus,
}

impl MeetingRoom {
    pub fn new(
        call: Option<Arc<dyn CallHandle>>,
        chat: Option<Arc<dyn ChatClient>>,
        collaborators: RoomCollaborators,
        route: RoomRoute,
        config: &RoomConfig,
        events: RoomEventBus,
    ) -> Result<Self, RoomError> {
        let call = call.ok_or(RoomError::NoActiveCall)?;
        Ok(Self {
            route,
            call,
            navigator: collaborators.navigator,
            home_path: config.home_path.clone(),
            view: Mutex::new(RoomView::default()),
            chat: Mutex::new(ChatState {
                client: chat,
                bound_with: None,
            }),
            binder: ChatBinder::new(config.channel_kind.clone(), events.clone()),
            whiteboard: WhiteboardLauncher::new(
                collaborators.provisioner,
                collaborators.opener,
                config.channel_kind.clone(),
                events.clone(),
            ),
            events,
        })
    }

    pub fn route(&self) -> &RoomRoute {
        &self.route
    }

    pub fn subscribe(&self) -> async_broadcast::Receiver<RoomEvent> {
        self.events.subscribe()
    }

    pub fn screen(&self) -> RoomScreen {
        if !self.call.calling_state().is_joined() {
            return RoomScreen::Loading;
        }
        let view = lock(&self.view);
        RoomScreen::InCall(RoomControls {
            layout: view.layout,
            participants_open: view.participants_open,
            chat_open: view.chat_open,
            whiteboard_busy: self.whiteboard.is_launching(),
            end_call_available: self.end_call_available(),
        })
    }

    pub fn layout(&self) -> LayoutMode {
        lock(&self.view).layout
    }

    pub fn is_panel_open(&self, panel: Panel) -> bool {
        let view = lock(&self.view);
        match panel {
            Panel::Participants => view.participants_open,
            Panel::Chat => view.chat_open,
        }
    }

    /// Re-render hook, called on mount and on every provider state change.
    ///
    /// Binds the meeting chat once the call is joined, and again whenever the
    /// chat client instance changed since the last bind. Returns `None` when
    /// nothing had to be done.
    pub async fn sync(&self) -> Option<BindOutcome> {
        if !self.call.calling_state().is_joined() {
            return None;
        }
        let client = {
            let mut chat = lock(&self.chat);
            let client = chat.client.clone()?;
            if let Some(bound) = &chat.bound_with {
                if same_client(bound, &client) {
                    return None;
                }
            }
            chat.bound_with = Some(client.clone());
            client
        };

        let outcome = self.binder.bind(&client, &self.route.meeting_id).await;
        if outcome == BindOutcome::Skipped {
            // Nothing was attempted; a later sync may find the user connected.
            let mut chat = lock(&self.chat);
            if chat.bound_with.as_ref().is_some_and(|b| same_client(b, &client)) {
                chat.bound_with = None;
            }
        }
        Some(outcome)
    }

    /// Swap in a new chat client instance, e.g. after a reconnect.
    pub fn replace_chat_client(&self, client: Option<Arc<dyn ChatClient>>) {
        lock(&self.chat).client = client;
    }

    fn chat_client(&self) -> Option<Arc<dyn ChatClient>> {
        lock(&self.chat).client.clone()
    }

    pub fn select_layout(&self, layout: LayoutMode) {
        lock(&self.view).layout = layout;
        self.events.emit(RoomEvent::LayoutChanged(layout));
    }

    pub fn toggle_panel(&self, panel: Panel) {
        let open = {
            let mut view = lock(&self.view);
            let flag = match panel {
                Panel::Participants => &mut view.participants_open,
                Panel::Chat => &mut view.chat_open,
            };
            *flag = !*flag;
            *flag
        };
        self.events.emit(RoomEvent::PanelToggled { panel, open });
    }

    /// Close affordance inside a panel.
    pub fn close_panel(&self, panel: Panel) {
        self.set_panel(panel, false);
    }

    fn set_panel(&self, panel: Panel, open: bool) {
        {
            let mut view = lock(&self.view);
            match panel {
                Panel::Participants => view.participants_open = open,
                Panel::Chat => view.chat_open = open,
            }
        }
        self.events.emit(RoomEvent::PanelToggled { panel, open });
    }

    pub fn is_launching_whiteboard(&self) -> bool {
        self.whiteboard.is_launching()
    }

    /// Provision a whiteboard session and share it in the meeting chat.
    pub async fn launch_whiteboard(&self) -> LaunchOutcome {
        let Some(chat) = self.chat_client() else {
            return LaunchOutcome::Skipped;
        };
        self.whiteboard.launch(&chat, &self.route.meeting_id).await
    }

    pub fn end_call_available(&self) -> bool {
        !self.route.personal && self.call.is_owned_by_local_user()
    }

    /// Leave the room and go home.
    ///
    /// Chat disconnect and call leave run in the background and their
    /// failures are only logged. Navigation happens immediately and never
    /// waits on them. Outside a tokio runtime the teardown is skipped and
    /// `None` is returned.
    pub fn leave(&self) -> Option<JoinHandle<()>> {
        let teardown = self.spawn_teardown(true);
        self.navigator.navigate_to(&self.home_path);
        self.events.emit(RoomEvent::Left);
        teardown
    }

    /// End the call for every participant, then leave.
    ///
    /// Not offered in personal rooms or to participants who do not own the
    /// call. A provider failure to end the call is logged and the user still
    /// leaves.
    pub async fn end_call_for_everyone(&self) -> Result<Option<JoinHandle<()>>, RoomError> {
        if self.route.personal {
            return Err(RoomError::EndCallUnavailable(
                "personal rooms stay open after the host leaves",
            ));
        }
        if !self.call.is_owned_by_local_user() {
            return Err(RoomError::EndCallUnavailable(
                "only the call owner can end it for everyone",
            ));
        }

        match self.call.end_call().await {
            Ok(()) => self.events.emit(RoomEvent::CallEnded),
            Err(e) => log::error!("Failed to end call {}: {e}", self.route.meeting_id),
        }

        let teardown = self.spawn_teardown(false);
        self.navigator.navigate_to(&self.home_path);
        self.events.emit(RoomEvent::Left);
        Ok(teardown)
    }

    fn spawn_teardown(&self, leave_call: bool) -> Option<JoinHandle<()>> {
        let meeting_id = self.route.meeting_id.clone();
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Skipping teardown of {meeting_id}, no async runtime: {e}");
                return None;
            }
        };
        let chat = self.chat_client();
        let call = self.call.clone();

        Some(runtime.spawn(async move {
            let disconnect = async {
                if let Some(chat) = chat {
                    if let Err(e) = chat.disconnect_user().await {
                        log::warn!("Chat disconnect failed while leaving {meeting_id}: {e}");
                    }
                }
            };
            let leave = async {
                if leave_call {
                    if let Err(e) = call.leave().await {
                        log::warn!("Call leave failed for {meeting_id}: {e}");
                    }
                }
            };
            futures::join!(disconnect, leave);
        }))
    }
}
