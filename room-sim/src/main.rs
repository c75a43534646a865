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

mod config;
mod providers;

use chrono::{Duration, Utc};
use clap::Parser;
use meeting_room::meeting_room_types::{CallSchedule, Panel, RoomRoute};
use meeting_room::{
    CallHandle, ChatClient, CommandProvisioner, MeetingSession, RoomCollaborators, RoomScreen,
    SessionProvisioner, SessionScreen,
};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

use config::SimOptions;
use providers::{FakeProvisioner, LogNavigator, LogOpener, SimCall, SimChat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;

    let opts = SimOptions::parse();
    let config = opts.room_config()?;
    let (path, query) = opts.route_parts();
    let route = RoomRoute::parse(path, query)?;

    let now = Utc::now();
    let schedule = CallSchedule::new(
        opts.starts_in_secs.map(|secs| now + Duration::seconds(secs)),
        opts.ended.then_some(now),
    );

    let provisioner: Arc<dyn SessionProvisioner> = match &config.whiteboard {
        Some(command) => {
            info!("Using whiteboard script '{}'", command.program);
            Arc::new(CommandProvisioner::new(command.clone()))
        }
        None => Arc::new(FakeProvisioner),
    };
    let call: Arc<dyn CallHandle> = Arc::new(SimCall::new(schedule, opts.deny_camera));
    let chat: Arc<dyn ChatClient> = Arc::new(SimChat::new(&opts.user_id, &opts.user_name));

    let session = MeetingSession::new(
        Some(call.clone()),
        Some(chat),
        RoomCollaborators {
            navigator: Arc::new(LogNavigator),
            provisioner,
            opener: Arc::new(LogOpener),
        },
        route,
        config,
    )?;

    let mut events = session.subscribe();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!("room event: {event:?}");
        }
    });

    session.mount().await;
    match session.screen(Utc::now()) {
        SessionScreen::NotStarted { message, .. } => {
            warn!("{message}");
            return Ok(());
        }
        SessionScreen::Ended { message, icon_url } => {
            warn!("{message} [{icon_url}]");
            return Ok(());
        }
        screen => info!("setup screen: {screen:?}"),
    }

    if opts.mic_cam_off {
        session.setup().set_mic_cam_disabled(true).await;
    }

    let Some(join) = session.join(Utc::now()).await else {
        anyhow::bail!("call is not joinable");
    };
    join.await?;

    let room = session.room();
    // Re-render after the provider reported the join.
    room.sync().await;
    info!("room screen: {:?}", room.screen());

    room.select_layout(opts.layout);
    room.toggle_panel(Panel::Participants);
    room.toggle_panel(Panel::Chat);
    room.close_panel(Panel::Participants);

    if !opts.no_whiteboard {
        let outcome = room.launch_whiteboard().await;
        info!("whiteboard: {outcome:?}");
    }

    if let RoomScreen::InCall(controls) = room.screen() {
        info!("controls before leaving: {controls:?}");
    }

    if let Some(teardown) = room.leave() {
        teardown.await?;
    }
    info!("calling state after leave: {}", call.calling_state());

    drop(session);
    event_log.abort();
    Ok(())
}
