use anyhow::Context as _;
use drying_control::{
    operation::Action,
    room::{ControlSnapshot, Room, RoomQuery},
    settings::{ControlSettings, Settings},
};

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Error reading configuration")?;

    settings.monitoring.init().context("Error initializing monitoring")?;

    let snapshot = ControlSnapshot::from_json_file(&settings.snapshot.path)?;

    tracing::info!(
        "Control board with {} rooms in {} factories and {} profiles",
        snapshot.rooms.len(),
        snapshot.factories.len(),
        snapshot.profiles.len()
    );

    if snapshot.factories.is_empty() {
        for room in &snapshot.rooms {
            log_room(room, &settings.control);
        }
    }

    for factory in &snapshot.factories {
        let rooms = RoomQuery::in_factory(factory.factory_id.clone()).filter(&snapshot.rooms);
        tracing::info!("{}: {} rooms", factory.factory_name, rooms.len());

        for room in rooms {
            log_room(room, &settings.control);
        }
    }

    for profile in &snapshot.profiles {
        tracing::info!(
            "Profile {} ({}): {} h, max {} °C",
            profile.profile_name,
            profile.profile_id,
            profile.total_hours,
            profile.max_temp_c()
        );
    }

    Ok(())
}

fn log_room(room: &Room, control: &ControlSettings) {
    let actions = control
        .eligibility
        .permitted_actions(room.state)
        .iter()
        .map(Action::code)
        .collect::<Vec<_>>();

    let progress = match (room.hour_now(), room.hour_total()) {
        (Some(now), Some(total)) => format!("hour {} of {}", now, total),
        _ => "-".to_string(),
    };

    tracing::info!(
        room = %room.room_id,
        state = %room.state,
        "{} | {} | {} | actions: {} | updated {}",
        room,
        room.state.label(),
        progress,
        if actions.is_empty() { "none".to_string() } else { actions.join(", ") },
        room.last_update_display()
    );
}
