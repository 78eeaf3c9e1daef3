use crate::core::id::FactoryId;

use super::Room;

/// Room search on the first wizard step: an optional factory plus free text matched
/// against room name, room number and factory name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomQuery {
    pub factory: Option<FactoryId>,
    pub text: String,
}

impl RoomQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_factory(factory: impl Into<FactoryId>) -> Self {
        Self {
            factory: Some(factory.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn matches(&self, room: &Room) -> bool {
        if self.factory.as_ref().is_some_and(|factory| factory != &room.factory_id) {
            return false;
        }

        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let haystack = format!("{} {} {}", room.room_name, room.room_no, room.factory_name).to_lowercase();
        haystack.contains(&needle)
    }

    pub fn filter<'a>(&self, rooms: &'a [Room]) -> Vec<&'a Room> {
        rooms.iter().filter(|room| self.matches(room)).collect()
    }
}
