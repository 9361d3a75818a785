use serde_json::json;

use super::{Attributes, SparkApi};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::pagination::Resources;
use crate::resources::Room;
use crate::transport::{QueryParams, Transport};

impl<T: Transport> SparkApi<T> {
    /// List rooms the authenticated user belongs to.
    pub fn list_rooms(&self, show_sip_address: bool, max: Option<u32>) -> Resources<&T, Room> {
        let query = QueryParams::new()
            .with("showSipAddress", show_sip_address)
            .with_opt("max", max);
        self.list(Endpoint::Rooms, query)
    }

    pub fn create_room(&self, title: &str) -> Result<Room> {
        self.create(Endpoint::Rooms, json!({ "title": title }))
    }

    /// Fetch one room. `showSipAddress` is only sent when requested.
    pub fn get_room(&self, id: &str, show_sip_address: bool) -> Result<Room> {
        let query = QueryParams::new().with_opt("showSipAddress", show_sip_address.then_some(true));
        self.get(&Endpoint::Rooms.item_path(id)?, query)
    }

    pub fn update_room(&self, id: &str, attributes: Attributes) -> Result<Room> {
        self.update(Endpoint::Rooms, id, attributes)
    }

    pub fn delete_room(&self, id: &str) -> Result<()> {
        self.delete(Endpoint::Rooms, id)
    }
}
