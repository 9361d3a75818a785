use serde_json::{Map, Value as Json};

use super::{Attributes, PersonRef, SparkApi};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::pagination::Resources;
use crate::resources::Membership;
use crate::transport::{QueryParams, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMembershipsParams {
    pub room_id: String,
    /// Restrict the listing to one person.
    pub person: Option<PersonRef>,
    pub max: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMembershipParams {
    pub room_id: String,
    pub person: PersonRef,
    pub is_moderator: bool,
}

impl<T: Transport> SparkApi<T> {
    pub fn list_memberships(&self, params: &ListMembershipsParams) -> Resources<&T, Membership> {
        let mut query = QueryParams::new().with("roomId", &params.room_id);
        query = match &params.person {
            Some(PersonRef::Id(id)) => query.with("personId", id),
            Some(PersonRef::Email(email)) => query.with("personEmail", email),
            None => query,
        };
        self.list(Endpoint::Memberships, query.with_opt("max", params.max))
    }

    pub fn create_membership(&self, params: &CreateMembershipParams) -> Result<Membership> {
        let mut payload = Map::new();
        payload.insert("roomId".to_string(), Json::from(params.room_id.as_str()));
        payload.insert("isModerator".to_string(), Json::from(params.is_moderator));
        params.person.insert_into(&mut payload);
        self.create(Endpoint::Memberships, Json::Object(payload))
    }

    pub fn get_membership(&self, id: &str) -> Result<Membership> {
        self.get(&Endpoint::Memberships.item_path(id)?, QueryParams::new())
    }

    pub fn update_membership(&self, id: &str, attributes: Attributes) -> Result<Membership> {
        self.update(Endpoint::Memberships, id, attributes)
    }

    pub fn delete_membership(&self, id: &str) -> Result<()> {
        self.delete(Endpoint::Memberships, id)
    }
}
