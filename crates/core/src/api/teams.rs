use serde_json::{json, Map, Value as Json};

use super::{Attributes, PersonRef, SparkApi};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::pagination::Resources;
use crate::resources::{Team, TeamMembership};
use crate::transport::{QueryParams, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamMembershipParams {
    pub team_id: String,
    pub person: PersonRef,
    pub is_moderator: bool,
}

impl<T: Transport> SparkApi<T> {
    pub fn list_teams(&self, max: Option<u32>) -> Resources<&T, Team> {
        self.list(Endpoint::Teams, QueryParams::new().with_opt("max", max))
    }

    pub fn create_team(&self, name: &str) -> Result<Team> {
        self.create(Endpoint::Teams, json!({ "name": name }))
    }

    pub fn get_team(&self, id: &str) -> Result<Team> {
        self.get(&Endpoint::Teams.item_path(id)?, QueryParams::new())
    }

    pub fn update_team(&self, id: &str, attributes: Attributes) -> Result<Team> {
        self.update(Endpoint::Teams, id, attributes)
    }

    pub fn delete_team(&self, id: &str) -> Result<()> {
        self.delete(Endpoint::Teams, id)
    }

    pub fn list_team_memberships(
        &self,
        team_id: &str,
        max: Option<u32>,
    ) -> Resources<&T, TeamMembership> {
        let query = QueryParams::new()
            .with("teamId", team_id)
            .with_opt("max", max);
        self.list(Endpoint::TeamMemberships, query)
    }

    pub fn create_team_membership(
        &self,
        params: &CreateTeamMembershipParams,
    ) -> Result<TeamMembership> {
        let mut payload = Map::new();
        payload.insert("teamId".to_string(), Json::from(params.team_id.as_str()));
        payload.insert("isModerator".to_string(), Json::from(params.is_moderator));
        params.person.insert_into(&mut payload);
        self.create(Endpoint::TeamMemberships, Json::Object(payload))
    }

    pub fn get_team_membership(&self, id: &str) -> Result<TeamMembership> {
        self.get(&Endpoint::TeamMemberships.item_path(id)?, QueryParams::new())
    }

    pub fn update_team_membership(
        &self,
        id: &str,
        attributes: Attributes,
    ) -> Result<TeamMembership> {
        self.update(Endpoint::TeamMemberships, id, attributes)
    }

    pub fn delete_team_membership(&self, id: &str) -> Result<()> {
        self.delete(Endpoint::TeamMemberships, id)
    }
}
