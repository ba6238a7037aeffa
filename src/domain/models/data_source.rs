use serde::{Deserialize, Serialize};

use super::Address;

/// Template the host instantiates to follow a talent token's own events
pub const TALENT_TOKEN_TEMPLATE: &str = "TalentToken";

/// Request to the host to start tracking events of a newly created contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub address: Address,
    pub template: String,
    pub created_at_block: u64,
}

impl DataSource {
    pub fn talent_token(address: &Address, block_number: u64) -> Self {
        Self {
            address: *address,
            template: TALENT_TOKEN_TEMPLATE.to_string(),
            created_at_block: block_number,
        }
    }
}
