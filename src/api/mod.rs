// src/api/mod.rs

pub mod graphql;
pub mod health;

use crate::config::Config;
use crate::schema::GatewaySchema;

// AppState definition
#[derive(Clone)]
pub struct AppState {
    pub schema: GatewaySchema,
    pub config: Config,
}
