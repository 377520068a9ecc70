mod api;
mod health;
mod ws;

pub use api::{api_router, IndicatorResponse, ParamsOverride};
pub use health::health_router;
pub use ws::ws_router;
