//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod organizations;
pub mod router;
pub mod state;
pub mod team;
pub mod types;

pub use middleware::RequireUser;
pub use router::create_router_with_state;
pub use state::AppState;
