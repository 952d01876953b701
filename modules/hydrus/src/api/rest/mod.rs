pub mod auth;
pub mod context;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod shaper;
pub mod state;

pub use context::RequestContext;
pub use error::DispatchError;
pub use routes::router;
pub use shaper::{Reply, ResponseShaper};
pub use state::AppState;
