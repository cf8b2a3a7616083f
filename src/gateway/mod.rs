//! Gateways to the external generative service.
//!
//! Each gateway translates an internal request into an external call and the
//! response back into a typed result. The plan gateway is high-stakes and
//! propagates failures; the local gateway is best-effort and absorbs them.

pub mod local;
pub mod plan;

pub use local::{FALLBACK_ANSWER, LocalPlace, LocalResourceGateway, LocalResourcesResponse};
pub use plan::PlanGateway;
