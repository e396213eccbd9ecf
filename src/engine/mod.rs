// engine module — media server backend engine

mod interface;
pub mod server;
pub mod stub;

pub use interface::{Engine, EngineHandle, Event, Request};
pub use server::ServerEngine;
pub use stub::StubEngine;
