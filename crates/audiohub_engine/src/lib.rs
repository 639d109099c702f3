//! AudioHub engine: backend calls and the progress push channel.
mod dispatch;
mod endpoint;
mod frame;
mod gateway;
mod push;
mod types;
mod wire;

pub use dispatch::{Dispatcher, EventKind, PushEvent};
pub use endpoint::{parse_base_url, push_endpoint, EndpointError, PUSH_PATH};
pub use frame::{decode_frame, FrameError};
pub use gateway::{
    Gateway, GatewaySettings, ReqwestGateway, DELETE_PATH, DOWNLOAD_PATH, FILES_PATH, SEARCH_PATH,
    SUGGESTIONS_PATH,
};
pub use push::{PushChannel, PushSettings, RECONNECT_DELAY};
pub use types::{FailureKind, GatewayError};
