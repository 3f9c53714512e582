//! Client-side view controller
//!
//! - [`controller`]: the `Model`/`Event`/`Effect` state machine
//! - [`screen`]: pure rendering of a model into a `Frame`
//! - [`Gateway`] with [`HttpGateway`], [`MockGateway`] and [`FallbackGateway`]
//! - [`App`]: async driver executing effects

pub mod api_base;
pub mod controller;
pub mod error;
pub mod fallback_gateway;
pub mod gateway;
pub mod http_gateway;
pub mod mock_gateway;
pub mod runtime;
pub mod screen;

pub use api_base::BaseUrlSources;
pub use controller::{Effect, EffectKind, Event, Model, PollPolicy, Rejected, Remote, Session, Ticket, View};
pub use error::ClientError;
pub use fallback_gateway::FallbackGateway;
pub use gateway::{Credentials, Gateway, SignUpForm};
pub use http_gateway::HttpGateway;
pub use mock_gateway::{CallCounts, MockGateway};
pub use runtime::App;
pub use screen::{render, Action, Control, Frame, Navbar, Screen, Status};
