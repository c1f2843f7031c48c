pub mod body;
pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod controller;
pub mod driver;
pub mod error;
pub mod layers;
pub mod motion;
pub mod rapier;
pub mod rapier_world;
pub mod tooling;

pub use body::{BodyState, CharacterBody, SurfaceProbe};
pub use camera::{FollowCamera, ViewCamera, camera_relative};
pub use collision::{GroundResolution, GroundSampler};
pub use config::{LocomotionConfig, SlopeTieBreak};
pub use controller::{LocomotionController, TickReport};
pub use driver::{CharacterId, Director, InputFrame};
pub use error::LocomotionError;
pub use layers::{Layer, LayerMask};
pub use rapier::{ColliderShapeDef, WorldStaticDef, collider_from_def};
pub use rapier_world::{CharacterHandle, RapierProbe, RapierWorld};
pub use tooling::{ControllerSnapshot, DebugInfo, JumpArc, jump_arc, sanitize_config, slope_limit_fan};
