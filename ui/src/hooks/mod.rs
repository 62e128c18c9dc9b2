pub mod use_camera;
pub mod use_mounted;

pub use use_camera::{CameraStatus, UseCameraHandle, use_camera};
pub use use_mounted::{MountedFlag, use_mounted};
