use web_sys::{HtmlVideoElement, MediaStream};
use yew::prelude::*;

use crate::camera::{CameraConfig, CameraError, CameraSession};
use crate::media;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStatus {
    Idle,
    /// Waiting for the user to grant camera access.
    Starting,
    Active,
}

pub struct UseCameraHandle {
    /// Must be attached to the preview `<video>`, which has to stay mounted
    /// while the camera is starting.
    pub video_ref: NodeRef,
    pub status: CameraStatus,
    pub start: Callback<()>,
    /// Capture the current frame and release the camera.
    pub capture: Callback<()>,
    /// Release the camera without capturing.
    pub stop: Callback<()>,
}

/// Camera access scoped to the calling component.
///
/// The stream is released on capture, on `stop`, and when the component
/// unmounts. A grant that arrives after any of those is stopped on arrival.
/// Failed requests and captures are passed to `on_error`.
#[hook]
pub fn use_camera(
    config: CameraConfig,
    on_capture: Callback<String>,
    on_error: Callback<CameraError>,
) -> UseCameraHandle {
    let session = use_mut_ref(CameraSession::<MediaStream>::new);
    let video_ref = use_node_ref();
    let status = use_state(|| CameraStatus::Idle);

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            move || {
                if session.borrow_mut().release() {
                    tracing::info!("Camera released on teardown");
                }
            }
        });
    }

    let start = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let status = status.clone();
        let on_error = on_error.clone();
        let config = config.clone();

        Callback::from(move |_| {
            let ticket = session.borrow_mut().request();
            status.set(CameraStatus::Starting);
            tracing::info!("Requesting camera access");

            let session = session.clone();
            let video_ref = video_ref.clone();
            let status = status.clone();
            let on_error = on_error.clone();
            let config = config.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match media::request_camera(&config).await {
                    Ok(stream) => {
                        if !session.borrow_mut().grant(ticket, stream.clone()) {
                            return;
                        }
                        tracing::info!("Camera access granted");
                        if let Some(video) = video_ref.cast::<HtmlVideoElement>()
                        {
                            media::attach_stream(&video, Some(&stream));
                        }
                        status.set(CameraStatus::Active);
                    }
                    Err(err) => {
                        if !session.borrow_mut().deny(ticket) {
                            return;
                        }
                        tracing::warn!("Camera access failed: {}", err);
                        status.set(CameraStatus::Idle);
                        on_error.emit(err);
                    }
                }
            });
        })
    };

    let stop = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let status = status.clone();

        Callback::from(move |_| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                media::attach_stream(&video, None);
            }
            let mut session = session.borrow_mut();
            if session.is_requesting() {
                tracing::info!("Camera request cancelled before access was granted");
            }
            session.release();
            status.set(CameraStatus::Idle);
        })
    };

    let capture = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let status = status.clone();

        Callback::from(move |_| {
            let Some(video) = video_ref.cast::<HtmlVideoElement>() else {
                return;
            };

            let result = session.borrow_mut().capture(|_| {
                media::capture_frame(&video, config.jpeg_quality)
            });
            media::attach_stream(&video, None);
            status.set(CameraStatus::Idle);

            match result {
                Some(Ok(image)) => {
                    tracing::info!(
                        "Captured {}x{} photo",
                        video.video_width(),
                        video.video_height()
                    );
                    on_capture.emit(image);
                }
                Some(Err(err)) => {
                    tracing::warn!("Photo capture failed: {}", err);
                    on_error.emit(err);
                }
                None => {}
            }
        })
    };

    UseCameraHandle {
        video_ref,
        status: *status,
        start,
        capture,
        stop,
    }
}
