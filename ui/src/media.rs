//! Browser media glue: camera streams, frame capture and image file reads.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use js_sys::{Object, Reflect, Uint8Array};
use payloads::MAX_IMAGE_SIZE;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, DomException, Event, File, FileReader,
    HtmlCanvasElement, HtmlVideoElement, MediaStream, MediaStreamConstraints,
    MediaStreamTrack,
};

use crate::camera::{CameraConfig, CameraError, CameraStream};
use crate::utils::data_uri;

const BYTES_PER_MB: f64 = 1_048_576.0;

fn megabytes(bytes: &usize) -> f64 {
    *bytes as f64 / BYTES_PER_MB
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileReadError {
    #[error("Please choose an image file (got \"{0}\").")]
    NotAnImage(String),
    #[error(
        "File is too large ({:.1}MB). Maximum size is {:.0}MB.",
        megabytes(.0),
        megabytes(&MAX_IMAGE_SIZE)
    )]
    TooLarge(usize),
    #[error("Could not read the file: {0}")]
    Read(String),
}

impl CameraStream for MediaStream {
    fn stop(&self) {
        for track in self.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

fn camera_error(err: JsValue) -> CameraError {
    match err.dyn_ref::<DomException>() {
        Some(exception) => CameraError::from_dom_exception(
            &exception.name(),
            &exception.message(),
        ),
        None => CameraError::Device(
            err.as_string().unwrap_or_else(|| format!("{err:?}")),
        ),
    }
}

fn capture_error(err: JsValue) -> CameraError {
    CameraError::Capture(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Ask the browser for a video stream. Suspends until the user grants or
/// denies access.
pub async fn request_camera(
    config: &CameraConfig,
) -> Result<MediaStream, CameraError> {
    let media_devices = web_sys::window()
        .ok_or(CameraError::Unsupported)?
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;
    // Absent outside secure contexts
    if media_devices.is_undefined() {
        return Err(CameraError::Unsupported);
    }

    let video = Object::new();
    Reflect::set(
        &video,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str(config.facing_mode),
    )
    .map_err(camera_error)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = media_devices
        .get_user_media_with_constraints(&constraints)
        .map_err(camera_error)?;
    let stream = JsFuture::from(promise).await.map_err(camera_error)?;

    stream.dyn_into::<MediaStream>().map_err(|_| {
        CameraError::Device("unexpected media stream type".to_string())
    })
}

/// Bind a stream to the preview element, or detach it with `None`.
pub fn attach_stream(video: &HtmlVideoElement, stream: Option<&MediaStream>) {
    video.set_src_object(stream);
}

/// Rasterize the current video frame at its native size and encode it as a
/// JPEG data URI.
pub fn capture_frame(
    video: &HtmlVideoElement,
    quality: f64,
) -> Result<String, CameraError> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err(CameraError::NoFrame);
    }

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(CameraError::Unsupported)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(capture_error)?
        .dyn_into()
        .map_err(|_| CameraError::Capture("canvas unavailable".to_string()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(capture_error)?
        .ok_or_else(|| {
            CameraError::Capture("2d context unavailable".to_string())
        })?
        .dyn_into()
        .map_err(|_| {
            CameraError::Capture("2d context unavailable".to_string())
        })?;

    context
        .draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(capture_error)?;

    canvas
        .to_data_url_with_type_and_encoder_options(
            "image/jpeg",
            &JsValue::from_f64(quality),
        )
        .map_err(capture_error)
}

/// Reject files that are not images or exceed [`MAX_IMAGE_SIZE`].
pub fn check_image_file(
    mime_type: &str,
    size: usize,
) -> Result<(), FileReadError> {
    if !data_uri::is_image(mime_type) {
        return Err(FileReadError::NotAnImage(mime_type.to_string()));
    }
    if size > MAX_IMAGE_SIZE {
        return Err(FileReadError::TooLarge(size));
    }
    Ok(())
}

fn read_error(err: JsValue) -> FileReadError {
    FileReadError::Read(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Read an image file and encode it as a data URI.
pub async fn read_image_file(file: &File) -> Result<String, FileReadError> {
    let mime_type = file.type_();
    check_image_file(&mime_type, file.size() as usize)?;

    let reader = FileReader::new().map_err(read_error)?;
    let (tx, rx) = oneshot::channel::<Result<(), FileReadError>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let onload = {
        let tx = tx.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        })
    };
    let onerror = {
        let tx = tx.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(FileReadError::Read(
                    "the browser could not read the file".to_string(),
                )));
            }
        })
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    reader.read_as_array_buffer(file).map_err(read_error)?;

    let outcome = rx
        .await
        .map_err(|_| FileReadError::Read("read was interrupted".to_string()));
    reader.set_onload(None);
    reader.set_onerror(None);
    outcome??;

    let result = reader.result().map_err(read_error)?;
    let data = Uint8Array::new(&result).to_vec();
    tracing::debug!("Read image file {} ({} bytes)", file.name(), data.len());

    Ok(data_uri::encode(&mime_type, &data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_image_file() {
        assert_eq!(check_image_file("image/png", 1024), Ok(()));
        assert_eq!(check_image_file("image/jpeg", MAX_IMAGE_SIZE), Ok(()));
        assert_eq!(
            check_image_file("image/jpeg", MAX_IMAGE_SIZE + 1),
            Err(FileReadError::TooLarge(MAX_IMAGE_SIZE + 1))
        );
        assert_eq!(
            check_image_file("text/plain", 10),
            Err(FileReadError::NotAnImage("text/plain".to_string()))
        );
    }

    #[test]
    fn test_too_large_message() {
        let err = FileReadError::TooLarge(6 * 1_048_576);
        assert_eq!(
            err.to_string(),
            "File is too large (6.0MB). Maximum size is 5MB."
        );
    }
}
