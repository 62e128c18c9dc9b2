//! Product image input: file upload or a photo from the device camera.

use std::rc::Rc;

use payloads::IMAGE_ACCEPT;
use web_sys::{Event, HtmlInputElement};
use yew::prelude::*;

use crate::camera::{CameraConfig, CameraError};
use crate::hooks::{CameraStatus, use_camera, use_mounted};
use crate::media::{self, FileReadError};
use crate::utils::data_uri;

/// The message shown above the image input. Only the most recent failure is
/// kept, and starting a new upload or camera request clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageNotice(Option<String>);

pub enum NoticeAction {
    Clear,
    File(FileReadError),
    Camera(CameraError),
}

impl ImageNotice {
    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Reducible for ImageNotice {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(match action {
            NoticeAction::Clear => Self(None),
            NoticeAction::File(err) => Self(Some(err.to_string())),
            NoticeAction::Camera(err) => Self(Some(err.to_string())),
        })
    }
}

fn log_image(source: &str, image: &str) {
    if let Some(mime_type) = data_uri::mime_type(image)
        && let Some(len) = data_uri::decoded_len(image)
    {
        tracing::debug!("{} {} image is {} bytes", source, mime_type, len);
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Current image as a data URI, empty when none is chosen.
    pub image: AttrValue,
    pub on_change: Callback<String>,
    pub on_clear: Callback<()>,
}

#[function_component]
pub fn ImageCapture(props: &Props) -> Html {
    let file_input_ref = use_node_ref();
    let notice = use_reducer(ImageNotice::default);
    let mounted = use_mounted();

    let on_capture = {
        let on_change = props.on_change.clone();
        Callback::from(move |image: String| {
            log_image("Captured", &image);
            on_change.emit(image);
        })
    };
    let on_camera_error = {
        let notice = notice.clone();
        Callback::from(move |err: CameraError| {
            notice.dispatch(NoticeAction::Camera(err))
        })
    };
    let camera =
        use_camera(CameraConfig::default(), on_capture, on_camera_error);

    let on_file_select = {
        let on_change = props.on_change.clone();
        let notice = notice.clone();
        let mounted = mounted.clone();

        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0))
            else {
                return;
            };
            // allow picking the same file again after removing it
            input.set_value("");
            notice.dispatch(NoticeAction::Clear);

            let on_change = on_change.clone();
            let notice = notice.clone();
            let mounted = mounted.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let result = media::read_image_file(&file).await;
                if !mounted.is_mounted() {
                    tracing::debug!("Dropping file read after modal closed");
                    return;
                }
                match result {
                    Ok(image) => {
                        log_image("Uploaded", &image);
                        on_change.emit(image);
                    }
                    Err(err) => {
                        tracing::warn!("Image upload failed: {}", err);
                        notice.dispatch(NoticeAction::File(err));
                    }
                }
            });
        })
    };

    let on_select_file = {
        let file_input_ref = file_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_start_camera = {
        let start = camera.start.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            notice.dispatch(NoticeAction::Clear);
            start.emit(());
        })
    };

    let on_remove = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    let camera_open = camera.status != CameraStatus::Idle;
    let error = notice.message().map(str::to_string);

    html! {
        <div class="space-y-3">
            <input
                ref={file_input_ref}
                type="file"
                accept={IMAGE_ACCEPT}
                onchange={on_file_select}
                class="hidden"
            />

            {if let Some(error) = error {
                html! {
                    <div class="p-3 rounded-md bg-red-50 dark:bg-red-900/20 border
                                border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    </div>
                }
            } else {
                html! {}
            }}

            // The video element stays mounted so a granted stream always has
            // somewhere to go.
            <div class={classes!(
                "space-y-2",
                (!camera_open).then_some("hidden")
            )}>
                <div class="aspect-video rounded-md overflow-hidden bg-black">
                    <video
                        ref={camera.video_ref.clone()}
                        autoplay={true}
                        playsinline={true}
                        muted={true}
                        class="w-full h-full object-cover"
                    />
                </div>
                <div class="flex gap-2">
                    <button
                        type="button"
                        onclick={camera.capture.reform(|_: MouseEvent| ())}
                        disabled={camera.status != CameraStatus::Active}
                        class="flex-1 px-3 py-2 text-sm font-medium text-white
                               bg-neutral-900 hover:bg-neutral-800
                               dark:bg-neutral-100 dark:text-neutral-900
                               dark:hover:bg-neutral-200 rounded-md
                               disabled:opacity-50"
                    >
                        {if camera.status == CameraStatus::Starting {
                            "Starting camera..."
                        } else {
                            "Take Photo"
                        }}
                    </button>
                    <button
                        type="button"
                        onclick={camera.stop.reform(|_: MouseEvent| ())}
                        class="px-3 py-2 text-sm font-medium rounded
                               text-neutral-600 dark:text-neutral-400
                               hover:text-neutral-800 dark:hover:text-neutral-200
                               hover:bg-neutral-100 dark:hover:bg-neutral-700"
                    >
                        {"Cancel"}
                    </button>
                </div>
            </div>

            {if camera_open {
                html! {}
            } else if !props.image.is_empty() {
                html! {
                    <div class="flex items-start gap-4">
                        <div class="w-32 h-32 rounded-md overflow-hidden
                                    bg-neutral-100 dark:bg-neutral-700 flex-shrink-0">
                            <img
                                src={props.image.clone()}
                                alt="Product preview"
                                class="w-full h-full object-cover"
                            />
                        </div>
                        <button
                            type="button"
                            onclick={on_remove}
                            class="px-3 py-2 text-sm font-medium rounded
                                   text-neutral-600 dark:text-neutral-400
                                   hover:text-neutral-800 dark:hover:text-neutral-200
                                   hover:bg-neutral-100 dark:hover:bg-neutral-700"
                        >
                            {"Remove"}
                        </button>
                    </div>
                }
            } else {
                html! {
                    <div class="grid grid-cols-2 gap-3">
                        <button
                            type="button"
                            onclick={on_select_file}
                            class="px-4 py-4 border-2 border-dashed
                                   border-neutral-300 dark:border-neutral-600
                                   rounded-lg text-center hover:border-neutral-400
                                   dark:hover:border-neutral-500 transition-colors"
                        >
                            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                                {"Upload Image"}
                            </p>
                        </button>
                        <button
                            type="button"
                            onclick={on_start_camera}
                            class="px-4 py-4 border-2 border-dashed
                                   border-neutral-300 dark:border-neutral-600
                                   rounded-lg text-center hover:border-neutral-400
                                   dark:hover:border-neutral-500 transition-colors"
                        >
                            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                                {"Take Photo"}
                            </p>
                        </button>
                    </div>
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_image_error_is_shown() {
        let notice = Rc::new(ImageNotice::default())
            .reduce(NoticeAction::Camera(CameraError::PermissionDenied));
        assert_eq!(
            notice.message(),
            Some(
                "Camera access was denied. Please allow camera access and try again."
            )
        );

        // a file picked after a denied camera request reports its own failure
        let notice = notice
            .reduce(NoticeAction::Clear)
            .reduce(NoticeAction::File(FileReadError::TooLarge(6 * 1024 * 1024)));
        assert_eq!(
            notice.message(),
            Some("File is too large (6.0MB). Maximum size is 5MB.")
        );

        let notice = notice
            .reduce(NoticeAction::Camera(CameraError::NoDevice))
            .reduce(NoticeAction::File(FileReadError::NotAnImage(
                "text/plain".into(),
            )));
        assert_eq!(
            notice.message(),
            Some("Please choose an image file (got \"text/plain\").")
        );
    }

    #[test]
    fn test_new_attempt_clears_stale_error() {
        let notice = Rc::new(ImageNotice::default())
            .reduce(NoticeAction::Camera(CameraError::PermissionDenied))
            .reduce(NoticeAction::Clear);
        assert_eq!(notice.message(), None);
        assert_eq!(*notice, ImageNotice::default());
    }
}
