//! Camera resource lifecycle.
//!
//! A `CameraSession` owns at most one live stream. Access requests are
//! asynchronous, so each one gets a [`RequestTicket`]; a grant is only bound
//! if its ticket is still the pending one. Every way out of the active state
//! (capture, cancel, teardown, a new request, drop) goes through
//! [`CameraSession::release`], which stops the stream exactly once.

use payloads::CAPTURE_JPEG_QUALITY;

/// A live capture stream that can be stopped.
pub trait CameraStream {
    /// Stop every track of the stream.
    fn stop(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// `facingMode` constraint passed to the device request.
    pub facing_mode: &'static str,
    pub jpeg_quality: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing_mode: "environment",
            jpeg_quality: CAPTURE_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("Camera is not supported in this browser.")]
    Unsupported,
    #[error("Camera access was denied. Please allow camera access and try again.")]
    PermissionDenied,
    #[error("No camera was found on this device.")]
    NoDevice,
    #[error("The camera is already in use by another application.")]
    Busy,
    #[error("Could not access the camera: {0}")]
    Device(String),
    #[error("The camera has not produced a picture yet. Please try again.")]
    NoFrame,
    #[error("Could not capture the photo: {0}")]
    Capture(String),
}

impl CameraError {
    /// Map a DOM exception raised by `getUserMedia` to a camera error.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" => Self::PermissionDenied,
            "NotFoundError" | "OverconstrainedError" => Self::NoDevice,
            "NotReadableError" | "AbortError" => Self::Busy,
            "TypeError" | "NotSupportedError" => Self::Unsupported,
            _ => Self::Device(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug)]
enum CameraState<S> {
    Idle,
    Requesting(RequestTicket),
    Active(S),
}

#[derive(Debug)]
pub struct CameraSession<S: CameraStream> {
    state: CameraState<S>,
    next_ticket: u64,
}

impl<S: CameraStream> Default for CameraSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CameraStream> CameraSession<S> {
    pub fn new() -> Self {
        Self {
            state: CameraState::Idle,
            next_ticket: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CameraState::Active(_))
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.state, CameraState::Requesting(_))
    }

    pub fn stream(&self) -> Option<&S> {
        match &self.state {
            CameraState::Active(stream) => Some(stream),
            _ => None,
        }
    }

    /// Start a new access request, releasing any stream already held.
    pub fn request(&mut self) -> RequestTicket {
        self.release();
        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = CameraState::Requesting(ticket);
        ticket
    }

    /// Bind a granted stream. Returns false, after stopping the stream, when
    /// the request was cancelled or superseded in the meantime.
    pub fn grant(&mut self, ticket: RequestTicket, stream: S) -> bool {
        match self.state {
            CameraState::Requesting(pending) if pending == ticket => {
                tracing::debug!("Camera stream bound");
                self.state = CameraState::Active(stream);
                true
            }
            _ => {
                tracing::debug!("Discarding stale camera grant");
                stream.stop();
                false
            }
        }
    }

    /// Record a failed request. Returns false for a stale ticket, which
    /// leaves the session untouched.
    pub fn deny(&mut self, ticket: RequestTicket) -> bool {
        let pending = matches!(
            self.state,
            CameraState::Requesting(pending) if pending == ticket
        );
        if pending {
            self.state = CameraState::Idle;
        }
        pending
    }

    /// Run `capture` against the active stream, then release it whatever
    /// the outcome. Returns `None` when no stream is active.
    pub fn capture<T, E>(
        &mut self,
        capture: impl FnOnce(&S) -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        let result = self.stream().map(capture);
        if result.is_some() {
            self.release();
        }
        result
    }

    /// Stop and drop the active stream, or cancel a pending request.
    ///
    /// Idempotent. Returns true when a stream was actually stopped.
    pub fn release(&mut self) -> bool {
        match std::mem::replace(&mut self.state, CameraState::Idle) {
            CameraState::Active(stream) => {
                stream.stop();
                tracing::debug!("Camera stream released");
                true
            }
            CameraState::Requesting(_) => {
                tracing::debug!("Pending camera request cancelled");
                false
            }
            CameraState::Idle => false,
        }
    }
}

impl<S: CameraStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct FakeStream {
        stops: Rc<Cell<u32>>,
    }

    impl CameraStream for FakeStream {
        fn stop(&self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    fn active_session(stream: &FakeStream) -> CameraSession<FakeStream> {
        let mut session = CameraSession::new();
        let ticket = session.request();
        assert!(session.grant(ticket, stream.clone()));
        session
    }

    #[test]
    fn test_release_without_stream_is_noop() {
        let mut session = CameraSession::<FakeStream>::new();
        assert!(!session.release());
        assert!(!session.release());
        assert!(!session.is_active());
    }

    #[test]
    fn test_capture_then_cancel_releases_once() {
        let stream = FakeStream::default();
        let mut session = active_session(&stream);

        let frame = session.capture(|_| Ok::<_, CameraError>("frame"));
        assert_eq!(frame, Some(Ok("frame")));
        assert_eq!(stream.stops.get(), 1);
        assert!(!session.is_active());

        // cancel, then teardown
        assert!(!session.release());
        drop(session);
        assert_eq!(stream.stops.get(), 1);
    }

    #[test]
    fn test_failed_capture_still_releases() {
        let stream = FakeStream::default();
        let mut session = active_session(&stream);

        let frame = session.capture(|_| Err::<(), _>(CameraError::NoFrame));
        assert_eq!(frame, Some(Err(CameraError::NoFrame)));
        assert_eq!(stream.stops.get(), 1);
    }

    #[test]
    fn test_capture_without_stream() {
        let mut session = CameraSession::<FakeStream>::new();
        let frame = session.capture(|_| Ok::<_, CameraError>(()));
        assert!(frame.is_none());
    }

    #[test]
    fn test_cancel_while_active() {
        let stream = FakeStream::default();
        let mut session = active_session(&stream);
        assert!(session.release());
        assert!(!session.release());
        assert_eq!(stream.stops.get(), 1);
    }

    #[test]
    fn test_teardown_mid_capture_releases() {
        let stream = FakeStream::default();
        let session = active_session(&stream);
        drop(session);
        assert_eq!(stream.stops.get(), 1);
    }

    #[test]
    fn test_grant_after_cancel_is_stopped() {
        let stream = FakeStream::default();
        let mut session = CameraSession::new();
        let ticket = session.request();
        session.release();

        assert!(!session.grant(ticket, stream.clone()));
        assert!(!session.is_active());
        assert_eq!(stream.stops.get(), 1);
    }

    #[test]
    fn test_grant_after_teardown_is_stopped() {
        let stream = FakeStream::default();
        let session = Rc::new(std::cell::RefCell::new(CameraSession::new()));
        let ticket = session.borrow_mut().request();

        // component unmounts before the grant arrives
        session.borrow_mut().release();
        assert!(!session.borrow_mut().grant(ticket, stream.clone()));
        assert_eq!(stream.stops.get(), 1);
    }

    #[test]
    fn test_superseded_request() {
        let first = FakeStream::default();
        let second = FakeStream::default();
        let mut session = CameraSession::new();

        let old = session.request();
        let new = session.request();
        assert!(!session.grant(old, first.clone()));
        assert!(session.grant(new, second.clone()));
        assert_eq!(first.stops.get(), 1);
        assert_eq!(second.stops.get(), 0);

        // a denial for the stale ticket does not disturb the live stream
        assert!(!session.deny(old));
        assert!(session.is_active());
    }

    #[test]
    fn test_restart_releases_previous_stream() {
        let stream = FakeStream::default();
        let mut session = active_session(&stream);
        session.request();
        assert_eq!(stream.stops.get(), 1);
        assert!(session.is_requesting());
    }

    #[test]
    fn test_deny_returns_to_idle() {
        let mut session = CameraSession::<FakeStream>::new();
        let ticket = session.request();
        assert!(session.deny(ticket));
        assert!(!session.is_requesting());
        assert!(!session.is_active());
    }

    #[test]
    fn test_dom_exception_mapping() {
        let f = CameraError::from_dom_exception;
        assert_eq!(f("NotAllowedError", ""), CameraError::PermissionDenied);
        assert_eq!(f("NotFoundError", ""), CameraError::NoDevice);
        assert_eq!(f("NotReadableError", ""), CameraError::Busy);
        assert_eq!(
            f("WeirdError", "boom"),
            CameraError::Device("boom".to_string())
        );
    }
}
