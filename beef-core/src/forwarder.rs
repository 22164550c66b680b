//! ReportForwarder: sends assembled reports to an output sink on change.

use crate::output::{OutputError, OutputSink};
use crate::report::JoystickReport;

/// Forwards joystick reports to an [`OutputSink`], skipping reports that are
/// identical to the last one the host received.
///
/// The first report is always sent. A failed send leaves the cache
/// untouched and keeps the report as [`pending`](Self::pending) until a
/// later send succeeds. The caller decides when to [`retry`](Self::retry).
pub struct ReportForwarder<O> {
    output: O,
    last_sent: Option<JoystickReport>,
    pending: Option<JoystickReport>,
}

impl<O: OutputSink> ReportForwarder<O> {
    /// Create a forwarder that has not sent anything yet.
    pub fn new(output: O) -> Self {
        Self {
            output,
            last_sent: None,
            pending: None,
        }
    }

    /// Send `report` if it differs from the last one sent.
    ///
    /// Returns `Ok(true)` when a report went out and `Ok(false)` when it was
    /// skipped as a duplicate. A newer report replaces any pending one.
    pub async fn forward(&mut self, report: JoystickReport) -> Result<bool, OutputError> {
        self.pending = None;
        if self.last_sent == Some(report) {
            return Ok(false);
        }
        if let Err(e) = self.output.send(&report).await {
            self.pending = Some(report);
            return Err(e);
        }
        self.last_sent = Some(report);
        Ok(true)
    }

    /// Resend the report whose last send failed, if any.
    ///
    /// Returns `Ok(false)` when nothing was pending.
    pub async fn retry(&mut self) -> Result<bool, OutputError> {
        match self.pending {
            Some(report) => self.forward(report).await,
            None => Ok(false),
        }
    }

    /// The report whose last send failed, if it has not been sent since.
    pub fn pending(&self) -> Option<JoystickReport> {
        self.pending
    }

    /// Forget the last sent report so the next one is always transmitted.
    pub fn invalidate(&mut self) {
        self.last_sent = None;
    }

    /// The last report successfully sent, if any.
    pub fn last_sent(&self) -> Option<JoystickReport> {
        self.last_sent
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::Buttons;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    // Simple mock output sink
    struct MockOutput {
        sent: Arc<Mutex<Vec<JoystickReport>>>,
        fail_next: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail_next: false,
            }
        }
    }

    impl OutputSink for MockOutput {
        fn send(&mut self, report: &JoystickReport) -> impl Future<Output = Result<(), OutputError>> {
            let result = if self.fail_next {
                self.fail_next = false;
                Err(OutputError::Io)
            } else {
                self.sent.lock().unwrap().push(*report);
                Ok(())
            };
            core::future::ready(result)
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    fn report(x: i8, buttons: Buttons) -> JoystickReport {
        JoystickReport { x, buttons }
    }

    #[test]
    fn test_first_report_always_sent() {
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut forwarder = ReportForwarder::new(output);

        assert_eq!(block_on(forwarder.forward(JoystickReport::neutral())), Ok(true));
        assert_eq!(sent_ref.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut forwarder = ReportForwarder::new(output);

        let a = report(1, Buttons::START);
        let b = report(1, Buttons::NONE);
        for r in [a, a, b, b, b, a] {
            let _ = block_on(forwarder.forward(r));
        }

        let sent = sent_ref.lock().unwrap();
        assert_eq!(sent.as_slice(), &[a, b, a]);
    }

    #[test]
    fn test_failed_send_is_retried() {
        let mut output = MockOutput::new();
        output.fail_next = true;
        let sent_ref = output.sent.clone();
        let mut forwarder = ReportForwarder::new(output);

        let r = report(-1, Buttons::BUTTON_7);
        assert_eq!(block_on(forwarder.forward(r)), Err(OutputError::Io));
        assert_eq!(forwarder.last_sent(), None);

        assert_eq!(forwarder.pending(), Some(r));

        assert_eq!(block_on(forwarder.forward(r)), Ok(true));
        assert_eq!(forwarder.pending(), None);
        assert_eq!(sent_ref.lock().unwrap().as_slice(), &[r]);
    }

    #[test]
    fn test_retry_resends_failed_report_without_new_input() {
        let mut output = MockOutput::new();
        output.fail_next = true;
        let sent_ref = output.sent.clone();
        let mut forwarder = ReportForwarder::new(output);

        let r = report(1, Buttons::BUTTON_1);
        assert_eq!(block_on(forwarder.forward(r)), Err(OutputError::Io));
        assert_eq!(block_on(forwarder.retry()), Ok(true));
        assert_eq!(forwarder.last_sent(), Some(r));
        assert_eq!(sent_ref.lock().unwrap().as_slice(), &[r]);

        // Nothing left to resend.
        assert_eq!(block_on(forwarder.retry()), Ok(false));
        assert_eq!(sent_ref.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_newer_report_replaces_pending() {
        let mut output = MockOutput::new();
        output.fail_next = true;
        let sent_ref = output.sent.clone();
        let mut forwarder = ReportForwarder::new(output);

        let stale = report(1, Buttons::NONE);
        let fresh = report(0, Buttons::START);
        assert_eq!(block_on(forwarder.forward(stale)), Err(OutputError::Io));
        assert_eq!(block_on(forwarder.forward(fresh)), Ok(true));
        assert_eq!(forwarder.pending(), None);
        assert_eq!(block_on(forwarder.retry()), Ok(false));
        assert_eq!(sent_ref.lock().unwrap().as_slice(), &[fresh]);
    }

    #[test]
    fn test_invalidate_forces_resend() {
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut forwarder = ReportForwarder::new(output);

        let r = report(0, Buttons::AUX);
        assert_eq!(block_on(forwarder.forward(r)), Ok(true));
        assert_eq!(block_on(forwarder.forward(r)), Ok(false));
        forwarder.invalidate();
        assert_eq!(block_on(forwarder.forward(r)), Ok(true));
        assert_eq!(sent_ref.lock().unwrap().len(), 2);
    }
}
