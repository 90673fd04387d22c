/// Logs a completed step.
///
/// Forwards to [`tracing::info!`] under the `scansheet::success` target so the
/// terminal formatter can render it differently from plain progress messages.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "scansheet::success", $($arg)*)
    };
}
