// Optional `tracing` hooks. Without the `tracing` feature every macro
// expands to a no-op that still evaluates its arguments by reference.

#[cfg(feature = "tracing")]
macro_rules! trace_op {
    ($op:expr, $width:expr, $height:expr) => {
        tracing::trace!(target: "gauze", op = $op, width = $width, height = $height, "filter")
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_op {
    ($op:expr, $width:expr, $height:expr) => {{
        let _ = (&$op, &$width, &$height);
    }};
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($msg:literal, $($field:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(target: "gauze", $($field = $value),+, $msg)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($msg:literal, $($field:ident = $value:expr),+ $(,)?) => {{
        let _ = ($(&$value),+);
    }};
}
