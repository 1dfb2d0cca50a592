pub const EPSILON: f32 = 1e-5;
/// Upper bound on bisection steps when projecting onto an ellipse. An `f32` interval over a
/// semi-axis is exhausted well before this.
pub const MAX_ELLIPSE_ITERATIONS: usize = 64;
/// Minimum interval between repeats of the same rate-limited log line.
pub const LOG_REPEAT_INTERVAL_SECS: u64 = 5;
