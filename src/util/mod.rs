use anyhow::Result;
use tracing_subscriber::fmt::time::OffsetTime;

pub mod assert;
pub mod linalg;
pub mod log;

pub mod gg_float {
    use crate::core::config::EPSILON;
    use crate::util::linalg::Vec2;
    use num_traits::Zero;
    use std::num::FpCategory;

    pub trait GgFloat {
        fn is_finite(&self) -> bool;
    }

    impl GgFloat for f32 {
        fn is_finite(&self) -> bool {
            is_finite(*self)
        }
    }

    impl GgFloat for Vec2 {
        fn is_finite(&self) -> bool {
            is_finite(self.x) && is_finite(self.y)
        }
    }

    // Subnormals count as finite here: they show up legitimately as tiny coordinates.
    pub fn is_finite(x: f32) -> bool {
        matches!(
            x.classify(),
            FpCategory::Zero | FpCategory::Normal | FpCategory::Subnormal
        )
    }

    pub fn force_positive_zero(x: f32) -> f32 {
        if x.is_zero() { 0.0 } else { x }
    }

    /// Like [`f32::signum`], but anything within [`EPSILON`] of zero has sign zero.
    pub fn sign_eps(x: f32) -> i32 {
        if x.abs() < EPSILON {
            0
        } else if x > 0.0 {
            1
        } else {
            -1
        }
    }
}

pub mod gg_iter {
    pub trait GgFloatIter: Iterator<Item = f32> {
        /// Returns the index of the largest value. Ties keep the first index; NaN is never chosen
        /// unless every value is NaN.
        fn position_max_f32(self) -> Option<usize>
        where
            Self: Sized,
        {
            self.enumerate()
                .fold(None, |best: Option<(usize, f32)>, (i, x)| match best {
                    None => Some((i, x)),
                    Some((_, m)) if m.is_nan() && !x.is_nan() => Some((i, x)),
                    Some((_, m)) if x > m => Some((i, x)),
                    best => best,
                })
                .map(|(i, _)| i)
        }
    }

    impl<T: Iterator<Item = f32>> GgFloatIter for T {}
}

/// Installs a stdout `tracing` subscriber with a UTC wall-clock timer and source locations.
pub fn setup_log() -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_max_level(tracing::Level::TRACE)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(())
}
