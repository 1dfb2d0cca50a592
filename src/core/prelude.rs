#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use tracing::{debug, error, info, trace, warn};

#[allow(unused_imports)]
pub use crate::{
    collision::{
        contact::{ClipEdge, ContactGenerator, PointPair},
        support::{FarthestPoint, SupportQuery},
    },
    core::config::*,
    shape::{Shape, ShapeError, ShapePrimitive},
    util::{
        assert::*,
        linalg,
        linalg::{AxisAlignedExtent, Mat2x2, Rect, Transform, Vec2},
    },
};
