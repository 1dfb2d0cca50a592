//! Invariant checks that stay on in release builds. A failed check is a bug in this crate, not
//! bad input: malformed caller data is reported through [`ShapeError`](crate::shape::ShapeError).

pub fn assert_partial_ord<T: PartialOrd>(_: &T) {}
pub fn assert_same_type<T, U>(_: &T, _: &U) {}

#[allow(unused_macros)]
#[macro_export]
macro_rules! current_location {
    () => {
        format!("{}:{}", file!(), line!())
    };
}
#[allow(unused_imports)]
pub use current_location;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_le {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        $crate::util::assert::assert_partial_ord(&lhs);
        if lhs > rhs {
            panic!(
                "check failed: {}: {} <= {}: {:?} vs. {:?}",
                $crate::util::assert::current_location!(),
                stringify!($lhs),
                stringify!($rhs),
                lhs,
                rhs
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_le;
