//! Soft limit validation

use super::AxisState;

/// A candidate position outside the established travel interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LimitViolation {
    /// The rejected position
    pub candidate: i32,
    /// Lower bound of the admissible interval
    pub zero: i32,
    /// Upper bound of the admissible interval
    pub max: i32,
}

/// Check whether `candidate` lies within the axis travel limits
///
/// Before limits are established every candidate is admissible. After,
/// the closed interval `[zero_reference, max_reference]` applies. An
/// inverted interval (max below zero) admits nothing.
pub fn admissible(axis: &AxisState, candidate: i32) -> bool {
    !axis.limits_established()
        || (axis.zero_reference() <= candidate && candidate <= axis.max_reference())
}

/// Like [`admissible`] but describing the violation
pub(crate) fn check(axis: &AxisState, candidate: i32) -> Result<i32, LimitViolation> {
    if admissible(axis, candidate) {
        Ok(candidate)
    } else {
        Err(LimitViolation {
            candidate,
            zero: axis.zero_reference(),
            max: axis.max_reference(),
        })
    }
}
