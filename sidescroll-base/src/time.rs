//! Data types for simulated time.

use core::fmt;
use core::num::NonZeroU32;

use manyfmt::Refmt as _;

use crate::util::ConciseDebug;

#[doc(no_inline)]
pub use core::time::Duration;

// -------------------------------------------------------------------------------------------------

/// Specifies an amount of time passing “in game”, supplied to each simulation step.
///
/// [`Tick`] values are passed along through the `step()` operations that advance time.
/// The simulation does not keep its own clock; the application's frame loop decides the
/// step length and produces one [`Tick`] per fixed step.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Tick {
    /// Length of this step.
    delta_t: Duration,

    /// Whether game time is paused, and `delta_t` should not be considered
    /// as an amount of game time passing. See [`Self::paused()`] for details.
    paused: bool,
}

impl Tick {
    /// A tick of arbitrary length, for testing purposes. Do not use this for actual gameplay.
    #[inline]
    pub const fn arbitrary() -> Self {
        Self::per_second(NonZeroU32::new(60).unwrap())
    }

    /// Construct a non-paused [`Tick`] whose length is `1 / rate` seconds, such as
    /// `Tick::per_second(60)` for a typical fixed step.
    #[inline]
    pub const fn per_second(rate: NonZeroU32) -> Self {
        Self {
            delta_t: Duration::from_nanos(1_000_000_000 / rate.get() as u64),
            paused: false,
        }
    }

    /// Construct a non-paused [`Tick`] from a duration expressed in fractional seconds.
    ///
    /// Negative and NaN inputs produce a zero-length tick.
    #[inline]
    pub fn from_seconds(dt: f64) -> Self {
        Self {
            // `as` saturates, mapping negative and NaN to zero.
            delta_t: Duration::from_nanos((dt * 1e9) as u64),
            paused: false,
        }
    }

    /// Returns the amount of time passed, as a floating-point number of seconds.
    ///
    /// This is always zero or positive, and never NaN.
    #[inline]
    pub fn delta_t(self) -> f64 {
        self.delta_t.as_secs_f64()
    }

    /// Set the paused flag. See [`Tick::paused`] for more information.
    #[inline]
    #[must_use]
    pub const fn pause(self) -> Self {
        Self {
            paused: true,
            ..self
        }
    }

    /// Returns the "paused" state of this Tick. If true, then step operations should
    /// not perform any changes that reflect "in-game" time passing.
    #[inline]
    pub const fn paused(&self) -> bool {
        self.paused
    }

    /// Returns whether this tick advances nothing: it is paused or has zero length.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.paused || self.delta_t.is_zero()
    }
}

impl fmt::Debug for Tick {
    #[mutants::skip]
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { delta_t, paused } = *self;
        f.debug_struct("Tick")
            .field("delta_t", &delta_t.refmt(&ConciseDebug))
            .field("paused", &paused)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
