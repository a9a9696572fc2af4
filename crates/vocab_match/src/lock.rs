use bevy::prelude::*;

/// Single-permit gate around the clipboard snap/swap animation. While the
/// permit is out, new drag gestures are ignored and the lane registry may
/// only change at the commit point that releases it.
#[derive(Resource, Debug, Default)]
pub struct SwapLock {
    held: bool,
}

impl SwapLock {
    /// Take the permit. Returns false, changing nothing, if a snap or
    /// swap is already in flight.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            false
        } else {
            self.held = true;
            true
        }
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub const fn is_held(&self) -> bool {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_permit_exists() {
        let mut lock = SwapLock::default();
        assert!(!lock.is_held());
        assert!(lock.try_acquire());
        assert!(lock.is_held());
        assert!(!lock.try_acquire());
        assert!(lock.is_held());
    }

    #[test]
    fn release_makes_the_permit_available_again() {
        let mut lock = SwapLock::default();
        assert!(lock.try_acquire());
        lock.release();
        assert!(!lock.is_held());
        assert!(lock.try_acquire());
    }
}
