//! Per-frame entity behavior.

use bulkkot_core::Surface;

/// Anything the scene advances and paints once per frame.
///
/// `update` advances one simulated frame and reports whether the entity
/// should stay in its owning collection; `draw` paints the current state.
pub trait Entity {
    /// Advance one frame. Returns false once the entity is done and should
    /// be removed.
    fn update(&mut self, rng: &mut fastrand::Rng) -> bool;

    /// Paint the entity onto the surface.
    fn draw(&self, surface: &mut dyn Surface);
}

/// Update every entity in place and drop the ones that report done.
///
/// Survivors keep their relative order, and no element is skipped while
/// removing — the in-place equivalent of walking the collection in reverse
/// index order.
pub fn retain_alive<E: Entity>(entities: &mut Vec<E>, rng: &mut fastrand::Rng) {
    entities.retain_mut(|entity| entity.update(rng));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal entity that lives for a fixed number of ticks.
    struct Countdown {
        id: usize,
        ticks_left: u32,
    }

    impl Entity for Countdown {
        fn update(&mut self, _rng: &mut fastrand::Rng) -> bool {
            self.ticks_left -= 1;
            self.ticks_left > 0
        }

        fn draw(&self, _surface: &mut dyn Surface) {}
    }

    #[test]
    fn test_retain_alive_removes_exactly_the_dead() {
        let mut rng = fastrand::Rng::with_seed(7);
        // Entities 1 and 3 die on the first tick.
        let mut entities = vec![
            Countdown { id: 0, ticks_left: 3 },
            Countdown { id: 1, ticks_left: 1 },
            Countdown { id: 2, ticks_left: 5 },
            Countdown { id: 3, ticks_left: 1 },
            Countdown { id: 4, ticks_left: 2 },
        ];

        retain_alive(&mut entities, &mut rng);

        let survivors: Vec<usize> = entities.iter().map(|e| e.id).collect();
        assert_eq!(survivors, vec![0, 2, 4]);
    }

    #[test]
    fn test_retain_alive_drains_everything_eventually() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut entities: Vec<Countdown> = (1..=4usize)
            .map(|n| Countdown {
                id: n,
                ticks_left: n as u32,
            })
            .collect();

        for _ in 0..4 {
            retain_alive(&mut entities, &mut rng);
        }
        assert!(entities.is_empty());
    }
}
