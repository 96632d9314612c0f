//! Lock-free parameter handoff between a control thread and the audio thread.
//!
//! Parameter values are stored as atomic `u32` (f32 bit-cast). A sequence
//! counter around every write lets the audio side detect a set torn by a
//! concurrent [`SharedParams::publish`] and retry, without ever blocking.
//!
//! ```text
//! control thread                         audio thread
//! ──────────────                         ────────────
//! publish(&params) ──► [AtomicU32; 6] ──► snapshot() once per block
//! set_value(i, v)  ──►                    └► engine.process(.., &snapshot)
//! ```

use core::hint::spin_loop;
use core::sync::atomic::{AtomicU32, Ordering, fence};

use frogg_core::{ParamDescriptor, ParameterInfo};

use crate::params::{
    DEPTH, DRY_WET, FEEDBACK, ModulationParams, ModulationType, PARAM_COUNT, PARAM_DESCRIPTORS,
    PHASE_OFFSET, RATE, TYPE,
};

/// Snapshot attempts before settling for the last (possibly mixed) read.
const SNAPSHOT_RETRIES: usize = 8;

/// Atomic store of the six engine parameters.
///
/// `Sync`; share it behind an `Arc`. Every stored value has been clamped to
/// its descriptor range, so even a torn read yields in-range parameters.
///
/// # Example
///
/// ```rust
/// use frogg_engine::{ModulationParams, SharedParams};
///
/// let shared = SharedParams::default();
/// shared.publish(&ModulationParams { rate: 2.0, ..ModulationParams::default() });
///
/// assert_eq!(shared.snapshot().rate, 2.0);
/// ```
pub struct SharedParams {
    /// Current values, f32 bit-cast, in parameter index order.
    values: [AtomicU32; PARAM_COUNT],
    /// Odd while a write is in progress.
    sequence: AtomicU32,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(&ModulationParams::default())
    }
}

impl SharedParams {
    /// Create a store holding `params` (clamped).
    pub fn new(params: &ModulationParams) -> Self {
        let params = params.clamped();
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(params.get_param(i).to_bits())),
            sequence: AtomicU32::new(0),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Descriptor of the parameter at `index`.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        PARAM_DESCRIPTORS.get(index)
    }

    /// Replace the whole parameter set in one publish.
    ///
    /// Intended for a single control-side writer. Values are clamped first.
    pub fn publish(&self, params: &ModulationParams) {
        let params = params.clamped();
        self.write_begin();
        for (i, atomic) in self.values.iter().enumerate() {
            atomic.store(params.get_param(i).to_bits(), Ordering::Relaxed);
        }
        self.write_end();
    }

    /// Set one parameter, clamped to its range. Out-of-range indices are ignored.
    pub fn set_value(&self, index: usize, value: f32) {
        let (Some(desc), Some(atomic)) = (PARAM_DESCRIPTORS.get(index), self.values.get(index))
        else {
            return;
        };
        let clamped = desc.clamp(value);
        self.write_begin();
        atomic.store(clamped.to_bits(), Ordering::Relaxed);
        self.write_end();
    }

    /// Current value of one parameter, `0.0` for out-of-range indices.
    pub fn value(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
            .unwrap_or(0.0)
    }

    /// Read a consistent parameter set.
    ///
    /// Lock-free and allocation-free. Retries a bounded number of times while
    /// a publish is in flight; after that returns the last read, which may mix
    /// two publishes but never holds an out-of-range value.
    pub fn snapshot(&self) -> ModulationParams {
        let mut last = self.read_values();
        for _ in 0..SNAPSHOT_RETRIES {
            let start = self.sequence.load(Ordering::Acquire);
            if start % 2 == 1 {
                spin_loop();
                continue;
            }
            last = self.read_values();
            fence(Ordering::Acquire);
            if self.sequence.load(Ordering::Relaxed) == start {
                return last;
            }
            spin_loop();
        }
        last
    }

    fn write_begin(&self) {
        self.sequence.fetch_add(1, Ordering::Relaxed);
        fence(Ordering::Release);
    }

    fn write_end(&self) {
        self.sequence.fetch_add(1, Ordering::Release);
    }

    fn read_values(&self) -> ModulationParams {
        let load = |i: usize| f32::from_bits(self.values[i].load(Ordering::Relaxed));
        ModulationParams {
            dry_wet: load(DRY_WET),
            depth: load(DEPTH),
            rate: load(RATE),
            phase_offset: load(PHASE_OFFSET),
            feedback: load(FEEDBACK),
            mod_type: ModulationType::from_value(load(TYPE)),
        }
    }
}

impl core::fmt::Debug for SharedParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedParams")
            .field("params", &self.snapshot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let shared = SharedParams::default();
        assert_eq!(shared.snapshot(), ModulationParams::default());
        assert_eq!(shared.param_count(), 6);
    }

    #[test]
    fn test_publish_clamps() {
        let shared = SharedParams::default();
        shared.publish(&ModulationParams {
            feedback: 5.0,
            rate: -2.0,
            mod_type: ModulationType::Chorus,
            ..ModulationParams::default()
        });

        let snap = shared.snapshot();
        assert_eq!(snap.feedback, 0.98);
        assert_eq!(snap.rate, 0.1);
        assert_eq!(snap.mod_type, ModulationType::Chorus);
    }

    #[test]
    fn test_set_value_and_value() {
        let shared = SharedParams::default();
        shared.set_value(DEPTH, 0.25);
        assert_eq!(shared.value(DEPTH), 0.25);

        shared.set_value(PHASE_OFFSET, 9.0);
        assert_eq!(shared.value(PHASE_OFFSET), 1.1);

        shared.set_value(TYPE, 0.0);
        assert_eq!(shared.snapshot().mod_type, ModulationType::Chorus);
    }

    #[test]
    fn test_out_of_range_index_safe() {
        let shared = SharedParams::default();
        shared.set_value(99, 1.0);
        assert_eq!(shared.value(99), 0.0);
        assert!(shared.descriptor(99).is_none());
        assert_eq!(shared.descriptor(RATE).map(|d| d.string_id), Some("rate"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_concurrent_snapshots_stay_in_range() {
        use std::sync::Arc;
        use std::sync::atomic::AtomicBool;

        let shared = Arc::new(SharedParams::default());
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let shared = Arc::clone(&shared);
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut i = 0u32;
                while !done.load(Ordering::Relaxed) {
                    let t = (i % 100) as f32 / 99.0;
                    shared.publish(&ModulationParams {
                        dry_wet: t,
                        depth: 1.0 - t,
                        rate: 0.1 + t * 19.9,
                        phase_offset: t * 1.1,
                        feedback: t * 0.98,
                        mod_type: if i % 2 == 0 {
                            ModulationType::Chorus
                        } else {
                            ModulationType::Flanger
                        },
                    });
                    i = i.wrapping_add(1);
                }
            })
        };

        for _ in 0..20_000 {
            let snap = shared.snapshot();
            assert!((0.0..=1.0).contains(&snap.dry_wet));
            assert!((0.0..=1.0).contains(&snap.depth));
            assert!((0.1..=20.0).contains(&snap.rate));
            assert!((0.0..=1.1).contains(&snap.phase_offset));
            assert!((0.0..=0.98).contains(&snap.feedback));
        }

        done.store(true, Ordering::Relaxed);
        writer.join().unwrap();
    }
}
