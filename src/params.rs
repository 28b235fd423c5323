// Parameter cells - Plain get/set state used by the sequencer
// Observers compare `version()` between polls to detect changes

/// Typed parameter cell
///
/// The sequencer only needs `get`/`set`. The version counter lets a UI or
/// host notice changes (e.g. the playhead) without a subscription API.
#[derive(Debug, Clone, Copy)]
pub struct Param<T: Copy + PartialEq> {
    value: T,
    version: u32,
}

impl<T: Copy + PartialEq> Param<T> {
    pub const fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Set the value; the version only moves when the value actually changes
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.version = self.version.wrapping_add(1);
        }
    }

    /// Change counter, bumped on every effective `set`
    pub fn version(&self) -> u32 {
        self.version
    }
}

impl<T: Copy + PartialEq + Default> Default for Param<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
