//! Process-wide demo storage
//!
//! `produce_view` hands out a view over a buffer owned by the native side.
//! That buffer is an explicit singleton: it is created once, on the first
//! call to [`DemoStorage::init`] or [`DemoStorage::get`], and is never
//! freed before the process exits. Every caller sees the same buffer, and
//! it is never written after initialization, so sharing it needs no lock.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::core::{shape_size, Layout};
use crate::view::{MdView, ViewError, ViewShape};

/// Shape and contents of the demo buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub extents: [usize; 3],
    pub fill: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            extents: [4, 5, 6],
            fill: 1.0,
        }
    }
}

impl DemoConfig {
    /// Validate the extents and derive the row-major shape of the buffer
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Shape` if the element count overflows `usize`
    /// or the buffer would exceed `isize::MAX` bytes, the most a single
    /// allocation may hold.
    pub fn shape(&self) -> Result<ViewShape<3>, ViewError> {
        let too_large = || ViewError::Shape {
            extents: self.extents.to_vec(),
            capacity: MAX_ELEMENTS,
        };
        let required = shape_size(&self.extents)
            .filter(|&required| required <= MAX_ELEMENTS)
            .ok_or_else(too_large)?;
        ViewShape::fit(self.extents, Layout::RowMajor, required)
    }
}

/// The native-owned buffer behind `produce_view`
#[derive(Debug)]
pub struct DemoStorage {
    config: DemoConfig,
    data: &'static [f64],
    shape: ViewShape<3>,
}

/// Most `f64` elements one allocation can hold
const MAX_ELEMENTS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

static DEMO_STORAGE: OnceLock<DemoStorage> = OnceLock::new();

impl DemoStorage {
    /// Allocate the filled buffer without publishing it
    fn allocate(config: &DemoConfig, required: usize) -> Result<Vec<f64>, ViewError> {
        let mut data = Vec::new();
        data.try_reserve_exact(required).map_err(|e| {
            log::warn!("cannot allocate demo storage {:?}: {}", config, e);
            ViewError::Shape {
                extents: config.extents.to_vec(),
                capacity: 0,
            }
        })?;
        data.resize(required, config.fill);
        Ok(data)
    }

    /// Leak `data` so views over it can be `'static`
    fn publish(config: DemoConfig, shape: ViewShape<3>, data: Vec<f64>) -> Self {
        log::debug!("publishing demo storage {:?}", config);
        Self {
            config,
            data: Box::leak(data.into_boxed_slice()),
            shape,
        }
    }

    /// Initialize the singleton with `config`
    ///
    /// The first call wins. Later calls, and calls that lose a race with a
    /// concurrent `init`, return the existing storage unchanged, logging a
    /// warning if their config differs. Only the winner's buffer is leaked.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Shape` if the extents overflow or the buffer
    /// cannot be allocated. `config` is validated even when the singleton
    /// already exists.
    pub fn init(config: DemoConfig) -> Result<&'static DemoStorage, ViewError> {
        let shape = config.shape()?;

        let storage = match DEMO_STORAGE.get() {
            Some(storage) => storage,
            None => {
                let data = Self::allocate(&config, shape.total_size())?;
                DEMO_STORAGE.get_or_init(|| Self::publish(config.clone(), shape, data))
            }
        };

        if storage.config != config {
            log::warn!(
                "demo storage already initialized with {:?}, ignoring {:?}",
                storage.config,
                config
            );
        }
        Ok(storage)
    }

    /// The singleton, initialized with [`DemoConfig::default`] if needed
    pub fn get() -> &'static DemoStorage {
        DEMO_STORAGE.get_or_init(|| {
            let config = DemoConfig::default();
            let (shape, data) = config
                .shape()
                .and_then(|shape| Ok((shape, Self::allocate(&config, shape.total_size())?)))
                .expect("default demo extents fit in memory");
            Self::publish(config, shape, data)
        })
    }

    pub fn is_initialized() -> bool {
        DEMO_STORAGE.get().is_some()
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Read-only view over the whole buffer
    pub fn view(&'static self) -> MdView<'static, f64, 3> {
        MdView::from_shape(self.data, self.shape)
    }
}
