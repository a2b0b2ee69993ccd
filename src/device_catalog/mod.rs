pub mod cpal_enumerator;
pub mod descriptor;
pub mod device_catalog;
pub mod device_map;
pub mod enumerator;
mod tests;

pub use cpal_enumerator::CpalEnumerator;
pub use descriptor::DeviceDescriptor;
pub use device_catalog::DeviceCatalog;
pub use device_map::DeviceMap;
pub use enumerator::{DeviceEnumerator, EnumerateError};
