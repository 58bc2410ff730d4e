pub mod geometry;
pub mod work_timer;

use ahash::AHashMap;
pub type SmallKeyHashMap<K, V> = AHashMap<K, V>;

// Re-exports.
pub use approx;
pub use bytemuck;
pub use glam;
pub use static_assertions;
