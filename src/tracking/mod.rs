mod elements;
mod geometry;
mod presets;
mod tle;
mod vec3;

#[cfg(test)]
mod tests;

pub use elements::{EARTH_MU, EARTH_RADIUS_KM, OrbitalElements};
pub use geometry::{
    DEFAULT_ORBIT_SEGMENTS, FrameScale, altitude, current_radius, orbit_path, orbital_period,
    orbital_speed, position,
};
pub use presets::{OrbitClass, PresetObject, demo_objects, random_orbit};
pub use tle::{
    DEFAULT_CROSS_SECTION_M2, DEFAULT_MASS_KG, ParsedObject, TleRecord, parse_batch, parse_record,
};
pub use vec3::Vec3;
