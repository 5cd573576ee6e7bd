//! Shared configuration for planar alignment and point cloud processing
pub mod coordinate_system;
pub mod processing;
pub mod tolerance;
