//! Mass-spring cloth simulation.
//!
//! `weft` advances a mesh of point masses connected by spring interactions
//! under internal spring forces and external forces (gravity, wind), with
//! one of two interchangeable integrators.
//!
//! # Features
//!
//! - **Euler integration**: Semi-implicit Euler with damped springs
//! - **Verlet integration**: Position Verlet with iterative constraint relaxation
//! - **Topology**: Rectangular grids or quad meshes (with seam vertex merging)
//!   turned into stretch, shear, and bend interactions
//! - **Tearing**: Interactions stretched past a ratio of their rest length break
//! - **Dragging**: Externally override a particle's position between ticks
//! - **Observable**: Monitor ticks via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use weft::{ExternalForce, GridSize, Simulation, SimulationConfig, TopologySource};
//!
//! let config = SimulationConfig::<f32>::new()
//!     .with_forces(vec![ExternalForce::gravity(9.8)])
//!     .with_fixed_particles(vec![0, 1, 2, 3]);
//! let mut sim = Simulation::new(config);
//! sim.load(&TopologySource::Grid(GridSize::new(4, 4))).unwrap();
//! for _ in 0..10 {
//!     sim.step(0.02).unwrap();
//! }
//! assert_eq!(sim.positions().len(), 16);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod interaction;
pub mod spring;
pub mod force;
pub mod grid;
pub mod mesh;
pub mod topology;
pub mod euler;
pub mod verlet;
pub mod integrator;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use interaction::{dedup_interactions, Interaction, InteractionKind};
pub use spring::{SpringParameters, SpringSettings};
pub use force::ExternalForce;
pub use grid::GridSize;
pub use mesh::PolygonMesh;
pub use topology::{Topology, TopologySource};
pub use euler::{EulerParticle, EulerSolver};
pub use verlet::{VerletParticle, VerletSolver};
pub use integrator::{Integrate, Integrator, StepContext};
pub use simulation::{Simulation, SimulationState};
pub use config::{EulerConstants, IntegratorKind, SimulationConfig, TearingConfig, VerletConstants};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
