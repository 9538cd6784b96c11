//! Simulation dynamics: external forces and constraint relaxation.

pub mod forces;
pub mod solver;

pub use forces::{ConstantForce, DragForce, ForceGenerator, ForceRegistry, PointAttractor};
pub use solver::ConstraintSolver;
