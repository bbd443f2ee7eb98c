/// Data layer: trajectory types, loading, and synthetic generation.
///
/// Architecture:
/// ```text
///  traj1.txt / traj2.txt / traj3.txt  (t,x,y per line)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Trajectory
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ TrajectorySet  │  Vec<Trajectory>, each independently sized
///   └───────────────┘
/// ```
///
/// `synth` produces the same shapes from a seeded random walk, for the
/// sample generator and for tests.

pub mod loader;
pub mod model;
pub mod synth;
