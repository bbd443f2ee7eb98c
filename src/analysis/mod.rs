/// Analysis layer: from trajectories to an Avogadro-number estimate.
///
/// Architecture:
/// ```text
///            TrajectorySet
///           ┌──────┴───────┐
///           ▼              ▼
///   ┌────────────┐   ┌────────────┐
///   │ short_lag   │   │ full_lag    │   both built on `displacement`
///   └────────────┘   └────────────┘
///           │              │
///           │              ▼
///           │        ┌──────────┐
///           │        │  bucket   │  mean ± SEM per distinct elapsed time
///           │        └──────────┘
///           │              │
///           │              ▼
///           │        ┌──────────┐
///           │        │   fit     │  msd = a·t over the leading buckets
///           │        └──────────┘
///           ▼              │
///   ┌────────────┐         │
///   │ avogadro    │◄────────┘  (slope only as a cross-check)
///   └────────────┘
/// ```

pub mod avogadro;
pub mod bucket;
pub mod displacement;
pub mod fit;
pub mod full_lag;
pub mod short_lag;
pub mod stats;
