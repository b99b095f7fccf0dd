//! Encoder Input
//!
//! Everything that runs in the edge-interrupt context: turning raw line
//! samples into detents and button edges, and the lock-free state shared
//! with the control loop. Nothing here blocks or allocates.

pub mod aggregator;
pub mod debounce;
pub mod quadrature;

pub use aggregator::DetentCounter;
pub use debounce::{ButtonEdge, ButtonLatch, SwitchDebouncer};
pub use quadrature::{decode, QuadratureDecoder};
