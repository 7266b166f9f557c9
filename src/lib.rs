// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Touch navigation for orbit-camera 3D views.
//!
//! Orbitnav turns raw touch samples into disambiguated gestures (tap,
//! double tap, long press, drag, pinch), keeps drag momentum alive after
//! release, and maps those gestures onto an orbiting camera that can also
//! play eased transitions between named views.
//!
//! # Key entry points
//!
//! - [`engine::NavigationController`] - touch in, camera pose out, one
//!   [`frame`](engine::NavigationController::frame) call per rendered frame
//! - [`input::GestureRecognizer`] - the gesture state machine on its own
//! - [`camera::CameraAnimator`] - timed pose transitions and manual orbit
//! - [`options::Options`] - thresholds, camera limits and transition
//!   presets, loadable from TOML
//!
//! # Architecture
//!
//! Nothing runs in the background. Deferred decisions (long press, tap
//! confirmation) are explicit timers that fire when the host supplies a
//! later timestamp, and animations advance only through
//! [`tick`](camera::CameraAnimator::tick). A host that stops calling
//! `frame` stops all motion.

pub mod camera;
/// Camera-owning navigation controller.
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod util;

pub use engine::{FrameOutput, NavigationController};
pub use error::NavError;
pub use options::Options;
