//! Floor-plan drawing engine for the room designer.
//!
//! This crate is compiled to WebAssembly and runs inside the designer modal.
//! It owns the editing session: translating raw DOM input events into shape
//! mutations, zoom state, grid snapping, hit-testing, drawing the scene to a
//! canvas, and serializing the finished plan to SVG. The host component wires
//! DOM events to the engine and uploads the serialized markup; the engine
//! performs no network I/O.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser-bound [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`surface`] | [`surface::DrawingSurface`] capability trait and layout specs |
//! | [`doc`] | Shape types and the in-memory shape store |
//! | [`camera`] | Zoom state and coordinate conversions |
//! | [`grid`] | Grid snapping |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against shapes and resize handles |
//! | [`overlay`] | Geometry and key handling for the in-place text editor |
//! | [`svg`] | SVG serialization |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`consts`] | Shared numeric constants (zoom limits, default sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod input;
pub mod overlay;
pub mod render;
pub mod surface;
pub mod svg;
