//! The injected scene-controller contract.
//!
//! Door passage produces [`voidgate_core::SceneCommand`]s; whoever embeds
//! the runtime decides what loading a scene or ending the game actually
//! means. The runtime holds an explicit handle to the controller rather
//! than reaching for a process-wide singleton, and an absent controller is
//! a logged no-op, never a crash.

/// Scene transition and end-of-game sink.
pub trait SceneDirector: Send + Sync {
    fn load_scene(&self, name: &str);
    fn end_game(&self);
}
