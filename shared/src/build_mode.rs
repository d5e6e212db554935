//! Build mode state machine
//!
//! Tracks whether a player is building, which piece is selected, and owns the
//! transient preview of that piece. Spawning and despawning the preview is
//! delegated to a [`PreviewSpawner`] so the same rules run against Bevy
//! `Commands` in the client and against plain fakes in tests.

use bevy::prelude::*;

use crate::building::{BuildMode, BuildPiece};

/// Spawn service for preview objects
pub trait PreviewSpawner {
    /// Owning handle to a spawned preview
    type Handle;

    /// Spawn a preview of `piece` at `transform`.
    fn spawn_preview(&mut self, piece: &BuildPiece, transform: Transform) -> Self::Handle;

    /// Destroy a preview previously returned by `spawn_preview`.
    fn despawn_preview(&mut self, handle: Self::Handle);
}

/// Per-player build mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildModeState {
    /// Whether build mode is currently active
    pub in_build_mode: bool,
    /// Currently selected build variant
    pub active_mode: BuildMode,
}

impl BuildModeState {
    /// Piece whose preview should exist right now, if any
    pub fn previewed_piece(&self) -> Option<BuildPiece> {
        if self.in_build_mode {
            self.active_mode.piece()
        } else {
            None
        }
    }
}

/// Result of a toggle, for logging and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTransition {
    Entered(BuildMode),
    Switched { from: BuildMode, to: BuildMode },
    Exited(BuildMode),
}

/// Build mode state plus the preview it owns.
///
/// The preview handle is `Some` only while [`BuildModeState::previewed_piece`]
/// is `Some`.
#[derive(Debug, Clone)]
pub struct BuildModeController<H> {
    state: BuildModeState,
    preview: Option<H>,
}

impl<H> Default for BuildModeController<H> {
    fn default() -> Self {
        Self {
            state: BuildModeState::default(),
            preview: None,
        }
    }
}

impl<H> BuildModeController<H> {
    /// Controller resuming from an existing state, with no preview yet.
    pub fn from_state(state: BuildModeState) -> Self {
        Self {
            state,
            preview: None,
        }
    }

    pub fn state(&self) -> BuildModeState {
        self.state
    }

    pub fn in_build_mode(&self) -> bool {
        self.state.in_build_mode
    }

    pub fn active_mode(&self) -> BuildMode {
        self.state.active_mode
    }

    pub fn preview(&self) -> Option<&H> {
        self.preview.as_ref()
    }

    /// Toggle the wall variant.
    pub fn toggle_wall_mode<S>(&mut self, spawner: &mut S) -> BuildTransition
    where
        S: PreviewSpawner<Handle = H>,
    {
        self.toggle_mode(BuildMode::Wall, spawner)
    }

    /// Toggle `mode`:
    /// - already active: leave build mode and destroy the preview
    /// - another mode active: switch to `mode`
    /// - not building: enter build mode with `mode`
    ///
    /// Toggling `BuildMode::None` leaves build mode.
    pub fn toggle_mode<S>(&mut self, mode: BuildMode, spawner: &mut S) -> BuildTransition
    where
        S: PreviewSpawner<Handle = H>,
    {
        let current = self.state.active_mode;
        if current == mode || mode == BuildMode::None {
            self.exit(spawner);
            BuildTransition::Exited(current)
        } else if self.state.in_build_mode {
            // The old variant's preview no longer matches the selection.
            self.clear_preview(spawner);
            self.state.active_mode = mode;
            BuildTransition::Switched { from: current, to: mode }
        } else {
            self.state.in_build_mode = true;
            self.state.active_mode = mode;
            BuildTransition::Entered(mode)
        }
    }

    /// Leave build mode from any state.
    pub fn exit<S>(&mut self, spawner: &mut S)
    where
        S: PreviewSpawner<Handle = H>,
    {
        self.state.in_build_mode = false;
        self.state.active_mode = BuildMode::None;
        self.clear_preview(spawner);
    }

    /// Per-frame update. While a piece is selected the previous preview is
    /// destroyed and a fresh one spawned in front of `actor`; otherwise nothing
    /// happens.
    pub fn on_tick<S>(&mut self, _delta_seconds: f32, actor: &Transform, spawner: &mut S)
    where
        S: PreviewSpawner<Handle = H>,
    {
        let Some(piece) = self.state.previewed_piece() else {
            return;
        };

        self.clear_preview(spawner);
        let transform = piece.placement.transform_for(actor);
        self.preview = Some(spawner.spawn_preview(&piece, transform));
    }

    fn clear_preview<S>(&mut self, spawner: &mut S)
    where
        S: PreviewSpawner<Handle = H>,
    {
        if let Some(handle) = self.preview.take() {
            spawner.despawn_preview(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every spawn/despawn and tracks which previews are alive
    #[derive(Default)]
    struct FakeSpawner {
        next: u32,
        alive: Vec<u32>,
        spawned: Vec<(BuildMode, Transform)>,
        despawned: Vec<u32>,
    }

    impl PreviewSpawner for FakeSpawner {
        type Handle = u32;

        fn spawn_preview(&mut self, piece: &BuildPiece, transform: Transform) -> u32 {
            self.next += 1;
            self.alive.push(self.next);
            self.spawned.push((piece.mode, transform));
            self.next
        }

        fn despawn_preview(&mut self, handle: u32) {
            self.alive.retain(|h| *h != handle);
            self.despawned.push(handle);
        }
    }

    fn building(mode: BuildMode) -> BuildModeController<u32> {
        BuildModeController::from_state(BuildModeState {
            in_build_mode: true,
            active_mode: mode,
        })
    }

    #[test]
    fn test_toggle_from_idle_enters_wall() {
        let mut spawner = FakeSpawner::default();
        let mut controller = BuildModeController::<u32>::default();

        let transition = controller.toggle_wall_mode(&mut spawner);

        assert_eq!(transition, BuildTransition::Entered(BuildMode::Wall));
        assert!(controller.in_build_mode());
        assert_eq!(controller.active_mode(), BuildMode::Wall);
        assert!(spawner.spawned.is_empty());
    }

    #[test]
    fn test_toggle_in_wall_exits_and_destroys_preview() {
        let mut spawner = FakeSpawner::default();
        let mut controller = building(BuildMode::Wall);
        controller.on_tick(0.016, &Transform::default(), &mut spawner);
        assert_eq!(spawner.alive.len(), 1);

        let transition = controller.toggle_wall_mode(&mut spawner);

        assert_eq!(transition, BuildTransition::Exited(BuildMode::Wall));
        assert!(!controller.in_build_mode());
        assert_eq!(controller.active_mode(), BuildMode::None);
        assert!(controller.preview().is_none());
        assert!(spawner.alive.is_empty());
    }

    #[test]
    fn test_toggle_from_other_mode_switches_to_wall() {
        let mut spawner = FakeSpawner::default();
        let mut controller = building(BuildMode::Floor);

        let transition = controller.toggle_wall_mode(&mut spawner);

        assert_eq!(
            transition,
            BuildTransition::Switched {
                from: BuildMode::Floor,
                to: BuildMode::Wall
            }
        );
        assert!(controller.in_build_mode());
        assert_eq!(controller.active_mode(), BuildMode::Wall);
    }

    #[test]
    fn test_switching_drops_previous_variant_preview() {
        let mut spawner = FakeSpawner::default();
        let mut controller = building(BuildMode::Stairs);
        controller.on_tick(0.016, &Transform::default(), &mut spawner);

        controller.toggle_wall_mode(&mut spawner);

        assert!(controller.preview().is_none());
        assert!(spawner.alive.is_empty());

        controller.on_tick(0.016, &Transform::default(), &mut spawner);
        assert_eq!(spawner.spawned.last().map(|(mode, _)| *mode), Some(BuildMode::Wall));
    }

    #[test]
    fn test_tick_while_building_replaces_preview() {
        let mut spawner = FakeSpawner::default();
        let mut controller = building(BuildMode::Wall);
        let actor = Transform::default();

        controller.on_tick(0.016, &actor, &mut spawner);
        assert_eq!(spawner.spawned.len(), 1);
        assert!(spawner.despawned.is_empty());

        for tick in 2..=5 {
            controller.on_tick(0.016, &actor, &mut spawner);
            assert_eq!(spawner.spawned.len(), tick);
            assert_eq!(spawner.despawned.len(), tick - 1);
            assert_eq!(spawner.alive.len(), 1);
        }
        assert_eq!(controller.preview(), spawner.alive.first());
    }

    #[test]
    fn test_tick_while_idle_does_nothing() {
        let mut spawner = FakeSpawner::default();
        let mut controller = BuildModeController::<u32>::default();

        for _ in 0..10 {
            controller.on_tick(0.016, &Transform::default(), &mut spawner);
        }

        assert!(spawner.spawned.is_empty());
        assert!(spawner.despawned.is_empty());
        assert!(controller.preview().is_none());
    }

    #[test]
    fn test_double_toggle_returns_to_idle() {
        let mut spawner = FakeSpawner::default();
        let mut controller = BuildModeController::<u32>::default();

        controller.toggle_wall_mode(&mut spawner);
        controller.on_tick(0.016, &Transform::default(), &mut spawner);
        controller.toggle_wall_mode(&mut spawner);

        assert_eq!(controller.state(), BuildModeState::default());
        assert!(controller.preview().is_none());
        assert!(spawner.alive.is_empty());
    }

    #[test]
    fn test_exit_from_any_state() {
        let mut spawner = FakeSpawner::default();
        for mode in [BuildMode::None, BuildMode::Wall, BuildMode::Floor] {
            let mut controller = building(mode);
            controller.on_tick(0.016, &Transform::default(), &mut spawner);
            controller.exit(&mut spawner);
            assert_eq!(controller.state(), BuildModeState::default());
            assert!(controller.preview().is_none());
        }
        assert!(spawner.alive.is_empty());
    }

    #[test]
    fn test_preview_spawned_at_wall_placement() {
        let mut spawner = FakeSpawner::default();
        let mut controller = building(BuildMode::Wall);
        let actor = Transform::from_xyz(0.0, 1.0, 0.0);

        controller.on_tick(0.016, &actor, &mut spawner);

        let (_, transform) = spawner.spawned[0];
        assert!((transform.translation - Vec3::new(0.0, 1.54, -2.5)).length() < 1e-5);
    }
}
